use crate::model::id::AttendeeId;

#[derive(Debug)]
pub struct CreateAttendee {
    pub name: String,
    pub email: String,
}

// 指定されたフィールドのみ更新する
#[derive(Debug)]
pub struct UpdateAttendee {
    pub attendee_id: AttendeeId,
    pub name: Option<String>,
    pub email: Option<String>,
}

#[derive(Debug)]
pub struct DeleteAttendee {
    pub attendee_id: AttendeeId,
}
