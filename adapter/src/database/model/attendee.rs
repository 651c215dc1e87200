use chrono::{DateTime, Utc};
use kernel::model::{attendee::Attendee, id::AttendeeId};

#[derive(sqlx::FromRow)]
pub struct AttendeeRow {
    pub attendee_id: AttendeeId,
    pub name: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<AttendeeRow> for Attendee {
    fn from(value: AttendeeRow) -> Self {
        let AttendeeRow {
            attendee_id,
            name,
            email,
            created_at,
            updated_at,
        } = value;
        Attendee {
            attendee_id,
            name,
            email,
            created_at,
            updated_at,
        }
    }
}
