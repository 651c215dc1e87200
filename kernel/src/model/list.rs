#[derive(Debug)]
pub struct PaginatedList<T> {
    pub total: i64,
    pub limit: i64,
    pub page: i64,
    pub items: Vec<T>,
}

impl<T> PaginatedList<T> {
    pub fn last_page(&self) -> i64 {
        if self.total == 0 || self.limit <= 0 {
            return 1;
        }
        (self.total + self.limit - 1) / self.limit
    }
}
