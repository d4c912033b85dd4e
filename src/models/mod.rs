pub mod alerts;
pub mod applications;
pub mod contracts;
pub mod deliveries;
pub mod disputes;
pub mod users;

use serde::Serialize;

/// Envelope for offset-paginated listings: items plus total/page bookkeeping.
#[derive(Debug, Clone, Serialize)]
pub struct Paginated<T> {
    pub items: Vec<T>,
    pub total: u64,
    pub page: u64,
    pub pages: u64,
}

impl<T> Paginated<T> {
    pub fn new(items: Vec<T>, total: u64, page: u64, limit: u64) -> Self {
        let pages = total.div_ceil(limit.max(1));
        Self {
            items,
            total,
            page,
            pages,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_count_rounds_up() {
        let p = Paginated::new(vec![1, 2, 3], 21, 1, 10);
        assert_eq!(p.pages, 3);

        let exact = Paginated::new(Vec::<i32>::new(), 20, 2, 10);
        assert_eq!(exact.pages, 2);

        let empty = Paginated::new(Vec::<i32>::new(), 0, 1, 10);
        assert_eq!(empty.pages, 0);
    }
}
