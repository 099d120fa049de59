use serde::Serialize;

pub mod conversations;
pub mod skills;
pub mod workers;

#[derive(Debug, Serialize)]
pub struct Paged<T> {
    pub total: i64,
    pub page: u32,
    pub per_page: u32,
    pub total_pages: u32,
    pub prev_page: Option<u32>,
    pub next_page: Option<u32>,
    pub items: Vec<T>,
}

impl<T> Paged<T> {
    pub fn new(total: i64, page: u32, per_page: u32, items: Vec<T>) -> Self {
        let total_pages = if total <= 0 {
            0
        } else {
            (total as u64).div_ceil(per_page as u64) as u32
        };
        let prev_page = (page > 1).then(|| page - 1);
        let next_page = (page < total_pages).then(|| page + 1);
        Self {
            total,
            page,
            per_page,
            total_pages,
            prev_page,
            next_page,
            items,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn thirteen_results_make_two_pages() {
        let paged = Paged::new(13, 2, 12, vec![0u8]);
        assert_eq!(paged.total, 13);
        assert_eq!(paged.total_pages, 2);
        assert_eq!(paged.prev_page, Some(1));
        assert_eq!(paged.next_page, None);
    }

    #[test]
    fn first_page_has_no_prev_link() {
        let paged = Paged::new(13, 1, 12, vec![0u8; 12]);
        assert_eq!(paged.prev_page, None);
        assert_eq!(paged.next_page, Some(2));
    }

    #[test]
    fn empty_result_has_no_pages() {
        let paged = Paged::<u8>::new(0, 1, 12, vec![]);
        assert_eq!(paged.total_pages, 0);
        assert_eq!(paged.prev_page, None);
        assert_eq!(paged.next_page, None);
    }
}
