//! Page slicing.
//!
//! Pagination never fails: out-of-range pages are clamped, an empty result still
//! has one (empty) page, and a zero page size is treated as one.

use serde::Serialize;

use crate::model::Record;

/// One page of matched records plus the counts a pager needs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResultPage {
    pub items: Vec<Record>,
    pub match_count: usize,
    pub total_pages: usize,
    /// The effective, clamped page number (1-based).
    pub page: usize,
    pub page_size: usize,
}

impl ResultPage {
    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }

    pub fn has_prev(&self) -> bool {
        self.page > 1
    }
}

/// `ceil(match_count / page_size)`, never below 1.
pub fn total_pages(match_count: usize, page_size: usize) -> usize {
    match_count.div_ceil(page_size.max(1)).max(1)
}

/// Clamp a requested page into `[1, total_pages]`.
pub fn clamp_page(page: usize, total_pages: usize) -> usize {
    page.clamp(1, total_pages.max(1))
}

pub fn paginate(records: &[&Record], page: usize, page_size: usize) -> ResultPage {
    let page_size = page_size.max(1);
    let match_count = records.len();
    let total_pages = total_pages(match_count, page_size);
    let page = clamp_page(page, total_pages);

    let start = (page - 1) * page_size;
    let end = (start + page_size).min(match_count);
    let items = records
        .get(start..end)
        .unwrap_or_default()
        .iter()
        .map(|record| (*record).clone())
        .collect();

    ResultPage {
        items,
        match_count,
        total_pages,
        page,
        page_size,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn records(n: usize) -> Vec<Record> {
        (1..=n).map(|i| Record::new(i.to_string())).collect()
    }

    fn ids(page: &ResultPage) -> Vec<String> {
        page.items.iter().map(|r| r.id.to_string()).collect()
    }

    #[test]
    fn total_pages_has_floor_of_one() {
        assert_eq!(total_pages(0, 5), 1);
        assert_eq!(total_pages(5, 5), 1);
        assert_eq!(total_pages(6, 5), 2);
        assert_eq!(total_pages(7, 0), 7);
    }

    #[test]
    fn slices_requested_page() {
        let all = records(12);
        let refs: Vec<&Record> = all.iter().collect();

        let page = paginate(&refs, 3, 5);
        assert_eq!(ids(&page), vec!["11", "12"]);
        assert_eq!(page.match_count, 12);
        assert_eq!(page.total_pages, 3);
        assert!(!page.has_next());
        assert!(page.has_prev());
    }

    #[test]
    fn clamps_out_of_range_pages() {
        let all = records(7);
        let refs: Vec<&Record> = all.iter().collect();

        assert_eq!(paginate(&refs, 99, 5).page, 2);
        assert_eq!(paginate(&refs, 0, 5).page, 1);
    }

    #[test]
    fn empty_input_is_one_empty_page() {
        let page = paginate(&[], 4, 5);
        assert!(page.items.is_empty());
        assert_eq!(page.match_count, 0);
        assert_eq!(page.total_pages, 1);
        assert_eq!(page.page, 1);
    }

    #[test]
    fn zero_page_size_is_treated_as_one() {
        let all = records(3);
        let refs: Vec<&Record> = all.iter().collect();

        let page = paginate(&refs, 2, 0);
        assert_eq!(page.page_size, 1);
        assert_eq!(ids(&page), vec!["2"]);
    }

    #[test]
    fn never_exceeds_page_size() {
        let all = records(23);
        let refs: Vec<&Record> = all.iter().collect();
        for size in 1..10 {
            for p in 0..30 {
                assert!(paginate(&refs, p, size).items.len() <= size);
            }
        }
    }
}
