//! Page windows for server-rendered lists.

use serde::Serialize;

pub const DEFAULT_ITEMS_PER_PAGE: usize = 20;

/// Page numbers to show, with `None` marking a gap (`1 2 … 7 8 9 … 20`).
fn page_window(total_pages: usize, current: usize, edge: usize, around: usize) -> Vec<Option<usize>> {
    if total_pages == 0 {
        return Vec::new();
    }

    let mut pages: Vec<Option<usize>> = Vec::new();
    let mut last_shown = 0;
    for page in 1..=total_pages {
        let near_edge = page <= edge || page > total_pages.saturating_sub(edge);
        let near_current = page + around >= current && page <= current + around;
        if near_edge || near_current {
            if last_shown + 1 != page {
                pages.push(None);
            }
            pages.push(Some(page));
            last_shown = page;
        }
    }
    pages
}

#[derive(Debug, Serialize)]
pub struct Paginated<T> {
    pub items: Vec<T>,
    pub pages: Vec<Option<usize>>,
    pub page: usize,
    pub total_pages: usize,
}

impl<T> Paginated<T> {
    pub fn new(items: Vec<T>, current_page: usize, total_pages: usize) -> Self {
        let page = current_page.max(1);
        Self {
            items,
            pages: page_window(total_pages, page, 2, 2),
            page,
            total_pages,
        }
    }

    /// Builds the window from a total row count.
    pub fn from_total(items: Vec<T>, current_page: usize, total: usize, per_page: usize) -> Self {
        Self::new(items, current_page, total.div_ceil(per_page.max(1)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_list_has_no_pages() {
        let page: Paginated<u8> = Paginated::from_total(vec![], 1, 0, 20);
        assert!(page.pages.is_empty());
        assert_eq!(page.total_pages, 0);
    }

    #[test]
    fn window_collapses_distant_pages() {
        let pages = page_window(20, 10, 2, 2);
        assert_eq!(
            pages,
            vec![
                Some(1),
                Some(2),
                None,
                Some(8),
                Some(9),
                Some(10),
                Some(11),
                Some(12),
                None,
                Some(19),
                Some(20)
            ]
        );
    }

    #[test]
    fn small_totals_show_every_page() {
        assert_eq!(page_window(3, 1, 2, 2), vec![Some(1), Some(2), Some(3)]);
    }

    #[test]
    fn page_zero_is_treated_as_first() {
        let page: Paginated<u8> = Paginated::from_total(vec![], 0, 45, 20);
        assert_eq!(page.page, 1);
        assert_eq!(page.total_pages, 3);
    }
}
