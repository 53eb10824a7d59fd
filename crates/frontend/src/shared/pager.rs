//! Page arithmetic of the results table

pub const PAGE_SIZE_OPTIONS: [usize; 4] = [25, 50, 100, 200];

/// Number of consecutive page buttons around the current page
const WINDOW: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageItem {
    Page(usize),
    /// Rendered as "…"
    Gap,
}

/// 1-based page of `offset`
pub fn current_page(offset: usize, limit: usize) -> usize {
    if limit == 0 {
        return 1;
    }
    offset / limit + 1
}

pub fn total_pages(total_results: u64, limit: usize) -> usize {
    if limit == 0 {
        return 0;
    }
    total_results.div_ceil(limit as u64) as usize
}

/// Pages known to exist when the row count is unknown: up to the current one,
/// plus the next when the current page came back full
pub fn open_ended_pages(current: usize, rows_on_page: usize, limit: usize) -> usize {
    if rows_on_page == 0 {
        current.saturating_sub(1)
    } else if limit > 0 && rows_on_page >= limit {
        current + 1
    } else {
        current
    }
}

/// Page buttons with ellipsis compression, e.g. `1 2 3 4 5 … 10`
pub fn page_items(current: usize, total: usize) -> Vec<PageItem> {
    if total == 0 {
        return Vec::new();
    }

    let half = WINDOW / 2;
    let mut start = current.saturating_sub(half).max(1);
    let mut end = (current + half).min(total);

    if current <= half + 1 {
        end = WINDOW.min(total);
    } else if current + half >= total {
        start = total.saturating_sub(WINDOW - 1).max(1);
    }

    let mut items = Vec::with_capacity(WINDOW + 4);
    if start > 2 {
        items.push(PageItem::Page(1));
        items.push(PageItem::Gap);
    } else if start == 2 {
        items.push(PageItem::Page(1));
    }

    items.extend((start..=end).map(PageItem::Page));

    if end + 1 < total {
        items.push(PageItem::Gap);
        items.push(PageItem::Page(total));
    } else if end + 1 == total {
        items.push(PageItem::Page(total));
    }

    items
}
