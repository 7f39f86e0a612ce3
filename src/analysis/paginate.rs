//! Page windowing for the route table.
//!
//! Slices an ordered sequence into fixed-size pages and computes the
//! navigation metadata the pagination controls need. Two rules matter and
//! are easy to get wrong:
//!
//! - `page_count` of an empty dataset is 0, which the renderer treats as a
//!   distinct "no pages / empty state", not the same as a single page.
//! - Changing to an out-of-range page number is a REJECTED transition (the
//!   state is left untouched), never a silent clamp.

/// Fixed page size of the route table.
pub const PAGE_SIZE: usize = 20;

// ---------------------------------------------------------------------------
// Slicing
// ---------------------------------------------------------------------------

/// Number of pages needed for `total_items` items: `ceil(total / size)`.
/// Zero for an empty dataset.
pub fn page_count(total_items: usize, page_size: usize) -> usize {
    total_items.div_ceil(page_size)
}

/// The 1-based `page`'s slice of `data`, clipped to the data bounds.
/// A page beyond the end yields an empty slice; rejecting such page
/// numbers before they reach here is `PageState::goto`'s job.
pub fn page_slice<T>(data: &[T], page: usize, page_size: usize) -> &[T] {
    let start = page.saturating_sub(1).saturating_mul(page_size).min(data.len());
    let end = (start + page_size).min(data.len());
    &data[start..end]
}

// ---------------------------------------------------------------------------
// Page state
// ---------------------------------------------------------------------------

/// Immutable-update pagination state for the route table.
///
/// Invariant: `current_page <= max(1, page_count(total_items, page_size))`,
/// and `current_page >= 1`. Construction and every transition preserve it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageState {
    pub current_page: usize,
    pub page_size: usize,
    pub total_items: usize,
}

impl Default for PageState {
    /// Page 1 over an empty dataset, the state before any fetch lands.
    fn default() -> Self {
        PageState::new(0)
    }
}

impl PageState {
    /// Fresh state on page 1, as after a dataset replacement or filter
    /// change.
    pub fn new(total_items: usize) -> Self {
        PageState {
            current_page: 1,
            page_size: PAGE_SIZE,
            total_items,
        }
    }

    pub fn page_count(&self) -> usize {
        page_count(self.total_items, self.page_size)
    }

    /// Attempts a transition to `page`. Returns the updated state, or
    /// `None` when `page` is outside `[1, page_count]` - the caller keeps
    /// its current state (no-op), matching the rejected-not-clamped rule.
    pub fn goto(&self, page: usize) -> Option<PageState> {
        if page < 1 || page > self.page_count() {
            return None;
        }
        Some(PageState {
            current_page: page,
            ..*self
        })
    }

    /// State for the same dataset size reset to page 1. Used whenever the
    /// filter changes.
    pub fn reset(total_items: usize) -> Self {
        Self::new(total_items)
    }
}

// ---------------------------------------------------------------------------
// Navigation window
// ---------------------------------------------------------------------------

/// Metadata for rendering the pagination controls: a sliding window of page
/// links centered on the current page, plus prev/next enablement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavWindow {
    /// First page link shown: `max(1, current - 2)`.
    pub first: usize,
    /// Last page link shown: `min(page_count, current + 2)`.
    pub last: usize,
    pub prev_enabled: bool,
    pub next_enabled: bool,
}

/// The navigation window for `state`, or `None` when there is at most one
/// page (the controls are hidden entirely in that case).
pub fn nav_window(state: &PageState) -> Option<NavWindow> {
    let pages = state.page_count();
    if pages <= 1 {
        return None;
    }
    Some(NavWindow {
        first: state.current_page.saturating_sub(2).max(1),
        last: (state.current_page + 2).min(pages),
        prev_enabled: state.current_page > 1,
        next_enabled: state.current_page < pages,
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_count_is_ceiling_division() {
        assert_eq!(page_count(0, 20), 0, "empty dataset has zero pages, not one");
        assert_eq!(page_count(1, 20), 1);
        assert_eq!(page_count(20, 20), 1);
        assert_eq!(page_count(21, 20), 2);
        assert_eq!(page_count(45, 20), 3);
    }

    #[test]
    fn test_every_page_is_full_except_possibly_the_last() {
        let data: Vec<u32> = (0..45).collect();
        let pages = page_count(data.len(), PAGE_SIZE);
        for p in 1..=pages {
            let slice = page_slice(&data, p, PAGE_SIZE);
            assert!(slice.len() <= PAGE_SIZE);
            if p < pages {
                assert_eq!(slice.len(), PAGE_SIZE, "non-final page {} must be full", p);
            }
        }
    }

    #[test]
    fn test_45_record_scenario() {
        // 45 records: page 1 shows [0,20), page 3 shows [40,45), page 4 is
        // rejected because page_count is 3.
        let data: Vec<u32> = (0..45).collect();
        let state = PageState::new(data.len());
        assert_eq!(state.page_count(), 3);

        assert_eq!(page_slice(&data, 1, PAGE_SIZE), &data[0..20]);

        let page3 = state.goto(3).expect("page 3 is in range");
        let slice = page_slice(&data, page3.current_page, page3.page_size);
        assert_eq!(slice, &data[40..45]);
        assert_eq!(slice.len(), 5);

        assert_eq!(page3.goto(4), None, "page 4 must be rejected, not clamped");
        assert_eq!(page3.current_page, 3, "rejected transition leaves state untouched");
    }

    #[test]
    fn test_goto_rejects_page_zero() {
        let state = PageState::new(45);
        assert_eq!(state.goto(0), None);
    }

    #[test]
    fn test_goto_on_empty_dataset_rejects_everything() {
        let state = PageState::new(0);
        assert_eq!(state.page_count(), 0);
        assert_eq!(state.goto(1), None, "zero pages means even page 1 is out of range");
    }

    #[test]
    fn test_page_slice_clips_instead_of_panicking() {
        let data: Vec<u32> = (0..5).collect();
        assert!(page_slice(&data, 2, PAGE_SIZE).is_empty());
        assert!(page_slice::<u32>(&[], 1, PAGE_SIZE).is_empty());
    }

    #[test]
    fn test_nav_window_slides_and_clamps_to_bounds() {
        // 10 pages of data.
        let mut state = PageState::new(200);
        assert_eq!(state.page_count(), 10);

        let w = nav_window(&state).expect("multiple pages");
        assert_eq!((w.first, w.last), (1, 3), "window at page 1 is [1,3]");
        assert!(!w.prev_enabled, "prev disabled on the first page");
        assert!(w.next_enabled);

        state = state.goto(5).unwrap();
        let w = nav_window(&state).unwrap();
        assert_eq!((w.first, w.last), (3, 7), "window centered on the current page");
        assert!(w.prev_enabled);
        assert!(w.next_enabled);

        state = state.goto(10).unwrap();
        let w = nav_window(&state).unwrap();
        assert_eq!((w.first, w.last), (8, 10));
        assert!(!w.next_enabled, "next disabled on the last page");
    }

    #[test]
    fn test_nav_window_hidden_for_zero_or_one_page() {
        assert_eq!(nav_window(&PageState::new(0)), None);
        assert_eq!(nav_window(&PageState::new(20)), None, "a single page needs no controls");
        assert!(nav_window(&PageState::new(21)).is_some());
    }
}
