//! Client-side pagination over a search result set.
//!
//! Pages are 1-based. Nothing here validates the requested page: page 0 and
//! pages past the end produce an empty slice.

/// Number of results shown per page.
pub const PAGE_SIZE: usize = 3;

/// Returns the results shown on `page`.
#[must_use]
pub fn visible_slice<T>(items: &[T], page: usize) -> &[T] {
    let Some(start) = page
        .checked_sub(1)
        .and_then(|p| p.checked_mul(PAGE_SIZE))
    else {
        return &[];
    };
    let end = start.saturating_add(PAGE_SIZE).min(items.len());
    items.get(start..end).unwrap_or(&[])
}

/// Number of pages needed for `len` results (`ceil(len / PAGE_SIZE)`).
#[must_use]
pub const fn total_pages(len: usize) -> usize {
    len.div_ceil(PAGE_SIZE)
}

/// Page numbers offered as buttons for `len` results.
///
/// Runs from 1 up to, but not including, the last page: the final page gets
/// no button of its own and is reached by stepping forward.
#[must_use]
pub fn page_buttons(len: usize) -> Vec<usize> {
    (1..total_pages(len)).collect()
}
