/// Paging offset clamping.
///
/// Keeps a remembered scroll position usable after the underlying collection
/// shrinks, without ever producing a negative or out-of-range offset.
///
/// Returns `requested` unchanged while it still points at an existing item;
/// otherwise falls back to the furthest offset that still yields a full page
/// (or, for collections smaller than one page, offset 0). The fallback is
/// clamped to the last existing item so a degenerate zero page size still
/// lands in range.
pub fn safe_offset(requested: usize, page_size: usize, count: usize) -> usize {
    if requested < count {
        requested
    } else {
        count
            .saturating_sub(page_size)
            .min(count.saturating_sub(1))
    }
}
