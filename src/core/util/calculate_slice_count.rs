use std::num::NonZeroU32;

/// Number of parallel workers the hardware offers, at least one.
#[must_use]
pub fn available_workers() -> NonZeroU32 {
    std::thread::available_parallelism()
        .ok()
        .and_then(|n| NonZeroU32::new(n.get() as u32))
        .unwrap_or(NonZeroU32::MIN)
}

/// One slice per worker, but never more slices than rows.
#[must_use]
pub fn calculate_slice_count(max_slices: NonZeroU32, height: u32) -> u32 {
    max_slices.get().min(height).max(1)
}
