//! Integer percentage helpers shared by the rollup calculations.

/// Returns `part / whole` as a percentage rounded half up.
///
/// Yields 0 when `whole` is 0 and saturates at 100.
#[must_use]
pub(crate) fn rounded_percent(part: u64, whole: u64) -> u8 {
    let doubled_whole = u128::from(whole) * 2;
    let scaled = u128::from(part) * 200 + u128::from(whole);
    let percent = scaled.checked_div(doubled_whole).unwrap_or(0).min(100);
    u8::try_from(percent).unwrap_or(100)
}

/// Converts a collection length into a `u64` counter.
#[must_use]
pub(crate) fn count_u64(len: usize) -> u64 {
    u64::try_from(len).unwrap_or(u64::MAX)
}
