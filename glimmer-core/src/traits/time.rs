//! Clock trait and wrapping time helpers
//!
//! Timestamps are milliseconds since boot in a `u32`, which wraps after
//! about 49.7 days. All comparisons go through the helpers below so the
//! loop keeps working across the wrap.

/// Monotonic millisecond clock
pub trait Clock {
    /// Milliseconds since start
    fn now_ms(&self) -> u32;
}

impl<T: Clock + ?Sized> Clock for &T {
    fn now_ms(&self) -> u32 {
        T::now_ms(self)
    }
}

impl<T: Clock + ?Sized> Clock for &mut T {
    fn now_ms(&self) -> u32 {
        T::now_ms(self)
    }
}

/// Milliseconds elapsed from `since` to `now`
#[inline]
pub const fn elapsed_ms(now: u32, since: u32) -> u32 {
    now.wrapping_sub(since)
}

/// Check if `now` is strictly before `deadline`
///
/// Valid while the two are less than ~24.8 days apart.
#[inline]
pub const fn is_before(now: u32, deadline: u32) -> bool {
    (deadline.wrapping_sub(now) as i32) > 0
}
