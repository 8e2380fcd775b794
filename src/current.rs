//! Operations on the calling thread.
//!
//! None of these touch any [`Thread`](crate::Thread) object; they only query
//! or suspend whichever thread calls them.

use crate::platform::{DefaultPlatform, Platform};
use crate::thread::ThreadId;
use crate::time::{Clock, Duration, Instant, MonotonicClock};

/// Identifier of the calling thread.
pub fn id() -> ThreadId {
    id_in::<DefaultPlatform>()
}

pub(crate) fn id_in<P: Platform>() -> ThreadId {
    ThreadId::from_raw(P::current_id())
}

/// Give up the rest of the current time slice. Which thread runs next is up
/// to the OS scheduler.
pub fn yield_now() {
    DefaultPlatform::yield_now();
}

/// Block the calling thread for at least `duration`.
///
/// Zero and negative durations return immediately.
pub fn sleep_for(duration: impl Into<Duration>) {
    sleep_for_in::<DefaultPlatform>(duration.into());
}

/// Block the calling thread until `deadline` on the monotonic clock.
pub fn sleep_until(deadline: Instant) {
    sleep_until_on::<MonotonicClock>(deadline);
}

/// Block the calling thread until `deadline` on clock `C`.
///
/// Returns immediately if the deadline has passed.
pub fn sleep_until_on<C: Clock>(deadline: Instant) {
    sleep_for(deadline.duration_since(C::now()));
}

/// Sleep in chunks of at most `P::MAX_SLEEP_MS`, until the chunks add up to
/// the full request.
pub(crate) fn sleep_for_in<P: Platform>(duration: Duration) {
    let mut remaining = duration.wait_millis();
    let max = u64::from(P::MAX_SLEEP_MS);
    while remaining > 0 {
        let chunk = remaining.min(max);
        P::sleep_ms(chunk as u32);
        remaining -= chunk;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::helpers::{ChunkedSleep, FixedClock};
    use alloc::vec;

    #[test]
    fn test_id_is_stable_and_valid() {
        let a = id();
        assert!(a.is_some());
        assert_eq!(a, id());
    }

    #[test]
    fn test_yield_returns() {
        for _ in 0..8 {
            yield_now();
        }
    }

    #[test]
    fn test_sleep_for_waits() {
        let start = Instant::now();
        sleep_for(Duration::from_millis(20));
        assert!(Instant::now().duration_since(start) >= Duration::from_millis(20));
    }

    #[test]
    fn test_sleep_for_core_duration() {
        let start = Instant::now();
        sleep_for(core::time::Duration::from_millis(5));
        assert!(Instant::now().duration_since(start) >= Duration::from_millis(5));
    }

    #[test]
    fn test_sleep_for_non_positive_is_immediate() {
        let start = Instant::now();
        sleep_for(Duration::ZERO);
        sleep_for(Duration::from_secs(-3600));
        assert!(Instant::now().duration_since(start) < Duration::from_secs(1));
    }

    #[test]
    fn test_sleep_decomposes_into_bounded_chunks() {
        let start = Instant::now();
        sleep_for_in::<ChunkedSleep>(Duration::from_millis(10));
        let elapsed = Instant::now().duration_since(start);

        let calls = ChunkedSleep::take_calls();
        assert_eq!(calls, vec![3, 3, 3, 1]);
        assert!(calls.iter().all(|&ms| ms <= ChunkedSleep::MAX_SLEEP_MS));
        assert!(elapsed >= Duration::from_millis(10));
    }

    #[test]
    fn test_sleep_until_deadline() {
        let deadline = Instant::now() + Duration::from_millis(15);
        sleep_until(deadline);
        assert!(Instant::now() >= deadline);
    }

    #[test]
    fn test_sleep_until_past_deadline_is_immediate() {
        let start = Instant::now();
        sleep_until(start - Duration::from_secs(60));
        sleep_until_on::<FixedClock>(Instant::from_nanos(FixedClock::NOW_NANOS - 1));
        assert!(Instant::now().duration_since(start) < Duration::from_secs(1));
    }
}
