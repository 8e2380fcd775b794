//! Test platforms and clocks.

use crate::platform::{Platform, Posix, RawEntry, SpawnConfig};
use crate::time::{Clock, Instant};
use alloc::vec::Vec;
use core::ffi::c_void;
use portable_atomic::{AtomicU64, Ordering};
use spin::Mutex;

static INLINE_NEXT_ID: AtomicU64 = AtomicU64::new(100);

/// Runs the entry routine synchronously inside `spawn` and panics instead of
/// aborting, so lifecycle violations can be caught by `#[should_panic]`.
pub(crate) struct Inline;

unsafe impl Platform for Inline {
    type Handle = ();

    const MAX_SLEEP_MS: u32 = Posix::MAX_SLEEP_MS;

    unsafe fn spawn(
        entry: RawEntry,
        arg: *mut c_void,
        _config: &SpawnConfig,
    ) -> Result<((), u64), i32> {
        entry(arg);
        Ok(((), INLINE_NEXT_ID.fetch_add(1, Ordering::Relaxed)))
    }

    fn wait(_handle: ()) -> Result<(), i32> {
        Ok(())
    }

    fn release(_handle: ()) {}

    fn current_id() -> u64 {
        1
    }

    fn yield_now() {}

    fn sleep_ms(_ms: u32) {}

    fn processor_count() -> u32 {
        1
    }

    fn monotonic_nanos() -> u64 {
        Posix::monotonic_nanos()
    }

    fn emit_diagnostic(_msg: &str) {}

    fn abort() -> ! {
        panic!("abort requested by thread lifecycle violation");
    }
}

/// Refuses every thread creation with `EAGAIN`.
pub(crate) struct Refusing;

unsafe impl Platform for Refusing {
    type Handle = ();

    const MAX_SLEEP_MS: u32 = Posix::MAX_SLEEP_MS;

    unsafe fn spawn(
        _entry: RawEntry,
        _arg: *mut c_void,
        _config: &SpawnConfig,
    ) -> Result<((), u64), i32> {
        Err(libc::EAGAIN)
    }

    fn wait(_handle: ()) -> Result<(), i32> {
        Ok(())
    }

    fn release(_handle: ()) {}

    fn current_id() -> u64 {
        1
    }

    fn yield_now() {}

    fn sleep_ms(_ms: u32) {}

    fn processor_count() -> u32 {
        1
    }

    fn monotonic_nanos() -> u64 {
        Posix::monotonic_nanos()
    }

    fn emit_diagnostic(_msg: &str) {}

    fn abort() -> ! {
        panic!("abort requested by thread lifecycle violation");
    }
}

static CHUNKED_CALLS: Mutex<Vec<u32>> = Mutex::new(Vec::new());

/// POSIX platform with a 3ms sleep bound that records every sleep call.
pub(crate) struct ChunkedSleep;

impl ChunkedSleep {
    /// Drain the recorded sleep calls.
    pub(crate) fn take_calls() -> Vec<u32> {
        core::mem::take(&mut *CHUNKED_CALLS.lock())
    }
}

unsafe impl Platform for ChunkedSleep {
    type Handle = <Posix as Platform>::Handle;

    const MAX_SLEEP_MS: u32 = 3;

    unsafe fn spawn(
        entry: RawEntry,
        arg: *mut c_void,
        config: &SpawnConfig,
    ) -> Result<(Self::Handle, u64), i32> {
        // SAFETY: forwarded from the caller.
        unsafe { Posix::spawn(entry, arg, config) }
    }

    fn wait(handle: Self::Handle) -> Result<(), i32> {
        Posix::wait(handle)
    }

    fn release(handle: Self::Handle) {
        Posix::release(handle);
    }

    fn current_id() -> u64 {
        Posix::current_id()
    }

    fn yield_now() {
        Posix::yield_now();
    }

    fn sleep_ms(ms: u32) {
        assert!(ms <= Self::MAX_SLEEP_MS);
        CHUNKED_CALLS.lock().push(ms);
        Posix::sleep_ms(ms);
    }

    fn processor_count() -> u32 {
        Posix::processor_count()
    }

    fn monotonic_nanos() -> u64 {
        Posix::monotonic_nanos()
    }

    fn emit_diagnostic(msg: &str) {
        Posix::emit_diagnostic(msg);
    }

    fn abort() -> ! {
        Posix::abort()
    }
}

/// Clock frozen at [`FixedClock::NOW_NANOS`].
pub(crate) struct FixedClock;

impl FixedClock {
    pub(crate) const NOW_NANOS: u64 = 1_000_000_000;
}

impl Clock for FixedClock {
    fn now() -> Instant {
        Instant::from_nanos(Self::NOW_NANOS)
    }
}
