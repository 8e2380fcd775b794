//! Platform abstraction over the native threading primitives.
//!
//! Everything the crate needs from the operating system goes through the
//! [`Platform`] trait: thread creation, waiting, handle release, the current
//! thread number, yielding, bounded sleeping and the processor count. Each
//! supported target provides one zero-sized implementor, selected through
//! [`DefaultPlatform`].

use core::ffi::c_void;

#[cfg(unix)]
pub mod posix;

#[cfg(unix)]
pub use posix::Posix;

/// Platform used by the non-generic entry points of the crate.
#[cfg(unix)]
pub type DefaultPlatform = Posix;

/// Entry routine handed to [`Platform::spawn`].
///
/// The routine receives the opaque argument passed to `spawn` and its return
/// value is ignored.
pub type RawEntry = extern "C" fn(*mut c_void) -> *mut c_void;

/// Per-thread creation parameters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SpawnConfig {
    /// Requested stack size in bytes, or `None` for the platform default.
    pub stack_size: Option<usize>,
}

/// Native threading primitives.
///
/// # Safety
///
/// Implementors must uphold the contracts documented on each function:
/// `spawn` must run `entry(arg)` exactly once on a new thread when it returns
/// `Ok`, and never when it returns `Err`; the numeric identifier returned by
/// `spawn` must equal what [`current_id`](Platform::current_id) reports on
/// that thread, and must never be `0`.
pub unsafe trait Platform {
    /// Native thread handle. Owning one means owning the right to wait for or
    /// release the thread.
    type Handle: Send;

    /// Longest sleep, in milliseconds, a single [`sleep_ms`](Platform::sleep_ms)
    /// call may be asked for.
    const MAX_SLEEP_MS: u32;

    /// Start a new thread running `entry(arg)`.
    ///
    /// Returns the handle and the thread's numeric identifier, or the
    /// platform error code on failure.
    ///
    /// # Safety
    ///
    /// - `arg` must stay valid until `entry` consumes it
    /// - `entry` must be sound to call with `arg` on another thread
    unsafe fn spawn(
        entry: RawEntry,
        arg: *mut c_void,
        config: &SpawnConfig,
    ) -> Result<(Self::Handle, u64), i32>;

    /// Block until the thread behind `handle` finishes, then release the
    /// handle.
    fn wait(handle: Self::Handle) -> Result<(), i32>;

    /// Release `handle` without waiting. The thread keeps running.
    fn release(handle: Self::Handle);

    /// Numeric identifier of the calling thread.
    fn current_id() -> u64;

    /// Give up the rest of the current scheduling quantum.
    fn yield_now();

    /// Sleep for `ms` milliseconds, `ms <= MAX_SLEEP_MS`.
    fn sleep_ms(ms: u32);

    /// Number of logical processors.
    fn processor_count() -> u32;

    /// Nanoseconds on a monotonic clock with an arbitrary epoch.
    fn monotonic_nanos() -> u64;

    /// Write `msg` to the process' diagnostic stream without going through
    /// any logger or allocator.
    fn emit_diagnostic(msg: &str);

    /// Terminate the process immediately.
    fn abort() -> !;
}
