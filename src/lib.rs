#![no_std]
#![deny(unsafe_op_in_unsafe_fn)]
#![forbid(unreachable_pub)]

//! Native OS threads for `no_std` targets.
//!
//! This library offers the thread primitive a standard library would: owned
//! threads with a strict join/detach lifecycle, copyable thread identities,
//! and sleeping/yielding for the calling thread. It talks to the operating
//! system only through the [`Platform`] trait, so it runs wherever a native
//! threading API exists, even without `std`.
//!
//! # Quick Start
//!
//! ```ignore
//! use native_threads::{current, Thread};
//!
//! let mut worker = Thread::spawn_with(|n: u32| do_work(n), (42,))?;
//! current::sleep_for(core::time::Duration::from_millis(10));
//! worker.join()?;
//! ```
//!
//! # Lifecycle
//!
//! A [`Thread`] must be joined or detached before it is dropped. Dropping a
//! joinable thread writes a diagnostic and aborts the process.
//!
//! A panic that escapes a thread's callable aborts the process as well: the
//! entry routine has no caller to report it to.

#[cfg(not(unix))]
compile_error!("native-threads currently ships a platform backend for unix targets only");

// Core modules
pub mod current;
pub mod errors;
pub mod platform;
pub mod thread;
pub mod time;

#[cfg(test)]
extern crate std;

extern crate alloc;

#[cfg(test)]
mod tests;

// ============================================================================
// Public API
// ============================================================================

// Platform abstraction
pub use platform::{DefaultPlatform, Platform, SpawnConfig};

// Threads
pub use thread::{Callable, Thread, ThreadBuilder, ThreadId};

// Time
pub use time::{Clock, Duration, Instant, MonotonicClock};

// Errors
pub use errors::{ThreadError, ThreadResult};

// ============================================================================
// Convenience Functions
// ============================================================================

/// Yield the current thread's time slice to the OS scheduler.
#[inline]
pub fn yield_now() {
    current::yield_now();
}
