//! POSIX threads backend.

use super::{Platform, RawEntry, SpawnConfig};
use core::ffi::c_void;
use core::mem::MaybeUninit;
use core::ptr;

/// Platform backed by pthreads and the POSIX clock/sleep calls.
#[derive(Debug, Clone, Copy)]
pub struct Posix;

/// Owned `pthread_t`.
#[derive(Debug)]
pub struct PosixHandle(libc::pthread_t);

impl PosixHandle {
    /// Raw `pthread_t`.
    pub fn as_raw(&self) -> libc::pthread_t {
        self.0
    }
}

// `pthread_t` is a pointer on some targets; the handle itself is only a token
// accepted by any thread in the process.
unsafe impl Send for PosixHandle {}

fn pthread_number(thread: libc::pthread_t) -> u64 {
    thread as usize as u64
}

/// Stack size actually requested from pthreads: at least `PTHREAD_STACK_MIN`
/// and a whole number of pages.
fn stack_size_for(requested: usize) -> usize {
    // SAFETY: always safe to call.
    let page = unsafe { libc::sysconf(libc::_SC_PAGESIZE) };
    let page = if page > 0 { page as usize } else { 4096 };
    let size = requested.max(libc::PTHREAD_STACK_MIN);
    size.div_ceil(page).saturating_mul(page)
}

unsafe impl Platform for Posix {
    type Handle = PosixHandle;

    const MAX_SLEEP_MS: u32 = u32::MAX - 1;

    unsafe fn spawn(
        entry: RawEntry,
        arg: *mut c_void,
        config: &SpawnConfig,
    ) -> Result<(Self::Handle, u64), i32> {
        let mut attr = MaybeUninit::<libc::pthread_attr_t>::uninit();
        // SAFETY: `attr` is a valid out-pointer.
        let rc = unsafe { libc::pthread_attr_init(attr.as_mut_ptr()) };
        if rc != 0 {
            return Err(rc);
        }

        if let Some(size) = config.stack_size {
            let size = stack_size_for(size);
            // SAFETY: `attr` was initialised above.
            let rc = unsafe { libc::pthread_attr_setstacksize(attr.as_mut_ptr(), size) };
            if rc != 0 {
                // SAFETY: `attr` was initialised above.
                unsafe { libc::pthread_attr_destroy(attr.as_mut_ptr()) };
                return Err(rc);
            }
        }

        let mut thread = MaybeUninit::<libc::pthread_t>::uninit();
        // SAFETY: `attr` is initialised; the caller guarantees `entry`/`arg`.
        let rc = unsafe { libc::pthread_create(thread.as_mut_ptr(), attr.as_ptr(), entry, arg) };
        // SAFETY: `attr` was initialised above and is no longer needed.
        unsafe { libc::pthread_attr_destroy(attr.as_mut_ptr()) };

        if rc != 0 {
            return Err(rc);
        }

        // SAFETY: pthread_create succeeded, so it wrote the thread.
        let thread = unsafe { thread.assume_init() };
        Ok((PosixHandle(thread), pthread_number(thread)))
    }

    fn wait(handle: Self::Handle) -> Result<(), i32> {
        // SAFETY: the handle is owned, so it has been neither joined nor
        // detached.
        let rc = unsafe { libc::pthread_join(handle.0, ptr::null_mut()) };
        if rc == 0 {
            Ok(())
        } else {
            Err(rc)
        }
    }

    fn release(handle: Self::Handle) {
        // SAFETY: the handle is owned, so it has been neither joined nor
        // detached.
        let rc = unsafe { libc::pthread_detach(handle.0) };
        if rc != 0 {
            log::warn!("pthread_detach failed (os error {rc})");
        }
    }

    fn current_id() -> u64 {
        // SAFETY: always safe to call.
        pthread_number(unsafe { libc::pthread_self() })
    }

    fn yield_now() {
        // SAFETY: always safe to call.
        unsafe { libc::sched_yield() };
    }

    fn sleep_ms(ms: u32) {
        let mut req = libc::timespec {
            tv_sec: (ms / 1000) as libc::time_t,
            tv_nsec: ((ms % 1000) * 1_000_000) as libc::c_long,
        };
        let mut rem = libc::timespec { tv_sec: 0, tv_nsec: 0 };
        loop {
            // SAFETY: both pointers reference live timespecs.
            let rc = unsafe { libc::nanosleep(&req, &mut rem) };
            // `req` is always in range, so the only failure left is EINTR.
            if rc == 0 {
                break;
            }
            req = rem;
        }
    }

    fn processor_count() -> u32 {
        // SAFETY: always safe to call.
        let count = unsafe { libc::sysconf(libc::_SC_NPROCESSORS_ONLN) };
        if count < 1 {
            1
        } else {
            count as u32
        }
    }

    fn monotonic_nanos() -> u64 {
        let mut ts = libc::timespec { tv_sec: 0, tv_nsec: 0 };
        // SAFETY: `ts` is a valid out-pointer.
        unsafe { libc::clock_gettime(libc::CLOCK_MONOTONIC, &mut ts) };
        (ts.tv_sec as u64)
            .saturating_mul(1_000_000_000)
            .saturating_add(ts.tv_nsec as u64)
    }

    fn emit_diagnostic(msg: &str) {
        let mut bytes = msg.as_bytes();
        while !bytes.is_empty() {
            // SAFETY: `bytes` is a live slice.
            let written =
                unsafe { libc::write(libc::STDERR_FILENO, bytes.as_ptr().cast(), bytes.len()) };
            if written <= 0 {
                break;
            }
            bytes = &bytes[written as usize..];
        }
    }

    fn abort() -> ! {
        // SAFETY: always safe to call.
        unsafe { libc::abort() }
    }
}
