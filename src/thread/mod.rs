//! Owned OS threads.
//!
//! A [`Thread`] is either *empty* (no OS thread attached) or *joinable* (it
//! owns the native handle of a started thread). It leaves the joinable state
//! only through [`Thread::join`] or [`Thread::detach`]. Dropping a joinable
//! thread, including by assigning another thread over it, aborts the process:
//! silently detaching or joining would hide a lifetime bug in the caller.

use crate::current;
use crate::errors::{JoinError, ThreadError, ThreadResult};
use crate::platform::{DefaultPlatform, Platform, SpawnConfig};
use core::fmt;
use core::marker::PhantomData;
use core::mem;

pub mod builder;
pub(crate) mod capsule;
pub mod id;

pub use builder::ThreadBuilder;
pub use capsule::Callable;
pub use id::ThreadId;

use capsule::BoxedInvoke;

static HARDWARE_CONCURRENCY: spin::Once<u32> = spin::Once::new();

/// Message written to the diagnostic stream before aborting on a joinable drop.
const JOINABLE_DROP_DIAGNOSTIC: &str =
    "fatal: thread dropped while still joinable; call join() or detach() first\n";

/// Owner of at most one native thread.
pub struct Thread<P: Platform = DefaultPlatform> {
    handle: Option<P::Handle>,
    id: ThreadId,
    _platform: PhantomData<fn() -> P>,
}

impl Thread {
    /// An empty thread on the default platform.
    pub const fn new() -> Self {
        Self::empty()
    }

    /// Start a thread running `f`.
    pub fn spawn<F>(f: F) -> ThreadResult<Self>
    where
        F: FnOnce() + Send + 'static,
    {
        ThreadBuilder::new().spawn(f)
    }

    /// Start a thread running `f` with the positional arguments in `args`.
    ///
    /// ```ignore
    /// let t = Thread::spawn_with(|a: u32, b: u32| assert_eq!(a + b, 3), (1, 2))?;
    /// ```
    pub fn spawn_with<F, A>(f: F, args: A) -> ThreadResult<Self>
    where
        F: Callable<A>,
        A: Send + 'static,
    {
        ThreadBuilder::new().spawn_with(f, args)
    }

    /// Number of logical processors.
    ///
    /// Queried once per process; later calls return the cached value.
    pub fn hardware_concurrency() -> u32 {
        *HARDWARE_CONCURRENCY.call_once(DefaultPlatform::processor_count)
    }
}

impl<P: Platform> Thread<P> {
    /// A thread with no OS thread attached.
    pub const fn empty() -> Self {
        Self {
            handle: None,
            id: ThreadId::NONE,
            _platform: PhantomData,
        }
    }

    pub(crate) fn from_capsule(capsule: BoxedInvoke, config: &SpawnConfig) -> ThreadResult<Self> {
        let raw = capsule::into_raw(capsule);

        // SAFETY: `raw` came from `into_raw` and is consumed exactly once,
        // either by the trampoline on the new thread or below on failure.
        match unsafe { P::spawn(capsule::trampoline, raw, config) } {
            Ok((handle, raw_id)) => {
                let id = ThreadId::from_raw(raw_id);
                log::trace!("spawned thread {id}");
                Ok(Self {
                    handle: Some(handle),
                    id,
                    _platform: PhantomData,
                })
            }
            Err(code) => {
                // SAFETY: the platform did not start the entry routine, so
                // ownership of `raw` never left this thread.
                drop(unsafe { capsule::from_raw(raw) });
                log::warn!("thread creation failed (os error {code})");
                Err(ThreadError::os_resource(code))
            }
        }
    }

    /// `true` while this object owns a running (or finished but unjoined)
    /// thread.
    pub fn joinable(&self) -> bool {
        self.handle.is_some()
    }

    /// Identifier of the owned thread, or [`ThreadId::NONE`] if empty.
    pub fn id(&self) -> ThreadId {
        self.id
    }

    /// Native handle of the owned thread, if any.
    pub fn native_handle(&self) -> Option<&P::Handle> {
        self.handle.as_ref()
    }

    /// Block until the thread finishes.
    ///
    /// Everything the thread did happens-before this call returns. Afterwards
    /// the thread is empty.
    ///
    /// # Errors
    ///
    /// - [`JoinError::WouldDeadlock`] when called from the thread itself;
    ///   nothing changes and the call does not block
    /// - [`JoinError::NoSuchThread`] when the thread is empty (`ESRCH`), or
    ///   when the platform rejects the handle; the thread is empty afterwards
    pub fn join(&mut self) -> ThreadResult<()> {
        if self.id == current::id_in::<P>() {
            return Err(JoinError::WouldDeadlock.into());
        }

        let handle = self.handle.take().ok_or_else(ThreadError::no_such_thread)?;
        let id = mem::take(&mut self.id);

        P::wait(handle).map_err(|code| {
            log::warn!("waiting for thread {id} failed (os error {code})");
            JoinError::NoSuchThread { code }
        })?;
        log::trace!("joined thread {id}");
        Ok(())
    }

    /// Let the thread run on independently and make this object empty.
    ///
    /// # Errors
    ///
    /// [`InvalidOperationError::NotJoinable`](crate::errors::InvalidOperationError::NotJoinable)
    /// when the thread is empty.
    pub fn detach(&mut self) -> ThreadResult<()> {
        let handle = self.handle.take().ok_or_else(ThreadError::not_joinable)?;
        let id = mem::take(&mut self.id);

        P::release(handle);
        log::trace!("detached thread {id}");
        Ok(())
    }

    /// Exchange the threads owned by `self` and `other`.
    pub fn swap(&mut self, other: &mut Self) {
        mem::swap(self, other);
    }
}

impl<P: Platform> Default for Thread<P> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<P: Platform> fmt::Debug for Thread<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Thread")
            .field("id", &self.id)
            .field("joinable", &self.joinable())
            .finish()
    }
}

impl<P: Platform> Drop for Thread<P> {
    fn drop(&mut self) {
        if self.joinable() {
            log::error!("thread {} dropped while joinable", self.id);
            P::emit_diagnostic(JOINABLE_DROP_DIAGNOSTIC);
            P::abort();
        }
    }
}
