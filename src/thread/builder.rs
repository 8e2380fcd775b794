use super::capsule::{Callable, Capsule};
use super::Thread;
use crate::errors::{ThreadError, ThreadResult};
use crate::platform::{DefaultPlatform, Platform, SpawnConfig};
use core::marker::PhantomData;

extern crate alloc;
use alloc::boxed::Box;

/// Configures and starts a [`Thread`].
pub struct ThreadBuilder<P: Platform = DefaultPlatform> {
    stack_size: Option<usize>,
    _platform: PhantomData<fn() -> P>,
}

impl ThreadBuilder {
    /// Builder for the default platform.
    pub fn new() -> Self {
        Self::for_platform()
    }
}

impl<P: Platform> ThreadBuilder<P> {
    /// Builder for an explicit platform.
    pub fn for_platform() -> Self {
        Self {
            stack_size: None,
            _platform: PhantomData,
        }
    }

    /// Request a stack of `size` bytes. The platform may round it up.
    pub fn stack_size(mut self, size: usize) -> Self {
        self.stack_size = Some(size);
        self
    }

    /// Start a thread running `f`.
    pub fn spawn<F>(self, f: F) -> ThreadResult<Thread<P>>
    where
        F: FnOnce() + Send + 'static,
    {
        self.spawn_with(f, ())
    }

    /// Start a thread running `f` with the positional arguments in `args`.
    ///
    /// Arguments are moved into the new thread when this is called, so later
    /// changes on the calling side are not observed.
    pub fn spawn_with<F, A>(self, f: F, args: A) -> ThreadResult<Thread<P>>
    where
        F: Callable<A>,
        A: Send + 'static,
    {
        if self.stack_size == Some(0) {
            return Err(ThreadError::invalid_parameter("stack size must be non-zero"));
        }

        let config = SpawnConfig {
            stack_size: self.stack_size,
        };
        Thread::<P>::from_capsule(Box::new(Capsule::new(f, args)), &config)
    }
}

impl Default for ThreadBuilder {
    fn default() -> Self {
        Self::new()
    }
}
