//! Deferred, single-shot invocation of a callable with captured arguments.
//!
//! A [`Capsule`] owns a callable and a tuple of arguments, both captured by
//! value. It is boxed behind the [`Invoke`] trait so that the thread entry
//! routine needs no knowledge of the concrete types, and it is consumed by
//! the one call it performs.

extern crate alloc;
use alloc::boxed::Box;
use core::ffi::c_void;
use core::ptr;

/// A callable that accepts its arguments as a tuple.
///
/// Implemented for every `FnOnce` of up to eight parameters whose argument
/// tuple matches. Return values are discarded. A method path such as
/// `Counter::bump` qualifies with the receiver as the first tuple element.
pub trait Callable<Args>: Send + 'static {
    /// Call `self` with the unpacked arguments.
    fn call(self, args: Args);
}

macro_rules! impl_callable {
    ($($arg:ident),*) => {
        impl<Func, Ret, $($arg,)*> Callable<($($arg,)*)> for Func
        where
            Func: FnOnce($($arg),*) -> Ret + Send + 'static,
        {
            #[allow(non_snake_case)]
            fn call(self, ($($arg,)*): ($($arg,)*)) {
                let _ = self($($arg),*);
            }
        }
    };
}

impl_callable!();
impl_callable!(A1);
impl_callable!(A1, A2);
impl_callable!(A1, A2, A3);
impl_callable!(A1, A2, A3, A4);
impl_callable!(A1, A2, A3, A4, A5);
impl_callable!(A1, A2, A3, A4, A5, A6);
impl_callable!(A1, A2, A3, A4, A5, A6, A7);
impl_callable!(A1, A2, A3, A4, A5, A6, A7, A8);

/// Type-erased single-shot invocation.
pub(crate) trait Invoke: Send {
    /// Run the wrapped call, consuming the capsule.
    fn invoke(self: Box<Self>);
}

/// Callable plus its by-value arguments.
pub(crate) struct Capsule<F, A> {
    func: F,
    args: A,
}

impl<F, A> Capsule<F, A>
where
    F: Callable<A>,
    A: Send + 'static,
{
    pub(crate) fn new(func: F, args: A) -> Self {
        Self { func, args }
    }
}

impl<F, A> Invoke for Capsule<F, A>
where
    F: Callable<A>,
    A: Send + 'static,
{
    fn invoke(self: Box<Self>) {
        let Capsule { func, args } = *self;
        func.call(args);
    }
}

/// Owning pointer to a capsule, as handed to the platform.
pub(crate) type BoxedInvoke = Box<dyn Invoke>;

/// Turn a capsule into the thin pointer passed through the platform.
pub(crate) fn into_raw(capsule: BoxedInvoke) -> *mut c_void {
    Box::into_raw(Box::new(capsule)).cast()
}

/// Reclaim a capsule previously leaked by [`into_raw`].
///
/// # Safety
///
/// `raw` must come from [`into_raw`] and must not have been reclaimed yet.
pub(crate) unsafe fn from_raw(raw: *mut c_void) -> BoxedInvoke {
    // SAFETY: guaranteed by the caller.
    *unsafe { Box::from_raw(raw.cast::<BoxedInvoke>()) }
}

/// Entry routine for every thread created by this crate.
///
/// Reclaims the capsule, runs it and frees it. A panic escaping the callable
/// cannot unwind through this `extern "C"` frame and aborts the process.
pub(crate) extern "C" fn trampoline(raw: *mut c_void) -> *mut c_void {
    // SAFETY: the platform passes the pointer given to `spawn`, which came
    // from `into_raw` and is handed to exactly one entry call.
    let capsule = unsafe { from_raw(raw) };
    capsule.invoke();
    ptr::null_mut()
}
