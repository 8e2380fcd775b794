//! Thread identity.

use core::fmt;

/// Identifier of an OS thread.
///
/// A `ThreadId` is a plain value: it can be copied, compared, ordered and
/// hashed, and it stays meaningful after the thread it labels has been joined
/// or detached. The default value means "no thread" and never equals the
/// identifier of a running thread.
///
/// Identifiers can only be obtained from a [`Thread`](crate::Thread) or from
/// [`current::id`](crate::current::id).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ThreadId(u64);

impl ThreadId {
    /// The "no thread" identifier.
    pub const NONE: ThreadId = ThreadId(0);

    pub(crate) const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    /// Platform thread number, `0` for [`ThreadId::NONE`].
    pub const fn as_u64(self) -> u64 {
        self.0
    }

    /// `true` unless this is [`ThreadId::NONE`].
    pub const fn is_some(self) -> bool {
        self.0 != 0
    }
}

impl fmt::Display for ThreadId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0 == 0 {
            f.write_str("(invalid thread id)")
        } else {
            write!(f, "{}", self.0)
        }
    }
}
