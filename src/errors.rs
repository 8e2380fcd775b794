//! Error types for thread lifecycle operations.
//!
//! Every recoverable failure is reported synchronously to the caller of the
//! offending operation and is never retried. Destroying a joinable thread is
//! deliberately absent from this taxonomy: it aborts the process instead
//! (see [`Thread`](crate::Thread)).

extern crate alloc;
use alloc::string::String;

/// Result type for thread operations.
pub type ThreadResult<T> = Result<T, ThreadError>;

/// Error type for all thread operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ThreadError {
    /// Thread creation errors
    #[error("thread spawn error: {0}")]
    Spawn(#[from] SpawnError),
    /// Thread joining errors
    #[error("thread join error: {0}")]
    Join(#[from] JoinError),
    /// Invalid operation errors
    #[error("invalid operation: {0}")]
    InvalidOperation(#[from] InvalidOperationError),
}

/// Errors that can occur while creating a thread.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SpawnError {
    /// The platform refused to create the thread (resource exhaustion,
    /// permissions, ...). Carries the platform error code.
    #[error("platform refused to create thread (os error {code})")]
    OsResource {
        /// Platform error code (an `errno` value on POSIX targets).
        code: i32,
    },
}

/// Errors that can occur while joining a thread.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum JoinError {
    /// A thread tried to join itself.
    #[error("joining the calling thread would deadlock")]
    WouldDeadlock,
    /// There is no thread to wait for: the handle is gone, or the platform
    /// no longer recognises it.
    #[error("no such thread (os error {code})")]
    NoSuchThread {
        /// Platform error code (`ESRCH` when there was no handle at all).
        code: i32,
    },
}

/// Errors for operations called in a state that does not permit them.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InvalidOperationError {
    /// `detach` on a thread that is not joinable.
    #[error("thread is not joinable")]
    NotJoinable,
    /// Invalid parameter provided
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),
}

impl ThreadError {
    /// Create a platform resource error from a raw error code.
    pub fn os_resource(code: i32) -> Self {
        ThreadError::Spawn(SpawnError::OsResource { code })
    }

    /// Create a no-such-thread error for a join without a handle.
    pub fn no_such_thread() -> Self {
        ThreadError::Join(JoinError::NoSuchThread { code: libc::ESRCH })
    }

    /// Create a not-joinable error.
    pub fn not_joinable() -> Self {
        ThreadError::InvalidOperation(InvalidOperationError::NotJoinable)
    }

    /// Create an invalid parameter error with a message.
    pub fn invalid_parameter(msg: impl Into<String>) -> Self {
        ThreadError::InvalidOperation(InvalidOperationError::InvalidParameter(msg.into()))
    }

    /// Raw platform error code, if this error carries one.
    pub fn os_code(&self) -> Option<i32> {
        match self {
            ThreadError::Spawn(SpawnError::OsResource { code })
            | ThreadError::Join(JoinError::NoSuchThread { code }) => Some(*code),
            _ => None,
        }
    }

    /// `true` if the operation failed because the thread was not joinable,
    /// either by our own bookkeeping or because the platform lost track of it.
    pub fn is_not_joinable(&self) -> bool {
        matches!(
            self,
            ThreadError::InvalidOperation(InvalidOperationError::NotJoinable)
                | ThreadError::Join(JoinError::NoSuchThread { .. })
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;

    #[test]
    fn test_error_display() {
        let err = ThreadError::os_resource(libc::EAGAIN);
        assert!(err.to_string().starts_with("thread spawn error: platform refused"));

        let err = ThreadError::from(JoinError::WouldDeadlock);
        assert_eq!(
            err.to_string(),
            "thread join error: joining the calling thread would deadlock"
        );

        let err = ThreadError::not_joinable();
        assert_eq!(err.to_string(), "invalid operation: thread is not joinable");
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(ThreadError::os_resource(11).os_code(), Some(11));
        assert_eq!(
            ThreadError::from(JoinError::NoSuchThread { code: 3 }).os_code(),
            Some(3)
        );
        assert_eq!(ThreadError::not_joinable().os_code(), None);
        assert_eq!(ThreadError::from(JoinError::WouldDeadlock).os_code(), None);
    }

    #[test]
    fn test_not_joinable_classification() {
        assert!(ThreadError::not_joinable().is_not_joinable());
        assert!(ThreadError::no_such_thread().is_not_joinable());
        assert_eq!(ThreadError::no_such_thread().os_code(), Some(libc::ESRCH));
        assert!(ThreadError::from(JoinError::NoSuchThread { code: 3 }).is_not_joinable());
        assert!(!ThreadError::from(JoinError::WouldDeadlock).is_not_joinable());
        assert!(!ThreadError::invalid_parameter("stack size").is_not_joinable());
    }
}
