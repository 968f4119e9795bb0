//! Status-code conventions
//!
//! Every probe, whatever its protocol, reports outcomes in the numeric
//! HTTP-status-code space. Non-HTTP probes translate their native failure
//! classification through [`FailureKind`]; anything without a better match
//! falls back to [`SERVER_ERROR`].

use serde::{Deserialize, Serialize};

/// Convention value for a successful hit
pub const OK: u16 = 200;

/// Convention fallback value for a failed hit
pub const SERVER_ERROR: u16 = 500;

/// Protocol-neutral failure classification
///
/// Probes for RPC protocols map their native status codes onto these
/// variants, then [`FailureKind::status_code`] yields the engine's
/// convention value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// Call was cancelled by the caller
    Canceled,
    /// Failure with no better classification
    Unknown,
    /// Request was malformed
    InvalidArgument,
    /// Deadline expired before the operation completed
    Timeout,
    /// Requested entity does not exist
    NotFound,
    /// Entity already exists
    AlreadyExists,
    /// Caller lacks permission
    PermissionDenied,
    /// Quota or rate limit exhausted
    ResourceExhausted,
    /// System not in a state required for the operation
    PreconditionFailed,
    /// Operation aborted, typically a concurrency conflict
    Aborted,
    /// Operation attempted past a valid range
    OutOfRange,
    /// Operation not implemented by the server
    Unimplemented,
    /// Internal server invariant broken
    Internal,
    /// Service currently unavailable
    Unavailable,
    /// Unrecoverable data loss or corruption
    DataLoss,
    /// Caller has no valid credentials
    Unauthenticated,
}

impl FailureKind {
    /// Map the classification onto the engine's status-code convention
    pub fn status_code(self) -> u16 {
        match self {
            FailureKind::InvalidArgument => 400,
            FailureKind::Unauthenticated => 401,
            FailureKind::PermissionDenied => 403,
            FailureKind::NotFound => 404,
            FailureKind::Timeout => 408,
            FailureKind::AlreadyExists => 409,
            FailureKind::PreconditionFailed => 412,
            FailureKind::Unimplemented => 501,
            FailureKind::Unavailable => 503,
            FailureKind::Canceled
            | FailureKind::Unknown
            | FailureKind::ResourceExhausted
            | FailureKind::Aborted
            | FailureKind::OutOfRange
            | FailureKind::Internal
            | FailureKind::DataLoss => SERVER_ERROR,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_side_classifications() {
        assert_eq!(FailureKind::InvalidArgument.status_code(), 400);
        assert_eq!(FailureKind::Unauthenticated.status_code(), 401);
        assert_eq!(FailureKind::PermissionDenied.status_code(), 403);
        assert_eq!(FailureKind::NotFound.status_code(), 404);
        assert_eq!(FailureKind::Timeout.status_code(), 408);
        assert_eq!(FailureKind::AlreadyExists.status_code(), 409);
        assert_eq!(FailureKind::PreconditionFailed.status_code(), 412);
    }

    #[test]
    fn test_server_side_classifications() {
        assert_eq!(FailureKind::Unimplemented.status_code(), 501);
        assert_eq!(FailureKind::Unavailable.status_code(), 503);
    }

    #[test]
    fn test_fallback_is_server_error() {
        for kind in [
            FailureKind::Canceled,
            FailureKind::Unknown,
            FailureKind::ResourceExhausted,
            FailureKind::Aborted,
            FailureKind::OutOfRange,
            FailureKind::Internal,
            FailureKind::DataLoss,
        ] {
            assert_eq!(kind.status_code(), SERVER_ERROR);
        }
    }

    #[test]
    fn test_snake_case_serialization() {
        assert_eq!(
            serde_json::to_string(&FailureKind::InvalidArgument).unwrap(),
            "\"invalid_argument\""
        );
        assert_eq!(
            serde_json::to_string(&FailureKind::Timeout).unwrap(),
            "\"timeout\""
        );
    }
}
