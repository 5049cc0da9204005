//! Unified error type and the transport-facing taxonomy.

use botrally_ledger::LedgerError;
use botrally_session::SessionError;
use botrally_store::StoreError;

/// Top-level error that wraps all crate-specific errors.
///
/// When using the `botrally` meta-crate, you deal with this single error
/// type instead of importing errors from each sub-crate. The `#[from]`
/// attribute auto-generates `From` impls, so `?` converts sub-crate
/// errors automatically.
#[derive(Debug, thiserror::Error)]
pub enum BotrallyError {
    /// A store-level error (uniqueness violation at insert).
    #[error(transparent)]
    Store(#[from] StoreError),

    /// A session-level error (missing entity, relationship
    /// precondition, allocation budget).
    #[error(transparent)]
    Session(#[from] SessionError),

    /// A ledger-level error (submission preconditions, duplicates).
    #[error(transparent)]
    Ledger(#[from] LedgerError),
}

/// The coarse failure taxonomy a transport adapter maps to status codes.
///
/// Every concrete error resolves to exactly one kind. Adapters switch on
/// the kind (or just use [`status_code`](Self::status_code)) and never
/// need to interpret domain errors further.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// A referenced entity is absent.
    NotFound,
    /// A uniqueness constraint was violated — duplicate user name,
    /// exhausted room code after retries, duplicate round submission.
    Conflict,
    /// A relationship precondition failed — not in a room, no robot,
    /// submitting from outside the room.
    InvalidState,
    /// A retryable condition — the allocation budget ran out.
    Transient,
}

impl ErrorKind {
    /// The stable HTTP status for this kind.
    ///
    /// One coherent policy: 404 for missing entities, 409 for
    /// uniqueness conflicts, 400 for violated preconditions, 503 for
    /// retryable failures.
    pub fn status_code(self) -> u16 {
        match self {
            Self::NotFound => 404,
            Self::Conflict => 409,
            Self::InvalidState => 400,
            Self::Transient => 503,
        }
    }
}

impl BotrallyError {
    /// Classifies this error into the transport-facing taxonomy.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Store(e) => match e {
                StoreError::NameTaken(_)
                | StoreError::CodeTaken(_)
                | StoreError::DuplicateRecord { .. } => ErrorKind::Conflict,
            },
            Self::Session(e) => match e {
                SessionError::UserNotFound(_)
                | SessionError::RoomNotFound(_) => ErrorKind::NotFound,
                SessionError::NameTaken(_)
                | SessionError::AlreadyInRoom(_) => ErrorKind::Conflict,
                SessionError::NotInRoom(_) | SessionError::NoRobot(_) => {
                    ErrorKind::InvalidState
                }
                SessionError::CodesExhausted { .. } => ErrorKind::Transient,
            },
            Self::Ledger(e) => match e {
                LedgerError::UserNotFound(_)
                | LedgerError::RoomNotFound(_) => ErrorKind::NotFound,
                LedgerError::DuplicateRecord { .. } => ErrorKind::Conflict,
                LedgerError::NotInRoom { .. }
                | LedgerError::InvalidRound => ErrorKind::InvalidState,
            },
        }
    }

    /// Shorthand for `self.kind().status_code()`.
    pub fn status_code(&self) -> u16 {
        self.kind().status_code()
    }
}

#[cfg(test)]
mod tests {
    use botrally_protocol::RoomCode;

    use super::*;

    #[test]
    fn test_from_session_error() {
        let err = SessionError::UserNotFound("alice".into());
        let wrapped: BotrallyError = err.into();
        assert!(matches!(wrapped, BotrallyError::Session(_)));
        assert!(wrapped.to_string().contains("alice"));
    }

    #[test]
    fn test_from_ledger_error() {
        let err = LedgerError::RoomNotFound(RoomCode(999));
        let wrapped: BotrallyError = err.into();
        assert!(matches!(wrapped, BotrallyError::Ledger(_)));
    }

    #[test]
    fn test_from_store_error() {
        let err = StoreError::NameTaken("alice".into());
        let wrapped: BotrallyError = err.into();
        assert!(matches!(wrapped, BotrallyError::Store(_)));
    }

    #[test]
    fn test_missing_entities_map_to_404() {
        let errors: Vec<BotrallyError> = vec![
            SessionError::UserNotFound("a".into()).into(),
            SessionError::RoomNotFound(RoomCode(1)).into(),
            LedgerError::UserNotFound("a".into()).into(),
            LedgerError::RoomNotFound(RoomCode(1)).into(),
        ];
        for err in errors {
            assert_eq!(err.kind(), ErrorKind::NotFound);
            assert_eq!(err.status_code(), 404);
        }
    }

    #[test]
    fn test_conflicts_map_to_409() {
        let errors: Vec<BotrallyError> = vec![
            SessionError::NameTaken("a".into()).into(),
            SessionError::AlreadyInRoom("a".into()).into(),
            LedgerError::DuplicateRecord {
                user: "a".into(),
                code: RoomCode(1),
                round: 3,
            }
            .into(),
        ];
        for err in errors {
            assert_eq!(err.status_code(), 409);
        }
    }

    #[test]
    fn test_violated_preconditions_map_to_400() {
        let errors: Vec<BotrallyError> = vec![
            SessionError::NotInRoom("a".into()).into(),
            SessionError::NoRobot("a".into()).into(),
            LedgerError::NotInRoom {
                user: "a".into(),
                code: RoomCode(1),
            }
            .into(),
            LedgerError::InvalidRound.into(),
        ];
        for err in errors {
            assert_eq!(err.status_code(), 400);
        }
    }

    #[test]
    fn test_exhausted_allocation_maps_to_503() {
        let err: BotrallyError =
            SessionError::CodesExhausted { attempts: 16 }.into();
        assert_eq!(err.kind(), ErrorKind::Transient);
        assert_eq!(err.status_code(), 503);
    }
}
