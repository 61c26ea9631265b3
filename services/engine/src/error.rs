use thiserror::Error;

/// Errors surfaced by the ledger engine. Anything raised inside a
/// transactional block aborts the whole transaction; the server layer
/// converts each variant into a `{status, message}` envelope.
#[derive(Debug, Error)]
pub enum EngineError {
    /// Rejected before any write (bad stake, malformed score, ...).
    #[error("{0}")]
    Invalid(String),

    /// Business-rule violation raised inside a transaction.
    #[error("{0}")]
    Rejected(String),

    #[error("Saldo insuficiente.")]
    InsufficientFunds,

    #[error("{0}")]
    NotFound(String),

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl EngineError {
    /// Whether a sqlx error is a unique-constraint violation. Pool and
    /// participant uniqueness lean on DB constraints instead of
    /// read-then-insert checks.
    pub fn is_unique_violation(err: &sqlx::Error) -> bool {
        matches!(
            err.as_database_error().and_then(|e| e.code()),
            Some(code) if code == "23505"
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insufficient_funds_message_is_user_facing() {
        assert_eq!(EngineError::InsufficientFunds.to_string(), "Saldo insuficiente.");
    }

    #[test]
    fn rejected_carries_message() {
        let err = EngineError::Rejected("Você já apostou nesta rodada.".into());
        assert_eq!(err.to_string(), "Você já apostou nesta rodada.");
    }
}
