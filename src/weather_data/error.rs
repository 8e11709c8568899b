use thiserror::Error;

/// Shape problems found while turning a provider response into a table.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReshapeError {
    #[error("Interval must be positive, provider reported {0} s")]
    NonPositiveInterval(i64),

    #[error("Requested {expected} fields but the provider returned {found} variables")]
    FieldCountMismatch { expected: usize, found: usize },

    #[error("Field '{field}' has {found} values but the time range holds {expected} timestamps")]
    LengthMismatch {
        field: String,
        expected: usize,
        found: usize,
    },

    #[error("Timestamp {0} is out of the representable range")]
    TimestampOutOfRange(i64),
}
