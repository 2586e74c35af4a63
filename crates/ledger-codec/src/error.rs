use ledger_codec_flags::FlagError;
use thiserror::Error;

/// Every way a field decode or encode can fail.
///
/// All of these are deterministic in their input: retrying the same call
/// reproduces the same error.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CodecError {
    #[error("flags need a TransactionType or LedgerEntryType on the enclosing record")]
    MissingDiscriminator,
    #[error("type {0} has no flag table entry")]
    UnknownType(String),
    #[error("flag {flag} is not defined for {discriminator}")]
    UnknownFlag { discriminator: String, flag: String },
    #[error("{field} must be between {min} and {max}, got {value}")]
    OutOfRange {
        field: &'static str,
        value: String,
        min: String,
        max: String,
    },
    #[error("{0} has more precision than drops allow (at most 6 decimal places)")]
    FractionalDrops(String),
    #[error("invalid {field}: {reason}")]
    InvalidFormat { field: &'static str, reason: String },
    #[error("invalid flag table: {0}")]
    InvalidTable(String),
}

impl CodecError {
    pub(crate) fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        CodecError::InvalidFormat {
            field,
            reason: reason.into(),
        }
    }

    pub(crate) fn out_of_range(
        field: &'static str,
        value: impl ToString,
        min: impl ToString,
        max: impl ToString,
    ) -> Self {
        CodecError::OutOfRange {
            field,
            value: value.to_string(),
            min: min.to_string(),
            max: max.to_string(),
        }
    }
}

impl From<FlagError> for CodecError {
    fn from(err: FlagError) -> Self {
        match err {
            FlagError::MissingDiscriminator => CodecError::MissingDiscriminator,
            FlagError::UnknownType(t) => CodecError::UnknownType(t),
            FlagError::UnknownFlag {
                discriminator,
                flag,
            } => CodecError::UnknownFlag {
                discriminator,
                flag,
            },
            FlagError::InvalidTable(reason) => CodecError::InvalidTable(reason),
        }
    }
}

pub type CodecResult<T> = Result<T, CodecError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn out_of_range_names_the_bound() {
        let err = CodecError::out_of_range("TradingFee", 1500, 0, 1000);
        assert_eq!(err.to_string(), "TradingFee must be between 0 and 1000, got 1500");
    }

    #[test]
    fn flag_errors_map_one_to_one() {
        assert_eq!(
            CodecError::from(FlagError::MissingDiscriminator),
            CodecError::MissingDiscriminator
        );
        assert_eq!(
            CodecError::from(FlagError::UnknownType("Bridge".into())),
            CodecError::UnknownType("Bridge".into())
        );
    }
}
