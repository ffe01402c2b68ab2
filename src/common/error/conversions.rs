//! Conversions into the crate-wide [`Error`].

use super::types::Error;
use crate::common::binary::BinaryError;

impl From<BinaryError> for Error {
    fn from(err: BinaryError) -> Self {
        Error::Corrupted(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_read_becomes_corrupted() {
        let err: Error = BinaryError::ShortRead {
            offset: 2,
            width: 4,
            available: 3,
        }
        .into();
        assert!(matches!(err, Error::Corrupted(_)));
        assert_eq!(
            err.to_string(),
            "Corrupted stream: 4-byte read at offset 2 past the end of 3 byte(s)"
        );
    }
}
