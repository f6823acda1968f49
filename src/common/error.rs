use thiserror::Error;

// Error
//------------------------------------------------------------------------------

#[derive(Debug, Error, PartialEq, Eq, Copy, Clone)]
pub enum SymbolError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Capacity(#[from] CapacityError),
}

/// Invalid or contradictory settings, raised by the builder setters before any encoding.
#[derive(Debug, Error, PartialEq, Eq, Copy, Clone)]
pub enum ConfigError {
    #[error("structured append and macro cannot be used together")]
    ExclusiveAppend,
    #[error("no {rows}x{cols} symbol exists")]
    InvalidSize { rows: usize, cols: usize },
    #[error("invalid column count {0}")]
    InvalidColumns(usize),
    #[error("invalid error correction level {0}")]
    InvalidEcLevel(u8),
    #[error("invalid structured append position {index} of {total}")]
    InvalidStructuredAppend { index: usize, total: usize },
    #[error("invalid structured append file id {0}")]
    InvalidFileId(u32),
    #[error("unsupported charset for ECI {0}")]
    UnknownCharset(u32),
    #[error("cannot force the {0} mode")]
    InvalidForcedMode(&'static str),
    #[error("invalid primary message: {0}")]
    InvalidPrimary(&'static str),
    #[error("symbol mode {0} requires a primary message")]
    MissingPrimary(u8),
    #[error("symbol mode {0} cannot carry a primary message")]
    UnexpectedPrimary(u8),
}

/// Input that cannot be classified, raised synchronously from `build`.
#[derive(Debug, Error, PartialEq, Eq, Copy, Clone)]
pub enum ParseError {
    #[error("provide data to parse")]
    EmptyData,
    #[error("malformed escape sequence at position {0}")]
    MalformedEscape(usize),
    #[error("invalid character {ch:?} at position {position}")]
    InvalidChar { ch: char, position: usize },
    #[error("text cannot be represented in the charset of ECI {0}")]
    Unmappable(u32),
    #[error("FNC1 is not supported by this symbology (position {0})")]
    UnsupportedFnc1(usize),
    #[error("ECI {0} is out of range for this symbology")]
    EciOutOfRange(u32),
    #[error("token at position {position} cannot be encoded in the {mode} mode")]
    Unencodable { position: usize, mode: &'static str },
}

#[derive(Debug, Error, PartialEq, Eq, Copy, Clone)]
pub enum CapacityError {
    #[error("no valid symbol can fit your data ({0} codewords)")]
    NoSymbolFits(usize),
    #[error("data of {required} codewords does not fit the {rows}x{cols} symbol (capacity {capacity})")]
    SymbolTooSmall { rows: usize, cols: usize, capacity: usize, required: usize },
}

pub type SymbolResult<T> = Result<T, SymbolError>;

#[cfg(test)]
mod error_tests {
    use super::{CapacityError, ConfigError, ParseError, SymbolError};

    #[test]
    fn test_messages() {
        let err: SymbolError = ParseError::EmptyData.into();
        assert_eq!(err.to_string(), "provide data to parse");
        let err: SymbolError = CapacityError::NoSymbolFits(1600).into();
        assert_eq!(err.to_string(), "no valid symbol can fit your data (1600 codewords)");
        let err: SymbolError = ConfigError::ExclusiveAppend.into();
        assert_eq!(err.to_string(), "structured append and macro cannot be used together");
    }

    #[test]
    fn test_symbol_too_small_message() {
        let err = CapacityError::SymbolTooSmall { rows: 10, cols: 10, capacity: 3, required: 7 };
        assert_eq!(
            err.to_string(),
            "data of 7 codewords does not fit the 10x10 symbol (capacity 3)"
        );
    }
}
