mod datamatrix;
mod maxicode;
mod pdf417;
mod symbol;

pub use datamatrix::{DataMatrixBuilder, MacroHeader};
pub use maxicode::MaxiCodeBuilder;
pub use pdf417::Pdf417Builder;
pub use symbol::{Symbol, Symbology};

use crate::common::{
    codec::{scan, Charset, ScanOptions, Token},
    error::{ConfigError, SymbolResult},
};

// Input options
//------------------------------------------------------------------------------

/// Text handling options shared by every builder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Input {
    extended_channel: bool,
    tilde: bool,
    charset: Option<Charset>,
}

impl Default for Input {
    fn default() -> Self {
        Self { extended_channel: true, tilde: false, charset: None }
    }
}

impl Input {
    pub fn set_extended_channel(&mut self, extended_channel: bool) {
        self.extended_channel = extended_channel;
    }

    pub fn set_tilde(&mut self, tilde: bool) {
        self.tilde = tilde;
    }

    pub fn set_charset(&mut self, eci: u32) -> SymbolResult<()> {
        self.charset = Some(Charset::from_eci(eci).ok_or(ConfigError::UnknownCharset(eci))?);
        Ok(())
    }

    pub fn scan(&self, data: &str, fnc1: bool, max_eci: u32) -> SymbolResult<Vec<Token>> {
        let opts = ScanOptions {
            extended_channel: self.extended_channel,
            tilde: self.tilde,
            fnc1,
            max_eci,
            charset: self.charset,
        };
        scan(data, &opts)
    }

    pub fn metadata(&self) -> String {
        let charset = self.charset.map_or("ISO-8859-1", |c| c.name());
        format!("Charset: {charset}, Escapes: {}, Tilde: {}", self.extended_channel, self.tilde)
    }
}

// Structured append
//------------------------------------------------------------------------------

/// Position of a symbol within a message spread over several symbols.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StructuredAppend {
    pub index: usize,
    pub total: usize,
    pub file_id: u32,
}

impl StructuredAppend {
    pub fn new(index: usize, total: usize, file_id: u32) -> Self {
        Self { index, total, file_id }
    }

    /// Checks `1 <= index <= total`, `2 <= total <= max_total` and `file_id < file_ids`.
    pub(crate) fn validate(&self, max_total: usize, file_ids: u32) -> SymbolResult<()> {
        let Self { index, total, file_id } = *self;
        if index == 0 || index > total || total < 2 || total > max_total {
            return Err(ConfigError::InvalidStructuredAppend { index, total }.into());
        }
        if file_id >= file_ids {
            return Err(ConfigError::InvalidFileId(file_id).into());
        }
        Ok(())
    }
}

#[cfg(test)]
mod builder_util_tests {
    use test_case::test_case;

    use super::{Input, StructuredAppend};
    use crate::common::error::ConfigError;

    #[test_case(1, 2, 0, true)]
    #[test_case(16, 16, 64515, true)]
    #[test_case(0, 2, 0, false)]
    #[test_case(3, 2, 0, false)]
    #[test_case(1, 1, 0, false)]
    #[test_case(1, 17, 0, false)]
    fn test_validate(index: usize, total: usize, file_id: u32, ok: bool) {
        let append = StructuredAppend::new(index, total, file_id);
        assert_eq!(append.validate(16, 64516).is_ok(), ok);
    }

    #[test]
    fn test_invalid_file_id() {
        let append = StructuredAppend::new(1, 2, 64516);
        assert_eq!(append.validate(16, 64516), Err(ConfigError::InvalidFileId(64516).into()));
    }

    #[test]
    fn test_input_metadata() {
        let mut input = Input::default();
        assert_eq!(input.metadata(), "Charset: ISO-8859-1, Escapes: true, Tilde: false");
        input.set_charset(26).unwrap();
        input.set_tilde(true);
        assert_eq!(input.metadata(), "Charset: UTF-8, Escapes: true, Tilde: true");
        assert_eq!(input.set_charset(2), Err(ConfigError::UnknownCharset(2).into()));
    }
}
