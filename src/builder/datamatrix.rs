use log::debug;

use super::{Input, StructuredAppend, Symbol, Symbology};
use crate::common::{
    codec::{
        analyze, analyze_forced,
        datamatrix::{encode, fallback, pad, Mode, MACRO_05, MACRO_06, PASSES, STRUCTURED_APPEND},
        Codeword, Padder,
    },
    ec::{interleaved_ecc, GF256},
    error::{ConfigError, SymbolResult},
    metadata::{datamatrix::Shape, Sizer},
};

// Macro header
//------------------------------------------------------------------------------

/// Industry header the reader expands around the message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MacroHeader {
    // [)>RS05GS ... RSEOT
    Macro05,
    // [)>RS06GS ... RSEOT
    Macro06,
}

impl MacroHeader {
    pub fn codeword(self) -> Codeword {
        match self {
            Self::Macro05 => MACRO_05,
            Self::Macro06 => MACRO_06,
        }
    }
}

// Builder
//------------------------------------------------------------------------------

pub struct DataMatrixBuilder<'a> {
    data: &'a str,
    input: Input,
    shape: Shape,
    size: Option<(usize, usize)>,
    mode: Option<Mode>,
    append: Option<StructuredAppend>,
    macro_header: Option<MacroHeader>,
}

impl<'a> DataMatrixBuilder<'a> {
    pub fn new(data: &'a str) -> Self {
        Self {
            data,
            input: Input::default(),
            shape: Shape::Square,
            size: None,
            mode: None,
            append: None,
            macro_header: None,
        }
    }

    pub fn data(&mut self, data: &'a str) -> &mut Self {
        self.data = data;
        self
    }

    pub fn extended_channel(&mut self, extended_channel: bool) -> &mut Self {
        self.input.set_extended_channel(extended_channel);
        self
    }

    pub fn tilde(&mut self, tilde: bool) -> &mut Self {
        self.input.set_tilde(tilde);
        self
    }

    pub fn charset(&mut self, eci: u32) -> SymbolResult<&mut Self> {
        self.input.set_charset(eci)?;
        Ok(self)
    }

    pub fn shape(&mut self, shape: Shape) -> &mut Self {
        if self.size.is_some_and(|(r, c)| Shape::of(r, c) != Some(shape)) {
            self.size = None;
        }
        self.shape = shape;
        self
    }

    /// Forces the symbol size. The shape follows the size.
    pub fn size(&mut self, rows: usize, cols: usize) -> SymbolResult<&mut Self> {
        let shape = Shape::of(rows, cols).ok_or(ConfigError::InvalidSize { rows, cols })?;
        self.shape = shape;
        self.size = Some((rows, cols));
        Ok(self)
    }

    pub fn unset_size(&mut self) -> &mut Self {
        self.size = None;
        self
    }

    /// Encodes every character in `mode` instead of segmenting the input.
    pub fn mode(&mut self, mode: Mode) -> SymbolResult<&mut Self> {
        if mode == Mode::Eci {
            return Err(ConfigError::InvalidForcedMode(mode.name()).into());
        }
        self.mode = Some(mode);
        Ok(self)
    }

    pub fn unset_mode(&mut self) -> &mut Self {
        self.mode = None;
        self
    }

    pub fn structured_append(
        &mut self,
        index: usize,
        total: usize,
        file_id: u32,
    ) -> SymbolResult<&mut Self> {
        if self.macro_header.is_some() {
            return Err(ConfigError::ExclusiveAppend.into());
        }
        let append = StructuredAppend::new(index, total, file_id);
        append.validate(MAX_APPEND_TOTAL, FILE_IDS)?;
        self.append = Some(append);
        Ok(self)
    }

    pub fn macro_header(&mut self, header: MacroHeader) -> SymbolResult<&mut Self> {
        if self.append.is_some() {
            return Err(ConfigError::ExclusiveAppend.into());
        }
        self.macro_header = Some(header);
        Ok(self)
    }

    pub fn metadata(&self) -> String {
        let size = self.size.map_or("Auto".to_owned(), |(r, c)| format!("{r}x{c}"));
        let mode = self.mode.map_or("Auto", |m| m.name());
        format!(
            "{{ Shape: {:?}, Size: {size}, Mode: {mode}, {} }}",
            self.shape,
            self.input.metadata()
        )
    }

    fn header(&self) -> Vec<Codeword> {
        if let Some(h) = self.macro_header {
            return vec![h.codeword()];
        }
        match self.append {
            Some(StructuredAppend { index, total, file_id }) => vec![
                STRUCTURED_APPEND,
                ((index - 1) << 4 | (17 - total)) as Codeword,
                (file_id / 254 + 1) as Codeword,
                (file_id % 254 + 1) as Codeword,
            ],
            None => vec![],
        }
    }
}

impl DataMatrixBuilder<'_> {
    pub fn build(&self) -> SymbolResult<Symbol> {
        debug!("Generating DataMatrix {}", self.metadata());

        let tokens = self.input.scan(self.data, true, MAX_ECI)?;
        let segs = match self.mode {
            Some(m) => analyze_forced(&tokens, m, Mode::Eci, m.accepts(), m.name())?,
            None => analyze(&tokens, &PASSES, fallback)?,
        };
        debug!("Segmented {} tokens into {} segments", tokens.len(), segs.len());

        let mut encoded = encode(&tokens, &segs, &self.header());

        let specs = self.shape.specs();
        let mut sizer = match self.size {
            Some((rows, cols)) => Sizer::forced(specs, rows, cols)?,
            None => Sizer::new(specs),
        };

        // A single trailing ASCII codeword that exactly fills the symbol needs no unlatch
        if let Some(i) = encoded.implicit_unlatch() {
            let len = encoded.codewords.len() - 1;
            if sizer.accommodate(len).is_ok_and(|s| s.data_capacity == len) {
                debug!("Dropping unlatch at {i} before the final codeword");
                encoded.drop_unlatch(i);
            }
        }

        let spec = sizer.advance(encoded.codewords.len())?;
        pad(&mut encoded, &Padder::new(spec, 0))?;

        let data = encoded.codewords;
        let ecc = interleaved_ecc(&data, spec.blocks, spec.error_capacity, &GF256);
        debug!("Generated {spec} DataMatrix with {} data codewords", data.len());
        Ok(Symbol::new(Symbology::DataMatrix, spec, data, ecc))
    }
}

// Global constants
//------------------------------------------------------------------------------

const MAX_ECI: u32 = 999_999;

const MAX_APPEND_TOTAL: usize = 16;

// File ids are two codewords of 1..=254
const FILE_IDS: u32 = 254 * 254;
