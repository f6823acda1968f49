use log::debug;

use super::{Input, StructuredAppend, Symbol, Symbology};
use crate::common::{
    codec::{
        analyze, analyze_forced,
        pdf417::{encode, fallback, macro_block, pad, Mode, MAX_ECI, PASSES},
        Codeword, Padder,
    },
    ec::{reed_solomon, GF929},
    error::{CapacityError, ConfigError, SymbolResult},
    metadata::{
        pdf417::{
            auto_ec_level, ec_len, specs, start_columns, MAX_CODEWORDS, MAX_COLS, MAX_EC_LEVEL,
            MAX_ROWS, MIN_COLS, MIN_ROWS,
        },
        Sizer, SymbolSpec,
    },
};

// Builder
//------------------------------------------------------------------------------

pub struct Pdf417Builder<'a> {
    data: &'a str,
    input: Input,
    columns: Option<usize>,
    size: Option<(usize, usize)>,
    ec_level: Option<u8>,
    mode: Option<Mode>,
    append: Option<StructuredAppend>,
}

impl<'a> Pdf417Builder<'a> {
    pub fn new(data: &'a str) -> Self {
        Self {
            data,
            input: Input::default(),
            columns: None,
            size: None,
            ec_level: None,
            mode: None,
            append: None,
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

    /// Fixes the number of data columns and lets the row count grow with the data.
    pub fn columns(&mut self, cols: usize) -> SymbolResult<&mut Self> {
        if !(MIN_COLS..=MAX_COLS).contains(&cols) {
            return Err(ConfigError::InvalidColumns(cols).into());
        }
        self.columns = Some(cols);
        self.size = None;
        Ok(self)
    }

    pub fn size(&mut self, rows: usize, cols: usize) -> SymbolResult<&mut Self> {
        if !(MIN_ROWS..=MAX_ROWS).contains(&rows)
            || !(MIN_COLS..=MAX_COLS).contains(&cols)
            || rows * cols > MAX_CODEWORDS
        {
            return Err(ConfigError::InvalidSize { rows, cols }.into());
        }
        self.size = Some((rows, cols));
        self.columns = None;
        Ok(self)
    }

    pub fn unset_size(&mut self) -> &mut Self {
        self.size = None;
        self.columns = None;
        self
    }

    pub fn ec_level(&mut self, level: u8) -> SymbolResult<&mut Self> {
        if level > MAX_EC_LEVEL {
            return Err(ConfigError::InvalidEcLevel(level).into());
        }
        self.ec_level = Some(level);
        Ok(self)
    }

    pub fn mode(&mut self, mode: Mode) -> SymbolResult<&mut Self> {
        if mode == Mode::Eci {
            return Err(ConfigError::InvalidForcedMode(mode.name()).into());
        }
        self.mode = Some(mode);
        Ok(self)
    }

    pub fn structured_append(
        &mut self,
        index: usize,
        total: usize,
        file_id: u32,
    ) -> SymbolResult<&mut Self> {
        let append = StructuredAppend::new(index, total, file_id);
        append.validate(MAX_APPEND_TOTAL, FILE_IDS)?;
        self.append = Some(append);
        Ok(self)
    }

    pub fn metadata(&self) -> String {
        let size = match (self.size, self.columns) {
            (Some((r, c)), _) => format!("{r}x{c}"),
            (None, Some(c)) => format!("Auto x {c}"),
            (None, None) => "Auto".to_owned(),
        };
        let ec_level = self.ec_level.map_or("Auto".to_owned(), |l| l.to_string());
        let mode = self.mode.map_or("Auto", |m| m.name());
        format!(
            "{{ Size: {size}, Ec level: {ec_level}, Mode: {mode}, {} }}",
            self.input.metadata()
        )
    }

    // Smallest symbol for `count` data codewords within the configured size constraints
    fn fit(&self, count: usize, ecc_len: usize) -> SymbolResult<SymbolSpec> {
        if let Some((rows, cols)) = self.size {
            let table = specs(cols, ecc_len);
            return Sizer::forced(&table, rows, cols)?.accommodate(count);
        }

        let start = self.columns.unwrap_or_else(|| start_columns(count, ecc_len));
        let end = self.columns.unwrap_or(MAX_COLS);
        for cols in start..=end {
            let table = specs(cols, ecc_len);
            if table.is_empty() {
                continue;
            }
            if let Ok(spec) = Sizer::new(&table).accommodate(count) {
                return Ok(spec);
            }
        }
        Err(CapacityError::NoSymbolFits(count).into())
    }
}

impl Pdf417Builder<'_> {
    pub fn build(&self) -> SymbolResult<Symbol> {
        debug!("Generating PDF417 {}", self.metadata());

        let tokens = self.input.scan(self.data, false, MAX_ECI)?;
        let segs = match self.mode {
            Some(m) => analyze_forced(&tokens, m, Mode::Eci, m.accepts(), m.name())?,
            None => analyze(&tokens, &PASSES, fallback)?,
        };
        debug!("Segmented {} tokens into {} segments", tokens.len(), segs.len());

        let (mut codewords, _) = encode(&tokens, &segs);
        let trailer = self.append.map_or(vec![], |a| macro_block(a.index, a.total, a.file_id));

        // Length descriptor ahead of the data and the macro block behind the padding
        let overhead = 1 + trailer.len();
        let count = codewords.len() + overhead;
        let level = self.ec_level.unwrap_or_else(|| auto_ec_level(count));
        let ecc_len = ec_len(level);
        let spec = self.fit(count, ecc_len)?;
        debug!("Chose {spec} symbol at error correction level {level}");

        pad(&mut codewords, &Padder::new(spec, overhead))?;

        let mut data = Vec::with_capacity(spec.data_capacity);
        data.push(spec.data_capacity as Codeword);
        data.extend(codewords);
        data.extend(trailer);
        let ecc = reed_solomon(&data, ecc_len, &GF929);
        Ok(Symbol::new(Symbology::Pdf417, spec, data, ecc))
    }
}

// Global constants
//------------------------------------------------------------------------------

// Segment index and count are five digit fields
const MAX_APPEND_TOTAL: usize = 99_999;

// File ids are two base 900 codewords
const FILE_IDS: u32 = 900 * 900;
