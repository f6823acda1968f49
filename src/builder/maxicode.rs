use log::debug;

use super::{Input, StructuredAppend, Symbol, Symbology};
use crate::common::{
    codec::{
        analyze,
        maxicode::{
            encode, fallback, pad, primary_codewords, Primary, MAX_APPEND_TOTAL, MAX_ECI, PASSES,
            STRUCTURED_APPEND,
        },
        Codeword, Padder,
    },
    ec::{interleaved_ecc, reed_solomon, GF64},
    error::{ConfigError, SymbolResult},
    metadata::maxicode::{
        SymbolMode, PRIMARY_DATA_LEN, PRIMARY_ECC_LEN, SECONDARY_BLOCKS, TOTAL_CODEWORDS,
    },
};

// Builder
//------------------------------------------------------------------------------

pub struct MaxiCodeBuilder<'a> {
    data: &'a str,
    input: Input,
    mode: SymbolMode,
    primary: Option<Primary>,
    append: Option<StructuredAppend>,
}

impl<'a> MaxiCodeBuilder<'a> {
    pub fn new(data: &'a str) -> Self {
        Self {
            data,
            input: Input::default(),
            mode: SymbolMode::Standard,
            primary: None,
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

    pub fn mode(&mut self, mode: SymbolMode) -> &mut Self {
        self.mode = mode;
        self
    }

    /// Carrier message of the structured modes 2 and 3.
    pub fn primary(&mut self, postcode: &str, country: u16, service: u16) -> &mut Self {
        self.primary = Some(Primary::new(postcode, country, service));
        self
    }

    pub fn unset_primary(&mut self) -> &mut Self {
        self.primary = None;
        self
    }

    pub fn structured_append(&mut self, index: usize, total: usize) -> SymbolResult<&mut Self> {
        let append = StructuredAppend::new(index, total, 0);
        append.validate(MAX_APPEND_TOTAL, 1)?;
        self.append = Some(append);
        Ok(self)
    }

    pub fn metadata(&self) -> String {
        let primary = match &self.primary {
            Some(p) => format!("{} {:03} {:03}", p.postcode, p.country, p.service),
            None => "None".to_owned(),
        };
        format!(
            "{{ Mode: {}, Primary: {primary}, {} }}",
            self.mode.number(),
            self.input.metadata()
        )
    }

    // Mode codeword, or the packed carrier message in the structured modes
    fn primary_data(&self) -> SymbolResult<Vec<Codeword>> {
        let n = self.mode.number();
        match (&self.primary, self.mode.is_structured()) {
            (Some(primary), true) => primary_codewords(self.mode, primary),
            (None, false) => Ok(vec![n as Codeword]),
            (None, true) => Err(ConfigError::MissingPrimary(n).into()),
            (Some(_), false) => Err(ConfigError::UnexpectedPrimary(n).into()),
        }
    }

    fn header(&self) -> Vec<Codeword> {
        match self.append {
            Some(a) => vec![STRUCTURED_APPEND, ((a.index - 1) << 3 | (a.total - 1)) as Codeword],
            None => vec![],
        }
    }
}

impl MaxiCodeBuilder<'_> {
    pub fn build(&self) -> SymbolResult<Symbol> {
        debug!("Generating MaxiCode {}", self.metadata());

        let head = self.primary_data()?;

        let tokens = self.input.scan(self.data, false, MAX_ECI)?;
        let segs = analyze(&tokens, &PASSES, fallback)?;
        debug!("Segmented {} tokens into {} segments", tokens.len(), segs.len());

        let (mut message, state) = encode(&tokens, &segs, &self.header());
        let spec = self.mode.spec();
        pad(&mut message, state, &Padder::new(spec, self.mode.overhead()))?;

        let mut data = head;
        data.extend(message);
        let (primary, secondary) = data.split_at(PRIMARY_DATA_LEN);
        let primary_ecc = reed_solomon(primary, PRIMARY_ECC_LEN, &GF64);
        let secondary_ecc =
            interleaved_ecc(secondary, SECONDARY_BLOCKS, self.mode.secondary_ecc_len(), &GF64);

        let mut codewords = Vec::with_capacity(spec.total_capacity());
        codewords.extend_from_slice(primary);
        codewords.extend_from_slice(&primary_ecc);
        codewords.extend_from_slice(secondary);
        codewords.extend_from_slice(&secondary_ecc);
        debug_assert_eq!(codewords.len(), TOTAL_CODEWORDS, "MaxiCode layout mismatch");

        let mut ecc = primary_ecc;
        ecc.extend(secondary_ecc);
        debug!("Generated mode {} MaxiCode", self.mode.number());
        Ok(Symbol::with_codewords(Symbology::MaxiCode, spec, data, ecc, codewords))
    }
}
