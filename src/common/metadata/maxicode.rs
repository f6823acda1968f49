use super::SymbolSpec;

// Symbol mode
//------------------------------------------------------------------------------

/// MaxiCode symbol mode. Modes 2 and 3 carry a structured carrier message in the primary
/// part of the symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SymbolMode {
    NumericPostcode,
    AlphaPostcode,
    #[default]
    Standard,
    FullEcc,
    ReaderProgramming,
}

impl SymbolMode {
    pub fn from_number(n: u8) -> Option<Self> {
        match n {
            2 => Some(Self::NumericPostcode),
            3 => Some(Self::AlphaPostcode),
            4 => Some(Self::Standard),
            5 => Some(Self::FullEcc),
            6 => Some(Self::ReaderProgramming),
            _ => None,
        }
    }

    pub fn number(self) -> u8 {
        match self {
            Self::NumericPostcode => 2,
            Self::AlphaPostcode => 3,
            Self::Standard => 4,
            Self::FullEcc => 5,
            Self::ReaderProgramming => 6,
        }
    }

    pub fn is_structured(self) -> bool {
        matches!(self, Self::NumericPostcode | Self::AlphaPostcode)
    }

    pub fn spec(self) -> SymbolSpec {
        match self {
            Self::FullEcc => FULL_ECC_SPEC,
            _ => STANDARD_SPEC,
        }
    }

    // Codewords ahead of the secondary message that count against data capacity
    pub fn overhead(self) -> usize {
        if self.is_structured() {
            PRIMARY_DATA_LEN
        } else {
            1
        }
    }

    pub fn secondary_ecc_len(self) -> usize {
        self.spec().error_capacity - PRIMARY_ECC_LEN
    }
}

// Global constants
//------------------------------------------------------------------------------

pub const ROWS: usize = 33;
pub const COLS: usize = 30;
pub const TOTAL_CODEWORDS: usize = 144;

pub const PRIMARY_DATA_LEN: usize = 10;
pub const PRIMARY_ECC_LEN: usize = 10;

// Secondary message is split into odd and even halves for error correction
pub const SECONDARY_BLOCKS: usize = 2;

pub const STANDARD_SPEC: SymbolSpec = SymbolSpec::new(ROWS, COLS, 94, 50, 1);
pub const FULL_ECC_SPEC: SymbolSpec = SymbolSpec::new(ROWS, COLS, 78, 66, 1);
