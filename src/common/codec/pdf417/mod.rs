//! PDF417 high level encodation.

mod encoder;
mod mode;

pub use encoder::*;
pub use mode::*;

use super::Codeword;

// Global constants
//------------------------------------------------------------------------------

pub const LATCH_TEXT: Codeword = 900;
pub const LATCH_BYTE: Codeword = 901;
pub const LATCH_NUMERIC: Codeword = 902;
pub const SHIFT_BYTE: Codeword = 913;
pub const LATCH_BYTE_6: Codeword = 924;
pub const ECI_GENERAL: Codeword = 925;
pub const ECI_USER: Codeword = 926;
pub const ECI_CHARSET: Codeword = 927;
pub const MACRO: Codeword = 928;
pub const MACRO_OPTIONAL_FIELD: Codeword = 923;
pub const MACRO_TERMINATOR: Codeword = 922;
pub const PAD: Codeword = 900;

// Segment count field designator inside the Macro PDF417 control block
pub const SEGMENT_COUNT_FIELD: Codeword = 1;

pub const MAX_ECI: u32 = 811_799;

// Digits per numeric compaction group
pub const NUMERIC_GROUP: usize = 44;
