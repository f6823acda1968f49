//! ECC 200 data encodation.

mod encoder;
mod mode;

pub use encoder::*;
pub use mode::*;

use super::Codeword;

// Global constants
//------------------------------------------------------------------------------

pub const PAD: Codeword = 129;
pub const LATCH_C40: Codeword = 230;
pub const LATCH_BASE256: Codeword = 231;
pub const FNC1: Codeword = 232;
pub const STRUCTURED_APPEND: Codeword = 233;
pub const UPPER_SHIFT: Codeword = 235;
pub const MACRO_05: Codeword = 236;
pub const MACRO_06: Codeword = 237;
pub const LATCH_X12: Codeword = 238;
pub const LATCH_TEXT: Codeword = 239;
pub const LATCH_EDIFACT: Codeword = 240;
pub const ECI: Codeword = 241;
pub const UNLATCH: Codeword = 254;

pub const SHIFT_1: u8 = 0;
pub const SHIFT_2: u8 = 1;
pub const SHIFT_3: u8 = 2;
pub const UPPER_SHIFT_VALUE: u8 = 30;
pub const EDIFACT_UNLATCH: u8 = 31;

// Longest Base256 field
pub const MAX_BASE256_FIELD: usize = 1555;
