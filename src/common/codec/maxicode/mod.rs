//! MaxiCode high level encodation.

mod encoder;
mod mode;

pub use encoder::*;
pub use mode::*;

use super::Codeword;

// Global constants
//------------------------------------------------------------------------------

pub const ECI: Codeword = 27;
pub const NUMERIC_SHIFT: Codeword = 31;
pub const PAD: Codeword = 33;
pub const STRUCTURED_APPEND: Codeword = 33;

// Set A to one set B character
pub const SHIFT_B: Codeword = 59;
// Set B to one, two or three set A characters
pub const SHIFT_A: Codeword = 59;
pub const TWO_SHIFT_A: Codeword = 56;
pub const THREE_SHIFT_A: Codeword = 57;

// Shift to set C, D or E from any set, lock-in when repeated
pub const SHIFT_C: Codeword = 60;
pub const SHIFT_D: Codeword = 61;
pub const SHIFT_E: Codeword = 62;

// Set B to set A
pub const LATCH_A_FROM_B: Codeword = 63;
// Sets C, D and E to set A
pub const LATCH_A: Codeword = 58;
pub const LATCH_B: Codeword = 63;

pub const MAX_ECI: u32 = 999_999;

// Digits carried by one numeric shift
pub const NUMERIC_GROUP: usize = 9;

pub const MAX_APPEND_TOTAL: usize = 8;
