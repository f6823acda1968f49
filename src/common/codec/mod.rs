mod analyze;
mod classify;
mod pad;

pub mod datamatrix;
pub mod maxicode;
pub mod pdf417;

pub use analyze::*;
pub use classify::*;
pub use pad::*;

/// One unit of the symbol alphabet. Wide enough for GF(929).
pub type Codeword = u16;

// Token
//------------------------------------------------------------------------------

/// Normalized input unit handed from the classifier to the analyzer and the mode encoders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Token {
    Byte(u8),
    // Extended channel designator
    Eci(u32),
    Fnc1,
}

impl Token {
    pub fn byte(self) -> Option<u8> {
        match self {
            Self::Byte(b) => Some(b),
            _ => None,
        }
    }

    pub fn is_digit(self) -> bool {
        matches!(self, Self::Byte(b'0'..=b'9'))
    }

    pub fn is_eci(self) -> bool {
        matches!(self, Self::Eci(_))
    }
}
