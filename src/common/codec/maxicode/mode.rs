use super::{NUMERIC_GROUP, SHIFT_C, SHIFT_D, SHIFT_E};
use crate::common::codec::{Codeword, Pass, Token};

// Code set
//------------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CodeSet {
    #[default]
    A,
    B,
    C,
    D,
    E,
    Numeric,
    Eci,
}

impl CodeSet {
    pub fn name(self) -> &'static str {
        match self {
            Self::A => "Code Set A",
            Self::B => "Code Set B",
            Self::C => "Code Set C",
            Self::D => "Code Set D",
            Self::E => "Code Set E",
            Self::Numeric => "Numeric",
            Self::Eci => "ECI",
        }
    }

    /// Value of byte `b` in a character set. None for bytes outside the set and for the
    /// numeric and ECI pseudo sets.
    pub fn value(self, b: u8) -> Option<u8> {
        let v = match (self, b) {
            (Self::A | Self::B | Self::C | Self::D, 28..=30) => b,
            (Self::A, b'\r') => 0,
            (Self::A, b'A'..=b'Z') => b - b'A' + 1,
            (Self::A, b' ' | b'"'..=b':') => b,
            (Self::B, b'`'..=b'z') => b - b'`',
            (Self::B, b'{') => 32,
            (Self::B, b'}'..=0x7f) => b - 91,
            (Self::B, b';'..=b'?') => b - 22,
            (Self::B, b'['..=b'_') => b - 49,
            (Self::B, _) => return B_EXTRA.iter().position(|&c| c == b).map(|p| p as u8 + 47),
            (Self::C, 0xc0..=0xda) => b - 0xc0,
            (Self::C, 0xdb..=0xdf) => b - 0xbb,
            (Self::C, 0x80..=0x89) => b - 0x50,
            (Self::C, _) => return C_EXTRA.iter().position(|&c| c == b).map(|p| p as u8 + 37),
            (Self::D, 0xe0..=0xfa) => b - 0xe0,
            (Self::D, 0xfb..=0xff) => b - 0xdb,
            (Self::D, 0x8a..=0x94) => b - 0x5b,
            (Self::D, _) => return D_EXTRA.iter().position(|&c| c == b).map(|p| p as u8 + 37),
            (Self::E, 0..=26) => b,
            (Self::E, 27) => 30,
            (Self::E, 28..=31) => b + 4,
            (Self::E, 0x95..=0x9f) => b - 0x66,
            (Self::E, _) => return E_EXTRA.iter().position(|&c| c == b).map(|p| p as u8 + 36),
            _ => return None,
        };
        Some(v)
    }

    pub fn contains(self, t: Token) -> bool {
        match (self, t) {
            (Self::Numeric, t) => t.is_digit(),
            (Self::Eci, t) => t.is_eci(),
            (_, Token::Byte(b)) => self.value(b).is_some(),
            _ => false,
        }
    }

    pub fn is_shift_only(self) -> bool {
        matches!(self, Self::C | Self::D | Self::E)
    }

    // Shift into C, D or E from any character set, lock-in when repeated
    pub fn shift(self) -> Codeword {
        match self {
            Self::C => SHIFT_C,
            Self::D => SHIFT_D,
            Self::E => SHIFT_E,
            _ => unreachable!("No shift into {self:?}"),
        }
    }
}

// Classification
//------------------------------------------------------------------------------

pub fn character_sets(b: u8) -> impl Iterator<Item = CodeSet> {
    CHARACTER_SETS.into_iter().filter(move |s| s.value(b).is_some())
}

// Only one character set holds the token
fn is_exclusive(set: CodeSet, t: Token) -> bool {
    match t {
        Token::Byte(b) => character_sets(b).eq([set]),
        _ => false,
    }
}

fn claim_exclusive(set: CodeSet, run: &[Token]) -> usize {
    if run.iter().any(|&t| is_exclusive(set, t)) {
        run.len()
    } else {
        0
    }
}

fn claim_numeric(run: &[Token]) -> usize {
    run.len() / NUMERIC_GROUP * NUMERIC_GROUP
}

fn in_a(t: Token) -> bool {
    CodeSet::A.contains(t)
}

fn in_b(t: Token) -> bool {
    CodeSet::B.contains(t)
}

fn in_c(t: Token) -> bool {
    CodeSet::C.contains(t)
}

fn in_d(t: Token) -> bool {
    CodeSet::D.contains(t)
}

fn in_e(t: Token) -> bool {
    CodeSet::E.contains(t)
}

fn claim_a(run: &[Token]) -> usize {
    claim_exclusive(CodeSet::A, run)
}

fn claim_b(run: &[Token]) -> usize {
    claim_exclusive(CodeSet::B, run)
}

fn claim_c(run: &[Token]) -> usize {
    claim_exclusive(CodeSet::C, run)
}

fn claim_d(run: &[Token]) -> usize {
    claim_exclusive(CodeSet::D, run)
}

fn claim_e(run: &[Token]) -> usize {
    claim_exclusive(CodeSet::E, run)
}

/// Lowest character set holding the token.
pub fn fallback(t: Token) -> CodeSet {
    match t {
        Token::Byte(b) => character_sets(b).next().unwrap_or_default(),
        Token::Eci(_) => CodeSet::Eci,
        Token::Fnc1 => unreachable!("FNC1 in MaxiCode data"),
    }
}

// Global constants
//------------------------------------------------------------------------------

pub static CHARACTER_SETS: [CodeSet; 5] =
    [CodeSet::A, CodeSet::B, CodeSet::C, CodeSet::D, CodeSet::E];

// Set B values 47 to 54
static B_EXTRA: [u8; 8] = *b" ,./:@!|";

// Set C values 37 to 47
static C_EXTRA: [u8; 11] = [0xaa, 0xac, 0xb1, 0xb2, 0xb3, 0xb5, 0xb9, 0xba, 0xbc, 0xbd, 0xbe];

// Set D values 37 to 46
static D_EXTRA: [u8; 10] = [0xa1, 0xa8, 0xab, 0xaf, 0xb0, 0xb4, 0xb7, 0xb8, 0xbb, 0xbf];

// Set E values 36 to 46
static E_EXTRA: [u8; 11] = [0xa0, 0xa2, 0xa3, 0xa4, 0xa5, 0xa6, 0xa7, 0xa9, 0xad, 0xae, 0xb6];

pub static PASSES: [Pass<CodeSet>; 7] = [
    Pass {
        mode: CodeSet::Eci,
        min_run: 1,
        accepts: Token::is_eci,
        claim: Pass::<CodeSet>::claim_all,
    },
    Pass {
        mode: CodeSet::Numeric,
        min_run: NUMERIC_GROUP,
        accepts: Token::is_digit,
        claim: claim_numeric,
    },
    Pass { mode: CodeSet::A, min_run: 1, accepts: in_a, claim: claim_a },
    Pass { mode: CodeSet::B, min_run: 1, accepts: in_b, claim: claim_b },
    Pass { mode: CodeSet::C, min_run: 1, accepts: in_c, claim: claim_c },
    Pass { mode: CodeSet::D, min_run: 1, accepts: in_d, claim: claim_d },
    Pass { mode: CodeSet::E, min_run: 1, accepts: in_e, claim: claim_e },
];
