use super::{
    LATCH_BASE256, LATCH_C40, LATCH_EDIFACT, LATCH_TEXT, LATCH_X12, SHIFT_1, SHIFT_2, SHIFT_3,
    UPPER_SHIFT_VALUE,
};
use crate::common::codec::{Codeword, Pass, Token};

// Mode
//------------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Mode {
    #[default]
    Ascii,
    C40,
    Text,
    X12,
    Edifact,
    Base256,
    Eci,
}

impl Mode {
    pub fn name(self) -> &'static str {
        match self {
            Self::Ascii => "ASCII",
            Self::C40 => "C40",
            Self::Text => "Text",
            Self::X12 => "X12",
            Self::Edifact => "EDIFACT",
            Self::Base256 => "Base256",
            Self::Eci => "ECI",
        }
    }

    // Whether the mode can represent the token at all, possibly through shifts
    pub fn contains(self, t: Token) -> bool {
        match (self, t) {
            (Self::Eci, Token::Eci(_)) => true,
            (_, Token::Eci(_)) | (Self::Eci, _) => false,
            (Self::Ascii | Self::C40 | Self::Text, _) => true,
            (Self::X12, Token::Byte(b)) => is_x12(b),
            (Self::Edifact, Token::Byte(b)) => is_edifact(b),
            (Self::Base256, Token::Byte(_)) => true,
            (_, Token::Fnc1) => false,
        }
    }

    pub fn latch(self) -> Option<Codeword> {
        match self {
            Self::C40 => Some(LATCH_C40),
            Self::Text => Some(LATCH_TEXT),
            Self::X12 => Some(LATCH_X12),
            Self::Edifact => Some(LATCH_EDIFACT),
            Self::Base256 => Some(LATCH_BASE256),
            Self::Ascii | Self::Eci => None,
        }
    }

    // Token filter used when the mode is forced
    pub fn accepts(self) -> fn(Token) -> bool {
        match self {
            Self::Ascii => |t| Mode::Ascii.contains(t),
            Self::C40 => |t| Mode::C40.contains(t),
            Self::Text => |t| Mode::Text.contains(t),
            Self::X12 => |t| Mode::X12.contains(t),
            Self::Edifact => |t| Mode::Edifact.contains(t),
            Self::Base256 => |t| Mode::Base256.contains(t),
            Self::Eci => Token::is_eci,
        }
    }

    // Modes that need an explicit unlatch to return to ASCII
    pub fn is_triple(self) -> bool {
        matches!(self, Self::C40 | Self::Text | Self::X12)
    }
}

// Character values
//------------------------------------------------------------------------------

/// Appends the C40 or Text values of `t`, including shift values.
pub fn push_values(mode: Mode, t: Token, out: &mut Vec<u8>) {
    debug_assert!(matches!(mode, Mode::C40 | Mode::Text), "Not a C40 family mode: {mode:?}");

    let b = match t {
        Token::Byte(b) => b,
        Token::Fnc1 => return out.extend([SHIFT_2, 27]),
        Token::Eci(_) => unreachable!("ECI inside {mode:?} segment"),
    };
    if b >= 128 {
        out.extend([SHIFT_2, UPPER_SHIFT_VALUE]);
        return push_values(mode, Token::Byte(b - 128), out);
    }

    match (mode, b) {
        (_, b' ') => out.push(3),
        (_, b'0'..=b'9') => out.push(b - b'0' + 4),
        (Mode::C40, b'A'..=b'Z') => out.push(b - b'A' + 14),
        (Mode::Text, b'a'..=b'z') => out.push(b - b'a' + 14),
        (_, 0..=31) => out.extend([SHIFT_1, b]),
        (_, 33..=47) => out.extend([SHIFT_2, b - 33]),
        (_, 58..=64) => out.extend([SHIFT_2, b - 58 + 15]),
        (_, 91..=95) => out.extend([SHIFT_2, b - 91 + 22]),
        (Mode::C40, _) => out.extend([SHIFT_3, b - 96]),
        (_, b'`') => out.extend([SHIFT_3, 0]),
        (_, b'A'..=b'Z') => out.extend([SHIFT_3, b - 64]),
        (_, _) => out.extend([SHIFT_3, b - 96]),
    }
}

pub fn x12_value(b: u8) -> u8 {
    match b {
        b'\r' => 0,
        b'*' => 1,
        b'>' => 2,
        b' ' => 3,
        b'0'..=b'9' => b - b'0' + 4,
        b'A'..=b'Z' => b - b'A' + 14,
        _ => unreachable!("Byte {b} outside X12 set"),
    }
}

pub fn edifact_value(b: u8) -> u8 {
    debug_assert!(is_edifact(b), "Byte {b} outside EDIFACT set");
    b & 0x3f
}

fn is_x12(b: u8) -> bool {
    matches!(b, b'\r' | b'*' | b'>' | b' ' | b'0'..=b'9' | b'A'..=b'Z')
}

fn is_edifact(b: u8) -> bool {
    (32..=94).contains(&b)
}

fn is_c40_basic(t: Token) -> bool {
    matches!(t, Token::Byte(b' ' | b'0'..=b'9' | b'A'..=b'Z'))
}

fn is_text_basic(t: Token) -> bool {
    matches!(t, Token::Byte(b' ' | b'0'..=b'9' | b'a'..=b'z'))
}

// Codeword costs
//------------------------------------------------------------------------------

pub fn ascii_len(run: &[Token]) -> usize {
    let mut len = 0;
    let mut i = 0;
    while i < run.len() {
        match run[i] {
            Token::Byte(b'0'..=b'9') if run.get(i + 1).is_some_and(|t| t.is_digit()) => i += 1,
            Token::Byte(b) if b >= 128 => len += 1,
            _ => {}
        }
        len += 1;
        i += 1;
    }
    len
}

// Latch, packed triples, unlatch and leftover values in ASCII
fn triple_len(mode: Mode, run: &[Token]) -> usize {
    let values = match mode {
        Mode::X12 => run.len(),
        _ => {
            let mut values = Vec::with_capacity(run.len() * 2);
            run.iter().for_each(|&t| push_values(mode, t, &mut values));
            values.len()
        }
    };
    values / 3 * 2 + values % 3 + 2
}

// Latch, packed values including the unlatch value
fn edifact_len(run: &[Token]) -> usize {
    1 + ((run.len() + 1) * 6).div_ceil(8)
}

// Latch, length field and data
fn base256_len(run: &[Token]) -> usize {
    1 + if run.len() <= 249 { 1 } else { 2 } + run.len()
}

fn claim_if_cheaper(run: &[Token], cost: usize) -> usize {
    if cost <= ascii_len(run) {
        run.len()
    } else {
        0
    }
}

fn claim_c40(run: &[Token]) -> usize {
    claim_if_cheaper(run, triple_len(Mode::C40, run))
}

fn claim_text(run: &[Token]) -> usize {
    claim_if_cheaper(run, triple_len(Mode::Text, run))
}

fn claim_x12(run: &[Token]) -> usize {
    claim_if_cheaper(run, triple_len(Mode::X12, run))
}

fn claim_edifact(run: &[Token]) -> usize {
    claim_if_cheaper(run, edifact_len(run))
}

fn claim_base256(run: &[Token]) -> usize {
    claim_if_cheaper(run, base256_len(run))
}

fn is_high(t: Token) -> bool {
    matches!(t, Token::Byte(128..=255))
}

fn is_x12_token(t: Token) -> bool {
    Mode::X12.contains(t)
}

fn is_edifact_token(t: Token) -> bool {
    Mode::Edifact.contains(t)
}

pub fn fallback(_: Token) -> Mode {
    Mode::Ascii
}

// Global constants
//------------------------------------------------------------------------------

pub static PASSES: [Pass<Mode>; 6] = [
    Pass { mode: Mode::Eci, min_run: 1, accepts: Token::is_eci, claim: Pass::<Mode>::claim_all },
    Pass { mode: Mode::Base256, min_run: 3, accepts: is_high, claim: claim_base256 },
    Pass { mode: Mode::C40, min_run: 6, accepts: is_c40_basic, claim: claim_c40 },
    Pass { mode: Mode::Text, min_run: 6, accepts: is_text_basic, claim: claim_text },
    Pass { mode: Mode::X12, min_run: 6, accepts: is_x12_token, claim: claim_x12 },
    Pass { mode: Mode::Edifact, min_run: 8, accepts: is_edifact_token, claim: claim_edifact },
];
