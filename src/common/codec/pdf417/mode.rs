use crate::common::codec::{Pass, Token};

// Mode
//------------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Mode {
    #[default]
    Text,
    Byte,
    Numeric,
    Eci,
}

impl Mode {
    pub fn name(self) -> &'static str {
        match self {
            Self::Text => "Text",
            Self::Byte => "Byte",
            Self::Numeric => "Numeric",
            Self::Eci => "ECI",
        }
    }

    pub fn contains(self, t: Token) -> bool {
        match (self, t) {
            (Self::Text, Token::Byte(b)) => is_text(b),
            (Self::Byte, Token::Byte(_)) => true,
            (Self::Numeric, t) => t.is_digit(),
            (Self::Eci, t) => t.is_eci(),
            _ => false,
        }
    }

    // Token filter used when the mode is forced
    pub fn accepts(self) -> fn(Token) -> bool {
        match self {
            Self::Text => |t| Mode::Text.contains(t),
            Self::Byte => |t| Mode::Byte.contains(t),
            Self::Numeric => Token::is_digit,
            Self::Eci => Token::is_eci,
        }
    }
}

// Text sub-mode
//------------------------------------------------------------------------------

/// Text compaction sub-mode. Each one holds 30 values: 26 or 29 characters and the controls
/// that move between sub-modes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SubMode {
    #[default]
    Alpha,
    Lower,
    Mixed,
    Punct,
}

impl SubMode {
    /// Value of `b` in the sub-mode, if present.
    pub fn value(self, b: u8) -> Option<u8> {
        match (self, b) {
            (Self::Alpha, b'A'..=b'Z') => Some(b - b'A'),
            (Self::Lower, b'a'..=b'z') => Some(b - b'a'),
            (Self::Alpha | Self::Lower | Self::Mixed, b' ') => Some(SPACE),
            (Self::Mixed, _) => MIXED.iter().position(|&c| c == b).map(|p| p as u8),
            (Self::Punct, _) => PUNCT.iter().position(|&c| c == b).map(|p| p as u8),
            _ => None,
        }
    }

    pub fn contains(self, b: u8) -> bool {
        self.value(b).is_some()
    }
}

pub fn is_text(b: u8) -> bool {
    [SubMode::Alpha, SubMode::Lower, SubMode::Mixed, SubMode::Punct].iter().any(|s| s.contains(b))
}

fn is_binary(t: Token) -> bool {
    matches!(t, Token::Byte(b) if !is_text(b))
}

pub fn fallback(_: Token) -> Mode {
    Mode::Text
}

// Global constants
//------------------------------------------------------------------------------

pub const SPACE: u8 = 26;
// Alpha and Lower to Lower
pub const LL: u8 = 27;
// Lower to one Alpha character
pub const AS: u8 = 27;
// Alpha and Lower to Mixed
pub const ML: u8 = 28;
// Mixed to Alpha
pub const AL: u8 = 28;
// Mixed to Lower
pub const MIXED_LL: u8 = 27;
// Mixed to Punct
pub const PL: u8 = 25;
// One Punct character
pub const PS: u8 = 29;
// Punct to Alpha
pub const PUNCT_AL: u8 = 29;

pub static MIXED: [u8; 25] = *b"0123456789&\r\t,:#-.$/+%*=^";

pub static PUNCT: [u8; 29] = *b";<>@[\\]_`~!\r\t,:\n-.$/\"|*()?{}'";

pub static PASSES: [Pass<Mode>; 3] = [
    Pass { mode: Mode::Eci, min_run: 1, accepts: Token::is_eci, claim: Pass::<Mode>::claim_all },
    Pass {
        mode: Mode::Numeric,
        min_run: 13,
        accepts: Token::is_digit,
        claim: Pass::<Mode>::claim_all,
    },
    Pass { mode: Mode::Byte, min_run: 1, accepts: is_binary, claim: Pass::<Mode>::claim_all },
];

#[cfg(test)]
mod mode_tests {
    use test_case::test_case;

    use super::{is_text, SubMode};

    #[test_case(SubMode::Alpha, b'A', Some(0))]
    #[test_case(SubMode::Alpha, b' ', Some(26))]
    #[test_case(SubMode::Alpha, b'a', None)]
    #[test_case(SubMode::Lower, b'z', Some(25))]
    #[test_case(SubMode::Mixed, b'0', Some(0))]
    #[test_case(SubMode::Mixed, b'^', Some(24))]
    #[test_case(SubMode::Mixed, b' ', Some(26))]
    #[test_case(SubMode::Punct, b';', Some(0))]
    #[test_case(SubMode::Punct, b'\'', Some(28))]
    #[test_case(SubMode::Punct, b' ', None)]
    fn test_value(sub: SubMode, b: u8, exp: Option<u8>) {
        assert_eq!(sub.value(b), exp);
    }

    #[test]
    fn test_is_text() {
        assert!(is_text(b'\n'));
        assert!(is_text(b'~'));
        assert!(!is_text(0x7f));
        assert!(!is_text(0xe9));
        assert!(!is_text(0));
    }
}
