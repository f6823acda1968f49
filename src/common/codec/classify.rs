use encoding_rs::{
    Encoding, BIG5, EUC_KR, GB18030, ISO_8859_13, ISO_8859_14, ISO_8859_15, ISO_8859_16,
    ISO_8859_2, ISO_8859_3, ISO_8859_4, ISO_8859_5, ISO_8859_6, ISO_8859_7, ISO_8859_8, SHIFT_JIS,
    UTF_8, WINDOWS_1250, WINDOWS_1251, WINDOWS_1252, WINDOWS_1256,
};

use super::Token;
use crate::common::error::{ParseError, SymbolResult};

// Classification
//------------------------------------------------------------------------------

/// How a position of the input was written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Escape {
    None,
    // Doubled marker or tilde sequence standing for one character
    Literal,
    // Extended channel designator
    Channel,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lexeme {
    Char(char),
    Byte(u8),
    Eci(u32),
    Fnc1,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classified {
    pub lexeme: Lexeme,
    pub escape: Escape,
    // Number of input characters consumed
    pub width: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScanOptions {
    pub extended_channel: bool,
    pub tilde: bool,
    pub fnc1: bool,
    pub max_eci: u32,
    pub charset: Option<Charset>,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self { extended_channel: true, tilde: false, fnc1: false, max_eci: 999_999, charset: None }
    }
}

/// Classifies the character at `index`, expanding escape sequences.
pub fn classify(chars: &[char], index: usize, opts: &ScanOptions) -> SymbolResult<Classified> {
    debug_assert!(index < chars.len(), "Index out of bounds: {index}");

    let ch = chars[index];
    let rest = &chars[index + 1..];
    let plain = Classified { lexeme: Lexeme::Char(ch), escape: Escape::None, width: 1 };
    match ch {
        ESCAPE_MARKER if opts.extended_channel => match rest {
            [ESCAPE_MARKER, ..] => Ok(literal(ESCAPE_MARKER, 2)),
            [d @ ..] if d.len() >= 6 && d[..6].iter().all(char::is_ascii_digit) => {
                let eci = d[..6].iter().fold(0, |acc, c| acc * 10 + digit(*c));
                Ok(Classified { lexeme: Lexeme::Eci(eci), escape: Escape::Channel, width: 7 })
            }
            _ => Err(ParseError::MalformedEscape(index).into()),
        },
        TILDE if opts.tilde => match rest {
            ['~', ..] => Ok(literal('~', 2)),
            ['1', ..] if opts.fnc1 => {
                Ok(Classified { lexeme: Lexeme::Fnc1, escape: Escape::Literal, width: 2 })
            }
            ['1', ..] => Err(ParseError::UnsupportedFnc1(index).into()),
            ['d', a, b, c, ..] if [a, b, c].iter().all(|d| d.is_ascii_digit()) => {
                let value = digit(*a) * 100 + digit(*b) * 10 + digit(*c);
                let byte = u8::try_from(value).map_err(|_| ParseError::MalformedEscape(index))?;
                Ok(Classified { lexeme: Lexeme::Byte(byte), escape: Escape::Literal, width: 5 })
            }
            [c @ '@'..='_', ..] => {
                let byte = *c as u8 - b'@';
                Ok(Classified { lexeme: Lexeme::Byte(byte), escape: Escape::Literal, width: 2 })
            }
            _ => Err(ParseError::MalformedEscape(index).into()),
        },
        _ => Ok(plain),
    }
}

fn literal(ch: char, width: usize) -> Classified {
    Classified { lexeme: Lexeme::Char(ch), escape: Escape::Literal, width }
}

fn digit(c: char) -> u32 {
    c as u32 - '0' as u32
}

// Scanner
//------------------------------------------------------------------------------

/// Normalizes `text` into a token stream: escapes expanded and characters transcoded to bytes
/// through the active charset. A configured charset is announced by a leading ECI token.
pub fn scan(text: &str, opts: &ScanOptions) -> SymbolResult<Vec<Token>> {
    let chars = text.chars().collect::<Vec<_>>();
    if chars.is_empty() {
        return Err(ParseError::EmptyData.into());
    }

    let mut tokens = Vec::with_capacity(chars.len());
    let mut charset = opts.charset;
    if let Some(cs) = charset {
        tokens.push(Token::Eci(cs.eci));
    }

    let mut pending = String::new();
    let mut i = 0;
    while i < chars.len() {
        let classified = classify(&chars, i, opts)?;
        match classified.lexeme {
            Lexeme::Char(ch) => match charset.and_then(|cs| cs.encoding) {
                Some(_) => pending.push(ch),
                None => {
                    let byte = u8::try_from(ch as u32)
                        .map_err(|_| ParseError::InvalidChar { ch, position: i })?;
                    tokens.push(Token::Byte(byte));
                }
            },
            Lexeme::Byte(b) => {
                flush(&mut pending, charset, &mut tokens)?;
                tokens.push(Token::Byte(b));
            }
            Lexeme::Eci(eci) => {
                flush(&mut pending, charset, &mut tokens)?;
                if eci > opts.max_eci {
                    return Err(ParseError::EciOutOfRange(eci).into());
                }
                tokens.push(Token::Eci(eci));
                charset = Charset::from_eci(eci);
            }
            Lexeme::Fnc1 => {
                flush(&mut pending, charset, &mut tokens)?;
                tokens.push(Token::Fnc1);
            }
        }
        i += classified.width;
    }
    flush(&mut pending, charset, &mut tokens)?;

    Ok(tokens)
}

fn flush(
    pending: &mut String,
    charset: Option<Charset>,
    tokens: &mut Vec<Token>,
) -> SymbolResult<()> {
    if pending.is_empty() {
        return Ok(());
    }
    if let Some(cs) = charset {
        tokens.extend(cs.encode(pending)?.into_iter().map(Token::Byte));
    }
    pending.clear();
    Ok(())
}

// Charset
//------------------------------------------------------------------------------

/// Character set designated by an ECI number. `encoding` is `None` for Latin-1, which maps
/// code points to bytes directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Charset {
    pub eci: u32,
    encoding: Option<&'static Encoding>,
}

impl Charset {
    pub fn from_eci(eci: u32) -> Option<Self> {
        let encoding = match eci {
            3 => None,
            4 => Some(ISO_8859_2),
            5 => Some(ISO_8859_3),
            6 => Some(ISO_8859_4),
            7 => Some(ISO_8859_5),
            8 => Some(ISO_8859_6),
            9 => Some(ISO_8859_7),
            10 => Some(ISO_8859_8),
            15 => Some(ISO_8859_13),
            16 => Some(ISO_8859_14),
            17 => Some(ISO_8859_15),
            18 => Some(ISO_8859_16),
            20 => Some(SHIFT_JIS),
            21 => Some(WINDOWS_1250),
            22 => Some(WINDOWS_1251),
            23 => Some(WINDOWS_1252),
            24 => Some(WINDOWS_1256),
            26 => Some(UTF_8),
            28 => Some(BIG5),
            29 => Some(GB18030),
            30 => Some(EUC_KR),
            _ => return None,
        };
        Some(Self { eci, encoding })
    }

    pub fn name(&self) -> &'static str {
        self.encoding.map_or("ISO-8859-1", |e| e.name())
    }

    pub fn encode(&self, text: &str) -> SymbolResult<Vec<u8>> {
        match self.encoding {
            Some(encoding) => {
                let (bytes, _, had_errors) = encoding.encode(text);
                if had_errors {
                    return Err(ParseError::Unmappable(self.eci).into());
                }
                Ok(bytes.into_owned())
            }
            None => text
                .chars()
                .enumerate()
                .map(|(position, ch)| {
                    u8::try_from(ch as u32)
                        .map_err(|_| ParseError::InvalidChar { ch, position }.into())
                })
                .collect(),
        }
    }
}

// Global constants
//------------------------------------------------------------------------------

pub const ESCAPE_MARKER: char = '\\';

pub const TILDE: char = '~';

#[cfg(test)]
mod classify_tests {
    use test_case::test_case;

    use super::{classify, scan, Charset, Classified, Escape, Lexeme, ScanOptions};
    use crate::common::{
        codec::Token,
        error::{ParseError, SymbolError},
    };

    fn chars(s: &str) -> Vec<char> {
        s.chars().collect()
    }

    #[test_case("A", Lexeme::Char('A'), Escape::None, 1)]
    #[test_case("\\\\", Lexeme::Char('\\'), Escape::Literal, 2)]
    #[test_case("\\000026", Lexeme::Eci(26), Escape::Channel, 7)]
    #[test_case("\\1234567", Lexeme::Eci(123456), Escape::Channel, 7)]
    fn test_classify(s: &str, lexeme: Lexeme, escape: Escape, width: usize) {
        let opts = ScanOptions::default();
        assert_eq!(classify(&chars(s), 0, &opts).unwrap(), Classified { lexeme, escape, width });
    }

    #[test_case("\\12345")]
    #[test_case("\\x")]
    #[test_case("\\")]
    fn test_malformed_escape(s: &str) {
        let opts = ScanOptions::default();
        assert_eq!(classify(&chars(s), 0, &opts), Err(ParseError::MalformedEscape(0).into()));
    }

    #[test]
    fn test_escape_disabled() {
        let opts = ScanOptions { extended_channel: false, ..Default::default() };
        let res = classify(&chars("\\x"), 0, &opts).unwrap();
        assert_eq!(res.lexeme, Lexeme::Char('\\'));
        assert_eq!(res.escape, Escape::None);
    }

    #[test_case("~~", Lexeme::Char('~'), 2)]
    #[test_case("~1", Lexeme::Fnc1, 2)]
    #[test_case("~d065", Lexeme::Byte(65), 5)]
    #[test_case("~@", Lexeme::Byte(0), 2)]
    #[test_case("~M", Lexeme::Byte(13), 2)]
    fn test_tilde(s: &str, lexeme: Lexeme, width: usize) {
        let opts = ScanOptions { tilde: true, fnc1: true, ..Default::default() };
        let res = classify(&chars(s), 0, &opts).unwrap();
        assert_eq!(res, Classified { lexeme, escape: Escape::Literal, width });
    }

    #[test]
    fn test_tilde_errors() {
        let opts = ScanOptions { tilde: true, ..Default::default() };
        assert_eq!(classify(&chars("~1"), 0, &opts), Err(ParseError::UnsupportedFnc1(0).into()));
        assert_eq!(classify(&chars("~d256"), 0, &opts), Err(ParseError::MalformedEscape(0).into()));
        assert_eq!(classify(&chars("~a"), 0, &opts), Err(ParseError::MalformedEscape(0).into()));
    }

    #[test]
    fn test_scan() {
        let opts = ScanOptions::default();
        let tokens = scan("a\\\\b\\000026é", &opts).unwrap();
        assert_eq!(
            tokens,
            vec![
                Token::Byte(b'a'),
                Token::Byte(b'\\'),
                Token::Byte(b'b'),
                Token::Eci(26),
                Token::Byte(0xc3),
                Token::Byte(0xa9)
            ]
        );
    }

    #[test]
    fn test_scan_empty() {
        let opts = ScanOptions::default();
        assert_eq!(scan("", &opts), Err(SymbolError::Parse(ParseError::EmptyData)));
    }

    #[test]
    fn test_scan_invalid_char() {
        let opts = ScanOptions::default();
        let err = ParseError::InvalidChar { ch: '€', position: 2 };
        assert_eq!(scan("ab€", &opts), Err(err.into()));
    }

    #[test]
    fn test_scan_eci_out_of_range() {
        let opts = ScanOptions { max_eci: 811_799, ..Default::default() };
        assert_eq!(scan("\\811800", &opts), Err(ParseError::EciOutOfRange(811_800).into()));
    }

    #[test]
    fn test_scan_with_charset() {
        let charset = Charset::from_eci(7);
        let opts = ScanOptions { charset, ..Default::default() };
        let tokens = scan("Ж", &opts).unwrap();
        assert_eq!(tokens, vec![Token::Eci(7), Token::Byte(0xb6)]);
    }

    #[test]
    fn test_unmappable() {
        let charset = Charset::from_eci(7);
        let opts = ScanOptions { charset, ..Default::default() };
        assert_eq!(scan("漢", &opts), Err(ParseError::Unmappable(7).into()));
    }

    #[test]
    fn test_charset_lookup() {
        assert_eq!(Charset::from_eci(3).unwrap().name(), "ISO-8859-1");
        assert_eq!(Charset::from_eci(20).unwrap().name(), "Shift_JIS");
        assert_eq!(Charset::from_eci(26).unwrap().name(), "UTF-8");
        assert!(Charset::from_eci(899).is_none());
    }
}
