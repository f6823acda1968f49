pub use encode::*;

// Encoder
//------------------------------------------------------------------------------

pub mod encode {
    use log::trace;

    use super::super::{CodeSet, LATCH_A, PAD};
    use super::writer::push_segment;
    use crate::common::{
        codec::{Codeword, Padder, Padding, Segment, Token},
        error::{ConfigError, SymbolResult},
        metadata::maxicode::{SymbolMode, PRIMARY_DATA_LEN},
    };

    /// Character set the stream is latched or locked into.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct EncodeState {
        pub set: CodeSet,
    }

    pub fn encode(
        tokens: &[Token],
        segs: &[Segment<CodeSet>],
        header: &[Codeword],
    ) -> (Vec<Codeword>, EncodeState) {
        let mut out = Vec::with_capacity(header.len() + tokens.len());
        out.extend_from_slice(header);

        let mut state = EncodeState::default();
        for seg in segs {
            state = push_segment(seg.mode, seg.tokens(tokens), state, &mut out);
            trace!("{} segment at {} -> {:?}", seg.mode.name(), seg.start, state.set);
        }
        (out, state)
    }

    /// Pads with PAD, latching back to set A first when the stream ends locked in C, D or E.
    pub fn pad(
        codewords: &mut Vec<Codeword>,
        state: EncodeState,
        padder: &Padder,
    ) -> SymbolResult<Padding> {
        let unlatch = state.set.is_shift_only().then_some(LATCH_A);
        padder.pad(codewords, unlatch, |_, _| PAD)
    }

    // Primary message
    //--------------------------------------------------------------------------

    /// Structured carrier message of symbol modes 2 and 3.
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct Primary {
        pub postcode: String,
        pub country: u16,
        pub service: u16,
    }

    impl Primary {
        pub fn new(postcode: &str, country: u16, service: u16) -> Self {
            Self { postcode: postcode.to_owned(), country, service }
        }
    }

    /// Packs the mode, postcode, country and service class into the ten primary data
    /// codewords, least significant six bits first.
    pub fn primary_codewords(mode: SymbolMode, primary: &Primary) -> SymbolResult<Vec<Codeword>> {
        if primary.country > MAX_CLASS {
            return Err(ConfigError::InvalidPrimary("country code must be at most 999").into());
        }
        if primary.service > MAX_CLASS {
            return Err(ConfigError::InvalidPrimary("service class must be at most 999").into());
        }

        let postcode = primary.postcode.as_bytes();
        let field = match mode {
            SymbolMode::NumericPostcode => numeric_postcode(postcode)?,
            SymbolMode::AlphaPostcode => alpha_postcode(postcode)?,
            _ => return Err(ConfigError::UnexpectedPrimary(mode.number()).into()),
        };

        let value = mode.number() as u64
            | field << 4
            | (primary.country as u64) << 40
            | (primary.service as u64) << 50;
        Ok((0..PRIMARY_DATA_LEN).map(|i| ((value >> (6 * i)) & 0x3f) as Codeword).collect())
    }

    // 30 bit postcode value and 6 bit digit count
    fn numeric_postcode(postcode: &[u8]) -> SymbolResult<u64> {
        if postcode.is_empty()
            || postcode.len() > MAX_NUMERIC_POSTCODE
            || !postcode.iter().all(u8::is_ascii_digit)
        {
            let msg = "numeric postcode must be 1 to 9 digits";
            return Err(ConfigError::InvalidPrimary(msg).into());
        }
        let value = postcode.iter().fold(0u64, |acc, &d| acc * 10 + (d - b'0') as u64);
        Ok(value | (postcode.len() as u64) << 30)
    }

    // Six set A values, space padded, first character in the highest bits
    fn alpha_postcode(postcode: &[u8]) -> SymbolResult<u64> {
        const ERR: &str = "alphanumeric postcode must be 1 to 6 code set A characters";

        if postcode.is_empty() || postcode.len() > MAX_ALPHA_POSTCODE {
            return Err(ConfigError::InvalidPrimary(ERR).into());
        }
        let mut field = 0;
        for i in 0..MAX_ALPHA_POSTCODE {
            let b = postcode.get(i).copied().unwrap_or(b' ');
            let v = CodeSet::A.value(b).ok_or(ConfigError::InvalidPrimary(ERR))?;
            field |= (v as u64) << (6 * (MAX_ALPHA_POSTCODE - 1 - i));
        }
        Ok(field)
    }

    // Global constants
    //--------------------------------------------------------------------------

    const MAX_CLASS: u16 = 999;
    const MAX_NUMERIC_POSTCODE: usize = 9;
    const MAX_ALPHA_POSTCODE: usize = 6;

}

// Writer for encoded data
//------------------------------------------------------------------------------

pub(super) mod writer {
    use super::super::{
        CodeSet, ECI, LATCH_A, LATCH_A_FROM_B, LATCH_B, NUMERIC_GROUP, NUMERIC_SHIFT, SHIFT_A,
        SHIFT_B, THREE_SHIFT_A, TWO_SHIFT_A,
    };
    use super::encode::EncodeState;
    use crate::common::{
        bit_utils::BitStream,
        codec::{Codeword, Token},
    };

    pub fn push_segment(
        set: CodeSet,
        tokens: &[Token],
        state: EncodeState,
        out: &mut Vec<Codeword>,
    ) -> EncodeState {
        match set {
            CodeSet::Numeric => {
                push_numeric(tokens, out);
                state
            }
            CodeSet::Eci => {
                push_eci(tokens, out);
                state
            }
            _ => push_characters(set, tokens, state, out),
        }
    }

    // Character sets
    //--------------------------------------------------------------------------

    fn push_characters(
        set: CodeSet,
        tokens: &[Token],
        state: EncodeState,
        out: &mut Vec<Codeword>,
    ) -> EncodeState {
        let values = tokens
            .iter()
            .map(|t| match *t {
                Token::Byte(b) => set.value(b).map(Codeword::from),
                _ => None,
            })
            .collect::<Option<Vec<_>>>();
        let Some(values) = values else { unreachable!("Token outside {set:?} in segment") };

        let cur = state.set;
        let n = values.len();
        match (cur, set) {
            _ if cur == set => out.extend(values),
            (CodeSet::A, CodeSet::B) if n == 1 => out.extend([SHIFT_B, values[0]]),
            (CodeSet::B, CodeSet::A) if n <= 3 => {
                out.push([SHIFT_A, TWO_SHIFT_A, THREE_SHIFT_A][n - 1]);
                out.extend(values);
            }
            (_, CodeSet::A | CodeSet::B) => {
                out.push(match (cur, set) {
                    (CodeSet::B, _) => LATCH_A_FROM_B,
                    (_, CodeSet::A) => LATCH_A,
                    _ => LATCH_B,
                });
                out.extend(values);
                return EncodeState { set };
            }
            _ if n < LOCK_IN_LEN => {
                for v in values {
                    out.extend([set.shift(), v]);
                }
            }
            _ => {
                out.extend([set.shift(), set.shift()]);
                out.extend(values);
                return EncodeState { set };
            }
        }
        state
    }

    // Numeric
    //--------------------------------------------------------------------------

    fn push_numeric(tokens: &[Token], out: &mut Vec<Codeword>) {
        debug_assert!(tokens.len() % NUMERIC_GROUP == 0, "Partial numeric group: {}", tokens.len());

        for group in tokens.chunks(NUMERIC_GROUP) {
            let value = group
                .iter()
                .filter_map(|t| t.byte())
                .fold(0u32, |acc, d| acc * 10 + (d - b'0') as u32);
            let mut bs = BitStream::new();
            bs.push_bits(value, 30);
            out.push(NUMERIC_SHIFT);
            out.extend(bs.codewords(6));
        }
    }

    // Extended channel
    //--------------------------------------------------------------------------

    fn push_eci(tokens: &[Token], out: &mut Vec<Codeword>) {
        for t in tokens {
            let Token::Eci(n) = *t else { unreachable!("Non ECI token in ECI segment") };
            out.push(ECI);
            out.extend(eci_codewords(n));
        }
    }

    // Designator value, the leading bits carry the length
    pub fn eci_codewords(n: u32) -> Vec<Codeword> {
        match n {
            0..=31 => vec![n as Codeword],
            32..=1023 => vec![(0x20 | n >> 6) as Codeword, (n & 0x3f) as Codeword],
            1024..=32767 => vec![
                (0x30 | n >> 12) as Codeword,
                (n >> 6 & 0x3f) as Codeword,
                (n & 0x3f) as Codeword,
            ],
            _ => vec![
                (0x38 | n >> 18) as Codeword,
                (n >> 12 & 0x3f) as Codeword,
                (n >> 6 & 0x3f) as Codeword,
                (n & 0x3f) as Codeword,
            ],
        }
    }

    // Global constants
    //--------------------------------------------------------------------------

    // Characters from which C, D and E lock in rather than shift
    const LOCK_IN_LEN: usize = 4;

    #[cfg(test)]
    mod writer_tests {
        use test_case::test_case;

        use super::{eci_codewords, push_segment, EncodeState};
        use crate::common::codec::{maxicode::CodeSet, Token};

        fn tokens(s: &[u8]) -> Vec<Token> {
            s.iter().copied().map(Token::Byte).collect()
        }

        #[test_case(CodeSet::A, CodeSet::B, b"a", vec![59, 1], CodeSet::A)]
        #[test_case(CodeSet::A, CodeSet::B, b"ab", vec![63, 1, 2], CodeSet::B)]
        #[test_case(CodeSet::B, CodeSet::A, b"A", vec![59, 1], CodeSet::B)]
        #[test_case(CodeSet::B, CodeSet::A, b"AB", vec![56, 1, 2], CodeSet::B)]
        #[test_case(CodeSet::B, CodeSet::A, b"ABC", vec![57, 1, 2, 3], CodeSet::B)]
        #[test_case(CodeSet::B, CodeSet::A, b"ABCD", vec![63, 1, 2, 3, 4], CodeSet::A)]
        #[test_case(CodeSet::A, CodeSet::C, b"\xc0\xc1", vec![60, 0, 60, 1], CodeSet::A)]
        #[test_case(CodeSet::A, CodeSet::E, b"\x00\x01\x02\x03", vec![62, 62, 0, 1, 2, 3], CodeSet::E)]
        #[test_case(CodeSet::C, CodeSet::A, b"A", vec![58, 1], CodeSet::A)]
        #[test_case(CodeSet::D, CodeSet::B, b"a", vec![63, 1], CodeSet::B)]
        #[test_case(CodeSet::D, CodeSet::D, b"\xe0", vec![0], CodeSet::D)]
        fn test_push_characters(
            cur: CodeSet,
            set: CodeSet,
            s: &[u8],
            exp: Vec<u16>,
            exp_set: CodeSet,
        ) {
            let mut out = vec![];
            let state = push_segment(set, &tokens(s), EncodeState { set: cur }, &mut out);
            assert_eq!(out, exp);
            assert_eq!(state.set, exp_set);
        }

        #[test]
        fn test_designators_keep_set() {
            let mut out = vec![];
            let state = EncodeState { set: CodeSet::B };
            let res = push_segment(CodeSet::Eci, &[Token::Eci(3)], state, &mut out);
            assert_eq!(out, vec![27, 3]);
            assert_eq!(res, state);
        }

        #[test_case(31, vec![31])]
        #[test_case(32, vec![32, 32])]
        #[test_case(1023, vec![47, 63])]
        #[test_case(1024, vec![48, 16, 0])]
        #[test_case(32767, vec![55, 63, 63])]
        #[test_case(999_999, vec![59, 52, 8, 63])]
        fn test_eci_codewords(n: u32, exp: Vec<u16>) {
            assert_eq!(eci_codewords(n), exp);
        }
    }
}
