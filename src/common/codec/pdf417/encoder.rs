pub use encode::*;

// Encoder
//------------------------------------------------------------------------------

pub mod encode {
    use log::trace;

    use super::super::{
        Mode, SubMode, MACRO, MACRO_OPTIONAL_FIELD, MACRO_TERMINATOR, PAD, SEGMENT_COUNT_FIELD,
    };
    use super::writer::{numeric_group, push_segment};
    use crate::common::codec::{Codeword, Padder, Padding, Segment, Token};
    use crate::common::error::SymbolResult;

    /// Compaction mode and text sub-mode carried between segments.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct EncodeState {
        pub mode: Mode,
        pub submode: SubMode,
    }

    impl EncodeState {
        pub fn new(mode: Mode) -> Self {
            Self { mode, submode: SubMode::Alpha }
        }
    }

    pub fn encode(tokens: &[Token], segs: &[Segment<Mode>]) -> (Vec<Codeword>, EncodeState) {
        let mut out = Vec::with_capacity(tokens.len());
        let mut state = EncodeState::default();
        for seg in segs {
            state = push_segment(seg.mode, seg.tokens(tokens), state, &mut out);
            trace!("{} segment at {} -> {:?}", seg.mode.name(), seg.start, state);
        }
        (out, state)
    }

    pub fn pad(codewords: &mut Vec<Codeword>, padder: &Padder) -> SymbolResult<Padding> {
        padder.pad(codewords, None, |_, _| PAD)
    }

    /// Macro PDF417 control block for segment `index` of `total`. Segment index and count are
    /// five digit numeric groups, the file id is two base 900 codewords.
    pub fn macro_block(index: usize, total: usize, file_id: u32) -> Vec<Codeword> {
        debug_assert!(index >= 1 && index <= total, "Invalid segment {index} of {total}");

        let mut out = vec![MACRO];
        out.extend(numeric_group(&five_digits(index - 1)));
        out.extend([(file_id / 900) as Codeword, (file_id % 900) as Codeword]);
        out.extend([MACRO_OPTIONAL_FIELD, SEGMENT_COUNT_FIELD]);
        out.extend(numeric_group(&five_digits(total)));
        if index == total {
            out.push(MACRO_TERMINATOR);
        }
        out
    }

    fn five_digits(n: usize) -> Vec<u8> {
        format!("{n:05}").bytes().map(|b| b - b'0').collect()
    }

}

// Writer for encoded data
//------------------------------------------------------------------------------

pub(super) mod writer {
    use num_bigint::BigUint;
    use num_traits::{One, ToPrimitive, Zero};

    use super::super::{
        Mode, SubMode, AL, AS, ECI_CHARSET, ECI_GENERAL, ECI_USER, LATCH_BYTE, LATCH_BYTE_6,
        LATCH_NUMERIC, LATCH_TEXT, LL, MIXED_LL, ML, NUMERIC_GROUP, PL, PS, PUNCT_AL, SHIFT_BYTE,
    };
    use super::encode::EncodeState;
    use crate::common::codec::{Codeword, Token};

    pub fn push_segment(
        mode: Mode,
        tokens: &[Token],
        state: EncodeState,
        out: &mut Vec<Codeword>,
    ) -> EncodeState {
        match mode {
            Mode::Text => push_text(tokens, state, out),
            Mode::Byte => push_byte(tokens, state, out),
            Mode::Numeric => push_numeric(tokens, state, out),
            Mode::Eci => push_eci(tokens, state, out),
        }
    }

    // Text
    //--------------------------------------------------------------------------

    fn push_text(tokens: &[Token], state: EncodeState, out: &mut Vec<Codeword>) -> EncodeState {
        let mut state = state;
        if state.mode != Mode::Text {
            out.push(LATCH_TEXT);
            state = EncodeState::new(Mode::Text);
        }

        let bytes = tokens.iter().filter_map(|t| t.byte()).collect::<Vec<_>>();
        let (values, submode) = text_values(&bytes, state.submode);
        for pair in values.chunks(2) {
            out.push(30 * pair[0] as Codeword + pair[1] as Codeword);
        }
        EncodeState { mode: Mode::Text, submode }
    }

    /// Sub-mode values for `bytes` starting in `submode`, padded to an even count with a
    /// latch. Returns the values and the final sub-mode.
    pub fn text_values(bytes: &[u8], submode: SubMode) -> (Vec<u8>, SubMode) {
        let mut values = Vec::with_capacity(bytes.len() * 2);
        let mut sub = submode;
        for (i, &b) in bytes.iter().enumerate() {
            loop {
                if let Some(v) = sub.value(b) {
                    values.push(v);
                    break;
                }
                match sub {
                    SubMode::Alpha | SubMode::Lower => {
                        if sub == SubMode::Lower && SubMode::Alpha.contains(b) {
                            values.extend([AS, SubMode::Alpha.value(b).unwrap_or_default()]);
                            break;
                        }
                        if SubMode::Lower.contains(b) {
                            values.push(LL);
                            sub = SubMode::Lower;
                        } else if SubMode::Mixed.contains(b) {
                            values.push(ML);
                            sub = SubMode::Mixed;
                        } else {
                            values.extend([PS, SubMode::Punct.value(b).unwrap_or_default()]);
                            break;
                        }
                    }
                    SubMode::Mixed => {
                        if SubMode::Lower.contains(b) {
                            values.push(MIXED_LL);
                            sub = SubMode::Lower;
                        } else if SubMode::Alpha.contains(b) {
                            values.push(AL);
                            sub = SubMode::Alpha;
                        } else if bytes.get(i + 1).is_some_and(|&n| SubMode::Punct.contains(n)) {
                            values.push(PL);
                            sub = SubMode::Punct;
                        } else {
                            values.extend([PS, SubMode::Punct.value(b).unwrap_or_default()]);
                            break;
                        }
                    }
                    SubMode::Punct => {
                        values.push(PUNCT_AL);
                        sub = SubMode::Alpha;
                    }
                }
            }
        }

        if values.len() % 2 == 1 {
            let (pad, next) = match sub {
                SubMode::Alpha | SubMode::Lower => (ML, SubMode::Mixed),
                SubMode::Mixed => (AL, SubMode::Alpha),
                SubMode::Punct => (PUNCT_AL, SubMode::Alpha),
            };
            values.push(pad);
            sub = next;
        }
        (values, sub)
    }

    // Byte
    //--------------------------------------------------------------------------

    fn push_byte(tokens: &[Token], state: EncodeState, out: &mut Vec<Codeword>) -> EncodeState {
        let bytes = tokens.iter().filter_map(|t| t.byte()).collect::<Vec<_>>();
        if bytes.len() == 1 && state.mode == Mode::Text {
            out.extend([SHIFT_BYTE, bytes[0] as Codeword]);
            return state;
        }

        out.push(if bytes.len() % 6 == 0 { LATCH_BYTE_6 } else { LATCH_BYTE });
        let mut chunks = bytes.chunks_exact(6);
        for chunk in &mut chunks {
            let mut value = chunk.iter().fold(0u64, |acc, &b| (acc << 8) | b as u64);
            let mut group = [0; 5];
            for cw in group.iter_mut().rev() {
                *cw = (value % 900) as Codeword;
                value /= 900;
            }
            out.extend(group);
        }
        out.extend(chunks.remainder().iter().map(|&b| b as Codeword));
        EncodeState::new(Mode::Byte)
    }

    // Numeric
    //--------------------------------------------------------------------------

    fn push_numeric(tokens: &[Token], state: EncodeState, out: &mut Vec<Codeword>) -> EncodeState {
        if state.mode != Mode::Numeric {
            out.push(LATCH_NUMERIC);
        }
        let digits = tokens.iter().filter_map(|t| t.byte()).map(|b| b - b'0').collect::<Vec<_>>();
        for group in digits.chunks(NUMERIC_GROUP) {
            out.extend(numeric_group(group));
        }
        EncodeState::new(Mode::Numeric)
    }

    /// Base 900 form of the digits prefixed with 1.
    pub fn numeric_group(digits: &[u8]) -> Vec<Codeword> {
        debug_assert!(digits.len() <= NUMERIC_GROUP, "Numeric group too long: {}", digits.len());

        let mut value = digits.iter().fold(BigUint::one(), |acc, &d| acc * 10u32 + d as u32);
        let mut res = vec![];
        while !value.is_zero() {
            let rem = (&value % 900u32).to_u16().unwrap_or_default();
            res.push(rem);
            value /= 900u32;
        }
        res.reverse();
        res
    }

    // Extended channel
    //--------------------------------------------------------------------------

    // Compaction mode and sub-mode survive an ECI, except that it ends a numeric group
    fn push_eci(tokens: &[Token], state: EncodeState, out: &mut Vec<Codeword>) -> EncodeState {
        for t in tokens {
            let Token::Eci(n) = *t else { unreachable!("Non ECI token in ECI segment") };
            out.extend(eci_codewords(n));
        }
        match state.mode {
            Mode::Numeric => EncodeState::default(),
            _ => state,
        }
    }

    pub fn eci_codewords(n: u32) -> Vec<Codeword> {
        match n {
            0..=899 => vec![ECI_CHARSET, n as Codeword],
            900..=810_899 => vec![ECI_USER, (n / 900 - 1) as Codeword, (n % 900) as Codeword],
            810_900..=811_799 => vec![ECI_GENERAL, (n - 810_900) as Codeword],
            _ => unreachable!("ECI {n} out of range"),
        }
    }

}
