pub use encode::*;

// Encoder
//------------------------------------------------------------------------------

pub mod encode {
    use log::trace;

    use super::super::{Mode, PAD, UNLATCH};
    use super::writer::push_segment;
    use crate::common::{
        codec::{Codeword, Padder, Padding, Segment, Token},
        error::SymbolResult,
    };

    /// Mode the stream is in between two segments.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct EncodeState {
        pub mode: Mode,
        // Unlatch written by the latest return from a triple mode to ASCII
        pub returned_at: Option<usize>,
    }

    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct Encoded {
        pub codewords: Vec<Codeword>,
        pub state: EncodeState,
    }

    impl Encoded {
        /// Index of an unlatch directly followed by a single ASCII codeword ending the stream.
        /// The unlatch can be left out when that codeword fills the symbol.
        pub fn implicit_unlatch(&self) -> Option<usize> {
            self.state
                .returned_at
                .filter(|&i| i + 2 == self.codewords.len() && self.state.mode == Mode::Ascii)
        }

        pub fn drop_unlatch(&mut self, index: usize) {
            debug_assert!(self.codewords[index] == UNLATCH, "Not an unlatch at {index}");
            self.codewords.remove(index);
            self.state.returned_at = None;
        }
    }

    /// Encodes the segments after the `header` codewords, threading the state through each
    /// segment writer.
    pub fn encode(tokens: &[Token], segs: &[Segment<Mode>], header: &[Codeword]) -> Encoded {
        let mut out = Vec::with_capacity(header.len() + tokens.len());
        out.extend_from_slice(header);

        let mut state = EncodeState::default();
        for seg in segs {
            state = push_segment(seg.mode, seg.tokens(tokens), state, &mut out);
            trace!("{} segment at {} -> {:?}", seg.mode.name(), seg.start, state.mode);
        }
        Encoded { codewords: out, state }
    }

    /// Pads with 129 followed by 253-state randomized pads, unlatching first when the stream
    /// ends in a triple mode.
    pub fn pad(encoded: &mut Encoded, padder: &Padder) -> SymbolResult<Padding> {
        let unlatch = encoded.state.mode.is_triple().then_some(UNLATCH);
        let padding = padder.pad(&mut encoded.codewords, unlatch, |i, pos| match i {
            0 => PAD,
            _ => randomize_253(PAD, pos),
        })?;
        if padding.unlatch {
            encoded.state.mode = Mode::Ascii;
        }
        Ok(padding)
    }

    pub fn randomize_253(cw: Codeword, pos: usize) -> Codeword {
        let t = cw as usize + (149 * pos) % 253 + 1;
        if t <= 254 {
            t as Codeword
        } else {
            (t - 254) as Codeword
        }
    }

    pub fn randomize_255(cw: Codeword, pos: usize) -> Codeword {
        ((cw as usize + (149 * pos) % 255 + 1) % 256) as Codeword
    }

    #[cfg(test)]
    mod encode_tests {
        use test_case::test_case;

        use super::{encode, pad, randomize_253, randomize_255, Encoded};
        use crate::common::{
            codec::{
                analyze,
                datamatrix::{fallback, Mode, PASSES},
                Padder, Token,
            },
            metadata::datamatrix::SQUARE_SPECS,
        };

        fn encode_str(s: &[u8]) -> Encoded {
            let tokens = s.iter().copied().map(Token::Byte).collect::<Vec<_>>();
            let segs = analyze(&tokens, &PASSES, fallback).unwrap();
            encode(&tokens, &segs, &[])
        }

        #[test_case(b"123456", vec![142, 164, 186])]
        #[test_case(b"A", vec![66])]
        #[test_case(b"\xe9", vec![235, 106])]
        #[test_case(b"ABCDEF", vec![230, 89, 233, 109, 36])]
        #[test_case(b"ABCDE", vec![66, 67, 68, 69, 70])]
        #[test_case(b"ABCDEFG", vec![230, 89, 233, 109, 36, 254, 72])]
        #[test_case(b"ABC.DEF.", vec![240, 4, 32, 238, 16, 81, 174, 124])]
        fn test_encode(s: &[u8], exp: Vec<u16>) {
            assert_eq!(encode_str(s).codewords, exp);
        }

        #[test]
        fn test_mode_threshold() {
            let tokens = b"ABCDEF".iter().copied().map(Token::Byte).collect::<Vec<_>>();
            let segs = analyze(&tokens, &PASSES, fallback).unwrap();
            assert_eq!(segs.len(), 1);
            assert_eq!(segs[0].mode, Mode::C40);

            let segs = analyze(&tokens[..5], &PASSES, fallback).unwrap();
            assert_eq!(segs.len(), 1);
            assert_eq!(segs[0].mode, Mode::Ascii);
        }

        #[test]
        fn test_implicit_unlatch() {
            let encoded = encode_str(b"ABCDEFG");
            assert_eq!(encoded.state.mode, Mode::Ascii);
            assert_eq!(encoded.implicit_unlatch(), Some(5));

            let mut encoded = encode_str(b"ABCDEFGH1");
            assert_eq!(encoded.implicit_unlatch(), None);
            encoded.codewords.push(1);
            assert_eq!(encoded.implicit_unlatch(), None);
        }

        #[test]
        fn test_randomize_255_sequence() {
            let bytes = [50, 51, 52, 53, 255, 254];
            let offset = 5;
            let res = bytes
                .iter()
                .enumerate()
                .map(|(i, &b)| randomize_255(b, offset + i))
                .collect::<Vec<_>>();
            assert_eq!(res, vec![30, 181, 76, 226, 66, 214]);
            for (i, (&b, &r)) in bytes.iter().zip(res.iter()).enumerate() {
                assert_eq!(r as usize, (b as usize + (149 * (offset + i)) % 255 + 1) % 256);
            }
        }

        #[test]
        fn test_randomize_253() {
            let res = (1..=7).map(|pos| randomize_253(129, pos)).collect::<Vec<_>>();
            assert_eq!(res, vec![25, 175, 70, 220, 115, 11, 161]);
        }

        #[test]
        fn test_pad() {
            let mut encoded = encode_str(b"ABCDEFG");
            let padder = Padder::new(SQUARE_SPECS[2], 0);
            let padding = pad(&mut encoded, &padder).unwrap();
            assert_eq!(encoded.codewords, vec![230, 89, 233, 109, 36, 254, 72, 129]);
            assert!(!padding.unlatch);
            assert_eq!(padding.count, 1);

            let mut encoded = encode_str(b"ABCDEF");
            let padder = Padder::new(SQUARE_SPECS[2], 0);
            let padding = pad(&mut encoded, &padder).unwrap();
            let exp = vec![230, 89, 233, 109, 36, 254, 129, randomize_253(129, 8)];
            assert_eq!(encoded.codewords, exp);
            assert!(padding.unlatch);
            assert_eq!(padding.count, 2);
        }
    }
}

// Writer for encoded data
//------------------------------------------------------------------------------

pub(super) mod writer {
    use super::super::{
        edifact_value, push_values, x12_value, Mode, EDIFACT_UNLATCH, ECI, FNC1, MAX_BASE256_FIELD,
        SHIFT_1, UNLATCH, UPPER_SHIFT,
    };
    use super::encode::{randomize_255, EncodeState};
    use crate::common::{
        bit_utils::BitStream,
        codec::{Codeword, Token},
    };

    pub fn push_segment(
        mode: Mode,
        tokens: &[Token],
        state: EncodeState,
        out: &mut Vec<Codeword>,
    ) -> EncodeState {
        let state = match state.mode {
            m if m.is_triple() && m != mode => unlatch(out),
            _ => state,
        };
        match mode {
            Mode::Ascii => push_ascii(tokens, state, out),
            Mode::C40 | Mode::Text => push_triples(mode, tokens, state, out),
            Mode::X12 => push_x12(tokens, state, out),
            Mode::Edifact => push_edifact(tokens, state, out),
            Mode::Base256 => push_base256(tokens, state, out),
            Mode::Eci => push_eci(tokens, state, out),
        }
    }

    fn unlatch(out: &mut Vec<Codeword>) -> EncodeState {
        let at = out.len();
        out.push(UNLATCH);
        EncodeState { mode: Mode::Ascii, returned_at: Some(at) }
    }

    fn latch(mode: Mode, state: EncodeState, out: &mut Vec<Codeword>) -> EncodeState {
        debug_assert!(
            state.mode == mode || state.mode == Mode::Ascii,
            "Latching into {mode:?} from {:?}",
            state.mode
        );
        if state.mode != mode {
            if let Some(cw) = mode.latch() {
                out.push(cw);
            }
        }
        EncodeState { mode, returned_at: None }
    }

    fn push_ascii(tokens: &[Token], state: EncodeState, out: &mut Vec<Codeword>) -> EncodeState {
        debug_assert!(state.mode == Mode::Ascii, "ASCII data in {:?}", state.mode);

        let mut i = 0;
        while i < tokens.len() {
            if let (Token::Byte(a), Some(&Token::Byte(b))) = (tokens[i], tokens.get(i + 1)) {
                if a.is_ascii_digit() && b.is_ascii_digit() {
                    out.push(130 + ((a - b'0') * 10 + (b - b'0')) as Codeword);
                    i += 2;
                    continue;
                }
            }
            match tokens[i] {
                Token::Byte(b) if b < 128 => out.push(b as Codeword + 1),
                Token::Byte(b) => out.extend([UPPER_SHIFT, b as Codeword - 127]),
                Token::Fnc1 => out.push(FNC1),
                Token::Eci(_) => unreachable!("ECI inside ASCII segment"),
            }
            i += 1;
        }
        EncodeState { mode: Mode::Ascii, ..state }
    }

    // Three values per two codewords
    fn push_packed(values: &[u8], out: &mut Vec<Codeword>) {
        for chunk in values.chunks(3) {
            let c = |i: usize| chunk.get(i).copied().unwrap_or(SHIFT_1) as u32;
            let v = 1600 * c(0) + 40 * c(1) + c(2) + 1;
            out.extend([(v >> 8) as Codeword, (v & 0xff) as Codeword]);
        }
    }

    fn push_triples(
        mode: Mode,
        tokens: &[Token],
        state: EncodeState,
        out: &mut Vec<Codeword>,
    ) -> EncodeState {
        let mut values = Vec::with_capacity(tokens.len() * 2);
        let mut ends = Vec::with_capacity(tokens.len());
        for &t in tokens {
            push_values(mode, t, &mut values);
            ends.push(values.len());
        }

        // A single trailing value goes to ASCII along with the tokens sharing its triple
        let mut split = tokens.len();
        if values.len() % 3 == 1 {
            split -= 1;
            while split > 0 && ends[split - 1] % 3 != 0 {
                split -= 1;
            }
        }

        let mut state = state;
        if split > 0 {
            state = latch(mode, state, out);
            push_packed(&values[..ends[split - 1]], out);
        }
        if split < tokens.len() {
            if state.mode.is_triple() {
                state = unlatch(out);
            }
            state = push_ascii(&tokens[split..], state, out);
        }
        state
    }

    fn push_x12(tokens: &[Token], state: EncodeState, out: &mut Vec<Codeword>) -> EncodeState {
        let full = tokens.len() / 3 * 3;
        let mut state = state;
        if full > 0 {
            state = latch(Mode::X12, state, out);
            let values = tokens[..full]
                .iter()
                .map(|t| t.byte().map_or(0, x12_value))
                .collect::<Vec<_>>();
            push_packed(&values, out);
        }
        if full < tokens.len() {
            if state.mode.is_triple() {
                state = unlatch(out);
            }
            state = push_ascii(&tokens[full..], state, out);
        }
        state
    }

    // Four values per three codewords, closed by the unlatch value
    fn push_edifact(tokens: &[Token], state: EncodeState, out: &mut Vec<Codeword>) -> EncodeState {
        latch(Mode::Edifact, state, out);
        let mut bs = BitStream::new();
        for t in tokens {
            let b = t.byte().unwrap_or_default();
            bs.push_bits(edifact_value(b), 6);
        }
        bs.push_bits(EDIFACT_UNLATCH, 6);
        out.extend(bs.data().iter().map(|&b| b as Codeword));
        EncodeState { mode: Mode::Ascii, returned_at: None }
    }

    fn push_base256(tokens: &[Token], state: EncodeState, out: &mut Vec<Codeword>) -> EncodeState {
        for field in tokens.chunks(MAX_BASE256_FIELD) {
            latch(Mode::Base256, state, out);
            let n = field.len();
            let header = match n {
                0..=249 => vec![n as Codeword],
                _ => vec![(249 + n / 250) as Codeword, (n % 250) as Codeword],
            };
            let bytes = field.iter().map(|t| t.byte().unwrap_or_default() as Codeword);
            for cw in header.into_iter().chain(bytes) {
                let pos = out.len() + 1;
                out.push(randomize_255(cw, pos));
            }
        }
        EncodeState { mode: Mode::Ascii, returned_at: None }
    }

    fn push_eci(tokens: &[Token], state: EncodeState, out: &mut Vec<Codeword>) -> EncodeState {
        debug_assert!(state.mode == Mode::Ascii, "ECI in {:?}", state.mode);

        for t in tokens {
            let Token::Eci(n) = *t else { unreachable!("Non ECI token in ECI segment") };
            out.push(ECI);
            out.extend(eci_codewords(n));
        }
        state
    }

    pub fn eci_codewords(n: u32) -> Vec<Codeword> {
        match n {
            0..=126 => vec![(n + 1) as Codeword],
            127..=16382 => {
                let n = n - 127;
                vec![(n / 254 + 128) as Codeword, (n % 254 + 1) as Codeword]
            }
            _ => {
                let n = n - 16383;
                vec![
                    (n / 64516 + 192) as Codeword,
                    ((n / 254) % 254 + 1) as Codeword,
                    (n % 254 + 1) as Codeword,
                ]
            }
        }
    }

}
