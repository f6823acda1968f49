use std::{fmt::Display, mem};

use num_traits::PrimInt;

use super::codec::Codeword;

// Bit stream
//------------------------------------------------------------------------------

/// MSB-first bit packer used by the sub-byte compaction schemes.
#[derive(Debug, Clone, Default)]
pub struct BitStream {
    data: Vec<u8>,
    // Bit length
    len: usize,
    // Pointer to take bits
    cursor: usize,
}

impl BitStream {
    pub fn new() -> Self {
        Self::default()
    }

    // Trailing bits of the last byte are zero
    pub fn data(&self) -> &[u8] {
        &self.data
    }
}

// Push bits for bit stream
//------------------------------------------------------------------------------

impl BitStream {
    pub fn push_bits<T>(&mut self, bits: T, size: usize)
    where
        T: PrimInt + Display,
    {
        let max_bits = mem::size_of::<T>() * 8;
        debug_assert!(size <= max_bits, "Bit count exceeds type width: Size {size}");
        debug_assert!(
            size >= max_bits - bits.leading_zeros() as usize,
            "Bit count shouldn't exceed bit length: Length {size}, Bits {bits}"
        );

        for i in (0..size).rev() {
            self.push((bits >> i) & T::one() == T::one());
        }
    }

    pub fn push(&mut self, bit: bool) {
        let offset = self.len & 7;
        if offset == 0 {
            self.data.push(0);
        }
        if bit {
            let pos = self.len >> 3;
            self.data[pos] |= 0b10000000 >> offset;
        }
        self.len += 1;
    }
}

// Take bits for bit stream
//------------------------------------------------------------------------------

impl BitStream {
    pub fn take_bits(&mut self, n: usize) -> Option<u16> {
        debug_assert!(n <= 16, "Cannot take more than 16 bits: N {n}");

        if self.cursor + n > self.len {
            return None;
        }

        let mut res = 0u16;
        for _ in 0..n {
            let bit = (self.data[self.cursor >> 3] << (self.cursor & 7)) >> 7;
            res = (res << 1) | bit as u16;
            self.cursor += 1;
        }
        Some(res)
    }

    // Splits the whole stream into `width` bit codewords, zero filling the last one
    pub fn codewords(&self, width: usize) -> Vec<Codeword> {
        debug_assert!(width > 0 && width <= 16, "Invalid codeword width: {width}");

        let mut reader = Self { data: self.data.clone(), len: self.len, cursor: 0 };
        let mut res = Vec::with_capacity(self.len.div_ceil(width));
        while reader.cursor < reader.len {
            let n = width.min(reader.len - reader.cursor);
            let bits = reader.take_bits(n).unwrap_or_default();
            res.push(bits << (width - n));
        }
        res
    }
}

#[cfg(test)]
mod bit_stream_tests {

    use super::BitStream;

    #[test]
    fn test_len() {
        let mut bs = BitStream::new();
        assert!(bs.data().is_empty());
        bs.push_bits(0u8, 0);
        assert!(bs.codewords(6).is_empty());
        bs.push_bits(0b1000u8, 4);
        assert_eq!(bs.data().len(), 1);
        bs.push_bits(0b1000u8, 8);
        assert_eq!(bs.data().len(), 2);
        bs.push_bits(0b111111u8, 6);
        assert_eq!(bs.codewords(6).len(), 3);
        bs.push_bits(999_999_999u32, 30);
        assert_eq!(bs.codewords(6).len(), 8);
        assert_eq!(bs.data().len(), 6);
    }

    #[test]
    #[should_panic]
    fn test_invalid_len() {
        let mut bs = BitStream::new();
        bs.push_bits(256u16, 8);
    }

    #[test]
    fn test_push() {
        let mut bs = BitStream::new();
        bs.push(false);
        assert_eq!(bs.data(), [0b00000000]);
        bs.push(true);
        assert_eq!(bs.data(), [0b01000000]);
    }

    #[test]
    fn test_push_six_bit_values() {
        let mut bs = BitStream::new();
        for v in [0b000001u8, 0b000010, 0b000011, 0b011111] {
            bs.push_bits(v, 6);
        }
        assert_eq!(bs.data(), [0b00000100, 0b00100000, 0b11011111]);
    }

    #[test]
    fn test_take_bits() {
        let mut bs = BitStream::new();
        bs.push_bits(0b11010010_00110100u16, 16);
        assert_eq!(bs.take_bits(0), Some(0));
        assert_eq!(bs.take_bits(4), Some(0b1101));
        assert_eq!(bs.take_bits(9), Some(0b001000110));
        assert_eq!(bs.take_bits(3), Some(0b100));
        assert_eq!(bs.take_bits(1), None);
    }

    #[test]
    fn test_codewords() {
        let mut bs = BitStream::new();
        bs.push_bits(123_456_789u32, 30);
        // 123456789 = 0b000111_010110_111100_110100_010101
        assert_eq!(bs.codewords(6), vec![7, 22, 60, 52, 21]);

        let mut bs = BitStream::new();
        bs.push_bits(0b101u8, 3);
        assert_eq!(bs.codewords(6), vec![0b101000]);
    }
}
