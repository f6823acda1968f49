use crate::common::codec::Codeword;

// Galois field
//------------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Characteristic {
    // GF(2^m), addition is xor
    Two,
    // GF(p), addition is modular
    Prime,
}

/// Finite field of order `N` backed by discrete log and antilog tables.
///
/// Binary extension fields are built from a field-defining modulus polynomial with `α = 2`
/// as primitive element. Prime fields are built from an explicit primitive element.
#[derive(Debug, Clone)]
pub struct Galois<const N: usize> {
    exp: [u16; N],
    log: [u16; N],
    kind: Characteristic,
}

impl<const N: usize> Galois<N> {
    pub const fn binary(modulus: u16) -> Self {
        let mut exp = [0u16; N];
        let mut log = [0u16; N];
        let mut x = 1usize;
        let mut i = 0;
        while i < N - 1 {
            exp[i] = x as u16;
            log[x] = i as u16;
            x <<= 1;
            if (x & N) != 0 {
                x ^= modulus as usize;
            }
            i += 1;
        }
        Self { exp, log, kind: Characteristic::Two }
    }

    pub const fn prime(generator: u16) -> Self {
        let mut exp = [0u16; N];
        let mut log = [0u16; N];
        let mut x = 1usize;
        let mut i = 0;
        while i < N - 1 {
            exp[i] = x as u16;
            log[x] = i as u16;
            x = x * generator as usize % N;
            i += 1;
        }
        Self { exp, log, kind: Characteristic::Prime }
    }
}

// Field arithmetic
//------------------------------------------------------------------------------

impl<const N: usize> Galois<N> {
    pub fn add(&self, a: Codeword, b: Codeword) -> Codeword {
        debug_assert!((a as usize) < N && (b as usize) < N, "Operand outside GF({N}): {a}, {b}");
        match self.kind {
            Characteristic::Two => a ^ b,
            Characteristic::Prime => ((a as usize + b as usize) % N) as Codeword,
        }
    }

    pub fn sub(&self, a: Codeword, b: Codeword) -> Codeword {
        self.add(a, self.neg(b))
    }

    pub fn neg(&self, a: Codeword) -> Codeword {
        match self.kind {
            Characteristic::Two => a,
            Characteristic::Prime => ((N - a as usize) % N) as Codeword,
        }
    }

    pub fn mul(&self, a: Codeword, b: Codeword) -> Codeword {
        if a == 0 || b == 0 {
            return 0;
        }
        let log_sum = self.log[a as usize] as usize + self.log[b as usize] as usize;
        self.exp[log_sum % (N - 1)]
    }

    // α^i
    pub fn gen_pow(&self, i: usize) -> Codeword {
        self.exp[i % (N - 1)]
    }
}

// Global constants
//------------------------------------------------------------------------------

/// GF(2^6) with modulus x^6 + x + 1, used by MaxiCode.
pub static GF64: Galois<64> = Galois::binary(0x43);

/// GF(2^8) with modulus x^8 + x^5 + x^3 + x^2 + 1, used by DataMatrix.
pub static GF256: Galois<256> = Galois::binary(0x12d);

/// GF(929) with primitive element 3, used by PDF417.
pub static GF929: Galois<929> = Galois::prime(3);

#[cfg(test)]
mod galois_tests {
    use test_case::test_case;

    use super::{GF256, GF64, GF929};

    #[test]
    fn test_binary_tables() {
        assert_eq!(GF256.gen_pow(0), 1);
        assert_eq!(GF256.gen_pow(7), 128);
        assert_eq!(GF256.gen_pow(8), 0x2d);
        assert_eq!(GF256.gen_pow(255), 1);
        assert_eq!(GF64.gen_pow(6), 0x03);
        assert_eq!(GF64.gen_pow(63), 1);
    }

    #[test]
    fn test_prime_tables() {
        assert_eq!(GF929.gen_pow(1), 3);
        assert_eq!(GF929.gen_pow(2), 9);
        assert_eq!(GF929.gen_pow(928), 1);
    }

    #[test]
    fn test_every_nonzero_element_has_a_log() {
        let mut seen = vec![false; 929];
        for i in 0..928 {
            seen[GF929.gen_pow(i) as usize] = true;
        }
        assert!(seen[1..].iter().all(|&s| s));

        let mut seen = vec![false; 256];
        for i in 0..255 {
            seen[GF256.gen_pow(i) as usize] = true;
        }
        assert!(seen[1..].iter().all(|&s| s));
    }

    #[test_case(3, 5, 15)]
    #[test_case(900, 2, 871)]
    #[test_case(0, 700, 0)]
    #[test_case(928, 928, 1)]
    fn test_prime_mul(a: u16, b: u16, exp: u16) {
        assert_eq!(GF929.mul(a, b), exp);
    }

    #[test]
    fn test_prime_add_sub_neg() {
        assert_eq!(GF929.add(900, 100), 71);
        assert_eq!(GF929.sub(5, 12), 922);
        assert_eq!(GF929.neg(12), 917);
        assert_eq!(GF929.neg(0), 0);
    }

    #[test]
    fn test_binary_add_is_xor() {
        assert_eq!(GF256.add(0b1010, 0b0110), 0b1100);
        assert_eq!(GF256.sub(0b1010, 0b0110), 0b1100);
        assert_eq!(GF64.neg(17), 17);
    }

    #[test]
    fn test_binary_mul_inverse() {
        for a in 1..256u16 {
            let inv = GF256.gen_pow(255 - GF256.log[a as usize] as usize);
            assert_eq!(GF256.mul(a, inv), 1);
        }
    }
}
