use super::galois::Galois;
use crate::common::codec::Codeword;

// Generator polynomial
//------------------------------------------------------------------------------

// Monic product of (x - α^i) for i in 1..=ecc_len, highest degree first
pub fn generator<const N: usize>(ecc_len: usize, gf: &Galois<N>) -> Vec<Codeword> {
    let mut poly = Vec::with_capacity(ecc_len + 1);
    poly.push(1);
    for i in 1..=ecc_len {
        let root = gf.gen_pow(i);
        let mut next = vec![0; poly.len() + 1];
        for (j, &c) in poly.iter().enumerate() {
            next[j] = gf.add(next[j], c);
            next[j + 1] = gf.sub(next[j + 1], gf.mul(c, root));
        }
        poly = next;
    }
    poly
}

// Reed-Solomon encoder
//------------------------------------------------------------------------------

/// Computes `ecc_len` check codewords for `data`.
///
/// Performs polynomial long division of the data polynomial, shifted by `ecc_len`, by the
/// generator polynomial. The check codewords are the negated remainder so that the full
/// codeword is divisible by the generator, highest degree first.
pub fn reed_solomon<const N: usize>(
    data: &[Codeword],
    ecc_len: usize,
    gf: &Galois<N>,
) -> Vec<Codeword> {
    let len = data.len();
    let gen_poly = generator(ecc_len, gf);

    let mut res = data.to_vec();
    res.resize(len + ecc_len, 0);

    for i in 0..len {
        let lead_coeff = res[i];
        debug_assert!((lead_coeff as usize) < N, "Codeword outside GF({N}): {lead_coeff}");
        if lead_coeff == 0 {
            continue;
        }

        for (u, &v) in res[i + 1..].iter_mut().zip(gen_poly[1..].iter()) {
            *u = gf.sub(*u, gf.mul(lead_coeff, v));
        }
    }

    res.split_off(len).into_iter().map(|r| gf.neg(r)).collect()
}
