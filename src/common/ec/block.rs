use std::ops::Deref;

use super::{galois::Galois, reed_solomon};
use crate::common::codec::Codeword;

// Block
//------------------------------------------------------------------------------

/// One Reed-Solomon block: data codewords followed by their check codewords.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct Block {
    data: Vec<Codeword>,
    // Data length
    dlen: usize,
}

impl Block {
    pub fn new<const N: usize>(raw: &[Codeword], ecc_len: usize, gf: &Galois<N>) -> Self {
        let dlen = raw.len();
        let mut data = Vec::with_capacity(dlen + ecc_len);
        data.extend_from_slice(raw);
        data.extend(reed_solomon(raw, ecc_len, gf));
        Self { data, dlen }
    }

    pub fn ecc(&self) -> &[Codeword] {
        &self.data[self.dlen..]
    }
}

// Block split and interleave
//------------------------------------------------------------------------------

/// Splits `data` round-robin into `count` blocks: codeword `i` goes to block `i % count`.
pub fn deinterleave(data: &[Codeword], count: usize) -> Vec<Vec<Codeword>> {
    debug_assert!(count > 0, "Block count must be positive");

    let mut blocks = vec![Vec::with_capacity(data.len().div_ceil(count)); count];
    for (i, &c) in data.iter().enumerate() {
        blocks[i % count].push(c);
    }
    blocks
}

/// Reads blocks column by column, skipping blocks that are already exhausted.
pub fn interleave<T: Copy, V: Deref<Target = [T]>>(blocks: &[V]) -> Vec<T> {
    let max_block_size = blocks.iter().map(|b| b.len()).max().unwrap_or(0);
    let total_size = blocks.iter().map(|b| b.len()).sum::<usize>();
    let mut res = Vec::with_capacity(total_size);
    for i in 0..max_block_size {
        for b in blocks {
            if i < b.len() {
                res.push(b[i]);
            }
        }
    }
    res
}

/// Computes check codewords for data split into `count` interleaved blocks with `ecc_len`
/// check codewords in total, returned in interleaved order.
pub fn interleaved_ecc<const N: usize>(
    data: &[Codeword],
    count: usize,
    ecc_len: usize,
    gf: &Galois<N>,
) -> Vec<Codeword> {
    debug_assert!(ecc_len % count == 0, "Check codewords don't split evenly: {ecc_len} / {count}");

    let ecc_per_block = ecc_len / count;
    let blocks = deinterleave(data, count)
        .iter()
        .map(|b| Block::new(b, ecc_per_block, gf))
        .collect::<Vec<_>>();
    let ecc_blocks = blocks.iter().map(|b| b.ecc()).collect::<Vec<_>>();
    interleave(&ecc_blocks)
}

#[cfg(test)]
mod block_tests {
    use super::{deinterleave, interleave, interleaved_ecc, Block};
    use crate::common::ec::{galois::GF256, reed_solomon};

    #[test]
    fn test_block() {
        let block = Block::new(&[142, 164, 186], 5, &GF256);
        assert_eq!(block.ecc(), [114, 25, 5, 88, 102]);
    }

    #[test]
    fn test_deinterleave() {
        let blocks = deinterleave(&[1, 2, 3, 4, 5, 6, 7], 3);
        assert_eq!(blocks, vec![vec![1, 4, 7], vec![2, 5], vec![3, 6]]);
    }

    #[test]
    fn test_interleave() {
        let blocks = vec![vec![1, 4, 7], vec![2, 5], vec![3, 6]];
        assert_eq!(interleave(&blocks), vec![1, 2, 3, 4, 5, 6, 7]);
    }

    #[test]
    fn test_interleaved_ecc() {
        let data = (0..20).collect::<Vec<u16>>();
        let ecc = interleaved_ecc(&data, 2, 8, &GF256);
        let odd = reed_solomon(&data.iter().step_by(2).copied().collect::<Vec<_>>(), 4, &GF256);
        let even =
            reed_solomon(&data.iter().skip(1).step_by(2).copied().collect::<Vec<_>>(), 4, &GF256);
        assert_eq!(ecc.len(), 8);
        for i in 0..4 {
            assert_eq!(ecc[2 * i], odd[i]);
            assert_eq!(ecc[2 * i + 1], even[i]);
        }
    }

    #[test]
    fn test_single_block_ecc() {
        let data = [142, 164, 186];
        assert_eq!(interleaved_ecc(&data, 1, 5, &GF256), reed_solomon(&data, 5, &GF256));
    }
}
