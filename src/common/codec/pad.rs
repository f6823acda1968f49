use log::debug;

use super::Codeword;
use crate::common::{
    error::{CapacityError, SymbolResult},
    metadata::SymbolSpec,
};

// Padder
//------------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Padding {
    pub unlatch: bool,
    pub count: usize,
}

/// Fills a data stream up to the capacity of a symbol.
///
/// `overhead` counts fixed header codewords that take capacity but are not part of the stream
/// being padded.
#[derive(Debug, Clone, Copy)]
pub struct Padder {
    spec: SymbolSpec,
    overhead: usize,
}

impl Padder {
    pub fn new(spec: SymbolSpec, overhead: usize) -> Self {
        Self { spec, overhead }
    }

    pub fn required(&self, len: usize) -> SymbolResult<usize> {
        let used = len + self.overhead;
        self.spec.data_capacity.checked_sub(used).ok_or_else(|| {
            CapacityError::SymbolTooSmall {
                rows: self.spec.rows,
                cols: self.spec.cols,
                capacity: self.spec.data_capacity,
                required: used,
            }
            .into()
        })
    }

    /// Pads `codewords` in place. `unlatch` is emitted first when given and there is room for
    /// it; `fill` then receives the pad ordinal (0-based) and the 1-based position in the
    /// final stream of each remaining slot.
    pub fn pad<F>(
        &self,
        codewords: &mut Vec<Codeword>,
        unlatch: Option<Codeword>,
        mut fill: F,
    ) -> SymbolResult<Padding>
    where
        F: FnMut(usize, usize) -> Codeword,
    {
        let mut required = self.required(codewords.len())?;

        let unlatched = match unlatch {
            Some(u) if required > 0 => {
                codewords.push(u);
                required -= 1;
                true
            }
            _ => false,
        };

        codewords.reserve(required);
        for i in 0..required {
            let position = self.overhead + codewords.len() + 1;
            codewords.push(fill(i, position));
        }

        debug!("Padded {required} codewords into {} symbol (unlatch: {unlatched})", self.spec);
        Ok(Padding { unlatch: unlatched, count: required })
    }
}

#[cfg(test)]
mod pad_tests {
    use proptest::prelude::*;
    use test_case::test_case;

    use super::{Padder, Padding};
    use crate::common::{error::CapacityError, metadata::SymbolSpec};

    const SPEC: SymbolSpec = SymbolSpec::new(12, 12, 5, 7, 1);

    #[test_case(vec![1, 2], None, 0, vec![1, 2, 0, 0, 0], Padding { unlatch: false, count: 3 })]
    #[test_case(vec![1, 2], Some(9), 0, vec![1, 2, 9, 0, 0], Padding { unlatch: true, count: 2 })]
    #[test_case(vec![1, 2], Some(9), 1, vec![1, 2, 9, 0], Padding { unlatch: true, count: 1 })]
    #[test_case(vec![1, 2, 3, 4, 5], Some(9), 0, vec![1, 2, 3, 4, 5], Padding { unlatch: false, count: 0 })]
    fn test_pad(
        mut data: Vec<u16>,
        unlatch: Option<u16>,
        overhead: usize,
        exp: Vec<u16>,
        exp_padding: Padding,
    ) {
        let padder = Padder::new(SPEC, overhead);
        let len = data.len();
        let padding = padder.pad(&mut data, unlatch, |_, _| 0).unwrap();
        assert_eq!(data, exp);
        assert_eq!(padding, exp_padding);
        assert_eq!(SPEC.data_capacity, len + padding.count + padding.unlatch as usize + overhead);
    }

    #[test]
    fn test_fill_positions() {
        let padder = Padder::new(SPEC, 1);
        let mut data = vec![7];
        padder.pad(&mut data, None, |i, pos| (i * 10 + pos) as u16).unwrap();
        assert_eq!(data, vec![7, 3, 14, 25]);
    }

    #[test]
    fn test_too_small() {
        let padder = Padder::new(SPEC, 2);
        let mut data = vec![1, 2, 3, 4];
        let err = padder.pad(&mut data, None, |_, _| 0).unwrap_err();
        let exp = CapacityError::SymbolTooSmall { rows: 12, cols: 12, capacity: 5, required: 6 };
        assert_eq!(err, exp.into());
        assert_eq!(data, vec![1, 2, 3, 4]);
    }

    proptest! {
        #[test]
        fn proptest_pad_accounting(
            capacity in 1usize..200,
            len in 0usize..200,
            overhead in 0usize..12,
            unlatch in prop::option::of(0u16..256),
        ) {
            let spec = SymbolSpec::new(12, 12, capacity, 7, 1);
            let padder = Padder::new(spec, overhead);
            let mut data = vec![1; len];
            match padder.pad(&mut data, unlatch, |_, _| 0) {
                Ok(padding) => {
                    prop_assert!(len + overhead <= capacity);
                    prop_assert_eq!(
                        capacity,
                        len + padding.count + padding.unlatch as usize + overhead
                    );
                    prop_assert_eq!(data.len() + overhead, capacity);
                    let room = len + overhead < capacity;
                    prop_assert_eq!(padding.unlatch, unlatch.is_some() && room);
                }
                Err(_) => {
                    prop_assert!(len + overhead > capacity);
                    prop_assert_eq!(data.len(), len);
                }
            }
        }
    }
}
