pub mod datamatrix;
pub mod maxicode;
pub mod pdf417;

use std::fmt::{Display, Formatter, Result as FmtResult};

use log::debug;

use crate::common::error::{CapacityError, ConfigError, SymbolResult};

// Symbol spec
//------------------------------------------------------------------------------

/// Predefined symbol container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SymbolSpec {
    pub rows: usize,
    pub cols: usize,
    pub data_capacity: usize,
    pub error_capacity: usize,
    // Interleaved Reed-Solomon blocks
    pub blocks: usize,
}

impl SymbolSpec {
    pub const fn new(
        rows: usize,
        cols: usize,
        data_capacity: usize,
        error_capacity: usize,
        blocks: usize,
    ) -> Self {
        Self { rows, cols, data_capacity, error_capacity, blocks }
    }

    pub fn total_capacity(&self) -> usize {
        self.data_capacity + self.error_capacity
    }
}

impl Display for SymbolSpec {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}x{}", self.rows, self.cols)
    }
}

// Symbol sizer
//------------------------------------------------------------------------------

/// First-fit lookup over a capacity table sorted by ascending data capacity.
///
/// The stateful [`Sizer::advance`] raises a floor so that successive calls within one encode
/// never shrink the chosen symbol. A forced symbol replaces the search with a fit check.
#[derive(Debug, Clone)]
pub struct Sizer<'a> {
    specs: &'a [SymbolSpec],
    forced: Option<usize>,
    floor: usize,
}

impl<'a> Sizer<'a> {
    pub fn new(specs: &'a [SymbolSpec]) -> Self {
        debug_assert!(!specs.is_empty(), "Empty capacity table");
        debug_assert!(
            specs.windows(2).all(|w| w[0].data_capacity <= w[1].data_capacity),
            "Capacity table isn't sorted"
        );
        Self { specs, forced: None, floor: 0 }
    }

    pub fn forced(specs: &'a [SymbolSpec], rows: usize, cols: usize) -> SymbolResult<Self> {
        let index =
            Self::position(specs, rows, cols).ok_or(ConfigError::InvalidSize { rows, cols })?;
        let mut sizer = Self::new(specs);
        sizer.forced = Some(index);
        Ok(sizer)
    }

    pub fn position(specs: &[SymbolSpec], rows: usize, cols: usize) -> Option<usize> {
        specs.iter().position(|s| s.rows == rows && s.cols == cols)
    }

}

impl Sizer<'_> {
    /// Index of the smallest spec at or above the floor holding `count` data codewords.
    pub fn accommodate_index(&self, count: usize) -> SymbolResult<usize> {
        if let Some(index) = self.forced {
            let spec = &self.specs[index];
            if spec.data_capacity < count {
                return Err(CapacityError::SymbolTooSmall {
                    rows: spec.rows,
                    cols: spec.cols,
                    capacity: spec.data_capacity,
                    required: count,
                }
                .into());
            }
            return Ok(index);
        }

        self.specs[self.floor..]
            .iter()
            .position(|s| s.data_capacity >= count)
            .map(|i| i + self.floor)
            .ok_or_else(|| CapacityError::NoSymbolFits(count).into())
    }

    pub fn accommodate(&self, count: usize) -> SymbolResult<SymbolSpec> {
        Ok(self.specs[self.accommodate_index(count)?])
    }

    /// Like [`Sizer::accommodate`], also raising the floor to the returned spec.
    pub fn advance(&mut self, count: usize) -> SymbolResult<SymbolSpec> {
        let index = self.accommodate_index(count)?;
        if index != self.floor {
            debug!("Growing symbol to {} for {count} codewords", self.specs[index]);
        }
        self.floor = index;
        Ok(self.specs[index])
    }
}
