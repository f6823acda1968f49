use super::SymbolSpec;

// Shape
//------------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Shape {
    #[default]
    Square,
    Rectangle,
}

impl Shape {
    pub fn specs(self) -> &'static [SymbolSpec] {
        match self {
            Self::Square => &SQUARE_SPECS,
            Self::Rectangle => &RECTANGLE_SPECS,
        }
    }

    pub fn of(rows: usize, cols: usize) -> Option<Self> {
        [Self::Square, Self::Rectangle]
            .into_iter()
            .find(|s| s.specs().iter().any(|spec| spec.rows == rows && spec.cols == cols))
    }
}

// Global constants
//------------------------------------------------------------------------------

pub static SQUARE_SPECS: [SymbolSpec; 24] = [
    SymbolSpec::new(10, 10, 3, 5, 1),
    SymbolSpec::new(12, 12, 5, 7, 1),
    SymbolSpec::new(14, 14, 8, 10, 1),
    SymbolSpec::new(16, 16, 12, 12, 1),
    SymbolSpec::new(18, 18, 18, 14, 1),
    SymbolSpec::new(20, 20, 22, 18, 1),
    SymbolSpec::new(22, 22, 30, 20, 1),
    SymbolSpec::new(24, 24, 36, 24, 1),
    SymbolSpec::new(26, 26, 44, 28, 1),
    SymbolSpec::new(32, 32, 62, 36, 1),
    SymbolSpec::new(36, 36, 86, 42, 1),
    SymbolSpec::new(40, 40, 114, 48, 1),
    SymbolSpec::new(44, 44, 144, 56, 1),
    SymbolSpec::new(48, 48, 174, 68, 1),
    SymbolSpec::new(52, 52, 204, 84, 2),
    SymbolSpec::new(64, 64, 280, 112, 2),
    SymbolSpec::new(72, 72, 368, 144, 4),
    SymbolSpec::new(80, 80, 456, 192, 4),
    SymbolSpec::new(88, 88, 576, 224, 4),
    SymbolSpec::new(96, 96, 696, 272, 4),
    SymbolSpec::new(104, 104, 816, 336, 6),
    SymbolSpec::new(120, 120, 1050, 408, 6),
    SymbolSpec::new(132, 132, 1304, 496, 8),
    SymbolSpec::new(144, 144, 1558, 620, 10),
];

pub static RECTANGLE_SPECS: [SymbolSpec; 6] = [
    SymbolSpec::new(8, 18, 5, 7, 1),
    SymbolSpec::new(8, 32, 10, 11, 1),
    SymbolSpec::new(12, 26, 16, 14, 1),
    SymbolSpec::new(12, 36, 22, 18, 1),
    SymbolSpec::new(16, 36, 32, 24, 1),
    SymbolSpec::new(16, 48, 49, 28, 1),
];

#[cfg(test)]
mod datamatrix_spec_tests {
    use super::{Shape, RECTANGLE_SPECS, SQUARE_SPECS};

    #[test]
    fn test_tables_sorted() {
        for specs in [&SQUARE_SPECS[..], &RECTANGLE_SPECS[..]] {
            assert!(specs.windows(2).all(|w| w[0].data_capacity < w[1].data_capacity));
        }
    }

    #[test]
    fn test_error_capacity_splits_evenly() {
        for spec in SQUARE_SPECS.iter().chain(RECTANGLE_SPECS.iter()) {
            assert_eq!(spec.error_capacity % spec.blocks, 0, "{spec}");
        }
    }

    #[test]
    fn test_shape_of() {
        assert_eq!(Shape::of(10, 10), Some(Shape::Square));
        assert_eq!(Shape::of(16, 48), Some(Shape::Rectangle));
        assert_eq!(Shape::of(11, 11), None);
    }
}
