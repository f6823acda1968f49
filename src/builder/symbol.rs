use std::fmt::{Display, Formatter, Result as FmtResult};

use crate::common::{codec::Codeword, metadata::SymbolSpec};

// Symbology
//------------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Symbology {
    DataMatrix,
    Pdf417,
    MaxiCode,
}

impl Display for Symbology {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        let name = match self {
            Self::DataMatrix => "DataMatrix",
            Self::Pdf417 => "PDF417",
            Self::MaxiCode => "MaxiCode",
        };
        f.write_str(name)
    }
}

// Symbol
//------------------------------------------------------------------------------

/// Encoded symbol: the chosen container, its data and check codewords, and the
/// placement-ordered stream for rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Symbol {
    symbology: Symbology,
    spec: SymbolSpec,
    data: Vec<Codeword>,
    ecc: Vec<Codeword>,
    codewords: Vec<Codeword>,
}

impl Symbol {
    /// Symbol whose codeword stream is its data followed by its check codewords.
    pub(crate) fn new(
        symbology: Symbology,
        spec: SymbolSpec,
        data: Vec<Codeword>,
        ecc: Vec<Codeword>,
    ) -> Self {
        let mut codewords = Vec::with_capacity(data.len() + ecc.len());
        codewords.extend_from_slice(&data);
        codewords.extend_from_slice(&ecc);
        Self::with_codewords(symbology, spec, data, ecc, codewords)
    }

    pub(crate) fn with_codewords(
        symbology: Symbology,
        spec: SymbolSpec,
        data: Vec<Codeword>,
        ecc: Vec<Codeword>,
        codewords: Vec<Codeword>,
    ) -> Self {
        debug_assert!(
            data.len() == spec.data_capacity,
            "Data length {} doesn't fill capacity {}",
            data.len(),
            spec.data_capacity
        );
        debug_assert!(
            codewords.len() == data.len() + ecc.len(),
            "Codeword stream length {} doesn't match data and ecc",
            codewords.len()
        );

        Self { symbology, spec, data, ecc, codewords }
    }

    pub fn symbology(&self) -> Symbology {
        self.symbology
    }

    pub fn spec(&self) -> SymbolSpec {
        self.spec
    }

    pub fn rows(&self) -> usize {
        self.spec.rows
    }

    pub fn cols(&self) -> usize {
        self.spec.cols
    }

    pub fn data(&self) -> &[Codeword] {
        &self.data
    }

    pub fn ecc(&self) -> &[Codeword] {
        &self.ecc
    }

    pub fn codewords(&self) -> &[Codeword] {
        &self.codewords
    }

    pub fn metadata(&self) -> String {
        format!(
            "{{ Symbology: {}, Size: {}, Data: {}, Ecc: {} }}",
            self.symbology,
            self.spec,
            self.data.len(),
            self.ecc.len()
        )
    }
}

#[cfg(test)]
mod symbol_tests {
    use super::{Symbol, Symbology};
    use crate::common::metadata::SymbolSpec;

    #[test]
    fn test_symbol() {
        let spec = SymbolSpec::new(10, 10, 3, 5, 1);
        let (data, ecc) = (vec![142, 164, 186], vec![114, 25, 5, 88, 102]);
        let symbol = Symbol::new(Symbology::DataMatrix, spec, data, ecc);
        assert_eq!(symbol.codewords(), [142, 164, 186, 114, 25, 5, 88, 102]);
        assert_eq!((symbol.rows(), symbol.cols()), (10, 10));
        assert_eq!(symbol.metadata(), "{ Symbology: DataMatrix, Size: 10x10, Data: 3, Ecc: 5 }");
    }
}
