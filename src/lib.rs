//! # matrism
//!
//! A Rust library that compacts text into the codeword streams of DataMatrix (ECC 200), PDF417
//! and MaxiCode symbols, complete with Reed-Solomon error correction.
//!
//! ## Features
//!
//! - **Mode optimization**: Splits input into runs of the cheapest encodation mode of each
//!   symbology, switching modes only where it pays off
//! - **Symbol sizing**: Picks the smallest symbol that fits the encoded data, or checks the data
//!   against a forced size
//! - **Padding**: Fills the remaining capacity with each symbology's pad sequence
//! - **Reed-Solomon**: Computes check codewords over GF(256), GF(929) and GF(64)
//! - **Extended channel**: Backslash escapes for ECIs, tilde escapes for FNC1 and control bytes,
//!   and character set conversion through `encoding_rs`
//!
//! ## Quick Start
//!
//! ```rust
//! use matrism::DataMatrixBuilder;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let symbol = DataMatrixBuilder::new("123456").build()?;
//!
//! assert_eq!((symbol.rows(), symbol.cols()), (10, 10));
//! assert_eq!(symbol.codewords(), [142, 164, 186, 114, 25, 5, 88, 102]);
//! # Ok(())
//! # }
//! ```
//!
//! ### Full Configuration
//!
//! ```rust
//! use matrism::{Pdf417Builder, Pdf417Mode};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let symbol = Pdf417Builder::new("Hello, World!")
//!     .columns(4)?             // Data columns - if not provided, grows with the data
//!     .ec_level(3)?            // 2^(level + 1) check codewords - if not provided, grows too
//!     .mode(Pdf417Mode::Text)? // Encodation mode - if not provided, segments the data
//!     .build()?;
//!
//! assert_eq!(symbol.cols(), 4);
//! assert_eq!(symbol.ecc().len(), 16);
//! # Ok(())
//! # }
//! ```
//!
//! ### MaxiCode Carrier Messages
//!
//! ```rust
//! use matrism::{MaxiCodeBuilder, SymbolMode};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let symbol = MaxiCodeBuilder::new("Parcel 7")
//!     .mode(SymbolMode::NumericPostcode)
//!     .primary("12345", 840, 1)
//!     .build()?;
//!
//! assert_eq!(symbol.codewords().len(), 144);
//! # Ok(())
//! # }
//! ```
//!
//! ## Symbologies
//!
//! - **DataMatrix**: 24 square sizes from 10x10 to 144x144 and 6 rectangular sizes, modes ASCII,
//!   C40, Text, X12, EDIFACT and Base 256
//! - **PDF417**: 3 to 90 rows of 1 to 30 data columns, error correction levels 0 to 8, modes
//!   Text, Byte and Numeric with macro blocks for structured append
//! - **MaxiCode**: one fixed 33x30 symbol in modes 2 to 6, code sets A to E with numeric
//!   compaction and a structured carrier message

#![allow(clippy::items_after_test_module)]

pub mod builder;
pub(crate) mod common;

pub use builder::{
    DataMatrixBuilder, MacroHeader, MaxiCodeBuilder, Pdf417Builder, StructuredAppend, Symbol,
    Symbology,
};
pub use common::codec::datamatrix::Mode as DataMatrixMode;
pub use common::codec::maxicode::Primary;
pub use common::codec::pdf417::Mode as Pdf417Mode;
pub use common::codec::Codeword;
pub use common::error::{CapacityError, ConfigError, ParseError, SymbolError, SymbolResult};
pub use common::metadata::datamatrix::Shape;
pub use common::metadata::maxicode::SymbolMode;
pub use common::metadata::SymbolSpec;
