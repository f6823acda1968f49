#[cfg(test)]
mod symbol_tests {
    use rand::Rng;

    use matrism::*;

    fn init_logger() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    #[test]
    fn test_datamatrix_numeric() {
        init_logger();

        let symbol = DataMatrixBuilder::new("123456").build().unwrap();
        assert_eq!(symbol.symbology(), Symbology::DataMatrix);
        assert_eq!(symbol.codewords(), [142, 164, 186, 114, 25, 5, 88, 102]);
    }

    #[test]
    fn test_datamatrix_binary() {
        init_logger();

        let mut rng = rand::rng();
        let data = (0..50).map(|_| char::from(rng.random_range(0xa0u8..=0xff))).collect::<String>();
        let symbol = DataMatrixBuilder::new(&data).build().unwrap();
        let spec = symbol.spec();
        assert_eq!(symbol.data().len(), spec.data_capacity);
        assert_eq!(symbol.ecc().len(), spec.error_capacity);
        assert!(spec.data_capacity >= 52);
    }

    #[test]
    fn test_pdf417_numeric() {
        init_logger();

        let symbol = Pdf417Builder::new("000213298174000").columns(2).unwrap().build().unwrap();
        assert_eq!(symbol.symbology(), Symbology::Pdf417);
        assert_eq!(symbol.data()[1..8], [902, 1, 624, 434, 632, 282, 200]);
    }

    #[test]
    fn test_maxicode_carrier() {
        init_logger();

        let symbol = MaxiCodeBuilder::new("AB")
            .mode(SymbolMode::AlphaPostcode)
            .primary("B1050", 56, 999)
            .build()
            .unwrap();
        assert_eq!(symbol.symbology(), Symbology::MaxiCode);
        assert_eq!(symbol.data()[..6], [3, 8, 28, 13, 28, 44]);
        assert_eq!(symbol.data()[8..10], [28, 62]);
        assert_eq!(symbol.codewords().len(), 144);
    }

    #[test]
    fn test_errors() {
        init_logger();

        let err = DataMatrixBuilder::new("").build().unwrap_err();
        assert_eq!(err, ParseError::EmptyData.into());

        let err = MaxiCodeBuilder::new("AB").mode(SymbolMode::NumericPostcode).build().unwrap_err();
        assert_eq!(err, ConfigError::MissingPrimary(2).into());
    }
}

#[cfg(test)]
mod symbol_proptests {
    use prop::string::string_regex;
    use proptest::prelude::*;

    use matrism::*;

    // Printable ASCII without the backslash escape
    const PRINTABLE: &str = r"[ -\[\]-~]";

    pub fn data_strategy(charset: &str, max_len: usize) -> BoxedStrategy<String> {
        let pattern = format!(r"{charset}{{1,{max_len}}}");
        string_regex(&pattern).unwrap().boxed()
    }

    pub fn shape_strategy() -> BoxedStrategy<Shape> {
        prop_oneof![Just(Shape::Square), Just(Shape::Rectangle)].boxed()
    }

    pub fn ec_level_strategy() -> BoxedStrategy<Option<u8>> {
        prop_oneof![Just(None), (0u8..=5).prop_map(Some)].boxed()
    }

    proptest! {
        #[test]
        fn proptest_datamatrix_fills_symbol(data in data_strategy(PRINTABLE, 40), shape in shape_strategy()) {
            let symbol = DataMatrixBuilder::new(&data).shape(shape).build().unwrap();
            let spec = symbol.spec();

            prop_assert_eq!(symbol.data().len(), spec.data_capacity);
            prop_assert_eq!(symbol.ecc().len(), spec.error_capacity);
            prop_assert_eq!(&symbol.codewords()[..spec.data_capacity], symbol.data());
            prop_assert!(symbol.codewords().iter().all(|&c| c < 256));
        }

        #[test]
        fn proptest_datamatrix_digits(data in data_strategy("[0-9]", 200)) {
            let symbol = DataMatrixBuilder::new(&data).build().unwrap();

            // Digit pairs take one codeword
            let required = (data.len() + 1) / 2;
            prop_assert!(symbol.spec().data_capacity >= required);
            prop_assert_eq!(symbol.data()[0], if data.len() == 1 {
                data.as_bytes()[0] as Codeword + 1
            } else {
                130 + (data.as_bytes()[0] - b'0') as Codeword * 10
                    + (data.as_bytes()[1] - b'0') as Codeword
            });
        }

        #[test]
        fn proptest_datamatrix_monotonic(data in data_strategy("[0-9]", 300), cut in 1usize..300) {
            let prefix = &data[..cut.min(data.len())];
            let short = DataMatrixBuilder::new(prefix).build().unwrap();
            let long = DataMatrixBuilder::new(&data).build().unwrap();
            prop_assert!(short.spec().data_capacity <= long.spec().data_capacity);
        }

        #[test]
        fn proptest_datamatrix_deterministic(data in data_strategy(PRINTABLE, 60)) {
            let first = DataMatrixBuilder::new(&data).build().unwrap();
            let second = DataMatrixBuilder::new(&data).build().unwrap();
            prop_assert_eq!(first, second);
        }

        #[test]
        fn proptest_pdf417_layout(data in data_strategy(PRINTABLE, 200), level in ec_level_strategy()) {
            let mut builder = Pdf417Builder::new(&data);
            if let Some(l) = level {
                builder.ec_level(l).unwrap();
            }
            let symbol = builder.build().unwrap();

            prop_assert_eq!(symbol.data()[0] as usize, symbol.data().len());
            prop_assert_eq!(symbol.codewords().len(), symbol.rows() * symbol.cols());
            prop_assert!((3..=90).contains(&symbol.rows()));
            prop_assert!(symbol.codewords().iter().all(|&c| c < 929));
            if let Some(l) = level {
                prop_assert_eq!(symbol.ecc().len(), 2 << l);
            }
        }

        #[test]
        fn proptest_pdf417_columns(data in data_strategy(PRINTABLE, 30), cols in 1usize..=30) {
            let symbol = Pdf417Builder::new(&data).columns(cols).unwrap().build().unwrap();
            prop_assert_eq!(symbol.cols(), cols);
        }

        #[test]
        fn proptest_maxicode_layout(data in data_strategy(PRINTABLE, 30), full_ecc in any::<bool>()) {
            let mode = if full_ecc { SymbolMode::FullEcc } else { SymbolMode::Standard };
            let symbol = MaxiCodeBuilder::new(&data).mode(mode).build().unwrap();

            prop_assert_eq!(symbol.codewords().len(), 144);
            prop_assert_eq!(symbol.data().len() + symbol.ecc().len(), 144);
            prop_assert_eq!(symbol.data()[0], mode.number() as Codeword);
            prop_assert!(symbol.codewords().iter().all(|&c| c < 64));
        }
    }
}
