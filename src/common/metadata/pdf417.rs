use super::SymbolSpec;

// Capacity table
//------------------------------------------------------------------------------

/// Every row count for `cols` data columns that leaves room for data after `ecc_len` check
/// codewords, in ascending data capacity.
pub fn specs(cols: usize, ecc_len: usize) -> Vec<SymbolSpec> {
    debug_assert!((MIN_COLS..=MAX_COLS).contains(&cols), "Invalid column count: {cols}");

    (MIN_ROWS..=MAX_ROWS)
        .map(|rows| (rows, rows * cols))
        .take_while(|&(_, total)| total <= MAX_CODEWORDS)
        .filter(|&(_, total)| total > ecc_len)
        .map(|(rows, total)| SymbolSpec::new(rows, cols, total - ecc_len, ecc_len, 1))
        .collect()
}

/// Column count to start the search from for `count` data codewords.
pub fn start_columns(count: usize, ecc_len: usize) -> usize {
    let cols = (((count + ecc_len) as f64) / 3.0).sqrt().round() as usize;
    cols.clamp(MIN_COLS, MAX_COLS)
}

// Error correction level
//------------------------------------------------------------------------------

pub fn ec_len(level: u8) -> usize {
    debug_assert!(level <= MAX_EC_LEVEL, "Invalid error correction level: {level}");

    2 << level
}

/// Recommended level for `count` data codewords.
pub fn auto_ec_level(count: usize) -> u8 {
    match count {
        0..=40 => 2,
        41..=160 => 3,
        161..=320 => 4,
        _ => 5,
    }
}

// Global constants
//------------------------------------------------------------------------------

pub const MIN_ROWS: usize = 3;
pub const MAX_ROWS: usize = 90;
pub const MIN_COLS: usize = 1;
pub const MAX_COLS: usize = 30;
pub const MAX_CODEWORDS: usize = 928;
pub const MAX_EC_LEVEL: u8 = 8;
