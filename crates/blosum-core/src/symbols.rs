use phf::{Set, phf_set};

/// Residue symbols covered by the NCBI BLOSUM releases: the twenty amino
/// acids, the ambiguity codes B, J, Z, X and the stop `*`.
pub static STANDARD_SYMBOLS: Set<&'static str> = phf_set! {
    "A", "R", "N", "D", "C", "Q", "E", "G", "H", "I",
    "L", "K", "M", "F", "P", "S", "T", "W", "Y", "V",
    "B", "J", "Z", "X", "*",
};

/// Header width of a matrix that covers every standard symbol.
pub const STANDARD_SYMBOL_COUNT: usize = 25;

/// Standard symbols absent from `labels`, sorted.
pub fn missing_standard_symbols<'a>(labels: impl IntoIterator<Item = &'a str>) -> Vec<String> {
    let present: Vec<&str> = labels.into_iter().map(str::trim).collect();
    let mut missing: Vec<String> = STANDARD_SYMBOLS
        .iter()
        .filter(|symbol| !present.contains(*symbol))
        .map(|symbol| symbol.to_string())
        .collect();
    missing.sort();
    missing
}
