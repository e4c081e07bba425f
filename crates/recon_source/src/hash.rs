//! Content hashing for comparing source texts across artifacts.

/// A 128-bit XXH3 hash of a source text.
///
/// Equal hashes are treated as equal content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ContentHash(u128);

impl ContentHash {
    /// Hashes a source text.
    pub fn of_text(text: &str) -> Self {
        Self(xxhash_rust::xxh3::xxh3_128(text.as_bytes()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identical_text_hashes_equal() {
        let a = ContentHash::of_text("contract A {}");
        let b = ContentHash::of_text("contract A {}");
        assert_eq!(a, b);
    }

    #[test]
    fn whitespace_change_is_detected() {
        let a = ContentHash::of_text("contract A {}");
        let b = ContentHash::of_text("contract A { }");
        assert_ne!(a, b);
    }
}
