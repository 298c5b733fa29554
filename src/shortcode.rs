//! Short Code Generator
//!
//! Produces fixed-length random identifiers from an alphabet without
//! easily confused glyphs. Uniqueness is the store's job, not the generator's.

use rand::rngs::OsRng;
use rand::Rng;

use crate::error::{Result, ShortenerError};

/// Default alphabet: digits and letters minus `0 O 1 I l`
pub const DEFAULT_ALPHABET: &str = "23456789ABCDEFGHJKLMNPQRSTUVWXYZabcdefghijkmnopqrstuvwxyz";

/// Default short code length
pub const DEFAULT_CODE_LENGTH: usize = 8;

/// Glyphs never allowed in a short code
pub const AMBIGUOUS_CHARS: &[char] = &['0', 'O', '1', 'I', 'l'];

/// Source of candidate short codes.
pub trait CodeGenerator: Send + Sync {
    fn generate(&self) -> String;
}

// == Random Code Generator ==
/// Samples each character independently and uniformly from the OS CSPRNG.
#[derive(Debug, Clone)]
pub struct RandomCodeGenerator {
    alphabet: Vec<char>,
    length: usize,
}

impl RandomCodeGenerator {
    /// Creates a generator over `alphabet` with ambiguous glyphs and
    /// duplicates removed.
    ///
    /// Fails if `length` is zero or fewer than two usable characters remain.
    pub fn new(alphabet: &str, length: usize) -> Result<Self> {
        let mut chars: Vec<char> = Vec::with_capacity(alphabet.len());
        for c in alphabet.chars() {
            if !c.is_whitespace() && !AMBIGUOUS_CHARS.contains(&c) && !chars.contains(&c) {
                chars.push(c);
            }
        }

        if length == 0 {
            return Err(ShortenerError::InvalidRequest(
                "Short code length must be at least 1".to_string(),
            ));
        }
        if chars.len() < 2 {
            return Err(ShortenerError::InvalidRequest(format!(
                "Short code alphabet needs at least 2 usable characters, got {}",
                chars.len()
            )));
        }

        Ok(Self {
            alphabet: chars,
            length,
        })
    }

    /// Returns the effective alphabet.
    pub fn alphabet(&self) -> &[char] {
        &self.alphabet
    }

    /// Returns the code length.
    pub fn length(&self) -> usize {
        self.length
    }
}

impl Default for RandomCodeGenerator {
    fn default() -> Self {
        Self {
            alphabet: DEFAULT_ALPHABET.chars().collect(),
            length: DEFAULT_CODE_LENGTH,
        }
    }
}

impl CodeGenerator for RandomCodeGenerator {
    fn generate(&self) -> String {
        let mut rng = OsRng;
        (0..self.length)
            .map(|_| self.alphabet[rng.gen_range(0..self.alphabet.len())])
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_default_code_shape() {
        let generator = RandomCodeGenerator::default();
        let code = generator.generate();

        assert_eq!(code.chars().count(), DEFAULT_CODE_LENGTH);
        assert!(code.chars().all(|c| DEFAULT_ALPHABET.contains(c)));
    }

    #[test]
    fn test_default_alphabet_has_no_ambiguous_chars() {
        for c in AMBIGUOUS_CHARS {
            assert!(!DEFAULT_ALPHABET.contains(*c), "alphabet contains {c}");
        }
    }

    #[test]
    fn test_ambiguous_chars_are_stripped() {
        let generator = RandomCodeGenerator::new("0O1Il ab", 6).unwrap();
        assert_eq!(generator.alphabet(), &['a', 'b']);

        for _ in 0..100 {
            let code = generator.generate();
            assert_eq!(code.len(), 6);
            assert!(code.chars().all(|c| c == 'a' || c == 'b'));
        }
    }

    #[test]
    fn test_duplicates_are_collapsed() {
        let generator = RandomCodeGenerator::new("aabbcc", 4).unwrap();
        assert_eq!(generator.alphabet(), &['a', 'b', 'c']);
    }

    #[test]
    fn test_rejects_zero_length() {
        let result = RandomCodeGenerator::new(DEFAULT_ALPHABET, 0);
        assert!(matches!(result, Err(ShortenerError::InvalidRequest(_))));
    }

    #[test]
    fn test_rejects_tiny_alphabet() {
        let result = RandomCodeGenerator::new("0Oa", 8);
        assert!(matches!(result, Err(ShortenerError::InvalidRequest(_))));
    }

    #[test]
    fn test_generate_unique_codes() {
        let generator = RandomCodeGenerator::default();
        let mut codes = HashSet::new();
        for _ in 0..1000 {
            let code = generator.generate();
            assert!(codes.insert(code), "Generated duplicate code");
        }
    }

    #[test]
    fn test_every_character_is_reachable() {
        let generator = RandomCodeGenerator::new("abcd", 64).unwrap();
        let seen: HashSet<char> = (0..20)
            .flat_map(|_| generator.generate().chars().collect::<Vec<_>>())
            .collect();
        assert_eq!(seen.len(), 4);
    }
}
