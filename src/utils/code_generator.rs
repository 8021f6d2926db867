//! Short code generation and shape validation.
//!
//! Codes are [`CODE_LENGTH`] characters drawn independently and uniformly from
//! the 62-symbol [`ALPHABET`]. Uniqueness is enforced by the allocator's
//! retry loop, not by the generator.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use regex::Regex;
use std::sync::{LazyLock, Mutex};

/// Number of characters in every short code.
pub const CODE_LENGTH: usize = 6;

/// Symbols a short code may contain. Case-sensitive.
pub const ALPHABET: &[u8; 62] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";

static CODE_SHAPE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9]{6}$").expect("static regex is valid"));

/// Returns true if `code` has the short-code shape.
///
/// # Examples
///
/// ```ignore
/// assert!(is_valid_code("aZ09xy"));
/// assert!(!is_valid_code("abc12"));    // too short
/// assert!(!is_valid_code("abc-12"));   // not alphanumeric
/// ```
pub fn is_valid_code(code: &str) -> bool {
    CODE_SHAPE.is_match(code)
}

/// Source of candidate short codes.
///
/// Implementations are pure generators that never look at storage.
pub trait CodeGenerator: Send + Sync {
    /// Produces one candidate code of [`CODE_LENGTH`] alphabet characters.
    fn generate(&self) -> String;
}

/// Uniform random generator backed by a seeded [`StdRng`].
///
/// Codes are not meant to be unguessable; swap in another [`CodeGenerator`]
/// if a deployment needs that.
pub struct RandomCodeGenerator {
    rng: Mutex<StdRng>,
}

impl RandomCodeGenerator {
    /// Creates a generator seeded from OS entropy.
    pub fn new() -> Self {
        Self {
            rng: Mutex::new(StdRng::from_os_rng()),
        }
    }

    /// Creates a reproducible generator.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }
}

impl Default for RandomCodeGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl CodeGenerator for RandomCodeGenerator {
    fn generate(&self) -> String {
        // A poisoned lock still holds a usable RNG.
        let mut rng = self.rng.lock().unwrap_or_else(|e| e.into_inner());

        (0..CODE_LENGTH)
            .map(|_| ALPHABET[rng.random_range(0..ALPHABET.len())] as char)
            .collect()
    }
}
