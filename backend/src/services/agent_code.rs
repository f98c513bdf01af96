//! Agent Code Generator
//!
//! Produces candidate business identifiers of the form `1234ABCD`: four
//! decimal digits in `1000..=9999` followed by four uppercase ASCII letters.
//! Candidates are not checked for uniqueness here; the lifecycle service
//! resolves collisions against the store.

use std::sync::Mutex;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Number of leading decimal digits in an agent code
pub const CODE_DIGITS: usize = 4;

/// Number of trailing uppercase letters in an agent code
pub const CODE_LETTERS: usize = 4;

/// Source of candidate agent codes
pub trait AgentCodeSource: Send + Sync {
    /// Produce the next candidate code
    fn generate(&self) -> String;
}

/// Random agent code generator backed by its own RNG
#[derive(Debug)]
pub struct RandomCodeGenerator {
    rng: Mutex<StdRng>,
}

impl RandomCodeGenerator {
    /// Generator seeded from operating system entropy
    pub fn from_entropy() -> Self {
        Self {
            rng: Mutex::new(StdRng::from_entropy()),
        }
    }

    /// Deterministic generator for reproducible runs
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }
}

impl Default for RandomCodeGenerator {
    fn default() -> Self {
        Self::from_entropy()
    }
}

impl AgentCodeSource for RandomCodeGenerator {
    fn generate(&self) -> String {
        // RNG state stays valid across a poisoned lock
        let mut rng = self.rng.lock().unwrap_or_else(|e| e.into_inner());
        random_code(&mut *rng)
    }
}

/// Draw one code from `rng`
pub fn random_code<R: Rng + ?Sized>(rng: &mut R) -> String {
    let mut code = String::with_capacity(CODE_DIGITS + CODE_LETTERS);
    code.push_str(&rng.gen_range(1000..=9999u16).to_string());
    for _ in 0..CODE_LETTERS {
        code.push(char::from(rng.gen_range(b'A'..=b'Z')));
    }
    code
}

/// Check that a string has the agent code shape
#[cfg(test)]
pub fn is_valid_code(code: &str) -> bool {
    let bytes = code.as_bytes();
    bytes.len() == CODE_DIGITS + CODE_LETTERS
        && bytes[0] != b'0'
        && bytes[..CODE_DIGITS].iter().all(u8::is_ascii_digit)
        && bytes[CODE_DIGITS..].iter().all(u8::is_ascii_uppercase)
}
