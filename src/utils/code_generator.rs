//! Short code generation.
//!
//! Codes are random and drawn from the URL-safe base64 alphabet
//! (`A-Z a-z 0-9 - _`). The generator does not guarantee uniqueness; the
//! store rejects a colliding code with [`crate::error::StoreError::DuplicateCode`].

use base64::Engine as _;

/// Length of generated codes unless configured otherwise.
pub const DEFAULT_CODE_LENGTH: usize = 10;

/// Shortest code length accepted by configuration.
pub const MIN_CODE_LENGTH: usize = 4;

/// Longest code length accepted by configuration.
pub const MAX_CODE_LENGTH: usize = 64;

/// Generates a random short code of exactly `length` characters.
///
/// Uses `getrandom` for entropy and encodes the bytes as URL-safe base64
/// without padding, truncated to `length`.
///
/// # Panics
///
/// Panics if the system random number generator fails (extremely rare).
pub fn generate_code(length: usize) -> String {
    let mut buffer = vec![0u8; (length * 3).div_ceil(4)];

    getrandom::fill(&mut buffer).expect("Failed to generate random bytes");

    let mut code = base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(buffer);
    code.truncate(length);
    code
}

/// Fixed-length short code generator.
#[derive(Debug, Clone, Copy)]
pub struct CodeGenerator {
    length: usize,
}

impl CodeGenerator {
    pub fn new(length: usize) -> Self {
        Self {
            length: length.clamp(MIN_CODE_LENGTH, MAX_CODE_LENGTH),
        }
    }

    pub fn length(&self) -> usize {
        self.length
    }

    pub fn generate(&self) -> String {
        generate_code(self.length)
    }
}

impl Default for CodeGenerator {
    fn default() -> Self {
        Self::new(DEFAULT_CODE_LENGTH)
    }
}
