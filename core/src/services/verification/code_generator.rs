//! Verification code generation

use rand::{rngs::OsRng, Rng};

/// Smallest code that can be issued
pub const CODE_MIN: u32 = 100_000;
/// Largest code that can be issued
pub const CODE_MAX: u32 = 999_999;

/// Draw a 6-digit code uniformly from the OS CSPRNG
///
/// The range excludes leading zeros so every code is exactly six digits
/// without padding.
pub fn generate_code() -> String {
    OsRng.gen_range(CODE_MIN..=CODE_MAX).to_string()
}
