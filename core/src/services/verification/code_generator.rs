//! Verification code generation.

use rand::rngs::OsRng;
use rand::Rng;
use tracing::{debug, warn};

use crate::domain::entities::verification_session::VerificationPurpose;

use super::config::VerificationServiceConfig;

/// Alphabet a verification code is drawn from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CodeAlphabet {
    /// Digits 0-9
    Numeric,
    /// Uppercase letters and digits, ambiguous glyphs (0/O, 1/I/L) excluded
    Alphanumeric,
}

impl CodeAlphabet {
    fn chars(&self) -> &'static [u8] {
        match self {
            CodeAlphabet::Numeric => b"0123456789",
            CodeAlphabet::Alphanumeric => b"ABCDEFGHJKMNPQRSTUVWXYZ23456789",
        }
    }

    /// Whether `code` consists only of characters from this alphabet
    pub fn matches(&self, code: &str) -> bool {
        code.bytes().all(|b| self.chars().contains(&b))
    }
}

/// Generates verification codes.
///
/// Codes come from the OS CSPRNG. A fixed, documented constant output is
/// available only when `fixed_code` is set in configuration; there is no
/// ambient environment detection. No side effects.
#[derive(Debug, Clone)]
pub struct CodeGenerator {
    length: usize,
    alphabet: CodeAlphabet,
    fixed_code: Option<String>,
}

impl CodeGenerator {
    pub fn new(length: usize, alphabet: CodeAlphabet, fixed_code: Option<String>) -> Self {
        if fixed_code.is_some() {
            warn!(
                event = "fixed_code_mode",
                "Code generator running in fixed-code mode; issued codes are not secret"
            );
        }
        Self {
            length,
            alphabet,
            fixed_code,
        }
    }

    pub fn from_config(config: &VerificationServiceConfig) -> Self {
        Self::new(
            config.code_length,
            config.code_alphabet,
            config.fixed_code.clone(),
        )
    }

    /// Generate a code for the given purpose
    pub fn generate(&self, purpose: VerificationPurpose) -> String {
        if let Some(fixed) = &self.fixed_code {
            return fixed.clone();
        }

        let chars = self.alphabet.chars();
        let mut rng = OsRng;
        let code: String = (0..self.length)
            .map(|_| chars[rng.gen_range(0..chars.len())] as char)
            .collect();

        debug!(purpose = %purpose, event = "code_generated", "Generated verification code");
        code
    }
}
