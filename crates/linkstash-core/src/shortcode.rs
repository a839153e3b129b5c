use crate::error::CoreError;
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Symbols a generated short code is drawn from, 64 in total.
///
/// All symbols are URL-safe.
pub const ALPHABET: &[u8; 64] =
    b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789_-";

/// Length of every generated short code.
pub const CODE_LENGTH: usize = 10;

/// A short code identifying a stored URL.
///
/// Generated codes are always [`CODE_LENGTH`] characters taken from
/// [`ALPHABET`]. Lookups may still be performed with arbitrary strings
/// through [`ShortCode::new_unchecked`]; such codes simply never resolve.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ShortCode(String);

impl ShortCode {
    /// Creates a new `ShortCode` after validating the input.
    ///
    /// Valid codes are exactly 10 characters of `[a-zA-Z0-9_-]`.
    pub fn new(code: impl Into<String>) -> std::result::Result<Self, CoreError> {
        let code = code.into();
        Self::validate(&code)?;
        Ok(Self(code))
    }

    /// Creates a `ShortCode` without validation.
    ///
    /// Use this for codes produced by trusted internal sources, or for
    /// lookups where an ill-formed code should just miss.
    pub fn new_unchecked(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    /// Returns the short code as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns `true` when the code has the shape of a generated code.
    pub fn is_well_formed(&self) -> bool {
        Self::validate(&self.0).is_ok()
    }

    /// Builds the public redirect URL for this code under `base_url`.
    pub fn to_url(&self, base_url: &str) -> String {
        format!("{}/redirect/{}", base_url.trim_end_matches('/'), self.0)
    }

    fn validate(code: &str) -> std::result::Result<(), CoreError> {
        if code.len() != CODE_LENGTH {
            return Err(CoreError::InvalidShortCode(format!(
                "length must be {}, got {}",
                CODE_LENGTH,
                code.len()
            )));
        }

        if !code.bytes().all(|b| ALPHABET.contains(&b)) {
            return Err(CoreError::InvalidShortCode(format!(
                "must contain only alphanumeric characters, underscores or hyphens: '{}'",
                code
            )));
        }

        Ok(())
    }
}

impl Display for ShortCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ShortCode {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
