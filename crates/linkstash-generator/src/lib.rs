pub mod random;

use linkstash_core::ShortCode;

pub use random::RandomGenerator;

/// Trait for generating short codes.
///
/// Implementations are pure generators that don't interact with storage;
/// the stores check every candidate for collisions themselves.
pub trait Generator: Send + Sync + 'static {
    type Output: Into<ShortCode>;
    /// Generates a candidate that can be converted into a short code.
    ///
    /// Candidates are not guaranteed to be unique.
    fn generate(&self) -> Self::Output;
}

/// Any thread-safe closure returning a code is a generator.
///
/// Mostly useful in tests that need a predictable or colliding sequence.
impl<F, O> Generator for F
where
    F: Fn() -> O + Send + Sync + 'static,
    O: Into<ShortCode>,
{
    type Output = O;

    fn generate(&self) -> Self::Output {
        self()
    }
}
