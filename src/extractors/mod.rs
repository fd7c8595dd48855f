// src/extractors/mod.rs
pub mod fight;
pub mod fragment;
pub mod profile;
pub mod rating;
pub mod snippet;
pub mod text;

use crate::utils::error::ExtractError;

// Re-export key extraction types for convenience
pub use fight::FightExtractor;
pub use profile::ProfileExtractor;
pub use rating::RatingsExtractor;
pub use snippet::CareerExtractor;

/// Turns one archived page into its record(s).
///
/// Implementations are stateless apart from configuration, so one value can
/// be reused for every document of a batch.
pub trait DocumentExtractor {
    type Output;

    /// Short page-kind name used in log lines.
    fn kind(&self) -> &'static str;

    /// Extracts the page stored under `key`.
    ///
    /// Fails only when a structural anchor the page cannot do without is
    /// absent; every other problem leaves the affected field at its default.
    fn extract(&self, key: &str, html: &str) -> Result<Self::Output, ExtractError>;
}
