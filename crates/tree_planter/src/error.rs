//! Error types and result alias for the crate.
//!
//! This module defines [`enum@crate::error::Error`] and the crate-wide [Result] alias. Variants cover
//! invalid configuration, percentage validation, unknown species, and unusable
//! boundaries.
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[non_exhaustive]
#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("species percentages must sum to 100, got {total}")]
    InvalidPercentages { total: f64 },

    #[error("unknown species '{id}'")]
    UnknownSpecies { id: String },

    #[error("invalid boundary: {0}")]
    InvalidBoundary(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percentage_error_reports_total() {
        let err = Error::InvalidPercentages { total: 90.0 };
        assert_eq!(
            err.to_string(),
            "species percentages must sum to 100, got 90"
        );
    }

    #[test]
    fn unknown_species_names_the_id() {
        let err = Error::UnknownSpecies { id: "Q".into() };
        assert_eq!(err.to_string(), "unknown species 'Q'");
    }

    #[test]
    fn config_and_boundary_errors_carry_their_context() {
        let config = Error::InvalidConfig("num_mix_options must be >= 1".into());
        assert_eq!(
            config.to_string(),
            "invalid configuration: num_mix_options must be >= 1"
        );
        let boundary = Error::InvalidBoundary("ring has zero area".into());
        assert_eq!(boundary.to_string(), "invalid boundary: ring has zero area");
    }
}
