//! Validation of cross-schema substitutions

pub mod substitution;
pub mod error;


pub use substitution::{Substitution, SubstitutionValidator, ValidationReport};
pub use error::SubstitutionError;
