//! Substitution validation diagnostics

use concept_core::NodeId;

/// The first rule a set of substitutions violates.
///
/// `Display` renders the human-readable diagnostic.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SubstitutionError {
    #[error("invalid substitution: constituenta {original} or {substitution} does not exist")]
    InvalidIds {
        original: NodeId,
        substitution: NodeId,
    },
    #[error("base set {substitution} can only replace a base or constant set, not {original}")]
    InvalidBasic {
        substitution: String,
        original: String,
    },
    #[error("constant set {substitution} can only replace another constant set, not {original}")]
    InvalidConstant {
        substitution: String,
        original: String,
    },
    #[error("{substitution} cannot replace {original}: incompatible constituenta classes")]
    InvalidClasses {
        substitution: String,
        original: String,
    },
    #[error("circular type dependency: {chain}")]
    TypificationCycle { chain: String },
}

impl SubstitutionError {
    /// `true` for the three type-compatibility variants.
    pub fn is_type_mismatch(&self) -> bool {
        matches!(
            self,
            SubstitutionError::InvalidBasic { .. }
                | SubstitutionError::InvalidConstant { .. }
                | SubstitutionError::InvalidClasses { .. }
        )
    }
}
