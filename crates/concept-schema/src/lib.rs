//! Constituenta model, dependency graph construction and derivation inference

pub mod model;
pub mod extractor;
pub mod index;
pub mod builder;
pub mod derivation;
pub mod inheritance;
pub mod stats;
pub mod loader;
pub mod filter;
pub mod error;

#[cfg(test)]
pub mod tests;

pub use model::{
    ArgumentInfo, Constituenta, CstClass, CstType, ExpressionStatus, InheritanceInfo, ParseInfo,
    ParsingStatus, SchemaData, ValueClass,
};
pub use extractor::{extract_globals, split_template, GlobalIdentifiers, ReferenceExtractor};
pub use index::CstIndex;
pub use builder::DependencyGraphBuilder;
pub use derivation::{DerivationEngine, DerivationForest};
pub use inheritance::annotate_inheritance;
pub use stats::SchemaStats;
pub use loader::{LoadedSchema, SchemaLoader};
pub use filter::{GraphFilterParams, TermGraphFilter};
pub use error::SchemaError;
