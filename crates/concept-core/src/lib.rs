//! Dependency graph store and its algorithms

pub mod graph;
pub mod model;
pub mod closure;
pub mod order;
pub mod cycle;
pub mod reduction;
pub mod export;


pub use model::{NodeId, GraphNode};
pub use graph::Graph;
pub use export::PetgraphView;
