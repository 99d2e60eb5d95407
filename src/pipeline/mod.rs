//! Pipeline module - the dataset derivation stages
//!
//! Each stage reads one dataset and returns a new enriched one; stages
//! never mutate a dataset another stage still holds.

pub mod loader;
pub mod outcomes;
pub mod recode;
pub mod regions;
pub mod schema;

pub use loader::*;
pub use outcomes::*;
pub use recode::*;
pub use regions::*;
pub use schema::*;
