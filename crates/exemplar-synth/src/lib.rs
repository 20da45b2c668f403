//! Generator registry and attribute synthesis for test instances.
//!
//! Types register attribute generators (blocks, producers, class methods or
//! literals) directly or through per-type exemplar files. The synthesizer
//! combines those generators with caller overrides and required
//! associations to spawn, generate or strictly generate instances.

pub mod associations;
pub mod errors;
pub mod generators;
pub mod global;
pub mod loader;
pub mod logging;
pub mod model;
pub mod registry;
pub mod synthesizer;

pub use associations::{
    Association, AssociationResolver, AssociationTarget, NoAssociations, ValidationMetadata,
};
pub use errors::SynthesisError;
pub use generators::{Block, GeneratorEntry, GeneratorOptions, GeneratorSpec, ValueProducer};
pub use loader::ExemplarLoader;
pub use model::SynthesisOptions;
pub use registry::GeneratorRegistry;
pub use synthesizer::ObjectSynthesizer;
