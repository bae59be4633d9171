//! Service layer: resolution, composition and the generation pipeline.

pub mod composer;
pub mod generator;
pub mod resolver;
