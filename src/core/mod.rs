//! Core analysis building blocks: feature passes, the importance field,
//! candidate generation, scoring, selection, pre-scaling and the pipeline
//! that ties them together. These are internal primitives consumed by the
//! high-level `api` module.
pub mod params;
pub mod processing;
