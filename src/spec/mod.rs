//! Configuration models for the styling pipeline.
//!
//! These are the JSON-facing, human-edited types. Unknown enum values fail at
//! deserialization; range rules fail in [`StyleConfig::validate`], before any
//! stage runs.
//!
//! [`StyleConfig::validate`]: crate::spec::model::StyleConfig::validate

pub(crate) mod color;
pub(crate) mod model;
