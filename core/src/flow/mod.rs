// modoya/src/flow/mod.rs

//! A small step-pipeline engine.
//!
//! A [`Pipeline`] is an ordered list of named steps. Each step may carry
//! `before`, `on` and `after` async handlers that all receive a clone of the
//! same [`ContextData`]. Any handler can halt the run with
//! [`PipelineControl::Stop`] or fail it with an error. A [`Workflows`]
//! registry keys pipelines by the context type they run over, so callers only
//! need to hand it a context.

pub mod context_data;
pub mod control;
pub mod pipeline;
pub mod registry;
pub mod step;

pub use context_data::ContextData;
pub use control::{PipelineControl, PipelineResult};
pub use pipeline::{Handler, Pipeline};
pub use registry::Workflows;
pub use step::{SkipCondition, StepDef};
