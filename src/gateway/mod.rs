//! Engine construction and orchestration

mod builder;
mod engine;

pub use builder::{DEFAULT_CONTEXT_TOP_K, Stargazer, StargazerBuilder};
pub use engine::InsightEngine;
