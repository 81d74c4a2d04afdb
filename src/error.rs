//! Stage-scoped failures for the pipeline

use std::fmt;

use thiserror::Error;

/// One of the three pipeline stages, each with its own failure domain
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Extract,
    Transform,
    Load,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::Extract => write!(f, "data extraction"),
            Stage::Transform => write!(f, "data transformation"),
            Stage::Load => write!(f, "data loading"),
        }
    }
}

/// Failure of a single stage. The wrapped error carries the context chain.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("error in data extraction: {0:#}")]
    Extraction(anyhow::Error),
    #[error("error in data transformation: {0:#}")]
    Transformation(anyhow::Error),
    #[error("error in data loading: {0:#}")]
    Load(anyhow::Error),
}

impl PipelineError {
    /// The stage that produced this failure
    pub fn stage(&self) -> Stage {
        match self {
            PipelineError::Extraction(_) => Stage::Extract,
            PipelineError::Transformation(_) => Stage::Transform,
            PipelineError::Load(_) => Stage::Load,
        }
    }
}
