use std::fmt::Display;

use arcflow_solver::core::InvalidInstance;
use thiserror::Error;

use crate::vbp::VbpError;

pub(crate) type ArcFlowSolverResult<T> = Result<T, ArcFlowSolverError>;

#[derive(Error, Debug)]
pub(crate) enum ArcFlowSolverError {
    #[error("IO error, more details: {0}")]
    IOError(#[from] std::io::Error),
    #[error("The file {0} is not supported.")]
    InvalidInstanceFile(String),
    #[error("The VBP file was invalid, more details: {0}")]
    InvalidVbp(#[from] VbpError),
    #[error("The instance was rejected, more details: {0}")]
    InvalidInstance(#[from] InvalidInstance),
    #[cfg(not(feature = "gzipped-output"))]
    #[error("Writing the gzipped graph {0} requires the `gzipped-output` feature.")]
    GzipNotSupported(String),
}

impl ArcFlowSolverError {
    pub(crate) fn invalid_instance_file(path: impl Display) -> Self {
        Self::InvalidInstanceFile(format!("{path}"))
    }
}
