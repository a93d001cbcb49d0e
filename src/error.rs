//! Errors raised while creating GPU resources.

use std::path::PathBuf;

use thiserror::Error;

/// Failures at the OpenGL boundary. Only construction can fail; per-frame
/// operations report problems through the log instead.
#[derive(Debug, Error)]
pub enum GfxError {
    #[error("failed to create window or GL context: {0}")]
    ContextCreation(String),
    #[error("failed to create {kind}: {message}")]
    ResourceCreation { kind: &'static str, message: String },
    #[error("failed to compile {stage} shader: {log}")]
    ShaderCompile { stage: &'static str, log: String },
    #[error("failed to link shader program: {0}")]
    ProgramLink(String),
    #[error("failed to load image {path}: {source}")]
    ImageLoad {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
}

impl GfxError {
    pub(crate) fn resource(kind: &'static str, message: impl Into<String>) -> Self {
        GfxError::ResourceCreation {
            kind,
            message: message.into(),
        }
    }
}
