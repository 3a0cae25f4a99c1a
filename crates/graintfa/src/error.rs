//! Error types for Graintfa operations.
//!
//! This module provides the main error type [`GraintfaError`] which wraps
//! the error conditions that can occur while loading, editing, and
//! exporting a scene.

use std::io;

use thiserror::Error;

use graintfa_core::{ElementError, identifier::ElementId};

/// The main error type for Graintfa operations.
#[derive(Debug, Error)]
pub enum GraintfaError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Element error: {0}")]
    Element(#[from] ElementError),

    #[error("Unknown element `{0}`")]
    UnknownElement(ElementId),

    #[error("Scene document error: {0}")]
    Document(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Export error: {0}")]
    Export(#[from] image::ImageError),
}

impl From<serde_json::Error> for GraintfaError {
    fn from(error: serde_json::Error) -> Self {
        Self::Document(error.to_string())
    }
}
