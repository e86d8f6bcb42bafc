//! Unified error types for the gctpl generator.
//!
//! Every variant is fatal for the whole run: generated code must be internally
//! consistent or not generated at all.

use std::path::PathBuf;
use thiserror::Error;

/// All errors that can occur while scanning templates or generating sources.
#[derive(Error, Debug)]
pub enum GctplError {
    // --- Template parsing ---

    /// A definition block has no discoverable name (or no body) where the scanner expects one.
    #[error("could not parse '{path}' (line {line}): {reason}")]
    TemplateParse {
        path: PathBuf,
        line: usize,
        reason: String,
    },

    /// A placeholder uses a type code that is not in the type table.
    #[error("unknown type code '{code}' in placeholder '{placeholder}' of definition '{definition}' (supported: u, i, d, ul, l, f, c, s)")]
    UnknownTypeCode {
        definition: String,
        placeholder: String,
        code: String,
    },

    /// A placeholder's argument name is not a C identifier.
    #[error("placeholder '{placeholder}' of definition '{definition}' has an invalid argument name (expected a C identifier)")]
    InvalidPlaceholder {
        definition: String,
        placeholder: String,
    },

    /// The same argument name was used with two different types in one definition.
    #[error("argument '{name}' of definition '{definition}' is declared as {first} and later as {second}")]
    ConflictingPlaceholder {
        definition: String,
        name: String,
        first: String,
        second: String,
    },

    // --- I/O ---

    /// A template file could not be read.
    #[error("failed to read template {path}")]
    TemplateRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A generated file could not be written.
    #[error("failed to write {path}")]
    OutputWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // --- Configuration ---

    /// The configuration file was not found or is unreadable.
    #[error("config file not found at {path}")]
    ConfigNotFound {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The configuration file exists but contains invalid JSON.
    #[error("failed to parse config at {path}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// A configuration value is out of range or malformed.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    // --- Emission ---

    /// Handlebars rendering of an emission template failed.
    #[error("template rendering failed: {0}")]
    TemplateRender(String),

    // --- General ---

    /// A filesystem I/O error.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// A catch-all for errors from dependencies.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Alias for `Result<T, GctplError>`.
pub type Result<T> = std::result::Result<T, GctplError>;
