//! Core library for gctpl, a generator of C string constants and printf-style
//! render functions from plain-text templates.
//!
//! The pipeline runs in four stages, each in its own module:
//! - [`scanner`] splits a template file into named definition blocks
//! - [`placeholder`] extracts typed `{name:%fmt}` placeholders from each body
//! - [`definition`] holds the parsed model and classifies constants vs. functions
//! - [`generator`] renders the declaration and implementation files
//!
//! [`pipeline`] wires the stages to the filesystem, [`config`] holds the
//! generator options, and [`templates`] embeds the Handlebars emission templates.

pub mod config;
pub mod definition;
pub mod error;
pub mod generator;
pub mod pipeline;
pub mod placeholder;
pub mod scanner;
pub mod templates;
pub mod types;
