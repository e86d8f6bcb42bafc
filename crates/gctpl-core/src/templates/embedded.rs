//! Compile-time embedded emission templates.
//!
//! Each constant loads a template file from the crate's `templates/` directory via
//! [`include_str!`]. The paths are relative to this source file.
//!
//! Block tags in these files never sit alone on a line, so Handlebars' standalone
//! whitespace stripping does not change the output.

pub const HEADER: &str = include_str!("../../templates/header.h.hbs");
pub const SOURCE: &str = include_str!("../../templates/source.c.hbs");
pub const CONTEXT: &str = include_str!("../../templates/context.h.hbs");
pub const PROTOTYPE: &str = include_str!("../../templates/prototype.hbs");
