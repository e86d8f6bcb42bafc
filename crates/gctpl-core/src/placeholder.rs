//! Placeholder extraction.
//!
//! A placeholder has the form `{name:%[flags][width]type}`:
//! - `name`: a C identifier, used as substitution key and parameter name
//! - `flags`: optional `-` or `+`
//! - `width`: optional decimal field width
//! - `type`: a code from [`crate::types::TypeCode`]
//!
//! The body is walked once. Text between placeholders is copied verbatim and
//! each placeholder is replaced by its printf conversion. Anything shaped like
//! `{...:%...}` is a placeholder and must have a valid name and a known code,
//! otherwise extraction fails. A `{` without that shape is ordinary text.

use std::collections::BTreeMap;

use crate::definition::Argument;
use crate::error::{GctplError, Result};
use crate::types::TypeCode;

/// A placeholder token matched at the start of a string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlaceholderToken<'a> {
    /// Full token text, braces included.
    pub text: &'a str,
    pub name: &'a str,
    pub flags: &'a str,
    pub width: &'a str,
    pub code: &'a str,
}

/// Output of [`extract`] for one definition body.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Extraction {
    /// Body with every placeholder replaced by its conversion spec.
    pub rendered_text: String,
    /// Distinct argument names in first-occurrence order.
    pub ordered_arguments: Vec<String>,
    pub arguments: BTreeMap<String, Argument>,
    /// Argument name for every conversion in `rendered_text`, in text order.
    pub substitutions: Vec<String>,
}

/// Match a placeholder at the very start of `input`.
///
/// Only the shape is checked here: the name is any run of characters other
/// than `:`, `{` and `}`, and the code is a run of word characters. Whether the
/// name is an identifier and the code is known is left to [`extract`], so a
/// token with a bad name or code is reported instead of passed through as text.
pub fn match_placeholder(input: &str) -> Option<PlaceholderToken<'_>> {
    let bytes = input.as_bytes();
    if bytes.first() != Some(&b'{') {
        return None;
    }

    let name_start = 1;
    let mut pos = name_start;
    while bytes.get(pos).is_some_and(|b| !matches!(b, b':' | b'{' | b'}')) {
        pos += 1;
    }
    let name = &input[name_start..pos];

    if bytes.get(pos) != Some(&b':') || bytes.get(pos + 1) != Some(&b'%') {
        return None;
    }
    pos += 2;

    let flags_start = pos;
    if matches!(bytes.get(pos), Some(b'-' | b'+')) {
        pos += 1;
    }
    let flags = &input[flags_start..pos];

    let width_start = pos;
    while bytes.get(pos).is_some_and(u8::is_ascii_digit) {
        pos += 1;
    }
    let mut width_end = pos;

    while bytes.get(pos).is_some_and(|b| b.is_ascii_alphanumeric() || *b == b'_') {
        pos += 1;
    }
    if bytes.get(pos) != Some(&b'}') {
        return None;
    }
    if pos == width_end {
        // `%12}`: the last digit is the code
        if width_end == width_start {
            return None;
        }
        width_end -= 1;
    }

    Some(PlaceholderToken {
        text: &input[..=pos],
        name,
        flags,
        width: &input[width_start..width_end],
        code: &input[width_end..pos],
    })
}

fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Extract every placeholder from `body` and build the rewritten text.
///
/// `definition` is only used for error messages.
pub fn extract(definition: &str, body: &str) -> Result<Extraction> {
    let mut extraction = Extraction {
        rendered_text: String::with_capacity(body.len()),
        ..Extraction::default()
    };

    let mut rest = body;
    while let Some(offset) = rest.find('{') {
        extraction.rendered_text.push_str(&rest[..offset]);
        let candidate = &rest[offset..];

        let Some(token) = match_placeholder(candidate) else {
            extraction.rendered_text.push('{');
            rest = &candidate[1..];
            continue;
        };

        if !is_identifier(token.name) {
            return Err(GctplError::InvalidPlaceholder {
                definition: definition.to_string(),
                placeholder: token.text.to_string(),
            });
        }
        let type_code =
            TypeCode::decode(token.code).ok_or_else(|| GctplError::UnknownTypeCode {
                definition: definition.to_string(),
                placeholder: token.text.to_string(),
                code: token.code.to_string(),
            })?;
        let render_format = format!("%{}{}{}", token.flags, token.width, type_code.conversion);

        match extraction.arguments.get(token.name) {
            Some(existing) if existing.semantic_type != type_code.semantic_type => {
                return Err(GctplError::ConflictingPlaceholder {
                    definition: definition.to_string(),
                    name: token.name.to_string(),
                    first: existing.semantic_type.to_string(),
                    second: type_code.semantic_type.to_string(),
                });
            }
            Some(_) => {}
            None => {
                extraction.ordered_arguments.push(token.name.to_string());
                extraction.arguments.insert(
                    token.name.to_string(),
                    Argument {
                        name: token.name.to_string(),
                        semantic_type: type_code.semantic_type,
                        render_format: render_format.clone(),
                    },
                );
            }
        }

        extraction.rendered_text.push_str(&render_format);
        extraction.substitutions.push(token.name.to_string());
        rest = &candidate[token.text.len()..];
    }
    extraction.rendered_text.push_str(rest);

    Ok(extraction)
}
