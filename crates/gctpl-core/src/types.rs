//! Placeholder type codes and the C storage types they resolve to.
//!
//! The table below is the single source of truth mapping a one- or two-letter
//! code to a semantic type, the C type used for parameters and struct fields,
//! and the printf conversion written into the format string.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Semantic type of a placeholder argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SemanticType {
    UnsignedInt,
    Int,
    UnsignedLong,
    Long,
    Float,
    Char,
    String,
}

impl SemanticType {
    /// C type used for formal parameters and context struct fields.
    pub fn c_type(&self) -> &'static str {
        match self {
            Self::UnsignedInt => "unsigned int",
            Self::Int => "int",
            Self::UnsignedLong => "unsigned long",
            Self::Long => "long",
            Self::Float => "float",
            Self::Char => "char",
            Self::String => "char*",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::UnsignedInt => "unsigned-integer",
            Self::Int => "signed-integer",
            Self::UnsignedLong => "unsigned-long",
            Self::Long => "long",
            Self::Float => "floating-point",
            Self::Char => "character",
            Self::String => "string",
        }
    }
}

impl fmt::Display for SemanticType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A decoded placeholder type code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TypeCode {
    pub semantic_type: SemanticType,
    /// printf conversion specifier (without `%`, flags or width).
    pub conversion: &'static str,
}

// code, semantic type, printf conversion
const TYPE_TABLE: &[(&str, SemanticType, &str)] = &[
    ("u", SemanticType::UnsignedInt, "u"),
    ("i", SemanticType::Int, "i"),
    ("d", SemanticType::Int, "d"),
    ("ul", SemanticType::UnsignedLong, "lu"),
    ("l", SemanticType::Long, "ld"),
    ("f", SemanticType::Float, "f"),
    ("c", SemanticType::Char, "c"),
    ("s", SemanticType::String, "s"),
];

impl TypeCode {
    /// Resolve a type code, or `None` if it is not in the table.
    pub fn decode(code: &str) -> Option<Self> {
        TYPE_TABLE
            .iter()
            .find(|(name, _, _)| *name == code)
            .map(|&(_, semantic_type, conversion)| Self {
                semantic_type,
                conversion,
            })
    }

    /// All supported codes, in table order.
    pub fn codes() -> impl Iterator<Item = &'static str> {
        TYPE_TABLE.iter().map(|(code, _, _)| *code)
    }
}
