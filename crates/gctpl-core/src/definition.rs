//! In-memory model of parsed template definitions.

use std::collections::{BTreeMap, HashSet};
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::placeholder;
use crate::types::SemanticType;

/// One argument extracted from a definition's placeholders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Argument {
    /// Substitution key, also used as parameter and struct field name.
    pub name: String,
    pub semantic_type: SemanticType,
    /// printf conversion that replaced the first placeholder using this name.
    ///
    /// This is the normalized C conversion, not the literal placeholder text:
    /// the `ul` and `l` codes become `lu` and `ld`, so `{n:%8ul}` gives `%8lu`.
    pub render_format: String,
}

/// Whether a definition is emitted as a macro constant or a render function.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DefinitionKind {
    Function,
    Constant,
}

impl DefinitionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Function => "function",
            Self::Constant => "constant",
        }
    }
}

impl fmt::Display for DefinitionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A named template block after placeholder extraction.
///
/// Immutable once built. The kind is derived from the argument list: a
/// definition without placeholders is a constant, anything else a function.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Definition {
    name: String,
    ordered_arguments: Vec<String>,
    arguments_by_name: BTreeMap<String, Argument>,
    substitutions: Vec<String>,
    rendered_text: String,
}

impl Definition {
    /// Build a definition from its name and an already whitespace-collapsed body.
    pub fn new(name: impl Into<String>, body: &str) -> Result<Self> {
        let name = name.into();
        let extraction = placeholder::extract(&name, body)?;
        Ok(Self {
            name,
            ordered_arguments: extraction.ordered_arguments,
            arguments_by_name: extraction.arguments,
            substitutions: extraction.substitutions,
            rendered_text: extraction.rendered_text,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> DefinitionKind {
        if self.ordered_arguments.is_empty() {
            DefinitionKind::Constant
        } else {
            DefinitionKind::Function
        }
    }

    pub fn is_function(&self) -> bool {
        self.kind() == DefinitionKind::Function
    }

    pub fn is_constant(&self) -> bool {
        self.kind() == DefinitionKind::Constant
    }

    /// Distinct argument names in first-occurrence order.
    pub fn ordered_arguments(&self) -> &[String] {
        &self.ordered_arguments
    }

    /// Arguments keyed (and iterated) by name.
    pub fn arguments(&self) -> &BTreeMap<String, Argument> {
        &self.arguments_by_name
    }

    pub fn argument(&self, name: &str) -> Option<&Argument> {
        self.arguments_by_name.get(name)
    }

    /// One argument name per conversion in [`Self::rendered_text`], in text order.
    ///
    /// Differs from [`Self::ordered_arguments`] only when a name is repeated.
    pub fn substitutions(&self) -> &[String] {
        &self.substitutions
    }

    pub fn rendered_text(&self) -> &str {
        &self.rendered_text
    }
}

/// Ordered collection of every definition parsed in one run.
///
/// Insertion order is preserved across input files. Names are not
/// deduplicated: a repeated name is kept and reported with a warning.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct DefinitionSet {
    definitions: Vec<Definition>,
    #[serde(skip)]
    seen: HashSet<String>,
}

impl DefinitionSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, definition: Definition) {
        if !self.seen.insert(definition.name().to_string()) {
            tracing::warn!(
                "definition '{}' is defined more than once; both copies will be emitted",
                definition.name()
            );
        }
        self.definitions.push(definition);
    }

    pub fn get(&self, name: &str) -> Option<&Definition> {
        self.definitions.iter().find(|d| d.name() == name)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Definition> {
        self.definitions.iter()
    }

    pub fn constants(&self) -> impl Iterator<Item = &Definition> {
        self.definitions.iter().filter(|d| d.is_constant())
    }

    pub fn functions(&self) -> impl Iterator<Item = &Definition> {
        self.definitions.iter().filter(|d| d.is_function())
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }
}

impl Extend<Definition> for DefinitionSet {
    fn extend<I: IntoIterator<Item = Definition>>(&mut self, iter: I) {
        for definition in iter {
            self.push(definition);
        }
    }
}

impl<'a> IntoIterator for &'a DefinitionSet {
    type Item = &'a Definition;
    type IntoIter = std::slice::Iter<'a, Definition>;

    fn into_iter(self) -> Self::IntoIter {
        self.definitions.iter()
    }
}
