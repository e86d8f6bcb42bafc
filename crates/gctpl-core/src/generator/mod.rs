//! C code generation from parsed definitions.
//!
//! Produces two artifacts:
//! - a declaration file: `#pragma once`, one `#define` per constant, then (in
//!   context mode) one context struct plus one prototype per function
//! - an implementation file: includes, then one render function body per
//!   function definition, each calling the configured variadic render function
//!
//! Constants always precede functions in the declaration file, whatever their
//! order in the templates. The implementation file is not produced when there
//! are no functions.

pub mod literal;

use serde_json::{json, Value};

use crate::config::GeneratorConfig;
use crate::definition::{Definition, DefinitionSet};
use crate::error::Result;
use crate::templates::embedded;
use crate::templates::renderer::TemplateRenderer;
use crate::types::SemanticType;

/// Inserted between prefix and definition name for render functions.
pub const RENDER_PREFIX: &str = "render_";

const CONTEXT_SUFFIX: &str = "_ctx";
const CONTEXT_PARAM: &str = "tpl_ctx";

/// Generated file contents, not yet written anywhere.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedSources {
    pub header: String,
    /// `None` when there are no function definitions.
    pub source: Option<String>,
}

/// Renders [`DefinitionSet`]s into C sources according to a [`GeneratorConfig`].
pub struct Generator<'a> {
    config: &'a GeneratorConfig,
    renderer: TemplateRenderer,
}

impl<'a> Generator<'a> {
    pub fn new(config: &'a GeneratorConfig) -> Self {
        Self {
            config,
            renderer: TemplateRenderer::new(),
        }
    }

    /// Generate both artifacts. `header_file` is the name the implementation
    /// file uses to include the declaration file.
    pub fn generate(&self, definitions: &DefinitionSet, header_file: &str) -> Result<GeneratedSources> {
        self.config.validate()?;
        Ok(GeneratedSources {
            header: self.declarations(definitions)?,
            source: self.implementations(definitions, header_file)?,
        })
    }

    /// Render the declaration artifact.
    pub fn declarations(&self, definitions: &DefinitionSet) -> Result<String> {
        let constants: Vec<Value> = definitions
            .constants()
            .map(|def| {
                json!({
                    "name": self.generated_name(def, RENDER_PREFIX),
                    "literal": self.literal(def),
                })
            })
            .collect();

        let functions = definitions
            .functions()
            .map(|def| {
                let context = if self.config.context_args {
                    self.context_struct(def)?
                } else {
                    String::new()
                };
                Ok(json!({
                    "context": context,
                    "prototype": self.prototype(def)?,
                }))
            })
            .collect::<Result<Vec<Value>>>()?;

        self.renderer.render(
            embedded::HEADER,
            &json!({ "constants": constants, "functions": functions }),
        )
    }

    /// Render the implementation artifact, or `None` if there is nothing to implement.
    pub fn implementations(&self, definitions: &DefinitionSet, header_file: &str) -> Result<Option<String>> {
        if definitions.functions().next().is_none() {
            tracing::debug!("no function definitions; skipping implementation file");
            return Ok(None);
        }

        let functions = definitions
            .functions()
            .map(|def| {
                Ok(json!({
                    "prototype": self.prototype(def)?,
                    "literal": self.literal(def),
                    "guard": self.null_guard(def),
                    "render_function": self.config.render_function,
                    "call_args": self.call_args(def),
                }))
            })
            .collect::<Result<Vec<Value>>>()?;

        let data = json!({
            "includes": self.config.include_files,
            "header": header_file,
            "functions": functions,
        });
        self.renderer.render(embedded::SOURCE, &data).map(Some)
    }

    /// `prefix + [render_prefix] + name`, then upper- or lower-cased as a whole
    /// depending on the definition's kind. `render_prefix` only applies to functions.
    pub fn generated_name(&self, definition: &Definition, render_prefix: &str) -> String {
        let mut name = self.config.prefix.clone();
        if definition.is_function() {
            name.push_str(render_prefix);
        }
        name.push_str(definition.name());

        if self.config.is_uppercase(definition.kind()) {
            name.to_uppercase()
        } else {
            name.to_lowercase()
        }
    }

    /// Name of the context struct of a function definition.
    pub fn context_name(&self, definition: &Definition) -> String {
        format!("{}{CONTEXT_SUFFIX}", self.generated_name(definition, ""))
    }

    fn context_struct(&self, definition: &Definition) -> Result<String> {
        let fields: Vec<Value> = definition
            .arguments()
            .values()
            .map(|arg| json!({ "c_type": arg.semantic_type.c_type(), "name": arg.name }))
            .collect();

        self.renderer.render(
            embedded::CONTEXT,
            &json!({ "name": self.context_name(definition), "fields": fields }),
        )
    }

    /// Function signature without the trailing `;`.
    pub fn prototype(&self, definition: &Definition) -> Result<String> {
        let params: Vec<String> = if self.config.context_args {
            vec![format!("struct {} *{CONTEXT_PARAM}", self.context_name(definition))]
        } else {
            // sorted by argument name, not call order
            definition
                .arguments()
                .values()
                .map(|arg| format!("{} {}", arg.semantic_type.c_type(), arg.name))
                .collect()
        };

        self.renderer.render(
            embedded::PROTOTYPE,
            &json!({ "name": self.generated_name(definition, RENDER_PREFIX), "params": params }),
        )
    }

    /// Early-return condition of a render function, empty when nothing is guarded.
    pub fn null_guard(&self, definition: &Definition) -> String {
        if self.config.context_args {
            return format!("NULL == {CONTEXT_PARAM}");
        }

        definition
            .arguments()
            .values()
            .filter(|arg| arg.semantic_type == SemanticType::String)
            .map(|arg| format!("NULL == {}", arg.name))
            .collect::<Vec<_>>()
            .join(" && ")
    }

    fn call_args(&self, definition: &Definition) -> String {
        let access = if self.config.context_args {
            format!("{CONTEXT_PARAM}->")
        } else {
            String::new()
        };

        definition
            .substitutions()
            .iter()
            .map(|name| format!("{access}{name}"))
            .collect::<Vec<_>>()
            .join(",\n    ")
    }

    fn literal(&self, definition: &Definition) -> String {
        let indent = literal::LITERAL_INDENT;
        let chunk_len = literal::chunk_len(self.config.max_line_length, indent);
        literal::quoted(definition.rendered_text(), chunk_len, indent)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::definition::DefinitionKind;
    use std::collections::BTreeSet;

    fn set(defs: &[(&str, &str)]) -> DefinitionSet {
        let mut set = DefinitionSet::new();
        for (name, body) in defs {
            set.push(Definition::new(*name, body).unwrap());
        }
        set
    }

    #[test]
    fn test_scenario_b_constant_macro() {
        let config = GeneratorConfig::default();
        let gen = Generator::new(&config);
        let out = gen.generate(&set(&[("PI", "\"3.14159\"")]), "out.h").unwrap();

        assert!(out.header.starts_with("#pragma once\n"));
        assert!(out.header.contains("#define PI \\\n    \"\\\"3.14159\\\"\"\n"));
        assert!(out.source.is_none());
    }

    #[test]
    fn test_scenario_a_function() {
        let config = GeneratorConfig::default();
        let gen = Generator::new(&config);
        let out = gen
            .generate(&set(&[("GREETING", "\"hello {name:%s}\"")]), "out.h")
            .unwrap();

        assert!(out.header.contains("void RENDER_GREETING(char* name);\n"));
        let source = out.source.unwrap();
        assert!(source.starts_with("#include <stdio.h>\n#include \"out.h\"\n"));
        assert!(source.contains("void RENDER_GREETING(char* name)\n{\n"));
        assert!(source.contains("  const char *format =\n    \"\\\"hello %s\\\"\";\n"));
        assert!(source.contains("  if (NULL == name)\n  {\n    return;\n  }\n"));
        assert!(source.contains("  printf(format,\n    name\n  );\n}\n"));
    }

    #[test]
    fn test_scenario_c_constants_before_functions() {
        let config = GeneratorConfig::default();
        let gen = Generator::new(&config);
        let defs = set(&[("HELLO", "hi {who:%s}"), ("VERSION", "1.0"), ("BYE", "bye {n:%d}")]);
        let header = gen.declarations(&defs).unwrap();

        let version = header.find("#define VERSION").unwrap();
        let hello = header.find("RENDER_HELLO").unwrap();
        let bye = header.find("RENDER_BYE").unwrap();
        assert!(version < hello);
        assert!(hello < bye);
    }

    #[test]
    fn test_scenario_e_context_struct() {
        let config = GeneratorConfig {
            context_args: true,
            ..GeneratorConfig::default()
        };
        let gen = Generator::new(&config);
        let defs = set(&[("POINT", "({y:%d}, {x:%f})")]);
        let out = gen.generate(&defs, "geo.h").unwrap();

        assert!(out
            .header
            .contains("struct POINT_ctx\n{\n  float x;\n  int y;\n};\n"));
        assert!(out
            .header
            .contains("void RENDER_POINT(struct POINT_ctx *tpl_ctx);\n"));

        let source = out.source.unwrap();
        assert!(source.contains("  if (NULL == tpl_ctx)\n"));
        assert!(source.contains("  printf(format,\n    tpl_ctx->y,\n    tpl_ctx->x\n  );"));
    }

    #[test]
    fn test_params_sorted_calls_in_occurrence_order() {
        let config = GeneratorConfig::default();
        let gen = Generator::new(&config);
        let defs = set(&[("ROW", "{zeta:%u} {alpha:%s} {mid:%ul}")]);
        let out = gen.generate(&defs, "row.h").unwrap();

        assert!(out
            .header
            .contains("void RENDER_ROW(char* alpha, unsigned long mid, unsigned int zeta);"));
        let source = out.source.unwrap();
        assert!(source.contains("    \"%u %s %lu\";"));
        assert!(source.contains("printf(format,\n    zeta,\n    alpha,\n    mid\n  );"));
    }

    #[test]
    fn test_null_guard_joins_string_arguments() {
        let config = GeneratorConfig::default();
        let gen = Generator::new(&config);
        let def = Definition::new("T", "{b:%s} {n:%d} {a:%s}").unwrap();
        assert_eq!(gen.null_guard(&def), "NULL == a && NULL == b");
    }

    #[test]
    fn test_no_guard_without_string_arguments() {
        let config = GeneratorConfig::default();
        let gen = Generator::new(&config);
        let defs = set(&[("COUNT", "{n:%d} items")]);
        let source = gen.implementations(&defs, "c.h").unwrap().unwrap();
        assert!(!source.contains("if ("));
        assert!(source.contains("  const char *format =\n    \"%d items\";\n\n  printf(format,\n    n\n  );"));
    }

    #[test]
    fn test_repeated_argument_passed_per_conversion() {
        let config = GeneratorConfig::default();
        let gen = Generator::new(&config);
        let defs = set(&[("TWICE", "{w:%s} and {w:%s}")]);
        let source = gen.implementations(&defs, "t.h").unwrap().unwrap();
        assert!(source.contains("void RENDER_TWICE(char* w)"));
        assert!(source.contains("printf(format,\n    w,\n    w\n  );"));
    }

    #[test]
    fn test_naming_policy() {
        let def_fn = Definition::new("Greeting", "{n:%s}").unwrap();
        let def_const = Definition::new("Title", "x").unwrap();

        let config = GeneratorConfig {
            prefix: "App_".into(),
            uppercase: BTreeSet::from([DefinitionKind::Constant]),
            ..GeneratorConfig::default()
        };
        let gen = Generator::new(&config);
        assert_eq!(gen.generated_name(&def_fn, RENDER_PREFIX), "app_render_greeting");
        assert_eq!(gen.generated_name(&def_const, RENDER_PREFIX), "APP_TITLE");
        assert_eq!(gen.context_name(&def_fn), "app_greeting_ctx");

        let lower = GeneratorConfig {
            uppercase: BTreeSet::new(),
            ..GeneratorConfig::default()
        };
        let gen = Generator::new(&lower);
        assert_eq!(gen.generated_name(&def_const, RENDER_PREFIX), "title");
    }

    #[test]
    fn test_custom_render_function_and_includes() {
        let config = GeneratorConfig {
            render_function: "log_printf".into(),
            include_files: vec!["log.h".into(), "util/types.h".into()],
            ..GeneratorConfig::default()
        };
        let gen = Generator::new(&config);
        let source = gen
            .implementations(&set(&[("MSG", "{m:%s}")]), "messages.h")
            .unwrap()
            .unwrap();
        assert!(source.starts_with(
            "#include <stdio.h>\n#include \"log.h\"\n#include \"util/types.h\"\n#include \"messages.h\"\n\n"
        ));
        assert!(source.contains("  log_printf(format,"));
    }

    #[test]
    fn test_long_constant_is_wrapped() {
        let config = GeneratorConfig {
            max_line_length: 40,
            ..GeneratorConfig::default()
        };
        let gen = Generator::new(&config);
        let text = "word ".repeat(30);
        let header = gen.declarations(&set(&[("LONG", text.trim_end())])).unwrap();

        let literal_lines: Vec<_> = header.lines().filter(|l| l.starts_with("    \"")).collect();
        assert!(literal_lines.len() > 1);
        assert!(literal_lines.iter().all(|l| l.chars().count() <= 40));
        let last = literal_lines.last().unwrap();
        assert!(!last.ends_with('\\'));
    }

    #[test]
    fn test_generation_is_deterministic() {
        let config = GeneratorConfig {
            context_args: true,
            ..GeneratorConfig::default()
        };
        let defs = set(&[("A1", "{x:%d}"), ("B1", "const"), ("C1", "{s:%s} {c:%c}")]);
        let first = Generator::new(&config).generate(&defs, "x.h").unwrap();
        let second = Generator::new(&config).generate(&defs, "x.h").unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = GeneratorConfig {
            max_line_length: 4,
            ..GeneratorConfig::default()
        };
        assert!(Generator::new(&config).generate(&DefinitionSet::new(), "x.h").is_err());
    }
}
