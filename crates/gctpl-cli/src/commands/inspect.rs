use std::path::PathBuf;

use anyhow::Result;
use serde_json::json;

use gctpl_core::definition::Definition;
use gctpl_core::pipeline;

use crate::output;

/// Parse templates and print every definition in order, without writing files.
pub fn run(inputs: &[PathBuf], as_json: bool) -> Result<()> {
    let definitions = pipeline::parse_files(inputs)?;

    if as_json {
        let entries: Vec<_> = definitions
            .iter()
            .map(|def| json!({ "kind": def.kind(), "definition": def }))
            .collect();
        println!("{}", serde_json::to_string_pretty(&entries)?);
        return Ok(());
    }

    output::print_header(&format!("gctpl inspect: {} definition(s)", definitions.len()));
    for def in &definitions {
        println!();
        output::print_key_value(def.kind().as_str(), def.name());
        output::print_key_value("text", def.rendered_text());
        for line in argument_lines(def) {
            println!("    {line}");
        }
    }

    Ok(())
}

/// One line per distinct argument, in call order.
fn argument_lines(def: &Definition) -> Vec<String> {
    def.ordered_arguments()
        .iter()
        .filter_map(|name| def.argument(name))
        .map(|arg| format!("{} {} ({})", arg.render_format, arg.name, arg.semantic_type))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_argument_lines_in_call_order() {
        let def = Definition::new("ROW", "{b:%5d} {a:%s}").unwrap();
        assert_eq!(
            argument_lines(&def),
            vec!["%5d b (signed-integer)", "%s a (string)"]
        );
    }

    #[test]
    fn test_constant_has_no_argument_lines() {
        let def = Definition::new("PI", "3.14").unwrap();
        assert!(argument_lines(&def).is_empty());
    }
}
