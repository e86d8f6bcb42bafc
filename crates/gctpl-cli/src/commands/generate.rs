use anyhow::{Context, Result};

use gctpl_core::config::{Extensions, GeneratorConfig};
use gctpl_core::pipeline;

use crate::output;
use crate::GenerateArgs;

/// Translate the input templates into a header and an implementation file.
///
/// Parses every template before writing anything; the first parse error aborts
/// the run and leaves existing output files as they were.
pub fn run(args: &GenerateArgs) -> Result<()> {
    output::print_header("gctpl generate");

    let config = resolve_config(args)?;
    config.validate()?;

    output::print_step(1, 2, &format!("Parsing {} template(s)", args.inputs.len()));
    let definitions = pipeline::parse_files(&args.inputs)?;

    output::print_step(2, 2, "Generating sources");
    let report = pipeline::write_definitions(&definitions, &args.output, &config)?;

    output::print_success("Generation complete");
    output::print_key_value("Constants", &report.constants.to_string());
    output::print_key_value("Functions", &report.functions.to_string());
    output::print_key_value("Header", &report.header_path.display().to_string());
    match &report.source_path {
        Some(path) => output::print_key_value("Source", &path.display().to_string()),
        None => output::print_warning("No render functions; implementation file not written"),
    }

    Ok(())
}

/// Load the config file, if any, and apply command-line overrides on top.
fn resolve_config(args: &GenerateArgs) -> Result<GeneratorConfig> {
    let mut config = match &args.config {
        Some(path) => GeneratorConfig::load(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => GeneratorConfig::default(),
    };

    if let Some(prefix) = &args.prefix {
        config.prefix = prefix.clone();
    }
    if let Some([header, source]) = args.extensions.as_deref() {
        config.extensions = Extensions {
            header: header.clone(),
            source: source.clone(),
        };
    }
    if let Some(kinds) = &args.uppercase {
        config.uppercase = kinds.iter().map(|k| k.kind()).collect();
    }
    if args.lowercase {
        config.uppercase.clear();
    }
    if let Some(max_len) = args.max_len {
        config.max_line_length = max_len;
    }
    if args.context_args {
        config.context_args = true;
    }
    if let Some(render_func) = &args.render_func {
        config.render_function = render_func.clone();
    }
    if let Some(includes) = &args.include_libs {
        config.include_files = includes.clone();
    }

    tracing::debug!("resolved generator config: {config:?}");
    Ok(config)
}
