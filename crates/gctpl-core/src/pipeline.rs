//! End-to-end generation: read templates, parse, generate, write.
//!
//! All inputs are parsed and both artifacts are rendered in memory before
//! anything is written, so a parse or extraction error leaves existing output
//! files untouched.

use std::path::{Path, PathBuf};

use crate::config::{Extensions, GeneratorConfig};
use crate::definition::DefinitionSet;
use crate::error::{GctplError, Result};
use crate::generator::Generator;
use crate::scanner;

/// One template file's contents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateSource {
    pub path: PathBuf,
    pub text: String,
}

impl TemplateSource {
    pub fn new(path: impl Into<PathBuf>, text: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            text: text.into(),
        }
    }

    /// Read a UTF-8 template file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| GctplError::TemplateRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        tracing::info!("read template {}", path.display());
        Ok(Self::new(path, text))
    }
}

/// Paths of the two generated files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputPaths {
    pub header: PathBuf,
    pub source: PathBuf,
}

/// Summary of a completed run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationReport {
    pub constants: usize,
    pub functions: usize,
    pub header_path: PathBuf,
    /// `None` when no implementation file was written.
    pub source_path: Option<PathBuf>,
}

/// Derive both output paths from a base path. Any extension on the base is replaced.
pub fn output_paths(base: &Path, extensions: &Extensions) -> OutputPaths {
    OutputPaths {
        header: base.with_extension(&extensions.header),
        source: base.with_extension(&extensions.source),
    }
}

/// Parse template sources in order into one definition set.
pub fn parse_sources(sources: &[TemplateSource]) -> Result<DefinitionSet> {
    let mut definitions = DefinitionSet::new();
    for source in sources {
        definitions.extend(scanner::scan(&source.path, &source.text)?);
    }
    Ok(definitions)
}

/// Load and parse template files in order.
pub fn parse_files(inputs: &[PathBuf]) -> Result<DefinitionSet> {
    let sources = inputs
        .iter()
        .map(|path| TemplateSource::load(path))
        .collect::<Result<Vec<_>>>()?;
    parse_sources(&sources)
}

fn write_output(path: &Path, contents: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| GctplError::OutputWrite {
            path: path.to_path_buf(),
            source: e,
        })?;
    }
    std::fs::write(path, contents).map_err(|e| GctplError::OutputWrite {
        path: path.to_path_buf(),
        source: e,
    })?;
    tracing::info!("wrote {}", path.display());
    Ok(())
}

/// Run the whole pipeline for `inputs`, writing next to `output_base`.
pub fn run(inputs: &[PathBuf], output_base: &Path, config: &GeneratorConfig) -> Result<GenerationReport> {
    config.validate()?;
    let definitions = parse_files(inputs)?;
    write_definitions(&definitions, output_base, config)
}

/// Generate and write both artifacts for an already parsed definition set.
pub fn write_definitions(
    definitions: &DefinitionSet,
    output_base: &Path,
    config: &GeneratorConfig,
) -> Result<GenerationReport> {
    let paths = output_paths(output_base, &config.extensions);
    let header_file = paths
        .header
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .ok_or_else(|| {
            GctplError::InvalidConfig(format!("output path {} has no file name", output_base.display()))
        })?;

    let generated = Generator::new(config).generate(definitions, &header_file)?;

    write_output(&paths.header, &generated.header)?;
    let source_path = match &generated.source {
        Some(source) => {
            write_output(&paths.source, source)?;
            Some(paths.source)
        }
        None => {
            if paths.source.exists() {
                tracing::warn!(
                    "no render functions generated; leaving existing {} untouched",
                    paths.source.display()
                );
            }
            None
        }
    };

    Ok(GenerationReport {
        constants: definitions.constants().count(),
        functions: definitions.functions().count(),
        header_path: paths.header,
        source_path,
    })
}
