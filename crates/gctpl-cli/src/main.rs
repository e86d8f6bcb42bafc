//! gctpl CLI: turns text templates into a C header of string constants and
//! printf-style render functions.
//!
//! Two commands: `generate` writes the `.h`/`.c` pair, `inspect` prints what
//! the templates parse into without writing anything.

mod commands;
mod output;

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use std::process::ExitCode;

use gctpl_core::definition::DefinitionKind;

#[derive(Parser)]
#[command(
    name = "gctpl",
    about = "Generate C string constants and render functions from text templates",
    version,
    propagate_version = true
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Translate templates into a header and an implementation file
    Generate(GenerateArgs),

    /// Parse templates and print the resulting definitions
    Inspect {
        /// Templates to parse, in order
        #[arg(short, long = "input", value_name = "TEMPLATE", num_args = 1.., required = true)]
        inputs: Vec<PathBuf>,

        /// Print definitions as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Args, Debug)]
pub struct GenerateArgs {
    /// Templates to translate, in order
    #[arg(short, long = "input", value_name = "TEMPLATE", num_args = 1.., required = true)]
    pub inputs: Vec<PathBuf>,

    /// Output path and base name (an extension, if given, is replaced)
    #[arg(short, long, value_name = "FILE")]
    pub output: PathBuf,

    /// JSON config file; flags below override its values
    #[arg(long, value_name = "FILE", env = "GCTPL_CONFIG")]
    pub config: Option<PathBuf>,

    /// Prefix for structs, constants and functions
    #[arg(short, long)]
    pub prefix: Option<String>,

    /// File extensions for the output files
    #[arg(short, long, num_args = 2, value_names = ["HEADER_EXT", "SOURCE_EXT"])]
    pub extensions: Option<Vec<String>>,

    /// Definition kinds whose identifiers are upper-cased [default: function constant]
    #[arg(short, long, value_enum, num_args = 1.., conflicts_with = "lowercase")]
    pub uppercase: Option<Vec<KindChoice>>,

    /// Lower-case every generated identifier
    #[arg(long)]
    pub lowercase: bool,

    /// Maximum generated line length [default: 80]
    #[arg(short, long = "max-len", value_name = "MAX_LENGTH")]
    pub max_len: Option<usize>,

    /// Pass render function arguments in a context struct
    #[arg(short, long)]
    pub context_args: bool,

    /// Function used for rendering [default: printf]
    #[arg(short, long, value_name = "FUNCTION_NAME")]
    pub render_func: Option<String>,

    /// Extra files to include from the implementation file
    #[arg(short = 'l', long = "include-libs", value_name = "INCLUDE_FILE", num_args = 1..)]
    pub include_libs: Option<Vec<String>>,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum KindChoice {
    Function,
    Constant,
}

impl KindChoice {
    pub fn kind(self) -> DefinitionKind {
        match self {
            Self::Function => DefinitionKind::Function,
            Self::Constant => DefinitionKind::Constant,
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize tracing
    let filter = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Generate(args) => commands::generate::run(&args),
        Commands::Inspect { inputs, json } => commands::inspect::run(&inputs, json),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            output::print_error(&format!("{err:#}"));
            ExitCode::FAILURE
        }
    }
}
