mod config;
mod error;

use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::process;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use blockscene_compiler::{registry, toolbox, CompileErrors, CompileOptions};

use crate::error::{CliError, CliResult};

#[derive(Parser)]
#[command(name = "blockscene", version, about = "Compile block workspaces to 3D scene scripts")]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace). RUST_LOG overrides.
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Compile a serialized workspace to a script
    Compile(CompileArgs),

    /// Report diagnostics for a serialized workspace without compiling
    Check(CheckArgs),

    /// Print the editor block definitions
    Blocks(BlocksArgs),

    /// Print the initial field values for a new block
    Defaults(DefaultsArgs),
}

#[derive(clap::Args)]
struct CompileArgs {
    /// Workspace JSON file (`-` for stdin)
    file: PathBuf,

    /// Write the script here instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// TOML file with compiler options
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Print the full compile result as JSON
    #[arg(long)]
    json: bool,
}

#[derive(clap::Args)]
struct CheckArgs {
    /// Workspace JSON file (`-` for stdin)
    file: PathBuf,
}

#[derive(clap::Args)]
struct BlocksArgs {
    /// Print the category toolbox instead
    #[arg(long)]
    toolbox: bool,
}

#[derive(clap::Args)]
struct DefaultsArgs {
    /// Workspace JSON file (`-` for stdin)
    file: PathBuf,

    /// Block kind about to be placed
    kind: String,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let outcome = match cli.command {
        Command::Compile(args) => do_compile(args),
        Command::Check(args) => do_check(args),
        Command::Blocks(args) => {
            println!("{}", blocks(&args));
            Ok(())
        }
        Command::Defaults(args) => do_defaults(args),
    };

    if let Err(e) = outcome {
        if !matches!(e, CliError::Compile(_)) {
            eprintln!("error: {e}");
        }
        process::exit(1);
    }
}

fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

// ══════════════════════════════════════════════════════════════════════════════
// Commands
// ══════════════════════════════════════════════════════════════════════════════

fn do_compile(args: CompileArgs) -> CliResult<()> {
    let options = match &args.config {
        Some(path) => config::load(path)?,
        None => CompileOptions::default(),
    };
    let source = read_input(&args.file)?;
    let text = compile(&source, &options, args.json)?;
    match &args.output {
        Some(path) => std::fs::write(path, text).map_err(|source| CliError::Write {
            path: path.clone(),
            source,
        }),
        None => {
            println!("{text}");
            Ok(())
        }
    }
}

/// Compile `source` and render the text to emit. Diagnostics go to stderr;
/// with `json` the compile result is returned even on failure.
fn compile(source: &str, options: &CompileOptions, json: bool) -> CliResult<String> {
    let result = blockscene_compiler::compile_to_result_with(source, options);
    report(&result.errors);
    if json {
        return Ok(serde_json::to_string_pretty(&result)?);
    }
    match result.script {
        Some(script) => Ok(script),
        None => Err(CliError::Compile(result.errors.total_errors)),
    }
}

fn do_check(args: CheckArgs) -> CliResult<()> {
    let source = read_input(&args.file)?;
    let errors = blockscene_compiler::check(&source);
    report(&errors);
    if errors.has_errors() {
        return Err(CliError::Compile(errors.total_errors));
    }
    eprintln!("ok ({} warning(s))", errors.total_warnings);
    Ok(())
}

fn blocks(args: &BlocksArgs) -> String {
    let value = if args.toolbox {
        toolbox::toolbox(registry())
    } else {
        toolbox::block_definitions(registry())
    };
    // Pretty-printing a `Value` cannot fail.
    serde_json::to_string_pretty(&value).unwrap_or_else(|_| value.to_string())
}

fn do_defaults(args: DefaultsArgs) -> CliResult<()> {
    let source = read_input(&args.file)?;
    println!("{}", defaults(&source, &args.kind)?);
    Ok(())
}

fn defaults(source: &str, kind: &str) -> CliResult<String> {
    let fields = blockscene_compiler::new_block_fields(source, kind)?;
    Ok(serde_json::to_string_pretty(&fields)?)
}

// ══════════════════════════════════════════════════════════════════════════════
// Helpers
// ══════════════════════════════════════════════════════════════════════════════

fn read_input(path: &Path) -> CliResult<String> {
    let read = if path == Path::new("-") {
        let mut text = String::new();
        io::stdin().read_to_string(&mut text).map(|_| text)
    } else {
        std::fs::read_to_string(path)
    };
    read.map_err(|source| CliError::Read {
        path: path.to_path_buf(),
        source,
    })
}

fn report(errors: &CompileErrors) {
    for diagnostic in errors.iter() {
        eprintln!("{diagnostic}");
        if let Some(suggestion) = &diagnostic.suggestion {
            eprintln!("  help: {suggestion}");
        }
    }
    let dropped = errors.total_errors - errors.errors.len();
    if dropped > 0 {
        eprintln!("... and {dropped} more error(s)");
    }
}
