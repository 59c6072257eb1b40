use std::path::PathBuf;

use clap::{Parser, ValueEnum};

/// Which intermediate stage to print instead of running the program to
/// completion. Mirrors `faxc --emit-tokens`/`--emit-ast`/etc., scaled down
/// to this pipeline's five stages.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum EmitStage {
    Tokens,
    Ast,
    Tac,
    Bytecode,
}

/// Command-line configuration for the `neuro` driver.
///
/// There is no project config file to load — this language has no
/// project/manifest concept, unlike `faxt`'s `toml`-backed `Config` — so
/// every setting here comes from the command line or environment.
#[derive(Parser, Debug)]
#[command(name = "neuro")]
#[command(author = "neuroscript contributors")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Compiles and runs a neuroscript source file", long_about = None)]
pub struct RunConfig {
    /// Path to the neuroscript source file.
    pub script: PathBuf,

    /// An external input value, consumed in order by `INPUT`/`listen`
    /// statements. Repeat the flag for multiple values.
    #[arg(short = 'i', long = "input", value_name = "VALUE")]
    pub inputs: Vec<String>,

    /// Print one intermediate stage and stop instead of executing.
    #[arg(long, value_enum)]
    pub emit: Option<EmitStage>,

    /// Enable debug-level logging of stage boundaries (also settable via
    /// `RUST_LOG=debug`).
    #[arg(short, long, env = "NEURO_VERBOSE")]
    pub verbose: bool,
}
