//! `neuro-drv` — the command-line driver binary (`neuro`) wiring the five
//! pipeline stages and the VM together: read source, tokenize, parse,
//! analyze, lower to TAC, lower to bytecode, execute.
//!
//! The stages themselves are fail-fast per stage (each surfaces its first
//! error and stops); this crate's only job is sequencing them, handling
//! `--emit`, and printing the result or the first error.

mod config;
mod error;

pub use config::{EmitStage, RunConfig};
pub use error::{DriverError, Result};

/// Runs the pipeline described by `config`, returning the VM's output
/// string if `config.emit` is `None`, or the requested intermediate
/// stage's textual rendering otherwise.
pub fn run(config: &RunConfig) -> Result<String> {
    let source = std::fs::read_to_string(&config.script).map_err(|source| DriverError::Io {
        path: config.script.clone(),
        source,
    })?;
    log::debug!("read {} bytes from {}", source.len(), config.script.display());

    let tokens = neuro_lex::Lexer::new(&source).tokenize()?;
    log::debug!("lexer produced {} tokens", tokens.len());
    if config.emit == Some(EmitStage::Tokens) {
        return Ok(tokens
            .iter()
            .map(|t| format!("{:?}", t))
            .collect::<Vec<_>>()
            .join("\n"));
    }

    let program = neuro_par::Parser::new(tokens).parse()?;
    log::debug!("parser produced {} statements", program.statements.len());
    if config.emit == Some(EmitStage::Ast) {
        return Ok(format!("{:#?}", program));
    }

    neuro_sem::analyze(&program)?;
    log::debug!("semantic analysis passed");

    let tac = neuro_tac::generate(&program);
    log::debug!("TAC generator emitted {} instructions", tac.len());
    if config.emit == Some(EmitStage::Tac) {
        return Ok(neuro_tac::pretty_print(&tac));
    }

    let bytecode = neuro_code::generate(&tac)?;
    log::debug!("code generator emitted {} instructions", bytecode.len());
    if config.emit == Some(EmitStage::Bytecode) {
        return Ok(neuro_code::pretty_print(&bytecode));
    }

    let output = neuro_vm::execute(&bytecode, &config.inputs)?;
    log::debug!("VM execution finished");
    Ok(output)
}

/// Initializes `env_logger` at `info` level, or `debug` when `verbose` is
/// set — `RUST_LOG` still takes precedence if the caller has set it.
pub fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();
}

/// Prints `err` to stderr. Lex/parse/semantic errors carry a `Span`, so
/// those are rendered as a `Diagnostic` against the script's source text,
/// the way `faxc-drv`'s `Session` reports its own errors; codegen and
/// runtime errors have no span to point at and just print their message.
pub fn report(config: &RunConfig, err: &DriverError) {
    if let Some(span) = err.span() {
        if let Ok(source) = std::fs::read_to_string(&config.script) {
            let mut handler = neuro_util::Handler::new();
            handler.push(neuro_util::Diagnostic::error(err.to_string(), span));
            for diagnostic in handler.diagnostics() {
                eprintln!("{}", diagnostic.render(&source));
            }
            return;
        }
    }
    eprintln!("error: {}", err);
}
