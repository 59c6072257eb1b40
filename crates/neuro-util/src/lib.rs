//! `neuro-util` — shared foundation types for the neuroscript compiler.
//!
//! Every pipeline crate (`neuro-lex`, `neuro-par`, `neuro-sem`, `neuro-tac`,
//! `neuro-code`, `neuro-vm`) depends on this crate for source location
//! tracking ([`Span`]) and diagnostic collection ([`Diagnostic`]/[`Handler`]).
//! It intentionally carries no parsing or execution logic of its own.

pub mod diagnostic;
pub mod span;

pub use diagnostic::{Diagnostic, Handler, Level};
pub use span::Span;
