//! Translates each TAC line into one or more stack-bytecode lines.

use crate::error::{CodegenError, Result};

const BIN_OPS: &[&str] = &["ADD", "SUB", "MUL", "DIV", "EQ", "NEQ", "LT", "GT", "LE", "GE"];

/// Splits a line on ASCII whitespace, but keeps a `"..."` run together as a
/// single token even if it contains embedded spaces.
fn split_tokens(line: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut chars = line.chars().peekable();
    while let Some(&c) = chars.peek() {
        if c.is_whitespace() {
            chars.next();
            continue;
        }
        let mut token = String::new();
        if c == '"' {
            token.push(chars.next().unwrap());
            for next in chars.by_ref() {
                token.push(next);
                if next == '"' {
                    break;
                }
            }
        } else {
            while let Some(&c) = chars.peek() {
                if c.is_whitespace() {
                    break;
                }
                token.push(c);
                chars.next();
            }
        }
        tokens.push(token);
    }
    tokens
}

/// Pure-digit operands push an integer, quoted operands push a string
/// literal verbatim, anything else is an identifier load.
fn emit_operand(operand: &str, out: &mut Vec<String>) {
    if !operand.is_empty() && operand.chars().all(|c| c.is_ascii_digit()) {
        out.push(format!("PUSH {}", operand));
    } else if operand.starts_with('"') && operand.ends_with('"') && operand.len() >= 2 {
        out.push(format!("PUSH {}", operand));
    } else {
        out.push(format!("LOAD {}", operand));
    }
}

fn lower_assignment(target: &str, rhs: &str, out: &mut Vec<String>) -> Result<()> {
    let tokens = split_tokens(rhs);
    match tokens.as_slice() {
        [operand] => {
            emit_operand(operand, out);
            out.push(format!("STORE {}", target));
            Ok(())
        }
        [a, op, b] if BIN_OPS.contains(&op.as_str()) => {
            emit_operand(a, out);
            emit_operand(b, out);
            out.push(op.clone());
            out.push(format!("STORE {}", target));
            Ok(())
        }
        _ => Err(CodegenError::MalformedInstruction {
            line: format!("{} = {}", target, rhs),
        }),
    }
}

fn lower_instruction(line: &str, out: &mut Vec<String>) -> Result<()> {
    if let Some((target, rhs)) = line.split_once(" = ") {
        return lower_assignment(target, rhs, out);
    }
    let tokens = split_tokens(line);
    let opcode = tokens.first().map(String::as_str).unwrap_or("");
    match opcode {
        "PRINT" | "SHOUT" | "WHISPER" | "LAUGH" | "MURMUR" => {
            let operand = tokens.get(1).ok_or_else(|| CodegenError::MalformedInstruction {
                line: line.to_string(),
            })?;
            emit_operand(operand, out);
            out.push(opcode.to_string());
            Ok(())
        }
        "PANIC" | "INPUT" | "LABEL" | "JMP" => {
            out.push(line.to_string());
            Ok(())
        }
        "PAUSE" | "SLEEP" => {
            out.push(opcode.to_string());
            Ok(())
        }
        "JZ" => {
            let operand = tokens.get(1).ok_or_else(|| CodegenError::MalformedInstruction {
                line: line.to_string(),
            })?;
            let label = tokens.get(2).ok_or_else(|| CodegenError::MalformedInstruction {
                line: line.to_string(),
            })?;
            emit_operand(operand, out);
            out.push(format!("JZ {}", label));
            Ok(())
        }
        "" => Ok(()),
        other => Err(CodegenError::UnknownOpcode {
            opcode: other.to_string(),
            line: line.to_string(),
        }),
    }
}

/// Lowers a flat TAC instruction list into its stack-bytecode equivalent.
pub fn generate(tac: &[String]) -> Result<Vec<String>> {
    let mut out = Vec::new();
    for line in tac {
        lower_instruction(line, &mut out)?;
    }
    log::debug!("code generator emitted {} bytecode instructions", out.len());
    Ok(out)
}
