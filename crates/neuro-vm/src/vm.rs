//! The stack virtual machine: interprets a bytecode instruction list against
//! an ordered sequence of external input values.

use crate::error::{Result, RuntimeError};
use crate::value::Value;
use rustc_hash::FxHashMap;
use std::time::Duration;

/// Splits a bytecode line on ASCII whitespace, keeping a `"..."` run
/// together as a single token even when it contains embedded spaces.
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

fn unquote(s: &str) -> &str {
    s.strip_prefix('"').and_then(|s| s.strip_suffix('"')).unwrap_or(s)
}

/// Coerces an external textual input value the same way the original
/// reference does: integer-looking text first, then float-looking text,
/// then the string as-is. A leading `-` is not "digit-looking" under this
/// rule, so `"-5"` coerces to the float `-5.0`, not the integer `-5` — a
/// quirk preserved deliberately rather than "fixed".
fn coerce_input(text: &str) -> Value {
    if !text.is_empty() && text.chars().all(|c| c.is_ascii_digit()) {
        if let Ok(n) = text.parse::<i64>() {
            return Value::Int(n);
        }
    }
    if let Ok(f) = text.parse::<f64>() {
        return Value::Float(f);
    }
    Value::Str(text.to_string())
}

pub struct Vm {
    stack: Vec<Value>,
    variables: FxHashMap<String, Value>,
    labels: FxHashMap<String, usize>,
    pc: usize,
    inputs: Vec<String>,
    input_index: usize,
    output: Vec<String>,
}

impl Vm {
    fn new(inputs: &[String]) -> Self {
        Self {
            stack: Vec::new(),
            variables: FxHashMap::default(),
            labels: FxHashMap::default(),
            pc: 0,
            inputs: inputs.to_vec(),
            input_index: 0,
            output: Vec::new(),
        }
    }

    fn pop(&mut self, instruction: &str) -> Result<Value> {
        self.stack.pop().ok_or_else(|| RuntimeError::StackUnderflow {
            instruction: instruction.to_string(),
        })
    }

    fn push(&mut self, value: Value) {
        self.stack.push(value);
    }

    fn prescan(&mut self, bytecode: &[String]) {
        for (i, line) in bytecode.iter().enumerate() {
            if let Some(label) = line.strip_prefix("LABEL ") {
                self.labels.insert(label.trim().to_string(), i);
            }
        }
    }

    /// `SUB`/`MUL`: numeric only, preserving integer type when both
    /// operands are integers and falling back to float otherwise.
    fn numeric_binary(&mut self, instruction: &str, f: impl Fn(f64, f64) -> f64) -> Result<()> {
        let b = self.pop(instruction)?;
        let a = self.pop(instruction)?;
        match (&a, &b) {
            (Value::Int(x), Value::Int(y)) => {
                self.push(Value::Int(f(*x as f64, *y as f64) as i64));
            }
            _ => {
                let (x, y) = (a.as_f64(), b.as_f64());
                match (x, y) {
                    (Some(x), Some(y)) => self.push(Value::Float(f(x, y))),
                    _ => {
                        return Err(RuntimeError::MalformedInstruction {
                            instruction: instruction.to_string(),
                        })
                    }
                }
            }
        }
        Ok(())
    }

    fn compare(&mut self, op: &str) -> Result<()> {
        let b = self.pop(op)?;
        let a = self.pop(op)?;
        let numeric = |v: &Value| v.as_f64();
        let result = match op {
            "EQ" | "NEQ" => {
                let equal = match (numeric(&a), numeric(&b)) {
                    (Some(x), Some(y)) => x == y,
                    _ => match (&a, &b) {
                        (Value::Str(x), Value::Str(y)) => x == y,
                        _ => false, // disparate kinds: EQ is always false
                    },
                };
                if op == "EQ" {
                    equal
                } else {
                    !equal
                }
            }
            "LT" | "GT" | "LE" | "GE" => match (numeric(&a), numeric(&b)) {
                (Some(x), Some(y)) => match op {
                    "LT" => x < y,
                    "GT" => x > y,
                    "LE" => x <= y,
                    _ => x >= y,
                },
                _ => match (&a, &b) {
                    (Value::Str(x), Value::Str(y)) => match op {
                        "LT" => x < y,
                        "GT" => x > y,
                        "LE" => x <= y,
                        _ => x >= y,
                    },
                    _ => return Err(RuntimeError::MismatchedComparison),
                },
            },
            _ => unreachable!("compare called with non-comparison opcode"),
        };
        self.push(Value::Int(if result { 1 } else { 0 }));
        Ok(())
    }

    fn run(&mut self, bytecode: &[String]) -> Result<String> {
        self.prescan(bytecode);
        while self.pc < bytecode.len() {
            let line = &bytecode[self.pc];
            let tokens = split_tokens(line);
            let opcode = tokens.first().map(String::as_str).unwrap_or("");
            let mut advance = true;
            match opcode {
                "PUSH" => {
                    let lit = tokens.get(1).ok_or_else(|| RuntimeError::MalformedInstruction {
                        instruction: line.clone(),
                    })?;
                    if lit.starts_with('"') {
                        self.push(Value::Str(unquote(lit).to_string()));
                    } else {
                        let n = lit.parse::<i64>().map_err(|_| RuntimeError::MalformedInstruction {
                            instruction: line.clone(),
                        })?;
                        self.push(Value::Int(n));
                    }
                }
                "LOAD" => {
                    let name = tokens.get(1).ok_or_else(|| RuntimeError::MalformedInstruction {
                        instruction: line.clone(),
                    })?;
                    let value = self
                        .variables
                        .get(name)
                        .cloned()
                        .ok_or_else(|| RuntimeError::UndefinedVariable { name: name.clone() })?;
                    self.push(value);
                }
                "STORE" => {
                    let name = tokens.get(1).ok_or_else(|| RuntimeError::MalformedInstruction {
                        instruction: line.clone(),
                    })?;
                    let value = self.pop(line)?;
                    self.variables.insert(name.clone(), value);
                }
                "ADD" => {
                    let b = self.pop(line)?;
                    let a = self.pop(line)?;
                    if a.is_str() || b.is_str() {
                        self.push(Value::Str(format!("{}{}", a, b)));
                    } else {
                        match (&a, &b) {
                            (Value::Int(x), Value::Int(y)) => self.push(Value::Int(x + y)),
                            _ => self.push(Value::Float(a.as_f64().unwrap() + b.as_f64().unwrap())),
                        }
                    }
                }
                "SUB" => self.numeric_binary("SUB", |x, y| x - y)?,
                "MUL" => self.numeric_binary("MUL", |x, y| x * y)?,
                "DIV" => {
                    let b = self.pop(line)?;
                    let a = self.pop(line)?;
                    let (x, y) = (a.as_f64(), b.as_f64());
                    match (x, y) {
                        (Some(_), Some(y)) if y == 0.0 => return Err(RuntimeError::DivisionByZero),
                        (Some(x), Some(y)) => self.push(Value::Float(x / y)),
                        _ => {
                            return Err(RuntimeError::MalformedInstruction {
                                instruction: line.clone(),
                            })
                        }
                    }
                }
                "EQ" | "NEQ" | "LT" | "GT" | "LE" | "GE" => self.compare(opcode)?,
                "PRINT" => {
                    let v = self.pop(line)?;
                    self.output.push(v.to_string());
                }
                "SHOUT" => {
                    let v = self.pop(line)?;
                    self.output.push(format!("{}!", v.to_string().to_uppercase()));
                }
                "WHISPER" => {
                    let v = self.pop(line)?;
                    self.output.push(format!("{}...", v.to_string().to_lowercase()));
                }
                "LAUGH" => {
                    let v = self.pop(line)?;
                    self.output.push(format!("{}😂", v));
                }
                "MURMUR" => {
                    let v = self.pop(line)?;
                    let lower = v.to_string().to_lowercase();
                    self.output.push(format!("{}... {}", lower, lower));
                }
                "PANIC" => {
                    let message = tokens.get(1).map(|s| unquote(s).to_string()).unwrap_or_default();
                    return Err(RuntimeError::Panic { message });
                }
                "PAUSE" => {
                    std::thread::sleep(Duration::from_secs(1));
                }
                "SLEEP" => {
                    break;
                }
                "INPUT" => {
                    let var = tokens.get(2).ok_or_else(|| RuntimeError::MalformedInstruction {
                        instruction: line.clone(),
                    })?;
                    let text = self
                        .inputs
                        .get(self.input_index)
                        .ok_or(RuntimeError::MissingInput)?
                        .clone();
                    self.input_index += 1;
                    self.variables.insert(var.clone(), coerce_input(&text));
                }
                "JMP" => {
                    let label = tokens.get(1).ok_or_else(|| RuntimeError::MalformedInstruction {
                        instruction: line.clone(),
                    })?;
                    self.pc = *self
                        .labels
                        .get(label)
                        .ok_or_else(|| RuntimeError::UndefinedLabel { label: label.clone() })?;
                    advance = false;
                }
                "JZ" => {
                    let label = tokens.get(1).ok_or_else(|| RuntimeError::MalformedInstruction {
                        instruction: line.clone(),
                    })?;
                    let cond = self.pop(line)?;
                    let is_zero = matches!(cond.as_f64(), Some(n) if n == 0.0);
                    if is_zero {
                        self.pc = *self
                            .labels
                            .get(label)
                            .ok_or_else(|| RuntimeError::UndefinedLabel { label: label.clone() })?;
                        advance = false;
                    }
                }
                "LABEL" => {}
                "" => {}
                other => {
                    return Err(RuntimeError::UnknownOpcode {
                        opcode: other.to_string(),
                        instruction: line.clone(),
                    })
                }
            }
            if advance {
                self.pc += 1;
            }
        }
        log::debug!("VM halted with {} output lines", self.output.len());
        Ok(self.output.join("\n"))
    }
}

/// Executes `bytecode` against `inputs`, returning the newline-joined
/// output buffer. Fresh VM state is constructed for the call and discarded
/// on return.
pub fn execute(bytecode: &[String], inputs: &[String]) -> Result<String> {
    Vm::new(inputs).run(bytecode)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(lines: &[&str], inputs: &[&str]) -> Result<String> {
        let bytecode: Vec<String> = lines.iter().map(|s| s.to_string()).collect();
        let inputs: Vec<String> = inputs.iter().map(|s| s.to_string()).collect();
        execute(&bytecode, &inputs)
    }

    #[test]
    fn push_load_store_print_roundtrip() {
        let out = run(&["PUSH 5", "STORE x", "LOAD x", "PRINT"], &[]).unwrap();
        assert_eq!(out, "5");
    }

    #[test]
    fn div_always_produces_a_float() {
        let out = run(&["PUSH 6", "PUSH 3", "DIV", "PRINT"], &[]).unwrap();
        assert_eq!(out, "2.0");
    }

    #[test]
    fn div_by_zero_is_an_error() {
        let err = run(&["PUSH 1", "PUSH 0", "DIV", "PRINT"], &[]).unwrap_err();
        assert_eq!(err, RuntimeError::DivisionByZero);
    }

    #[test]
    fn add_concatenates_when_either_side_is_a_string() {
        let out = run(&["PUSH \"hello \"", "PUSH \"world\"", "ADD", "PRINT"], &[]).unwrap();
        assert_eq!(out, "hello world");
    }

    #[test]
    fn shout_upper_cases_and_adds_bang() {
        let out = run(&["PUSH \"hi\"", "SHOUT"], &[]).unwrap();
        assert_eq!(out, "HI!");
    }

    #[test]
    fn laugh_appends_the_glyph() {
        let out = run(&["PUSH \"lol\"", "LAUGH"], &[]).unwrap();
        assert_eq!(out, "lol😂");
    }

    #[test]
    fn string_ordering_is_lexicographic() {
        let out = run(&["PUSH \"apple\"", "PUSH \"banana\"", "LT", "PRINT"], &[]).unwrap();
        assert_eq!(out, "1");
    }

    #[test]
    fn ordered_comparison_across_kinds_fails() {
        let err = run(&["PUSH 1", "PUSH \"1\"", "LT"], &[]).unwrap_err();
        assert_eq!(err, RuntimeError::MismatchedComparison);
    }

    #[test]
    fn eq_across_kinds_is_false_not_an_error() {
        let out = run(&["PUSH 1", "PUSH \"1\"", "EQ", "PRINT"], &[]).unwrap();
        assert_eq!(out, "0");
    }

    #[test]
    fn jz_skips_block_when_condition_is_zero() {
        let out = run(
            &["PUSH 0", "JZ L0", "PUSH \"unreachable\"", "PRINT", "LABEL L0"],
            &[],
        )
        .unwrap();
        assert_eq!(out, "");
    }

    #[test]
    fn sleep_halts_execution_before_later_instructions() {
        let out = run(&["PUSH 1", "PRINT", "SLEEP", "PUSH 2", "PRINT"], &[]).unwrap();
        assert_eq!(out, "1");
    }

    #[test]
    fn input_coerces_integer_looking_text() {
        let out = run(&["INPUT \"n?\" n", "LOAD n", "PRINT"], &["42"]).unwrap();
        assert_eq!(out, "42");
    }

    #[test]
    fn input_negative_number_coerces_to_float_not_int() {
        // str.isdigit() rejects a leading '-', so "-5" becomes a float here,
        // matching the reference implementation's quirk exactly.
        let out = run(&["INPUT \"n?\" n", "LOAD n", "PRINT"], &["-5"]).unwrap();
        assert_eq!(out, "-5.0");
    }

    #[test]
    fn input_non_numeric_text_stays_a_string() {
        let out = run(&["INPUT \"n?\" n", "LOAD n", "PRINT"], &["Alice"]).unwrap();
        assert_eq!(out, "Alice");
    }

    #[test]
    fn missing_input_is_an_error() {
        let err = run(&["INPUT \"n?\" n"], &[]).unwrap_err();
        assert_eq!(err, RuntimeError::MissingInput);
    }

    #[test]
    fn panic_surfaces_its_message() {
        let err = run(&["PANIC \"boom\""], &[]).unwrap_err();
        assert_eq!(
            err,
            RuntimeError::Panic {
                message: "boom".to_string()
            }
        );
    }

    #[test]
    fn stack_underflow_is_fatal() {
        let err = run(&["PRINT"], &[]).unwrap_err();
        assert!(matches!(err, RuntimeError::StackUnderflow { .. }));
    }

    #[test]
    fn unknown_opcode_is_fatal() {
        let err = run(&["FROB"], &[]).unwrap_err();
        assert!(matches!(err, RuntimeError::UnknownOpcode { .. }));
    }

    #[test]
    fn while_loop_counts_down() {
        // remember n = 3 / think while n > 0 { speak n; update n = n - 1 } / sleep
        let out = run(
            &[
                "PUSH 3",
                "STORE n",
                "LABEL L0",
                "LOAD n",
                "PUSH 0",
                "GT",
                "JZ L1",
                "LOAD n",
                "PRINT",
                "LOAD n",
                "PUSH 1",
                "SUB",
                "STORE n",
                "JMP L0",
                "LABEL L1",
                "SLEEP",
            ],
            &[],
        )
        .unwrap();
        assert_eq!(out, "3\n2\n1");
    }
}
