//! Lowers an AST into a flat list of textual three-address instructions.
//!
//! Each call to [`generate`] gets its own fresh temporary/label counters —
//! `t0, t1, …` and `L0, L1, …` are only unique within one compile, not
//! across the process lifetime.

use neuro_lex::Op;
use neuro_par::{Expr, Literal, PrintKind, Program, Stmt, VarSource};

fn opname(op: Op) -> &'static str {
    match op {
        Op::Add => "ADD",
        Op::Sub => "SUB",
        Op::Mul => "MUL",
        Op::Div => "DIV",
        Op::Eq => "EQ",
        Op::Neq => "NEQ",
        Op::Lt => "LT",
        Op::Gt => "GT",
        Op::Le => "LE",
        Op::Ge => "GE",
    }
}

fn print_opcode(kind: PrintKind) -> &'static str {
    match kind {
        PrintKind::Speak => "PRINT",
        PrintKind::Shout => "SHOUT",
        PrintKind::Whisper => "WHISPER",
        PrintKind::Laugh => "LAUGH",
        PrintKind::Murmur => "MURMUR",
    }
}

#[derive(Default)]
struct Generator {
    temp_counter: usize,
    label_counter: usize,
    instructions: Vec<String>,
}

impl Generator {
    fn new_temp(&mut self) -> String {
        let t = format!("t{}", self.temp_counter);
        self.temp_counter += 1;
        t
    }

    fn new_label(&mut self) -> String {
        let l = format!("L{}", self.label_counter);
        self.label_counter += 1;
        l
    }

    fn emit(&mut self, instr: String) {
        self.instructions.push(instr);
    }

    /// Returns an operand string: a variable name, a temporary, an integer
    /// literal, or a quoted string literal.
    fn visit_expr(&mut self, expr: &Expr) -> String {
        match expr {
            Expr::Literal {
                value: Literal::Int(n),
                ..
            } => n.to_string(),
            Expr::Literal {
                value: Literal::Str(s),
                ..
            } => format!("\"{}\"", s),
            Expr::Variable { name, .. } => name.clone(),
            Expr::Binary {
                left, op, right, ..
            } => {
                let l = self.visit_expr(left);
                let r = self.visit_expr(right);
                let temp = self.new_temp();
                self.emit(format!("{} = {} {} {}", temp, l, opname(*op), r));
                temp
            }
        }
    }

    fn visit_stmt(&mut self, stmt: &Stmt) {
        match stmt {
            Stmt::VarDecl { name, source, .. } => match source {
                VarSource::Expr(expr) => {
                    let rhs = self.visit_expr(expr);
                    self.emit(format!("{} = {}", name, rhs));
                }
                VarSource::Input { prompt } => {
                    self.emit(format!("INPUT \"{}\" {}", prompt, name));
                }
            },
            Stmt::Update { name, value, .. } => {
                let rhs = self.visit_expr(value);
                self.emit(format!("{} = {}", name, rhs));
            }
            Stmt::Print { kind, value, .. } => {
                let operand = self.visit_expr(value);
                self.emit(format!("{} {}", print_opcode(*kind), operand));
            }
            Stmt::Panic { message, .. } => {
                self.emit(format!("PANIC \"{}\"", message));
            }
            Stmt::Pause { .. } => self.emit("PAUSE".to_string()),
            Stmt::Sleep { .. } => self.emit("SLEEP".to_string()),
            Stmt::Input { prompt, var, .. } => {
                self.emit(format!("INPUT \"{}\" {}", prompt, var));
            }
            Stmt::If {
                condition,
                then_block,
                else_block,
                ..
            } => {
                let cond = self.visit_expr(condition);
                let l_else = self.new_label();
                let l_end = self.new_label();
                self.emit(format!("JZ {} {}", cond, l_else));
                for s in then_block {
                    self.visit_stmt(s);
                }
                self.emit(format!("JMP {}", l_end));
                self.emit(format!("LABEL {}", l_else));
                if let Some(else_block) = else_block {
                    for s in else_block {
                        self.visit_stmt(s);
                    }
                }
                self.emit(format!("LABEL {}", l_end));
            }
            Stmt::While {
                condition, body, ..
            } => {
                let l_start = self.new_label();
                let l_end = self.new_label();
                self.emit(format!("LABEL {}", l_start));
                let cond = self.visit_expr(condition);
                self.emit(format!("JZ {} {}", cond, l_end));
                for s in body {
                    self.visit_stmt(s);
                }
                self.emit(format!("JMP {}", l_start));
                self.emit(format!("LABEL {}", l_end));
            }
        }
    }
}

/// Lowers `program` into its flat TAC instruction list.
pub fn generate(program: &Program) -> Vec<String> {
    let mut generator = Generator::default();
    for stmt in &program.statements {
        generator.visit_stmt(stmt);
    }
    log::debug!("TAC generator emitted {} instructions", generator.instructions.len());
    generator.instructions
}

#[cfg(test)]
mod tests {
    use super::*;
    use neuro_lex::Lexer;
    use neuro_par::Parser;

    fn tac(source: &str) -> Vec<String> {
        let tokens = Lexer::new(source).tokenize().unwrap();
        let program = Parser::new(tokens).parse().unwrap();
        generate(&program)
    }

    #[test]
    fn flat_precedence_produces_left_associative_chain() {
        // 2 + 3 * 4 parses as (2 + 3) * 4 — no precedence, left to right.
        let instrs = tac("remember x = 2 + 3 * 4\n");
        assert_eq!(
            instrs,
            vec!["t0 = 2 ADD 3", "t1 = t0 MUL 4", "x = t1"]
        );
    }

    #[test]
    fn var_decl_with_listen_emits_input() {
        let instrs = tac("remember name = listen \"n?\"\n");
        assert_eq!(instrs, vec!["INPUT \"n?\" name"]);
    }

    #[test]
    fn if_with_otherwise_emits_both_branches_and_labels() {
        let instrs = tac("feel 1 == 1\n    speak \"yes\"\notherwise\n    speak \"no\"\n");
        assert_eq!(
            instrs,
            vec![
                "t0 = 1 EQ 1",
                "JZ t0 L0",
                "PRINT \"yes\"",
                "JMP L1",
                "LABEL L0",
                "PRINT \"no\"",
                "LABEL L1",
            ]
        );
    }

    #[test]
    fn while_loop_emits_backward_jump() {
        let instrs = tac("think while n > 0\n    speak n\n");
        assert_eq!(
            instrs,
            vec![
                "LABEL L0",
                "t0 = n GT 0",
                "JZ t0 L1",
                "PRINT n",
                "JMP L0",
                "LABEL L1",
            ]
        );
    }

    #[test]
    fn counters_reset_between_generate_calls() {
        let first = tac("remember x = 1 + 1\n");
        let second = tac("remember y = 2 + 2\n");
        assert_eq!(first[0], "t0 = 1 ADD 1");
        assert_eq!(second[0], "t0 = 2 ADD 2");
    }
}
