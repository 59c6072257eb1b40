//! Single top-down walk over the AST. Declarations share one flat
//! namespace for the whole program — loops and conditionals do not
//! introduce their own scope, so a name declared inside a block stays
//! visible after it closes.

use crate::error::{Result, SemanticError};
use neuro_par::{Expr, Program, Stmt, VarSource};
use rustc_hash::FxHashSet;

#[derive(Default)]
struct Analyzer {
    declared: FxHashSet<String>,
}

impl Analyzer {
    fn analyze_program(&mut self, program: &Program) -> Result<()> {
        for stmt in &program.statements {
            self.analyze_stmt(stmt)?;
        }
        Ok(())
    }

    fn analyze_stmt(&mut self, stmt: &Stmt) -> Result<()> {
        match stmt {
            Stmt::VarDecl { name, source, .. } => {
                match source {
                    VarSource::Expr(expr) => self.analyze_expr(expr)?,
                    VarSource::Input { .. } => {}
                }
                self.declared.insert(name.clone());
            }
            Stmt::Update { name, value, span } => {
                if !self.declared.contains(name) {
                    return Err(SemanticError::UndeclaredUpdate {
                        name: name.clone(),
                        span: *span,
                    });
                }
                self.analyze_expr(value)?;
            }
            Stmt::Print { value, .. } => self.analyze_expr(value)?,
            Stmt::Panic { .. } | Stmt::Pause { .. } | Stmt::Sleep { .. } => {}
            Stmt::Input { var, .. } => {
                self.declared.insert(var.clone());
            }
            Stmt::If {
                condition,
                then_block,
                else_block,
                ..
            } => {
                self.analyze_expr(condition)?;
                for s in then_block {
                    self.analyze_stmt(s)?;
                }
                if let Some(else_block) = else_block {
                    for s in else_block {
                        self.analyze_stmt(s)?;
                    }
                }
            }
            Stmt::While {
                condition, body, ..
            } => {
                self.analyze_expr(condition)?;
                for s in body {
                    self.analyze_stmt(s)?;
                }
            }
        }
        Ok(())
    }

    fn analyze_expr(&mut self, expr: &Expr) -> Result<()> {
        match expr {
            Expr::Literal { .. } => Ok(()),
            Expr::Variable { name, span } => {
                if self.declared.contains(name) {
                    Ok(())
                } else {
                    Err(SemanticError::UndeclaredVariable {
                        name: name.clone(),
                        span: *span,
                    })
                }
            }
            Expr::Binary { left, right, .. } => {
                self.analyze_expr(left)?;
                self.analyze_expr(right)
            }
        }
    }
}

/// Walks `program`, raising on the first undeclared-variable or
/// undeclared-update use. The AST itself is returned unchanged by this
/// stage — it exists purely to validate.
pub fn analyze(program: &Program) -> Result<()> {
    let mut analyzer = Analyzer::default();
    let result = analyzer.analyze_program(program);
    log::debug!(
        "semantic analysis finished with {} declared names",
        analyzer.declared.len()
    );
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use neuro_lex::Lexer;
    use neuro_par::Parser;

    fn check(source: &str) -> Result<()> {
        let tokens = Lexer::new(source).tokenize().unwrap();
        let program = Parser::new(tokens).parse().unwrap();
        analyze(&program)
    }

    #[test]
    fn declared_then_used_is_fine() {
        assert!(check("remember x = 1\nspeak x\n").is_ok());
    }

    #[test]
    fn undeclared_variable_fails() {
        let err = check("speak x\n").unwrap_err();
        assert!(matches!(err, SemanticError::UndeclaredVariable { .. }));
    }

    #[test]
    fn update_without_declaration_fails() {
        let err = check("update y = 1\n").unwrap_err();
        assert!(matches!(err, SemanticError::UndeclaredUpdate { .. }));
    }

    #[test]
    fn loop_body_declarations_are_visible_after_the_loop() {
        // flat namespace: a name declared inside a block stays visible outside it
        assert!(check(
            "remember n = 1\nthink while n > 0\n    remember seen = 1\n    update n = n - 1\nspeak seen\n"
        )
        .is_ok());
    }

    #[test]
    fn listen_declares_its_target() {
        assert!(check("listen \"n?\" name\nspeak name\n").is_ok());
    }
}
