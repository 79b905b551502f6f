//! file: core/src/interp/exec.rs
//! description: statement execution.
//!
//! `exec` walks statements against the interpreter state. A `Break` returns
//! `Flow::Break`, which every `Block` passes upward untouched until the
//! nearest `While`/`For` consumes it.
//!
use std::io::Write;

use crate::ast::{AstNode, AstNodeKind};

use super::{Flow, Interpreter, RuntimeError, RuntimeErrorKind};

impl<'a, W: Write> Interpreter<'a, W> {
    pub fn exec(&mut self, stmt: &'a AstNode) -> Result<Flow, RuntimeError> {
        match &stmt.kind {
            AstNodeKind::Assign { target, value } => {
                let v = self.eval(value)?;
                self.env.write(target, v);
                Ok(Flow::Normal)
            }
            AstNodeKind::Print { name } => {
                let v = self.env.read(name).map_err(|e| e.at(stmt))?;
                writeln!(self.out, "{}", v).map_err(|e| {
                    RuntimeError::new(RuntimeErrorKind::Output { reason: e.to_string() }).at(stmt)
                })?;
                Ok(Flow::Normal)
            }
            AstNodeKind::Block { statements } => {
                for s in statements {
                    if self.exec(s)? == Flow::Break {
                        return Ok(Flow::Break);
                    }
                }
                Ok(Flow::Normal)
            }
            AstNodeKind::While { condition, body } => {
                while self.eval(condition)? != 0 {
                    if self.exec(body)? == Flow::Break {
                        break;
                    }
                }
                Ok(Flow::Normal)
            }
            AstNodeKind::For { init, condition, increment, body } => {
                self.exec(init)?;
                while self.eval(condition)? != 0 {
                    if self.exec(body)? == Flow::Break {
                        break;
                    }
                    self.exec(increment)?;
                }
                Ok(Flow::Normal)
            }
            AstNodeKind::If { condition, then_branch, else_branch } => {
                if self.eval(condition)? != 0 {
                    self.exec(then_branch)
                } else if let Some(else_branch) = else_branch {
                    self.exec(else_branch)
                } else {
                    Ok(Flow::Normal)
                }
            }
            AstNodeKind::FunctionDef { name, params, body } => {
                log::trace!("registering function {}({})", name, params.join(", "));
                self.functions.register(name, params, body);
                Ok(Flow::Normal)
            }
            AstNodeKind::FunctionCall { name, args } => self.call(stmt, name, args),
            AstNodeKind::Break => Ok(Flow::Break),
            AstNodeKind::Return { .. } => {
                // Return carries no value and does not leave the function.
                log::trace!("ignoring return statement");
                Ok(Flow::Normal)
            }
            AstNodeKind::Number { .. } | AstNodeKind::Identifier { .. } | AstNodeKind::BinaryOp { .. } => {
                // Bare expressions have no effect beyond their failure modes.
                self.eval(stmt)?;
                Ok(Flow::Normal)
            }
        }
    }

    fn call(&mut self, site: &'a AstNode, name: &str, args: &'a [AstNode]) -> Result<Flow, RuntimeError> {
        let entry = match self.functions.lookup(name) {
            Some(entry) => *entry,
            None => {
                return Err(
                    RuntimeError::new(RuntimeErrorKind::UndefinedFunction { name: name.to_string() }).at(site),
                );
            }
        };
        if entry.params.len() != args.len() {
            return Err(RuntimeError::new(RuntimeErrorKind::ArityMismatch {
                name: name.to_string(),
                expected: entry.params.len(),
                found: args.len(),
            })
            .at(site));
        }

        if self.env.depth() >= self.max_call_depth {
            return Err(RuntimeError::new(RuntimeErrorKind::CallDepthExceeded {
                name: name.to_string(),
                limit: self.max_call_depth,
            })
            .at(site));
        }

        // Arguments see the caller's bindings, not the new frame.
        let values = args
            .iter()
            .map(|a| self.eval(a))
            .collect::<Result<Vec<_>, _>>()?;

        log::debug!("call {}({:?}) at depth {}", name, values, self.env.depth() + 1);
        self.env
            .push_scope(entry.params.iter().cloned().zip(values));
        let result = self.exec(entry.body);
        let released = self.env.pop_scope();
        log::trace!("return from {} released {} binding(s)", name, released);

        if result? == Flow::Break {
            log::warn!("break escaped the body of function {}", name);
        }
        Ok(Flow::Normal)
    }
}

#[cfg(test)]
mod tests {
    use crate::ast::{AstNode, BinaryOperator};
    use crate::interp::{Interpreter, RuntimeErrorKind};

    fn run(program: &AstNode) -> (String, Vec<(String, i64)>) {
        let mut interp = Interpreter::new(Vec::new());
        interp.run(program).expect("run");
        let globals = interp.dump_globals();
        (String::from_utf8(interp.into_output()).unwrap(), globals)
    }

    fn lt(name: &str, n: i64) -> AstNode {
        AstNode::binary(BinaryOperator::Lt, AstNode::identifier(name), AstNode::number(n))
    }

    fn incr(name: &str) -> AstNode {
        AstNode::assign(
            name,
            AstNode::binary(BinaryOperator::Add, AstNode::identifier(name), AstNode::number(1)),
        )
    }

    #[test]
    fn while_loop_prints_each_iteration() {
        let program = AstNode::block(vec![
            AstNode::assign("i", AstNode::number(0)),
            AstNode::while_stmt(lt("i", 3), AstNode::block(vec![AstNode::print("i"), incr("i")])),
        ]);
        let (out, globals) = run(&program);
        assert_eq!(out, "0\n1\n2\n");
        assert_eq!(globals, vec![("i".to_string(), 3)]);
    }

    #[test]
    fn break_only_leaves_the_innermost_loop() {
        // for i in 0..2 { for j in 0..10 { if j == 1 { break } print j } print i }
        let inner = AstNode::for_stmt(
            AstNode::assign("j", AstNode::number(0)),
            lt("j", 10),
            incr("j"),
            AstNode::block(vec![
                AstNode::if_stmt(
                    AstNode::binary(BinaryOperator::Eq, AstNode::identifier("j"), AstNode::number(1)),
                    AstNode::block(vec![AstNode::block(vec![AstNode::break_stmt()])]),
                    None,
                ),
                AstNode::print("j"),
            ]),
        );
        let program = AstNode::block(vec![AstNode::for_stmt(
            AstNode::assign("i", AstNode::number(0)),
            lt("i", 2),
            incr("i"),
            AstNode::block(vec![inner, AstNode::print("i")]),
        )]);
        let (out, _) = run(&program);
        assert_eq!(out, "0\n0\n0\n1\n");
    }

    #[test]
    fn break_skips_the_increment() {
        let program = AstNode::block(vec![AstNode::for_stmt(
            AstNode::assign("i", AstNode::number(0)),
            lt("i", 5),
            incr("i"),
            AstNode::block(vec![AstNode::break_stmt()]),
        )]);
        let (_, globals) = run(&program);
        assert_eq!(globals, vec![("i".to_string(), 0)]);
    }

    #[test]
    fn if_picks_else_branch_on_zero() {
        let program = AstNode::block(vec![
            AstNode::assign("a", AstNode::number(1)),
            AstNode::assign("b", AstNode::number(2)),
            AstNode::if_stmt(
                AstNode::number(0),
                AstNode::print("a"),
                Some(AstNode::print("b")),
            ),
        ]);
        assert_eq!(run(&program).0, "2\n");
    }

    #[test]
    fn call_binds_params_and_releases_them() {
        let add = AstNode::function_def(
            "add",
            &["a", "b"],
            AstNode::block(vec![
                AstNode::assign(
                    "x",
                    AstNode::binary(BinaryOperator::Add, AstNode::identifier("a"), AstNode::identifier("b")),
                ),
                AstNode::print("x"),
            ]),
        );
        let program = AstNode::block(vec![
            add,
            AstNode::function_call("add", vec![AstNode::number(2), AstNode::number(3)]),
        ]);
        let mut interp = Interpreter::new(Vec::new());
        interp.run(&program).unwrap();
        assert_eq!(interp.functions().len(), 1);
        assert_eq!(interp.environment().len(), 0);
        assert!(interp.environment().lookup("x").is_none());
        assert_eq!(String::from_utf8(interp.into_output()).unwrap(), "5\n");
    }

    #[test]
    fn call_can_update_globals() {
        let program = AstNode::block(vec![
            AstNode::assign("total", AstNode::number(0)),
            AstNode::function_def(
                "bump",
                &["n"],
                AstNode::assign(
                    "total",
                    AstNode::binary(BinaryOperator::Add, AstNode::identifier("total"), AstNode::identifier("n")),
                ),
            ),
            AstNode::function_call("bump", vec![AstNode::number(4)]),
            AstNode::function_call("bump", vec![AstNode::number(6)]),
        ]);
        let (_, globals) = run(&program);
        assert_eq!(globals, vec![("total".to_string(), 10)]);
    }

    #[test]
    fn arguments_are_evaluated_in_the_caller_scope() {
        // f(a) is called with `a + 1` where the caller's a is 1; inside, a is 2.
        let program = AstNode::block(vec![
            AstNode::assign("a", AstNode::number(1)),
            AstNode::function_def("f", &["a"], AstNode::print("a")),
            AstNode::function_call(
                "f",
                vec![AstNode::binary(BinaryOperator::Add, AstNode::identifier("a"), AstNode::number(1))],
            ),
            AstNode::print("a"),
        ]);
        assert_eq!(run(&program).0, "2\n1\n");
    }

    #[test]
    fn calling_before_definition_fails() {
        let program = AstNode::block(vec![
            AstNode::function_call("later", vec![]),
            AstNode::function_def("later", &[], AstNode::block(vec![])),
        ]);
        let mut interp = Interpreter::new(Vec::new());
        let err = interp.run(&program).unwrap_err();
        assert_eq!(err.kind, RuntimeErrorKind::UndefinedFunction { name: "later".into() });
    }

    #[test]
    fn argument_count_mismatch_is_fatal() {
        let program = AstNode::block(vec![
            AstNode::function_def("f", &["a"], AstNode::block(vec![])),
            AstNode::function_call("f", vec![]),
        ]);
        let mut interp = Interpreter::new(Vec::new());
        let err = interp.run(&program).unwrap_err();
        assert_eq!(
            err.kind,
            RuntimeErrorKind::ArityMismatch { name: "f".into(), expected: 1, found: 0 }
        );
    }

    #[test]
    fn runaway_recursion_fails_instead_of_overflowing() {
        // func f(n) { f(n + 1); } f(0);
        let program = AstNode::block(vec![
            AstNode::function_def(
                "f",
                &["n"],
                AstNode::block(vec![AstNode::function_call(
                    "f",
                    vec![AstNode::binary(BinaryOperator::Add, AstNode::identifier("n"), AstNode::number(1))],
                )]),
            ),
            AstNode::function_call("f", vec![AstNode::number(0)]),
        ]);
        let mut interp = Interpreter::new(Vec::new()).with_max_call_depth(16);
        let err = interp.run(&program).unwrap_err();
        assert_eq!(err.kind, RuntimeErrorKind::CallDepthExceeded { name: "f".into(), limit: 16 });
        assert!(!interp.environment().in_call());
    }

    #[test]
    fn recursion_within_the_limit_runs() {
        // func down(n) { print n; if (n > 0) { down(n - 1); } } down(3);
        let program = AstNode::block(vec![
            AstNode::function_def(
                "down",
                &["n"],
                AstNode::block(vec![
                    AstNode::print("n"),
                    AstNode::if_stmt(
                        AstNode::binary(BinaryOperator::Gt, AstNode::identifier("n"), AstNode::number(0)),
                        AstNode::block(vec![AstNode::function_call(
                            "down",
                            vec![AstNode::binary(BinaryOperator::Sub, AstNode::identifier("n"), AstNode::number(1))],
                        )]),
                        None,
                    ),
                ]),
            ),
            AstNode::function_call("down", vec![AstNode::number(3)]),
        ]);
        let mut interp = Interpreter::new(Vec::new()).with_max_call_depth(4);
        interp.run(&program).unwrap();
        assert_eq!(String::from_utf8(interp.into_output()).unwrap(), "3\n2\n1\n0\n");
    }

    #[test]
    fn failed_call_still_pops_its_frame() {
        let program = AstNode::block(vec![
            AstNode::function_def("f", &["a"], AstNode::print("missing")),
            AstNode::function_call("f", vec![AstNode::number(1)]),
        ]);
        let mut interp = Interpreter::new(Vec::new());
        assert!(interp.run(&program).is_err());
        assert!(!interp.environment().in_call());
    }

    #[test]
    fn return_has_no_runtime_effect() {
        let program = AstNode::block(vec![
            AstNode::function_def(
                "f",
                &[],
                AstNode::block(vec![
                    AstNode::return_stmt(AstNode::identifier("unbound")),
                    AstNode::assign("after", AstNode::number(1)),
                    AstNode::print("after"),
                ]),
            ),
            AstNode::function_call("f", vec![]),
        ]);
        assert_eq!(run(&program).0, "1\n");
    }

    #[test]
    fn break_at_top_level_stops_the_program() {
        let program = AstNode::block(vec![
            AstNode::assign("x", AstNode::number(1)),
            AstNode::break_stmt(),
            AstNode::assign("y", AstNode::number(2)),
        ]);
        let (_, globals) = run(&program);
        assert_eq!(globals, vec![("x".to_string(), 1)]);
    }

    #[test]
    fn break_inside_function_ends_only_the_call() {
        let program = AstNode::block(vec![
            AstNode::function_def(
                "f",
                &[],
                AstNode::block(vec![AstNode::break_stmt(), AstNode::assign("never", AstNode::number(1))]),
            ),
            AstNode::function_call("f", vec![]),
            AstNode::assign("after", AstNode::number(2)),
        ]);
        let (_, globals) = run(&program);
        assert_eq!(globals, vec![("after".to_string(), 2)]);
    }

    #[test]
    fn recursion_through_globals() {
        // countdown(n) { print n; if (n > 0) { countdown(n - 1); } }
        let body = AstNode::block(vec![
            AstNode::print("n"),
            AstNode::if_stmt(
                AstNode::binary(BinaryOperator::Gt, AstNode::identifier("n"), AstNode::number(0)),
                AstNode::block(vec![AstNode::function_call(
                    "countdown",
                    vec![AstNode::binary(BinaryOperator::Sub, AstNode::identifier("n"), AstNode::number(1))],
                )]),
                None,
            ),
        ]);
        let program = AstNode::block(vec![
            AstNode::function_def("countdown", &["n"], body),
            AstNode::function_call("countdown", vec![AstNode::number(2)]),
        ]);
        assert_eq!(run(&program).0, "2\n1\n0\n");
    }
}
