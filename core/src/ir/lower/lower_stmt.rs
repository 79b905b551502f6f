//! Lowering helpers for statement nodes.
//!
//! Each control construct takes a label pair from its own counter range,
//! so while, for and if labels never collide with each other.
//!
//! See also: `ir::lower::lower_expr` for expression lowering helpers.
use crate::ast::{AstNode, AstNodeKind};
use crate::ir::module::{IrModule, LabelRange};
use crate::ir::op::{IrOp, Label};

use super::lower_expr::lower_expr;

pub fn lower_statement(stmt_node: &AstNode, ir_mod: &mut IrModule) {
    match stmt_node.get_kind() {
        AstNodeKind::Assign { target, value } => {
            if let Some(src) = lower_expr(value, ir_mod) {
                ir_mod.emit_op(IrOp::Copy { dest: target.clone(), src });
            }
        }
        AstNodeKind::Print { name } => ir_mod.emit_op(IrOp::Print { name: name.clone() }),
        AstNodeKind::Return { value } => {
            if let Some(value) = lower_expr(value, ir_mod) {
                ir_mod.emit_op(IrOp::Return { value });
            }
        }
        AstNodeKind::Break => match ir_mod.current_loop_end() {
            Some(end) => ir_mod.emit_op(IrOp::Goto { target: end }),
            None => log::warn!("break outside of a loop, nothing emitted"),
        },
        AstNodeKind::Block { statements } => {
            for s in statements.iter() {
                lower_statement(s, ir_mod);
            }
        }
        AstNodeKind::While { condition, body } => {
            let (start, end) = ir_mod.alloc_label_pair(LabelRange::While);
            lower_loop(start, end, condition, body, None, ir_mod);
        }
        AstNodeKind::For { init, condition, increment, body } => {
            let (start, end) = ir_mod.alloc_label_pair(LabelRange::For);
            lower_statement(init, ir_mod);
            lower_loop(start, end, condition, body, Some(increment), ir_mod);
        }
        AstNodeKind::If { condition, then_branch, else_branch } => {
            let (else_label, end_label) = ir_mod.alloc_label_pair(LabelRange::If);
            if let Some(cond) = lower_expr(condition, ir_mod) {
                ir_mod.emit_op(IrOp::IfNot { cond, target: else_label });
            }
            lower_statement(then_branch, ir_mod);
            ir_mod.emit_op(IrOp::Goto { target: end_label });
            ir_mod.emit_op(IrOp::Label { id: else_label });
            if let Some(else_branch) = else_branch {
                lower_statement(else_branch, ir_mod);
            }
            ir_mod.emit_op(IrOp::Label { id: end_label });
        }
        AstNodeKind::FunctionDef { name, body, .. } => {
            ir_mod.emit_op(IrOp::Func { name: name.clone() });
            let saved = ir_mod.enter_function();
            lower_statement(body, ir_mod);
            ir_mod.leave_function(saved);
            ir_mod.emit_op(IrOp::EndFunc { name: name.clone() });
        }
        AstNodeKind::FunctionCall { name, args } => {
            ir_mod.emit_op(IrOp::Call { name: name.clone() });
            for arg in args.iter() {
                if let Some(value) = lower_expr(arg, ir_mod) {
                    ir_mod.emit_op(IrOp::Arg { value });
                }
            }
            ir_mod.emit_op(IrOp::EndCall);
        }
        AstNodeKind::Number { .. } | AstNodeKind::Identifier { .. } | AstNodeKind::BinaryOp { .. } => {
            // bare expression statement, value discarded
            let _ = lower_expr(stmt_node, ir_mod);
        }
    }
}

fn lower_loop(
    start: Label,
    end: Label,
    condition: &AstNode,
    body: &AstNode,
    increment: Option<&AstNode>,
    ir_mod: &mut IrModule,
) {
    ir_mod.emit_op(IrOp::Label { id: start });
    if let Some(cond) = lower_expr(condition, ir_mod) {
        ir_mod.emit_op(IrOp::IfNot { cond, target: end });
    }
    ir_mod.enter_loop(end);
    lower_statement(body, ir_mod);
    ir_mod.leave_loop();
    if let Some(increment) = increment {
        lower_statement(increment, ir_mod);
    }
    ir_mod.emit_op(IrOp::Goto { target: start });
    ir_mod.emit_op(IrOp::Label { id: end });
}

#[cfg(test)]
mod tests {
    use crate::ast::{AstNode, BinaryOperator};
    use crate::ir::generate_ir;

    fn lt(name: &str, n: i64) -> AstNode {
        AstNode::binary(BinaryOperator::Lt, AstNode::identifier(name), AstNode::number(n))
    }

    fn inc(name: &str) -> AstNode {
        AstNode::assign(name, AstNode::binary(BinaryOperator::Add, AstNode::identifier(name), AstNode::number(1)))
    }

    #[test]
    fn while_loop_layout() {
        let root = AstNode::block(vec![
            AstNode::assign("i", AstNode::number(0)),
            AstNode::while_stmt(lt("i", 3), AstNode::block(vec![AstNode::print("i"), inc("i")])),
        ]);
        assert_eq!(
            generate_ir(&root),
            vec![
                "t0 = 0",
                "i = t0",
                "L0:",
                "t1 = 3",
                "t2 = i < t1",
                "ifnot t2 goto L1",
                "print i",
                "t3 = 1",
                "t4 = i + t3",
                "i = t4",
                "goto L0",
                "L1:",
            ]
        );
    }

    #[test]
    fn for_loop_runs_increment_after_body_and_breaks_to_end() {
        let root = AstNode::for_stmt(
            AstNode::assign("i", AstNode::number(0)),
            lt("i", 5),
            inc("i"),
            AstNode::block(vec![AstNode::break_stmt()]),
        );
        assert_eq!(
            generate_ir(&root),
            vec![
                "t0 = 0",
                "i = t0",
                "L1000:",
                "t1 = 5",
                "t2 = i < t1",
                "ifnot t2 goto L1001",
                "goto L1001",
                "t3 = 1",
                "t4 = i + t3",
                "i = t4",
                "goto L1000",
                "L1001:",
            ]
        );
    }

    #[test]
    fn if_without_else_still_emits_else_label() {
        let root = AstNode::if_stmt(AstNode::identifier("c"), AstNode::block(vec![AstNode::print("c")]), None);
        assert_eq!(
            generate_ir(&root),
            vec!["ifnot c goto L2000", "print c", "goto L2001", "L2000:", "L2001:"]
        );
    }

    #[test]
    fn if_with_else() {
        let root = AstNode::if_stmt(
            AstNode::identifier("c"),
            AstNode::print("a"),
            Some(AstNode::print("b")),
        );
        assert_eq!(
            generate_ir(&root),
            vec!["ifnot c goto L2000", "print a", "goto L2001", "L2000:", "print b", "L2001:"]
        );
    }

    #[test]
    fn break_targets_innermost_loop() {
        let root = AstNode::while_stmt(
            AstNode::identifier("a"),
            AstNode::while_stmt(AstNode::identifier("b"), AstNode::break_stmt()),
        );
        let ir = generate_ir(&root);
        assert!(ir.contains(&"goto L3".to_string()));
        assert_eq!(ir.iter().filter(|l| l.as_str() == "goto L1").count(), 0);
    }

    #[test]
    fn break_outside_loop_emits_nothing() {
        assert!(generate_ir(&AstNode::block(vec![AstNode::break_stmt()])).is_empty());
    }

    #[test]
    fn break_in_nested_function_stays_inside_it() {
        // while (1) { func f() { break; } f(); }
        let root = AstNode::while_stmt(
            AstNode::number(1),
            AstNode::block(vec![
                AstNode::function_def("f", &[], AstNode::block(vec![AstNode::break_stmt()])),
                AstNode::function_call("f", vec![]),
            ]),
        );
        let ir = generate_ir(&root);
        let start = ir.iter().position(|l| l == "func f:").unwrap();
        let end = ir.iter().position(|l| l == "endfunc f").unwrap();
        assert_eq!(end, start + 1, "{:?}", ir);
        assert_eq!(ir.iter().filter(|l| l.as_str() == "goto L1").count(), 0);
    }

    #[test]
    fn loop_after_function_body_still_breaks_to_its_end() {
        let root = AstNode::while_stmt(
            AstNode::number(1),
            AstNode::block(vec![
                AstNode::function_def("f", &[], AstNode::block(vec![])),
                AstNode::break_stmt(),
            ]),
        );
        assert!(generate_ir(&root).contains(&"goto L1".to_string()));
    }

    #[test]
    fn many_while_loops_never_reuse_for_labels() {
        let mut statements: Vec<AstNode> = (0..501)
            .map(|_| AstNode::while_stmt(AstNode::number(0), AstNode::block(vec![])))
            .collect();
        statements.push(AstNode::for_stmt(
            AstNode::assign("i", AstNode::number(0)),
            lt("i", 1),
            inc("i"),
            AstNode::block(vec![]),
        ));
        let ir = generate_ir(&AstNode::block(statements));
        let mut labels: Vec<&String> = ir.iter().filter(|l| l.ends_with(':')).collect();
        let total = labels.len();
        labels.sort();
        labels.dedup();
        assert_eq!(total, 2 * 502);
        assert_eq!(labels.len(), total);
        assert!(ir.contains(&"L3000:".to_string()));
    }

    #[test]
    fn function_definition_and_call_framing() {
        let root = AstNode::block(vec![
            AstNode::function_def(
                "add",
                &["a", "b"],
                AstNode::block(vec![
                    AstNode::assign("x", AstNode::binary(BinaryOperator::Add, AstNode::identifier("a"), AstNode::identifier("b"))),
                    AstNode::return_stmt(AstNode::identifier("x")),
                ]),
            ),
            AstNode::function_call("add", vec![AstNode::number(2), AstNode::identifier("y")]),
        ]);
        assert_eq!(
            generate_ir(&root),
            vec![
                "func add:",
                "t0 = a + b",
                "x = t0",
                "return x",
                "endfunc add",
                "call add",
                "t1 = 2",
                "arg t1",
                "arg y",
                "endcall",
            ]
        );
    }

    #[test]
    fn counters_restart_per_run() {
        let root = AstNode::while_stmt(AstNode::number(1), AstNode::block(vec![]));
        assert_eq!(generate_ir(&root), generate_ir(&root));
    }
}
