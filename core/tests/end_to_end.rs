use minic_core::{ast, interp, ir, opt, script::Script};
use minic_core::ast::AstNodeKind;

fn parse(src: &str) -> minic_core::AstNode {
    let script = Script::from_source("e2e.mc", src);
    ast::generate_ast_from_source(&script).expect("failed to parse sample")
}

fn run(root: &minic_core::AstNode) -> (String, Vec<(String, i64)>) {
    let mut out = Vec::new();
    let globals = interp::interpret(root, &mut out).expect("program failed");
    (String::from_utf8(out).unwrap(), globals)
}

#[test]
fn folded_assignment_prints_fourteen() {
    let mut root = parse("x = 2 + 3 * 4; print x;");
    opt::optimize(&mut root);

    match root.get_kind() {
        AstNodeKind::Block { statements } => match statements[0].get_kind() {
            AstNodeKind::Assign { target, value } => {
                assert_eq!(target, "x");
                assert_eq!(value.as_number(), Some(14));
            }
            other => panic!("expected assignment, got {:?}", other),
        },
        other => panic!("unexpected root {:?}", other),
    }

    let lines = ir::generate_ir(&root);
    assert!(lines.iter().all(|l| !l.contains('+') && !l.contains('*')), "{:?}", lines);
    assert_eq!(run(&root).0, "14\n");
}

#[test]
fn unread_assignment_is_removed() {
    let mut root = parse("y = 1; x = 5; print y;");
    let report = opt::optimize(&mut root);
    assert_eq!(report.removed, 1);

    let (out, globals) = run(&root);
    assert_eq!(out, "1\n");
    assert_eq!(globals, vec![("y".to_string(), 1)]);
}

#[test]
fn while_loop_counts_to_three() {
    let mut root = parse("i = 0; while (i < 3) { print i; i = i + 1; }");
    opt::optimize(&mut root);

    let lines = ir::generate_ir(&root);
    assert_eq!(lines.iter().filter(|l| l.ends_with(':')).count(), 2);
    assert!(lines.contains(&"ifnot t2 goto L1".to_string()), "{:?}", lines);
    assert!(lines.contains(&"goto L0".to_string()));

    assert_eq!(run(&root).0, "0\n1\n2\n");
}

#[test]
fn break_leaves_only_the_for_loop() {
    let root = parse(
        r#"
for (i = 0; i < 5; i = i + 1) {
    if (i == 3) { break; }
    print i;
}
done = 1;
print done;
"#,
    );
    assert_eq!(run(&root).0, "0\n1\n2\n1\n");
}

#[test]
fn function_locals_do_not_leak() {
    let root = parse("func add(a, b) { x = a + b; print x; } add(2, 3);");
    let (out, globals) = run(&root);
    assert_eq!(out, "5\n");
    assert!(globals.iter().all(|(name, _)| name != "x" && name != "a" && name != "b"));
}

#[test]
fn optimized_and_unoptimized_programs_agree() {
    let src = r#"
n = 10;
acc = 0;
unused = 4 * 4;
for (k = 0; k < n; k = k + 1) {
    if (k / 2 * 2 == k) { acc = acc + k; } else { acc = acc - 1; }
}
print acc;
"#;
    let plain = parse(src);
    let mut optimized = plain.clone();
    let report = opt::optimize(&mut optimized);
    assert_eq!(report.removed, 1);
    assert_eq!(run(&plain).0, run(&optimized).0);
    assert_eq!(run(&plain).0, "15\n");
}

#[test]
fn undefined_function_is_fatal() {
    let root = parse("a = 1; print a; missing(a); print a;");
    let mut out = Vec::new();
    let err = interp::interpret(&root, &mut out).unwrap_err();
    assert_eq!(
        err.kind,
        interp::RuntimeErrorKind::UndefinedFunction { name: "missing".to_string() }
    );
    assert_eq!(String::from_utf8(out).unwrap(), "1\n");
}
