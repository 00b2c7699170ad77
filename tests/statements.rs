use ecma_parse_core::{parse, NodeKind, Options, SourceType, VariableKind};

fn program(src: &str) -> Vec<ecma_parse_core::Node> {
    let node = parse(src, Options::default().with_source_type(SourceType::Module)).unwrap();
    match node.kind {
        NodeKind::File { program, .. } => match program.kind {
            NodeKind::Program { body, .. } => body,
            _ => panic!("expected Program"),
        },
        _ => panic!("expected File"),
    }
}

#[test]
fn let_as_declaration_keyword_vs_identifier() {
    let decl = program("let x = 1;");
    assert!(matches!(decl[0].kind, NodeKind::VariableDeclaration { kind: VariableKind::Let, .. }));

    // `let` not followed by a binding target is a plain identifier
    // reference, not the start of a declaration.
    let expr_stmt = program("let(0);");
    assert!(matches!(expr_stmt[0].kind, NodeKind::ExpressionStatement { .. }));
}

#[test]
fn async_function_declaration_requires_no_line_break() {
    let decl = program("async function f() {}");
    match &decl[0].kind {
        NodeKind::FunctionDeclaration { is_async, .. } => assert!(is_async),
        _ => panic!("expected FunctionDeclaration"),
    }

    // ASI: a line break between `async` and `function` ends the
    // statement after the bare identifier `async`.
    let two_statements = program("async\nfunction f() {}");
    assert_eq!(two_statements.len(), 2);
    assert!(matches!(two_statements[0].kind, NodeKind::ExpressionStatement { .. }));
    assert!(matches!(two_statements[1].kind, NodeKind::FunctionDeclaration { .. }));
}

#[test]
fn automatic_semicolon_insertion_after_return_with_no_line_break() {
    let body = program("return\n1;");
    // `return` followed by a line break returns undefined; the `1;`
    // becomes its own (unreachable, but still parsed) statement.
    assert_eq!(body.len(), 2);
    match &body[0].kind {
        NodeKind::ReturnStatement { argument } => assert!(argument.is_none()),
        _ => panic!("expected ReturnStatement"),
    }
}

#[test]
fn if_without_braces_attaches_single_statement() {
    let body = program("if (a) b; else c;");
    match &body[0].kind {
        NodeKind::IfStatement { consequent, alternate, .. } => {
            assert!(matches!(consequent.kind, NodeKind::ExpressionStatement { .. }));
            assert!(alternate.is_some());
        }
        _ => panic!("expected IfStatement"),
    }
}

#[test]
fn labeled_statement_and_break_to_label() {
    let body = program("outer: for (;;) { break outer; }");
    match &body[0].kind {
        NodeKind::LabeledStatement { label, body } => {
            assert!(matches!(label.kind, NodeKind::Identifier { .. }));
            assert!(matches!(body.kind, NodeKind::ForStatement { .. }));
        }
        _ => panic!("expected LabeledStatement"),
    }
}

#[test]
fn for_of_distinguishes_from_for_in() {
    let body = program("for (const x of xs) {}\nfor (const y in ys) {}");
    assert!(matches!(body[0].kind, NodeKind::ForOfStatement { .. }));
    assert!(matches!(body[1].kind, NodeKind::ForInStatement { .. }));
}

#[test]
fn try_catch_finally_all_present() {
    let body = program("try { a(); } catch (e) { b(); } finally { c(); }");
    match &body[0].kind {
        NodeKind::TryStatement { handler, finalizer, .. } => {
            assert!(handler.is_some());
            assert!(finalizer.is_some());
        }
        _ => panic!("expected TryStatement"),
    }
}

#[test]
fn catch_binding_is_optional() {
    let body = program("try { a(); } catch { b(); }");
    match &body[0].kind {
        NodeKind::TryStatement { handler: Some(handler), .. } => match &handler.kind {
            NodeKind::CatchClause { param, .. } => assert!(param.is_none()),
            _ => panic!("expected CatchClause"),
        },
        _ => panic!("expected TryStatement with handler"),
    }
}

#[test]
fn switch_with_default_and_fallthrough_cases() {
    let body = program("switch (x) { case 1: case 2: a(); break; default: b(); }");
    match &body[0].kind {
        NodeKind::SwitchStatement { cases, .. } => assert_eq!(cases.len(), 3),
        _ => panic!("expected SwitchStatement"),
    }
}

#[test]
fn use_strict_directive_is_recorded_and_sets_strict_mode() {
    let node = parse("\"use strict\";\nvar x = 1;", Options::default()).unwrap();
    match node.kind {
        NodeKind::File { program, .. } => match program.kind {
            NodeKind::Program { directives, .. } => assert_eq!(directives, vec!["use strict".to_string()]),
            _ => panic!("expected Program"),
        },
        _ => panic!("expected File"),
    }
}

#[test]
fn destructuring_declaration_with_default_values() {
    let body = program("const { a = 1, b: { c } } = obj;");
    match &body[0].kind {
        NodeKind::VariableDeclaration { declarations, .. } => {
            assert_eq!(declarations.len(), 1);
            assert!(matches!(declarations[0].kind, NodeKind::VariableDeclarator { .. }));
        }
        _ => panic!("expected VariableDeclaration"),
    }
}

#[test]
fn object_pattern_rest_element_must_be_last() {
    assert!(parse_top_level_result("const { ...a, b } = obj;").is_err());
    assert!(parse_top_level_result("const { b, ...a } = obj;").is_ok());
}

fn parse_top_level_result(src: &str) -> Result<ecma_parse_core::Node, ecma_parse_core::ParseError> {
    parse(src, Options::default().with_source_type(SourceType::Module))
}

#[test]
fn empty_statement_is_its_own_node() {
    let body = program(";");
    assert!(matches!(body[0].kind, NodeKind::EmptyStatement));
}

#[test]
fn reserved_word_binding_is_a_grammar_error() {
    assert!(parse("let class = 1;", Options::default()).is_err());
}

#[test]
fn named_export_declaration_wraps_the_inner_declaration() {
    let body = program("export const a = 1;");
    match &body[0].kind {
        NodeKind::ExportNamedDeclaration { declaration, .. } => {
            assert!(matches!(declaration.as_ref().unwrap().kind, NodeKind::VariableDeclaration { .. }));
        }
        _ => panic!("expected ExportNamedDeclaration"),
    }
}

#[test]
fn export_specifier_list_without_a_declaration() {
    let body = program("const a = 1;\nexport { a };");
    match &body[1].kind {
        NodeKind::ExportNamedDeclaration { declaration, specifiers, .. } => {
            assert!(declaration.is_none());
            assert_eq!(specifiers.len(), 1);
        }
        _ => panic!("expected ExportNamedDeclaration"),
    }
}

#[test]
fn re_exporting_an_already_exported_name_is_rejected() {
    let src = "export const a = 1;\nexport { a };";
    assert!(parse(src, Options::default().with_source_type(SourceType::Module)).is_err());
}
