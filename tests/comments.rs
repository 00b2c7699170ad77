use ecma_parse_core::{parse, NodeKind, Options};

fn program_node(src: &str) -> ecma_parse_core::Node {
    let node = parse(src, Options::default()).unwrap();
    match node.kind {
        NodeKind::File { program, .. } => *program,
        _ => panic!("expected File"),
    }
}

fn statements(src: &str) -> Vec<ecma_parse_core::Node> {
    match program_node(src).kind {
        NodeKind::Program { body, .. } => body,
        _ => panic!("expected Program"),
    }
}

#[test]
fn leading_line_comment_attaches_to_the_following_statement() {
    let body = statements("// hello\nconst x = 1;");
    assert_eq!(body[0].leading_comments.len(), 1);
    assert_eq!(body[0].leading_comments[0].value, " hello");
}

#[test]
fn trailing_block_comment_with_nothing_after_it_becomes_program_trailing() {
    let program = program_node("const x = 1; /* done */");
    assert_eq!(program.trailing_comments.len(), 1);
    assert_eq!(program.trailing_comments[0].value, " done ");
}

#[test]
fn comment_between_two_statements_prefers_leading_attachment() {
    let body = statements("const x = 1;\n// between\nconst y = 2;");
    assert!(body[1].leading_comments.iter().any(|c| c.value == " between"));
}

#[test]
fn comments_do_not_change_the_resulting_ast_shape() {
    let with_comments = statements("const /* a */ x = 1;");
    let without_comments = statements("const x = 1;");
    assert!(matches!(with_comments[0].kind, NodeKind::VariableDeclaration { .. }));
    assert!(matches!(without_comments[0].kind, NodeKind::VariableDeclaration { .. }));
}

#[test]
fn multiple_leading_comments_are_all_retained_in_source_order() {
    let body = statements("// first\n// second\nconst x = 1;");
    assert_eq!(body[0].leading_comments.len(), 2);
    assert_eq!(body[0].leading_comments[0].value, " first");
    assert_eq!(body[0].leading_comments[1].value, " second");
}

#[test]
fn html_open_comment_is_a_legacy_line_comment() {
    let body = statements("<!-- comment\nconst x = 1;");
    assert_eq!(body.len(), 1);
    assert_eq!(body[0].leading_comments[0].value, " comment");
}

#[test]
fn html_close_comment_is_a_legacy_line_comment_only_at_line_start() {
    let body = statements("const x = 1;\n--> still a comment\nconst y = 2;");
    assert_eq!(body.len(), 2);
    assert!(body[1].leading_comments.iter().any(|c| c.value == " still a comment"));
}

#[test]
fn decrement_then_greater_than_is_not_mistaken_for_html_close_comment() {
    let body = statements("let x = 1;\nx --> 0;");
    assert_eq!(body.len(), 2);
    assert!(matches!(body[1].kind, NodeKind::ExpressionStatement { .. }));
}
