use ecma_parse_core::{parse, parse_expression, DialectPlugin, NodeKind, Options};

fn ts_statement(src: &str) -> ecma_parse_core::Node {
    let node = parse(src, Options::default().with_plugin(DialectPlugin::TypeScript)).unwrap();
    match node.kind {
        NodeKind::File { program, .. } => match program.kind {
            NodeKind::Program { mut body, .. } => body.remove(0),
            _ => panic!("expected Program"),
        },
        _ => panic!("expected File"),
    }
}

fn flow_statement(src: &str) -> ecma_parse_core::Node {
    let node = parse(src, Options::default().with_plugin(DialectPlugin::Flow)).unwrap();
    match node.kind {
        NodeKind::File { program, .. } => match program.kind {
            NodeKind::Program { mut body, .. } => body.remove(0),
            _ => panic!("expected Program"),
        },
        _ => panic!("expected File"),
    }
}

#[test]
fn typescript_and_flow_plugins_are_mutually_exclusive() {
    let result = ecma_parse_core::Parser::new("x", Options::default().with_plugin(DialectPlugin::Flow).with_plugin(DialectPlugin::TypeScript));
    assert!(result.is_err());
}

#[test]
fn ts_colon_type_annotation_attaches_to_binding() {
    let node = ts_statement("let x: number;");
    match node.kind {
        NodeKind::VariableDeclaration { declarations, .. } => match &declarations[0].kind {
            NodeKind::VariableDeclarator { id, .. } => match &id.kind {
                NodeKind::Identifier { type_annotation: Some(t), .. } => assert!(matches!(t.kind, NodeKind::TSNumberKeyword)),
                _ => panic!("expected annotated Identifier"),
            },
            _ => panic!("expected VariableDeclarator"),
        },
        _ => panic!("expected VariableDeclaration"),
    }
}

#[test]
fn flow_nullable_and_primitive_type_annotation() {
    let node = flow_statement("let x: ?string;");
    match node.kind {
        NodeKind::VariableDeclaration { declarations, .. } => match &declarations[0].kind {
            NodeKind::VariableDeclarator { id, .. } => match &id.kind {
                NodeKind::Identifier { type_annotation: Some(t), .. } => match &t.kind {
                    NodeKind::FlowNullableTypeAnnotation { type_annotation } => {
                        assert!(matches!(type_annotation.kind, NodeKind::FlowStringTypeAnnotation));
                    }
                    _ => panic!("expected FlowNullableTypeAnnotation"),
                },
                _ => panic!("expected annotated Identifier"),
            },
            _ => panic!("expected VariableDeclarator"),
        },
        _ => panic!("expected VariableDeclaration"),
    }
}

#[test]
fn ts_union_type_collects_all_members() {
    let node = ts_statement("let x: string | number | boolean;");
    match node.kind {
        NodeKind::VariableDeclaration { declarations, .. } => match &declarations[0].kind {
            NodeKind::VariableDeclarator { id, .. } => match &id.kind {
                NodeKind::Identifier { type_annotation: Some(t), .. } => match &t.kind {
                    NodeKind::TSUnionType { types } => assert_eq!(types.len(), 3),
                    _ => panic!("expected TSUnionType"),
                },
                _ => panic!("expected annotated Identifier"),
            },
            _ => panic!("expected VariableDeclarator"),
        },
        _ => panic!("expected VariableDeclaration"),
    }
}

#[test]
fn ts_type_alias_declaration() {
    let node = ts_statement("type X = number;");
    match node.kind {
        NodeKind::TSTypeAliasDeclaration { type_annotation, .. } => {
            assert!(matches!(type_annotation.kind, NodeKind::TSNumberKeyword));
        }
        _ => panic!("expected TSTypeAliasDeclaration"),
    }
}

#[test]
fn flow_type_alias_declaration() {
    let node = flow_statement("type X = number;");
    match node.kind {
        NodeKind::FlowTypeAlias { right, .. } => assert!(matches!(right.kind, NodeKind::FlowNumberTypeAnnotation)),
        _ => panic!("expected FlowTypeAlias"),
    }
}

#[test]
fn ts_interface_declaration_with_property_signatures() {
    let node = ts_statement("interface P { x: number; y: string; }");
    match node.kind {
        NodeKind::TSInterfaceDeclaration { body, .. } => assert_eq!(body.len(), 2),
        _ => panic!("expected TSInterfaceDeclaration"),
    }
}

#[test]
fn ts_as_expression_postfix() {
    let node = parse_expression("x as number", Options::default().with_plugin(DialectPlugin::TypeScript)).unwrap();
    match node.kind {
        NodeKind::TSAsExpression { type_annotation, .. } => assert!(matches!(type_annotation.kind, NodeKind::TSNumberKeyword)),
        _ => panic!("expected TSAsExpression"),
    }
}

#[test]
fn ts_generic_type_reference_skips_type_arguments() {
    let node = ts_statement("let x: Array<number>;");
    match node.kind {
        NodeKind::VariableDeclaration { declarations, .. } => match &declarations[0].kind {
            NodeKind::VariableDeclarator { id, .. } => match &id.kind {
                NodeKind::Identifier { type_annotation: Some(t), .. } => {
                    assert!(matches!(t.kind, NodeKind::TSTypeReference { .. }));
                }
                _ => panic!("expected annotated Identifier"),
            },
            _ => panic!("expected VariableDeclarator"),
        },
        _ => panic!("expected VariableDeclaration"),
    }
}

#[test]
fn return_type_annotation_on_function_is_parsed_and_discarded() {
    let node = ts_statement("function f(): number { return 1; }");
    assert!(matches!(node.kind, NodeKind::FunctionDeclaration { .. }));
}
