use ecma_parse_core::{parse, NodeKind, Options, SourceType};

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
fn default_import_without_braces() {
    let body = program("import x from 'mod';");
    match &body[0].kind {
        NodeKind::ImportDeclaration { specifiers, source } => {
            assert_eq!(specifiers.len(), 1);
            assert!(matches!(specifiers[0].kind, NodeKind::ImportDefaultSpecifier { .. }));
            assert!(matches!(&source.kind, NodeKind::StringLiteral { value } if value == "mod"));
        }
        _ => panic!("expected ImportDeclaration"),
    }
}

#[test]
fn named_imports_with_rename() {
    let body = program("import { a, b as c } from 'mod';");
    match &body[0].kind {
        NodeKind::ImportDeclaration { specifiers, .. } => {
            assert_eq!(specifiers.len(), 2);
            match &specifiers[1].kind {
                NodeKind::ImportSpecifier { imported, local } => {
                    assert!(matches!(&imported.kind, NodeKind::Identifier { name, .. } if name == "b"));
                    assert!(matches!(&local.kind, NodeKind::Identifier { name, .. } if name == "c"));
                }
                _ => panic!("expected ImportSpecifier"),
            }
        }
        _ => panic!("expected ImportDeclaration"),
    }
}

#[test]
fn namespace_import() {
    let body = program("import * as ns from 'mod';");
    match &body[0].kind {
        NodeKind::ImportDeclaration { specifiers, .. } => {
            assert!(matches!(specifiers[0].kind, NodeKind::ImportNamespaceSpecifier { .. }));
        }
        _ => panic!("expected ImportDeclaration"),
    }
}

#[test]
fn default_and_named_import_combined() {
    let body = program("import def, { a } from 'mod';");
    match &body[0].kind {
        NodeKind::ImportDeclaration { specifiers, .. } => {
            assert_eq!(specifiers.len(), 2);
            assert!(matches!(specifiers[0].kind, NodeKind::ImportDefaultSpecifier { .. }));
            assert!(matches!(specifiers[1].kind, NodeKind::ImportSpecifier { .. }));
        }
        _ => panic!("expected ImportDeclaration"),
    }
}

#[test]
fn bare_side_effect_import_has_no_specifiers() {
    let body = program("import 'mod';");
    match &body[0].kind {
        NodeKind::ImportDeclaration { specifiers, .. } => assert!(specifiers.is_empty()),
        _ => panic!("expected ImportDeclaration"),
    }
}

#[test]
fn export_default_expression() {
    let body = program("export default 1 + 2;");
    match &body[0].kind {
        NodeKind::ExportDefaultDeclaration { declaration } => {
            assert!(matches!(declaration.kind, NodeKind::BinaryExpression { .. }));
        }
        _ => panic!("expected ExportDefaultDeclaration"),
    }
}

#[test]
fn export_default_function_declaration() {
    let body = program("export default function f() {}");
    match &body[0].kind {
        NodeKind::ExportDefaultDeclaration { declaration } => {
            assert!(matches!(declaration.kind, NodeKind::FunctionDeclaration { .. }));
        }
        _ => panic!("expected ExportDefaultDeclaration"),
    }
}

#[test]
fn export_all_from_source() {
    let body = program("export * from 'mod';");
    match &body[0].kind {
        NodeKind::ExportAllDeclaration { source } => {
            assert!(matches!(&source.kind, NodeKind::StringLiteral { value } if value == "mod"));
        }
        _ => panic!("expected ExportAllDeclaration"),
    }
}

#[test]
fn re_export_named_from_source() {
    let body = program("export { a, b as c } from 'mod';");
    match &body[0].kind {
        NodeKind::ExportNamedDeclaration { declaration, specifiers, source } => {
            assert!(declaration.is_none());
            assert_eq!(specifiers.len(), 2);
            assert!(source.is_some());
        }
        _ => panic!("expected ExportNamedDeclaration"),
    }
}
