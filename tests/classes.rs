use ecma_parse_core::{parse, MethodKind, NodeKind, Options};

fn first_statement(src: &str) -> ecma_parse_core::Node {
    let node = parse(src, Options::default()).unwrap();
    match node.kind {
        NodeKind::File { program, .. } => match program.kind {
            NodeKind::Program { mut body, .. } => body.remove(0),
            _ => panic!("expected Program"),
        },
        _ => panic!("expected File"),
    }
}

fn class_body(src: &str) -> Vec<ecma_parse_core::Node> {
    match first_statement(src).kind {
        NodeKind::ClassDeclaration { body, .. } => match body.kind {
            NodeKind::ClassBody { body } => body,
            _ => panic!("expected ClassBody"),
        },
        _ => panic!("expected ClassDeclaration"),
    }
}

#[test]
fn class_with_extends_clause() {
    let node = first_statement("class A extends B {}");
    match node.kind {
        NodeKind::ClassDeclaration { id, super_class, .. } => {
            assert!(id.is_some());
            assert!(super_class.is_some());
        }
        _ => panic!("expected ClassDeclaration"),
    }
}

#[test]
fn constructor_method_is_tagged() {
    let members = class_body("class A { constructor(x) {} }");
    match &members[0].kind {
        NodeKind::ClassMethod { kind: MethodKind::Constructor, params, .. } => assert_eq!(params.len(), 1),
        _ => panic!("expected constructor ClassMethod"),
    }
}

#[test]
fn duplicate_constructors_are_rejected() {
    let src = "class A { constructor() {} constructor() {} }";
    assert!(parse(src, Options::default()).is_err());
}

#[test]
fn static_and_instance_methods_are_distinguished() {
    let members = class_body("class A { static s() {} m() {} }");
    match &members[0].kind {
        NodeKind::ClassMethod { is_static, .. } => assert!(is_static),
        _ => panic!("expected ClassMethod"),
    }
    match &members[1].kind {
        NodeKind::ClassMethod { is_static, .. } => assert!(!is_static),
        _ => panic!("expected ClassMethod"),
    }
}

#[test]
fn getter_and_setter_are_tagged_with_their_kind() {
    let members = class_body("class A { get x() {} set x(v) {} }");
    assert!(matches!(&members[0].kind, NodeKind::ClassMethod { kind: MethodKind::Get, .. }));
    assert!(matches!(&members[1].kind, NodeKind::ClassMethod { kind: MethodKind::Set, .. }));
}

#[test]
fn private_field_and_method_use_private_node_kinds() {
    let members = class_body("class A { #x = 1; #m() {} }");
    assert!(matches!(&members[0].kind, NodeKind::ClassPrivateProperty { .. }));
    assert!(matches!(&members[1].kind, NodeKind::ClassPrivateMethod { .. }));
}

#[test]
fn class_property_without_initializer() {
    let members = class_body("class A { x; }");
    match &members[0].kind {
        NodeKind::ClassProperty { value, .. } => assert!(value.is_none()),
        _ => panic!("expected ClassProperty"),
    }
}

#[test]
fn computed_method_key() {
    let members = class_body("class A { [key]() {} }");
    match &members[0].kind {
        NodeKind::ClassMethod { computed, .. } => assert!(computed),
        _ => panic!("expected ClassMethod"),
    }
}

#[test]
fn async_generator_method() {
    let members = class_body("class A { async *m() {} }");
    match &members[0].kind {
        NodeKind::ClassMethod { is_async, generator, .. } => {
            assert!(is_async);
            assert!(generator);
        }
        _ => panic!("expected ClassMethod"),
    }
}

#[test]
fn decorator_on_class_declaration() {
    let node = first_statement("@dec class A {}");
    match node.kind {
        NodeKind::ClassDeclaration { decorators, .. } => assert_eq!(decorators.len(), 1),
        _ => panic!("expected ClassDeclaration"),
    }
}

#[test]
fn decorator_on_class_member() {
    let members = class_body("class A { @dec m() {} }");
    match &members[0].kind {
        NodeKind::ClassMethod { decorators, .. } => assert_eq!(decorators.len(), 1),
        _ => panic!("expected ClassMethod"),
    }
}

#[test]
fn static_as_a_method_name_is_not_treated_as_the_modifier() {
    let members = class_body("class A { static() {} }");
    match &members[0].kind {
        NodeKind::ClassMethod { is_static, .. } => assert!(!is_static),
        _ => panic!("expected ClassMethod"),
    }
}

#[test]
fn class_expression_without_a_name() {
    let node = ecma_parse_core::parse_expression("(class {})", Options::default()).unwrap();
    match node.kind {
        NodeKind::ParenthesizedExpression { expression } => match expression.kind {
            NodeKind::ClassExpression { id, .. } => assert!(id.is_none()),
            _ => panic!("expected ClassExpression"),
        },
        _ => panic!("expected ParenthesizedExpression"),
    }
}
