use ecma_parse_core::{parse_expression, DialectPlugin, NodeKind, Options};

fn jsx(src: &str) -> ecma_parse_core::Node {
    parse_expression(src, Options::default().with_plugin(DialectPlugin::Jsx)).unwrap()
}

#[test]
fn jsx_requires_the_plugin_to_be_enabled() {
    assert!(parse_expression("<Foo />", Options::default()).is_err());
}

#[test]
fn self_closing_element_with_string_attribute() {
    let node = jsx("<Foo bar=\"baz\" />");
    match node.kind {
        NodeKind::JSXElement { opening_element, .. } => match opening_element.kind {
            NodeKind::JSXOpeningElement { name, attributes, self_closing } => {
                assert!(self_closing);
                assert!(matches!(name.kind, NodeKind::JSXIdentifier { name } if name == "Foo"));
                assert_eq!(attributes.len(), 1);
            }
            _ => panic!("expected JSXOpeningElement"),
        },
        _ => panic!("expected JSXElement"),
    }
}

#[test]
fn member_expression_tag_name() {
    let node = jsx("<Foo.Bar />");
    match node.kind {
        NodeKind::JSXElement { opening_element, .. } => match opening_element.kind {
            NodeKind::JSXOpeningElement { name, .. } => assert!(matches!(name.kind, NodeKind::JSXMemberExpression { .. })),
            _ => panic!("expected JSXOpeningElement"),
        },
        _ => panic!("expected JSXElement"),
    }
}

#[test]
fn namespaced_tag_name() {
    let node = jsx("<svg:rect />");
    match node.kind {
        NodeKind::JSXElement { opening_element, .. } => match opening_element.kind {
            NodeKind::JSXOpeningElement { name, .. } => assert!(matches!(name.kind, NodeKind::JSXNamespacedName { .. })),
            _ => panic!("expected JSXOpeningElement"),
        },
        _ => panic!("expected JSXElement"),
    }
}

#[test]
fn spread_attribute() {
    let node = jsx("<Foo {...props} />");
    match node.kind {
        NodeKind::JSXElement { opening_element, .. } => match opening_element.kind {
            NodeKind::JSXOpeningElement { attributes, .. } => {
                assert_eq!(attributes.len(), 1);
                assert!(matches!(attributes[0].kind, NodeKind::JSXSpreadAttribute { .. }));
            }
            _ => panic!("expected JSXOpeningElement"),
        },
        _ => panic!("expected JSXElement"),
    }
}

#[test]
fn expression_container_child() {
    let node = jsx("<div>{value}</div>");
    match node.kind {
        NodeKind::JSXElement { children, closing_element, .. } => {
            assert!(closing_element.is_some());
            assert_eq!(children.len(), 1);
            assert!(matches!(children[0].kind, NodeKind::JSXExpressionContainer { .. }));
        }
        _ => panic!("expected JSXElement"),
    }
}

#[test]
fn nested_elements_as_children() {
    let node = jsx("<div><span /></div>");
    match node.kind {
        NodeKind::JSXElement { children, .. } => {
            assert_eq!(children.len(), 1);
            assert!(matches!(children[0].kind, NodeKind::JSXElement { .. }));
        }
        _ => panic!("expected JSXElement"),
    }
}

#[test]
fn fragment_with_text_child() {
    let node = jsx("<>text</>");
    match node.kind {
        NodeKind::JSXFragment { children } => {
            assert_eq!(children.len(), 1);
            assert!(matches!(&children[0].kind, NodeKind::JSXText { value } if value == "text"));
        }
        _ => panic!("expected JSXFragment"),
    }
}

#[test]
fn unterminated_element_is_a_grammar_error() {
    assert!(parse_expression("<div>", Options::default().with_plugin(DialectPlugin::Jsx)).is_err());
}
