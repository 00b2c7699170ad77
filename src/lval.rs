//! Conversion between expression and pattern trees, and binding-target
//! validation.
//!
//! Babel's `toAssignable`/`checkLVal` mutate the node in place; here the
//! same effect is a `match` that replaces `node.kind` with the pattern
//! variant, since nodes are plain owned values (no arena, no shared
//! references to invalidate).

use crate::ast::{Node, NodeKind};
use crate::error::{ParseError, SyntaxErrorKind};
use crate::position::Position;
use crate::token::{ALWAYS_RESERVED, STRICT_RESERVED};

fn err(pos: Position, message: impl Into<String>) -> ParseError {
    ParseError::new(0, pos, SyntaxErrorKind::Grammar, message)
}

/// Reinterprets an expression node as an assignment target, recursing
/// into object/array literals and converting them to the matching
/// pattern shape. `is_binding` distinguishes a declaration target
/// (`let`/`const`/parameter — only identifiers and patterns allowed)
/// from a plain assignment target (member expressions also allowed).
pub fn to_assignable(mut node: Node, is_binding: bool) -> Result<Node, ParseError> {
    match node.kind {
        NodeKind::ObjectExpression { properties } => {
            let mut converted = Vec::with_capacity(properties.len());
            for prop in properties {
                converted.push(to_assignable(prop, is_binding)?);
            }
            node.kind = NodeKind::ObjectPattern { properties: converted };
        }
        NodeKind::ObjectProperty { key, value, computed, shorthand } => {
            let value = to_assignable(*value, is_binding)?;
            node.kind = NodeKind::ObjectProperty { key, value: Box::new(value), computed, shorthand };
        }
        NodeKind::ArrayExpression { elements } => {
            let mut converted = Vec::with_capacity(elements.len());
            for el in elements {
                converted.push(match el {
                    Some(n) => Some(to_assignable(n, is_binding)?),
                    None => None,
                });
            }
            node.kind = NodeKind::ArrayPattern { elements: converted };
        }
        NodeKind::AssignmentExpression { operator, left, right } => {
            if operator != "=" {
                return Err(err(node.loc.start, "Only '=' operator can be used for specifying default value"));
            }
            node.kind = NodeKind::AssignmentPattern { left, right };
        }
        NodeKind::SpreadElement { argument } => {
            let argument = to_assignable(*argument, is_binding)?;
            node.kind = NodeKind::RestElement { argument: Box::new(argument) };
        }
        NodeKind::ParenthesizedExpression { expression } => {
            return to_assignable(*expression, is_binding);
        }
        NodeKind::MemberExpression { .. } if is_binding => {
            return Err(err(node.loc.start, "Binding member expression"));
        }
        _ => {}
    }
    Ok(node)
}

/// Validates that `node` is a legal assignment/binding target and that
/// an identifier target isn't a reserved word or (in strict mode)
/// `eval`/`arguments`.
pub fn check_lval(node: &Node, is_binding: bool, strict: bool) -> Result<(), ParseError> {
    match &node.kind {
        NodeKind::Identifier { name, .. } => {
            if ALWAYS_RESERVED.contains(&name.as_str()) {
                return Err(err(node.loc.start, format!("Binding '{}' is a reserved word", name)));
            }
            if strict {
                if STRICT_RESERVED.contains(&name.as_str()) {
                    return Err(err(node.loc.start, format!("Binding '{}' in strict mode", name)));
                }
                if name == "eval" || name == "arguments" {
                    return Err(err(node.loc.start, format!("Binding '{}' in strict mode", name)));
                }
            }
            Ok(())
        }
        NodeKind::MemberExpression { .. } => {
            if is_binding {
                Err(err(node.loc.start, "Binding member expression"))
            } else {
                Ok(())
            }
        }
        NodeKind::ObjectPattern { properties } => {
            for (i, prop) in properties.iter().enumerate() {
                if matches!(prop.kind, NodeKind::RestElement { .. }) && i + 1 != properties.len() {
                    return Err(err(prop.loc.start, "Rest element must be last element"));
                }
                check_lval(prop, is_binding, strict)?;
            }
            Ok(())
        }
        NodeKind::ObjectProperty { value, .. } => check_lval(value, is_binding, strict),
        NodeKind::ArrayPattern { elements } => {
            for el in elements.iter().flatten() {
                check_lval(el, is_binding, strict)?;
            }
            Ok(())
        }
        NodeKind::AssignmentPattern { left, .. } => check_lval(left, is_binding, strict),
        NodeKind::RestElement { argument } => check_lval(argument, is_binding, strict),
        _ => Err(err(node.loc.start, "Invalid left-hand side in assignment")),
    }
}
