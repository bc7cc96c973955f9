/// Variable and constant assignment extraction
/// Handles plain, annotated and tuple-unpacking assignments
use super::helpers;
use crate::extractors::base::BaseExtractor;
use crate::graph::{Binding, TypeRef};
use tree_sitter::Node;

/// One assigned name
pub(super) enum Target {
    /// `x = 1`, `x: int = 1`, or one name of `a, b = 1, 2`
    Name {
        name: String,
        hint: Option<TypeRef>,
        value: Option<String>,
    },
    /// `self.x = ...`
    SelfAttribute { name: String, hint: Option<TypeRef> },
}

/// Names bound by an `assignment` node; values of tuple unpacking are
/// paired by position when the right side is a matching tuple
pub(super) fn assignment_targets(base: &BaseExtractor, assignment: Node) -> Vec<Target> {
    let Some(left) = assignment.child_by_field_name("left") else {
        return Vec::new();
    };
    let hint = base
        .get_field_text(&assignment, "type")
        .map(|t| helpers::type_ref(&t));
    let right = assignment.child_by_field_name("right");

    match left.kind() {
        "identifier" => vec![Target::Name {
            name: base.get_node_text(&left),
            hint,
            value: right.map(|r| base.get_node_text(&r)),
        }],
        "attribute" => {
            let is_self = left
                .child_by_field_name("object")
                .is_some_and(|o| base.get_node_text(&o) == "self");
            match (is_self, base.get_field_text(&left, "attribute")) {
                (true, Some(name)) => vec![Target::SelfAttribute { name, hint }],
                _ => Vec::new(),
            }
        }
        "pattern_list" | "tuple_pattern" => {
            let names: Vec<String> = base
                .named_children(&left)
                .into_iter()
                .filter(|n| n.kind() == "identifier")
                .map(|n| base.get_node_text(&n))
                .collect();
            let values: Vec<String> = right
                .filter(|r| matches!(r.kind(), "expression_list" | "tuple"))
                .map(|r| {
                    base.named_children(&r)
                        .iter()
                        .map(|v| base.get_node_text(v))
                        .collect()
                })
                .unwrap_or_default();
            let paired = values.len() == names.len();
            names
                .into_iter()
                .enumerate()
                .map(|(i, name)| Target::Name {
                    name,
                    hint: None,
                    value: if paired { values.get(i).cloned() } else { None },
                })
                .collect()
        }
        _ => Vec::new(),
    }
}

/// Module-level assignment statement; UPPER_CASE names are constants
///
/// Every name bound by one statement shares the statement's span.
pub(super) fn extract_assignment(base: &BaseExtractor, statement: Node) -> Vec<(Binding, bool)> {
    let Some(assignment) = statement
        .named_child(0)
        .filter(|n| n.kind() == "assignment")
    else {
        return Vec::new();
    };
    let comment = base.find_doc_comment(&statement);
    let span = base.span(&statement);

    assignment_targets(base, assignment)
        .into_iter()
        .filter_map(|target| match target {
            Target::Name { name, hint, value } => {
                let is_constant = helpers::is_constant_name(&name);
                let mut binding = Binding::new(name);
                binding.exported = helpers::is_exported(&binding.name);
                binding.ty = hint;
                binding.value = value;
                binding.comment = comment.clone();
                binding.span = span.clone();
                Some((binding, is_constant))
            }
            Target::SelfAttribute { .. } => None,
        })
        .collect()
}
