//! The one shared routine for formatting callable signatures.

use crate::doc::TypeDescriptor;

/// How parameters appear in a rendered signature.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TypeAnnotations {
    /// `name: type` for named parameters, bare `type` otherwise.
    Full,
    /// `name` for named parameters, bare `type` otherwise.
    NamesOnly,
}

/// The type tag marking a variadic parameter.
const VARIADIC_TAG: &str = "...";

/// Renders the signature suffix of a callable: the parenthesized parameter
/// list, then ` -> ` and the return list when any returns are present.
///
/// A callable with no parameters still renders `()`, and one with no
/// returns renders no arrow at all. Descriptor order is preserved verbatim.
pub fn render_signature(
    args: &[TypeDescriptor],
    returns: &[TypeDescriptor],
    annotations: TypeAnnotations,
) -> String {
    let params = args
        .iter()
        .map(|descriptor| {
            let text = render_descriptor(descriptor, annotations);
            if descriptor.tag.as_deref() == Some(VARIADIC_TAG) {
                // The prefix rides directly on the descriptor text.
                format!("{VARIADIC_TAG}{text}")
            } else {
                text
            }
        })
        .collect::<Vec<_>>()
        .join(", ");
    let mut signature = format!("({params})");
    if !returns.is_empty() {
        let returns = returns
            .iter()
            .map(|descriptor| render_descriptor(descriptor, TypeAnnotations::Full))
            .collect::<Vec<_>>()
            .join(", ");
        signature.push_str(" -> ");
        signature.push_str(&returns);
    }
    signature
}

fn render_descriptor(descriptor: &TypeDescriptor, annotations: TypeAnnotations) -> String {
    match (&descriptor.name, annotations) {
        (Some(name), TypeAnnotations::Full) => format!("{name}: {}", descriptor.view),
        (Some(name), TypeAnnotations::NamesOnly) => name.clone(),
        (None, _) => descriptor.view.clone(),
    }
}
