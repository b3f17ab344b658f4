//! Rendering finalized [`Documentation`] into the Markdown reference text.
//!
//! Every rendering routine here is pure: the pass walks the collection in
//! input order, produces one fragment per item or member, and collects a
//! diagnostic for every record it has no rule for. The caller joins the
//! fragments once, at the end.

use std::fmt;

use crate::doc::{ClassMember, DocumentKind, Documentation, MemberKind, Signature};
use crate::render::signature::{render_signature, TypeAnnotations};

pub mod signature;

/// Markdown text destined for the reference document.
#[derive(Clone, Debug)]
pub struct MarkdownString(pub String);

/// Information passed to the render phase.
#[derive(Clone, Copy, Debug, Default)]
pub struct RenderPlan {
    /// Annotate method heading parameters with their types instead of the
    /// names-only shorthand.
    pub method_arg_types: bool,
}

impl RenderPlan {
    pub fn new(method_arg_types: bool) -> RenderPlan {
        RenderPlan { method_arg_types }
    }

    fn method_annotations(&self) -> TypeAnnotations {
        if self.method_arg_types {
            TypeAnnotations::Full
        } else {
            TypeAnnotations::NamesOnly
        }
    }
}

/// A [`Document`](crate::doc::Document), or one of its members, rendered
/// to Markdown.
#[derive(Clone, Debug)]
pub struct RenderedDocument {
    /// The rendered heading, reported as per-item progress. Separator
    /// fragments have none.
    pub heading: Option<String>,
    pub fragment: MarkdownString,
}

impl RenderedDocument {
    fn new(heading: String, fragment: String) -> RenderedDocument {
        RenderedDocument {
            heading: Some(heading),
            fragment: MarkdownString(fragment),
        }
    }

    /// The blank-line separator appended after a class member list.
    fn separator() -> RenderedDocument {
        RenderedDocument {
            heading: None,
            fragment: MarkdownString("\n\n".to_string()),
        }
    }
}

/// A record the renderer has no rule for, collected for reporting instead
/// of being silently dropped.
#[derive(Clone, Debug)]
pub struct Diagnostic {
    /// Best-effort identity of the record, e.g. `Widget.on_click`.
    pub path: String,
    /// Why the record was skipped.
    pub reason: String,
    /// The raw record, for manual inspection.
    pub record: serde_json::Value,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "skipped `{}`: {}", self.path, self.reason)
    }
}

/// All fragments and diagnostics produced by one render pass, both in
/// input order.
#[derive(Debug, Default)]
pub struct RenderedDocumentation {
    pub docs: Vec<RenderedDocument>,
    pub diagnostics: Vec<Diagnostic>,
}

impl RenderedDocumentation {
    /// Top level Markdown rendering for all [`Documentation`] of a package.
    pub fn from_raw_docs(raw: &Documentation, render_plan: &RenderPlan) -> RenderedDocumentation {
        let mut rendered = RenderedDocumentation::default();
        for doc in &raw.0 {
            match &doc.kind {
                DocumentKind::Class { rawdesc, members } => {
                    rendered.docs.push(class_header(&doc.name, rawdesc.as_deref()));
                    for member in members {
                        rendered.render_member(&doc.name, member, render_plan);
                    }
                    rendered.docs.push(RenderedDocument::separator());
                }
                DocumentKind::Function { signature, rawdesc } => {
                    rendered
                        .docs
                        .push(function_doc(&doc.name, signature, rawdesc.as_deref()));
                }
                DocumentKind::Field { view, rawdesc } => {
                    rendered
                        .docs
                        .push(field_doc(&doc.name, view, rawdesc.as_deref()));
                }
                DocumentKind::GlobalBinding { view, record } => {
                    rendered.diagnostics.push(Diagnostic {
                        path: doc.name.clone(),
                        reason: format!("no rendering for a global `{view}` binding"),
                        record: record.clone(),
                    });
                }
                DocumentKind::Unrecognized { tag, record } => {
                    rendered.diagnostics.push(Diagnostic {
                        path: doc.name.clone(),
                        reason: format!("unrecognized define kind `{tag}`"),
                        record: record.clone(),
                    });
                }
            }
        }
        rendered
    }

    fn render_member(&mut self, owner: &str, member: &ClassMember, render_plan: &RenderPlan) {
        match &member.kind {
            MemberKind::Method { signature, rawdesc } => {
                self.docs.push(method_doc(
                    owner,
                    &member.name,
                    signature,
                    rawdesc.as_deref(),
                    render_plan,
                ));
            }
            MemberKind::Field { view, rawdesc } => {
                self.docs.push(field_doc(&member.name, view, rawdesc.as_deref()));
            }
            MemberKind::Declaration { view } => {
                self.docs.push(declaration_doc(owner, &member.name, view));
            }
            MemberKind::Unrecognized { tag, record } => {
                self.diagnostics.push(Diagnostic {
                    path: format!("{owner}.{}", member.name),
                    reason: format!("unrecognized member kind `{tag}`"),
                    record: record.clone(),
                });
            }
        }
    }

    /// Joins every fragment in order and trims the result into the final
    /// document text.
    pub fn finish(&self) -> String {
        let mut text = String::new();
        for doc in &self.docs {
            text.push_str(&doc.fragment.0);
        }
        text.trim().to_string()
    }
}

fn class_header(name: &str, rawdesc: Option<&str>) -> RenderedDocument {
    let mut fragment = format!("# Class {name}\n");
    if let Some(desc) = rawdesc {
        fragment.push_str(desc);
        fragment.push_str("\n\n");
    }
    RenderedDocument::new(format!("Class {name}"), fragment)
}

fn function_doc(name: &str, signature: &Signature, rawdesc: Option<&str>) -> RenderedDocument {
    let signature = render_signature(&signature.args, &signature.returns, TypeAnnotations::Full);
    let heading = format!("Function {name}{signature}");
    let fragment = format!("# {heading}\n{}", body(rawdesc));
    RenderedDocument::new(heading, fragment)
}

fn field_doc(name: &str, view: &str, rawdesc: Option<&str>) -> RenderedDocument {
    let heading = format!("Field {name}: {view}");
    let fragment = format!("# {heading}\n{}", body(rawdesc));
    RenderedDocument::new(heading, fragment)
}

fn method_doc(
    owner: &str,
    name: &str,
    signature: &Signature,
    rawdesc: Option<&str>,
    render_plan: &RenderPlan,
) -> RenderedDocument {
    let signature = render_signature(
        &signature.args,
        &signature.returns,
        render_plan.method_annotations(),
    );
    let heading = format!("{owner}.{name}{signature}");
    let fragment = format!("## {heading}\n{}", body(rawdesc));
    RenderedDocument::new(heading, fragment)
}

fn declaration_doc(owner: &str, name: &str, view: &str) -> RenderedDocument {
    let heading = format!("{owner}.{name}: {view}");
    let fragment = format!("## {heading}\n\n");
    RenderedDocument::new(heading, fragment)
}

/// The block following a heading line: the description when there is one,
/// then the blank line terminating the block.
fn body(rawdesc: Option<&str>) -> String {
    match rawdesc {
        Some(desc) => format!("{desc}\n\n"),
        None => "\n".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use expect_test::expect;
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::doc::{Document, TypeDescriptor};

    fn descriptor(name: Option<&str>, tag: Option<&str>, view: &str) -> TypeDescriptor {
        TypeDescriptor {
            name: name.map(str::to_string),
            tag: tag.map(str::to_string),
            view: view.to_string(),
        }
    }

    fn render(docs: Vec<Document>) -> RenderedDocumentation {
        RenderedDocumentation::from_raw_docs(&Documentation(docs), &RenderPlan::default())
    }

    #[test]
    fn global_function_block_is_blank_line_terminated() {
        let rendered = render(vec![Document {
            name: "foo".to_string(),
            kind: DocumentKind::Function {
                signature: Signature {
                    args: vec![descriptor(Some("x"), None, "number")],
                    returns: vec![],
                },
                rawdesc: None,
            },
        }]);
        assert_eq!(rendered.docs[0].fragment.0, "# Function foo(x: number)\n\n");
        assert_eq!(rendered.finish(), "# Function foo(x: number)");
    }

    #[test]
    fn class_field_assignment_renders_under_the_class_header() {
        let rendered = render(vec![Document {
            name: "Widget".to_string(),
            kind: DocumentKind::Class {
                rawdesc: None,
                members: vec![ClassMember {
                    name: "size".to_string(),
                    kind: MemberKind::Field {
                        view: "number".to_string(),
                        rawdesc: None,
                    },
                }],
            },
        }]);
        assert_eq!(rendered.finish(), "# Class Widget\n# Field size: number");
    }

    #[test]
    fn method_signature_suffix_keeps_unnamed_types_and_returns() {
        let rendered = render(vec![Document {
            name: "Widget".to_string(),
            kind: DocumentKind::Class {
                rawdesc: None,
                members: vec![ClassMember {
                    name: "compare".to_string(),
                    kind: MemberKind::Method {
                        signature: Signature {
                            args: vec![
                                descriptor(None, None, "string"),
                                descriptor(None, None, "string"),
                            ],
                            returns: vec![descriptor(None, None, "boolean")],
                        },
                        rawdesc: None,
                    },
                }],
            },
        }]);
        assert_eq!(
            rendered.docs[1].fragment.0,
            "## Widget.compare(string, string) -> boolean\n\n"
        );
    }

    #[test]
    fn method_headings_can_carry_full_annotations() {
        let docs = Documentation(vec![Document {
            name: "Widget".to_string(),
            kind: DocumentKind::Class {
                rawdesc: None,
                members: vec![ClassMember {
                    name: "resize".to_string(),
                    kind: MemberKind::Method {
                        signature: Signature {
                            args: vec![descriptor(Some("factor"), None, "number")],
                            returns: vec![],
                        },
                        rawdesc: None,
                    },
                }],
            },
        }]);
        let shorthand = RenderedDocumentation::from_raw_docs(&docs, &RenderPlan::new(false));
        let annotated = RenderedDocumentation::from_raw_docs(&docs, &RenderPlan::new(true));
        assert_eq!(shorthand.docs[1].fragment.0, "## Widget.resize(factor)\n\n");
        assert_eq!(
            annotated.docs[1].fragment.0,
            "## Widget.resize(factor: number)\n\n"
        );
    }

    #[test]
    fn unrecognized_items_are_reported_and_later_items_still_render() {
        let rendered = render(vec![
            Document {
                name: "Alias".to_string(),
                kind: DocumentKind::Unrecognized {
                    tag: "doc.alias".to_string(),
                    record: serde_json::Value::Null,
                },
            },
            Document {
                name: "foo".to_string(),
                kind: DocumentKind::Function {
                    signature: Signature::default(),
                    rawdesc: None,
                },
            },
        ]);
        assert_eq!(rendered.diagnostics.len(), 1);
        assert_eq!(
            rendered.diagnostics[0].to_string(),
            "skipped `Alias`: unrecognized define kind `doc.alias`"
        );
        assert_eq!(rendered.finish(), "# Function foo()");
    }

    #[test]
    fn global_bindings_contribute_no_text() {
        let rendered = render(vec![Document {
            name: "VERSION".to_string(),
            kind: DocumentKind::GlobalBinding {
                view: "string".to_string(),
                record: serde_json::Value::Null,
            },
        }]);
        assert!(rendered.docs.is_empty());
        assert_eq!(rendered.finish(), "");
        assert_eq!(rendered.diagnostics.len(), 1);
    }

    #[test]
    fn items_render_in_input_order() {
        let rendered = render(vec![
            Document {
                name: "first".to_string(),
                kind: DocumentKind::Function {
                    signature: Signature::default(),
                    rawdesc: None,
                },
            },
            Document {
                name: "second".to_string(),
                kind: DocumentKind::Field {
                    view: "number".to_string(),
                    rawdesc: None,
                },
            },
        ]);
        let headings: Vec<_> = rendered
            .docs
            .iter()
            .filter_map(|doc| doc.heading.as_deref())
            .collect();
        assert_eq!(headings, ["Function first()", "Field second: number"]);
    }

    #[test]
    fn renders_a_full_class_reference() {
        let rendered = render(vec![
            Document {
                name: "Widget".to_string(),
                kind: DocumentKind::Class {
                    rawdesc: Some("A rectangular screen element.".to_string()),
                    members: vec![
                        ClassMember {
                            name: "size".to_string(),
                            kind: MemberKind::Field {
                                view: "number".to_string(),
                                rawdesc: Some("Edge length in pixels.".to_string()),
                            },
                        },
                        ClassMember {
                            name: "visible".to_string(),
                            kind: MemberKind::Declaration {
                                view: "boolean".to_string(),
                            },
                        },
                        ClassMember {
                            name: "resize".to_string(),
                            kind: MemberKind::Method {
                                signature: Signature {
                                    args: vec![descriptor(Some("factor"), None, "number")],
                                    returns: vec![descriptor(None, None, "Widget")],
                                },
                                rawdesc: Some("Grows or shrinks the widget.".to_string()),
                            },
                        },
                    ],
                },
            },
            Document {
                name: "dump".to_string(),
                kind: DocumentKind::Function {
                    signature: Signature {
                        args: vec![
                            descriptor(Some("value"), None, "any"),
                            descriptor(None, Some("..."), "any"),
                        ],
                        returns: vec![descriptor(Some("text"), None, "string")],
                    },
                    rawdesc: Some("Serializes a value for debugging.".to_string()),
                },
            },
        ]);
        expect![[r#"# Class Widget
A rectangular screen element.

# Field size: number
Edge length in pixels.

## Widget.visible: boolean

## Widget.resize(factor) -> Widget
Grows or shrinks the widget.



# Function dump(value: any, ...any) -> text: string
Serializes a value for debugging."#]]
        .assert_eq(&rendered.finish());
    }
}
