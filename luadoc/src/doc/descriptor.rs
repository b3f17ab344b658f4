//! Determine whether a raw artifact record is documentable.

use anyhow::{anyhow, Result};
use serde::Serialize;

use crate::doc::{
    ClassMember, DocField, DocItem, Document, DocumentKind, MemberKind, Signature,
    FOREIGN_FILE_MARKER,
};

const CLASS_TAG: &str = "doc.class";
const GLOBAL_TAG: &str = "setglobal";
const FIELD_TAG: &str = "setfield";
const FIELD_DECLARATION_TAG: &str = "doc.field";
/// The view string marking a callable value.
const FUNCTION_VIEW: &str = "function";

/// Used in deciding whether or not a raw record makes it into the
/// [`Documentation`](crate::doc::Documentation).
pub(crate) enum Descriptor {
    Documentable(Document),
    NonDocumentable,
}

impl Descriptor {
    /// Classifies one top-level record.
    ///
    /// Foreign-origin items, and items with no recorded origin at all, are
    /// [`Descriptor::NonDocumentable`]. Everything else becomes a
    /// [`Document`], falling back to [`DocumentKind::Unrecognized`] when
    /// the define kind is unknown.
    pub(crate) fn from_doc_item(item: &DocItem) -> Result<Descriptor> {
        let define = item.defines.first().ok_or_else(|| {
            anyhow!(
                "item `{}` has no define site",
                item.name.as_deref().unwrap_or("<unnamed>")
            )
        })?;
        if define
            .file
            .as_deref()
            .map_or(true, |file| file.starts_with(FOREIGN_FILE_MARKER))
        {
            return Ok(Descriptor::NonDocumentable);
        }

        let document = match define.tag.as_str() {
            CLASS_TAG => {
                let view = define
                    .view
                    .clone()
                    .ok_or_else(|| anyhow!("class define site is missing its rendered view"))?;
                let members = item
                    .fields
                    .iter()
                    .map(ClassMember::from_doc_field)
                    .collect::<Result<Vec<_>>>()?;
                Document {
                    name: view,
                    kind: DocumentKind::Class {
                        rawdesc: define.rawdesc.clone(),
                        members,
                    },
                }
            }
            GLOBAL_TAG | FIELD_TAG => {
                let name = item
                    .name
                    .clone()
                    .ok_or_else(|| anyhow!("`{}` item has no name", define.tag))?;
                let view = define.view.clone().ok_or_else(|| {
                    anyhow!("define site of `{name}` is missing its rendered view")
                })?;
                let extends = define.extends.as_ref();
                let kind = if view == FUNCTION_VIEW {
                    DocumentKind::Function {
                        signature: Signature::from_extends(extends),
                        rawdesc: extends.and_then(|extends| extends.rawdesc.clone()),
                    }
                } else if define.tag == GLOBAL_TAG {
                    DocumentKind::GlobalBinding {
                        view,
                        record: raw_record(item),
                    }
                } else {
                    DocumentKind::Field {
                        view: extends
                            .and_then(|extends| extends.view.clone())
                            .unwrap_or(view),
                        rawdesc: extends.and_then(|extends| extends.rawdesc.clone()),
                    }
                };
                Document { name, kind }
            }
            _ => Document {
                name: item
                    .name
                    .clone()
                    .unwrap_or_else(|| "<unnamed>".to_string()),
                kind: DocumentKind::Unrecognized {
                    tag: define.tag.clone(),
                    record: raw_record(item),
                },
            },
        };
        Ok(Descriptor::Documentable(document))
    }
}

impl ClassMember {
    /// Classifies one member record of a class item.
    ///
    /// The callable check comes first: any member whose view is exactly
    /// `function` is a method, whatever its tag says.
    pub(crate) fn from_doc_field(field: &DocField) -> Result<ClassMember> {
        let extends = field.extends.as_ref();
        let kind = if field.view == FUNCTION_VIEW {
            MemberKind::Method {
                signature: Signature::from_extends(extends),
                rawdesc: field
                    .rawdesc
                    .clone()
                    .or_else(|| extends.and_then(|extends| extends.rawdesc.clone())),
            }
        } else {
            match field.tag.as_str() {
                FIELD_TAG => MemberKind::Field {
                    view: extends
                        .and_then(|extends| extends.view.clone())
                        .unwrap_or_else(|| field.view.clone()),
                    rawdesc: extends
                        .and_then(|extends| extends.rawdesc.clone())
                        .or_else(|| field.rawdesc.clone()),
                },
                FIELD_DECLARATION_TAG => MemberKind::Declaration {
                    view: field.view.clone(),
                },
                _ => {
                    return Ok(ClassMember {
                        name: field
                            .name
                            .clone()
                            .unwrap_or_else(|| "<unnamed>".to_string()),
                        kind: MemberKind::Unrecognized {
                            tag: field.tag.clone(),
                            record: raw_record(field),
                        },
                    })
                }
            }
        };
        let name = field
            .name
            .clone()
            .ok_or_else(|| anyhow!("`{}` member is missing a name", field.tag))?;
        Ok(ClassMember { name, kind })
    }
}

fn raw_record<T: Serialize>(record: &T) -> serde_json::Value {
    serde_json::to_value(record).unwrap_or_default()
}
