//! Parsing the language server's extraction artifact into a typed,
//! render-ready model.

use anyhow::{Context, Result};
use serde::{Deserialize, Deserializer, Serialize};
use std::{fs, path::Path};

use crate::doc::descriptor::Descriptor;

mod descriptor;

/// The sentinel the language server prefixes onto the recorded origin of
/// items defined outside the documented package. The spelling matches the
/// server's output.
pub const FOREIGN_FILE_MARKER: &str = "[FORIEGN]";

/// One top-level record in the extraction artifact.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DocItem {
    /// Identifier of a global-scope item; class records carry their name in
    /// the define site's view instead.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub defines: Vec<DefineSite>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<DocField>,
}

/// A record describing where and how an item is introduced in source. Only
/// the first define site of an item is ever consulted.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DefineSite {
    #[serde(rename = "type")]
    pub tag: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub view: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rawdesc: Option<String>,
    // Class define sites may extend a list of base classes; only a single
    // extended value is meaningful to the renderer.
    #[serde(
        default,
        deserialize_with = "one_or_many",
        skip_serializing_if = "Option::is_none"
    )]
    pub extends: Option<Extends>,
}

/// A field or method record attached to a class item.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DocField {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub tag: String,
    pub view: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rawdesc: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extends: Option<Extends>,
}

/// The value a define site or field is bound to: its full rendered type
/// and, for callables, the parameter and return descriptors.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Extends {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub view: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rawdesc: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub args: Vec<TypeDescriptor>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub returns: Vec<TypeDescriptor>,
}

/// A single parameter or return value descriptor.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TypeDescriptor {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
    pub view: String,
}

fn one_or_many<'de, D>(deserializer: D) -> Result<Option<Extends>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum OneOrMany {
        One(Box<Extends>),
        Many(Vec<Extends>),
    }

    Ok(match Option::<OneOrMany>::deserialize(deserializer)? {
        Some(OneOrMany::One(extends)) => Some(*extends),
        Some(OneOrMany::Many(list)) => list.into_iter().next(),
        None => None,
    })
}

/// Every documentable item successfully gathered from an extraction
/// artifact, in input order.
#[derive(Clone, Debug)]
pub struct Documentation(pub Vec<Document>);

impl Documentation {
    /// Reads and classifies the artifact at `path`.
    pub fn from_path(path: &Path) -> Result<Documentation> {
        let artifact = fs::read_to_string(path)
            .with_context(|| format!("failed to read extraction artifact at {}", path.display()))?;
        Self::from_json(&artifact)
            .with_context(|| format!("malformed extraction artifact at {}", path.display()))
    }

    /// Parses the artifact text, a JSON array of item records.
    pub fn from_json(artifact: &str) -> Result<Documentation> {
        let items: Vec<DocItem> = serde_json::from_str(artifact)?;
        Self::from_doc_items(items)
    }

    /// Classifies raw records in input order.
    ///
    /// Foreign-origin items are dropped here so nothing downstream ever
    /// sees them. Items the classifier does not recognize are kept as
    /// [`DocumentKind::Unrecognized`] so the render pass can report them
    /// instead of silently skipping.
    pub fn from_doc_items(items: Vec<DocItem>) -> Result<Documentation> {
        let mut docs = Vec::new();
        for item in items {
            if let Descriptor::Documentable(doc) = Descriptor::from_doc_item(&item)? {
                docs.push(doc);
            }
        }
        Ok(Documentation(docs))
    }
}

/// A finalized documented item ready to be rendered.
#[derive(Clone, Debug)]
pub struct Document {
    /// Display name: the item name for global-scope items, the class view
    /// for classes.
    pub name: String,
    pub kind: DocumentKind,
}

/// Every shape of top-level item the renderer knows, plus an explicit
/// variant for the ones it does not.
#[derive(Clone, Debug)]
pub enum DocumentKind {
    /// A class definition and its ordered members.
    Class {
        rawdesc: Option<String>,
        members: Vec<ClassMember>,
    },
    /// A global or field assignment whose bound value is a function.
    Function {
        signature: Signature,
        rawdesc: Option<String>,
    },
    /// A field assignment bound to a plain value.
    Field {
        view: String,
        rawdesc: Option<String>,
    },
    /// A global assignment bound to a plain value. There is no defined
    /// rendering for these; the render pass reports them instead.
    GlobalBinding {
        view: String,
        record: serde_json::Value,
    },
    /// A define kind the classifier does not know. Carries the raw record
    /// so the render pass can surface it for inspection.
    Unrecognized {
        tag: String,
        record: serde_json::Value,
    },
}

/// A classified member of a class item.
#[derive(Clone, Debug)]
pub struct ClassMember {
    pub name: String,
    pub kind: MemberKind,
}

#[derive(Clone, Debug)]
pub enum MemberKind {
    /// A callable member; its view is exactly `function`.
    Method {
        signature: Signature,
        rawdesc: Option<String>,
    },
    /// A field inferred from an assignment.
    Field {
        view: String,
        rawdesc: Option<String>,
    },
    /// An explicitly annotated field declaration.
    Declaration { view: String },
    /// A member kind the classifier does not know.
    Unrecognized {
        tag: String,
        record: serde_json::Value,
    },
}

/// Parameter and return descriptors of a callable, in source order.
#[derive(Clone, Debug, Default)]
pub struct Signature {
    pub args: Vec<TypeDescriptor>,
    pub returns: Vec<TypeDescriptor>,
}

impl Signature {
    pub(crate) fn from_extends(extends: Option<&Extends>) -> Signature {
        match extends {
            Some(extends) => Signature {
                args: extends.args.clone(),
                returns: extends.returns.clone(),
            },
            None => Signature::default(),
        }
    }
}
