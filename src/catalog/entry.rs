use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ReferenceKind {
    #[display("model")]
    Model,
    #[display("source")]
    Source,
}

/// What a catalog name resolves to, and the project file that defined it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ReferenceEntry {
    Model {
        name: String,
        origin: String,
    },
    Source {
        source: String,
        table: String,
        origin: String,
    },
}

impl ReferenceEntry {
    pub fn model(name: impl Into<String>, origin: impl Into<String>) -> Self {
        ReferenceEntry::Model {
            name: name.into(),
            origin: origin.into(),
        }
    }

    pub fn source(
        source: impl Into<String>,
        table: impl Into<String>,
        origin: impl Into<String>,
    ) -> Self {
        ReferenceEntry::Source {
            source: source.into(),
            table: table.into(),
            origin: origin.into(),
        }
    }

    pub fn kind(&self) -> ReferenceKind {
        match self {
            ReferenceEntry::Model { .. } => ReferenceKind::Model,
            ReferenceEntry::Source { .. } => ReferenceKind::Source,
        }
    }

    /// Model name, or source group.
    pub fn primary_arg(&self) -> &str {
        match self {
            ReferenceEntry::Model { name, .. } => name,
            ReferenceEntry::Source { source, .. } => source,
        }
    }

    /// Source table name; models take a single argument.
    pub fn secondary_arg(&self) -> Option<&str> {
        match self {
            ReferenceEntry::Model { .. } => None,
            ReferenceEntry::Source { table, .. } => Some(table),
        }
    }

    pub fn origin(&self) -> &str {
        match self {
            ReferenceEntry::Model { origin, .. } | ReferenceEntry::Source { origin, .. } => origin,
        }
    }

    pub fn templated_call(&self) -> TemplatedCall<'_> {
        match self {
            ReferenceEntry::Model { name, .. } => TemplatedCall::Ref(name),
            ReferenceEntry::Source { source, table, .. } => TemplatedCall::Source(source, table),
        }
    }
}

/// The double-brace call that replaces a table reference. The rendered text
/// is consumed by dbt's template renderer and must not change shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum TemplatedCall<'a> {
    #[display("{{{{ ref('{_0}') }}}}")]
    Ref(&'a str),
    #[display("{{{{ source('{_0}', '{_1}') }}}}")]
    Source(&'a str, &'a str),
}
