use crate::*;
use itertools::Itertools;
use serde_yaml::Value;
use std::{
    collections::HashMap,
    path::{Component, Path},
};
use walkdir::WalkDir;

pub const DEFAULT_MODELS_DIR: &str = "models";

/// Builds a [`ReferenceMap`] from project files.
///
/// Files are `(path, content)` pairs with `/`-separated paths relative to the
/// project root:
/// - `<models_dir>/**/<name>.sql` registers model `<name>`; a later model of
///   the same name overwrites the earlier one.
/// - `*.yml` / `*.yaml` files contribute their `sources[].tables[]`, keyed by
///   table name. An existing key is kept, so a model always wins over a
///   source of the same name.
///
/// Models are registered before any source regardless of file order.
#[derive(Debug, Clone)]
pub struct CatalogBuilder {
    models_dir: String,
    files: Vec<(String, String)>,
}

impl Default for CatalogBuilder {
    fn default() -> Self {
        Self::new(DEFAULT_MODELS_DIR)
    }
}

impl CatalogBuilder {
    pub fn new(models_dir: impl Into<String>) -> Self {
        Self {
            models_dir: models_dir.into().trim_matches('/').to_string(),
            files: Vec::new(),
        }
    }

    pub fn file(mut self, path: impl Into<String>, content: impl Into<String>) -> Self {
        self.files.push((path.into(), content.into()));
        self
    }

    pub fn files<P, C>(mut self, files: impl IntoIterator<Item = (P, C)>) -> Self
    where
        P: Into<String>,
        C: Into<String>,
    {
        self.files
            .extend(files.into_iter().map(|(p, c)| (p.into(), c.into())));
        self
    }

    /// Read every relevant file below `root`, skipping `.git`.
    pub fn load_dir(mut self, root: impl AsRef<Path>) -> Result<Self> {
        let root = root.as_ref();
        info!(root = %root.display(), "loading project files");

        let walker = WalkDir::new(root)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|e| e.file_name() != ".git");
        for entry in walker {
            let entry = entry?;
            if !entry.file_type().is_file() {
                continue;
            }
            let relative = relative_path(root, entry.path());
            if !self.is_model_file(&relative) && !is_yaml_file(&relative) {
                continue;
            }
            debug!(path = %relative, "fetching relevant file");
            let bytes = std::fs::read(entry.path())?;
            self.files
                .push((relative, String::from_utf8_lossy(&bytes).into_owned()));
        }
        Ok(self)
    }

    fn is_model_file(&self, path: &str) -> bool {
        path.ends_with(".sql")
            && path
                .strip_prefix(self.models_dir.as_str())
                .is_some_and(|rest| rest.starts_with('/'))
    }

    pub fn build(self) -> ReferenceMap {
        let mut entries: HashMap<String, ReferenceEntry> = HashMap::new();

        let (models, yaml): (Vec<_>, Vec<_>) = self
            .files
            .iter()
            .filter(|(path, _)| self.is_model_file(path) || is_yaml_file(path))
            .partition(|(path, _)| self.is_model_file(path));

        for (path, _) in models {
            let Some(name) = Path::new(path).file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            if entries.contains_key(name) {
                warn!(model = name, "duplicate model definition, overwriting");
            }
            entries.insert(name.to_string(), ReferenceEntry::model(name, path.as_str()));
            debug!(model = name, origin = %path, "registered model");
        }

        for (path, content) in yaml {
            for (source, table) in parse_sources(path, content) {
                match entries.get(&table) {
                    None => {
                        debug!(%source, %table, origin = %path, "registered source");
                        entries.insert(
                            table.clone(),
                            ReferenceEntry::source(source, table, path.as_str()),
                        );
                    }
                    Some(ReferenceEntry::Model { .. }) => {
                        info!(%source, %table, "source conflicts with model, prioritizing model");
                    }
                    Some(existing) => {
                        debug!(%source, %table, kept = %existing.origin(), "source already registered");
                    }
                }
            }
        }

        info!(
            models = entries.values().filter(|e| e.kind() == ReferenceKind::Model).count(),
            sources = entries.values().filter(|e| e.kind() == ReferenceKind::Source).count(),
            "built reference map"
        );
        ReferenceMap::from_entries(entries)
    }
}

/// `(source group, table)` pairs declared in one YAML file.
///
/// Unparseable files are logged and contribute nothing. Inside a parseable
/// file each source and table entry is checked on its own: entries without a
/// string `name` are skipped and the rest are kept.
fn parse_sources(path: &str, content: &str) -> Vec<(String, String)> {
    if content.trim().is_empty() {
        return Vec::new();
    }
    let document: Value = match serde_yaml::from_str(content) {
        Ok(document) => document,
        Err(source) => {
            let err = Error::Yaml {
                path: path.to_string(),
                source,
            };
            warn!(%err, "skipping YAML file");
            return Vec::new();
        }
    };

    let Some(sources) = document.get("sources").and_then(Value::as_sequence) else {
        return Vec::new();
    };

    let mut pairs = Vec::new();
    for source in sources {
        let Some(group) = entry_name(source) else {
            debug!(path, "skipping source without a name");
            continue;
        };
        let Some(tables) = source.get("tables").and_then(Value::as_sequence) else {
            continue;
        };
        for table in tables {
            match entry_name(table) {
                Some(table) => pairs.push((group.to_string(), table.to_string())),
                None => debug!(path, source = group, "skipping malformed table entry"),
            }
        }
    }
    pairs
}

/// Non-empty string `name` of a mapping entry.
fn entry_name(entry: &Value) -> Option<&str> {
    entry
        .get("name")
        .and_then(Value::as_str)
        .filter(|name| !name.is_empty())
}

fn is_yaml_file(path: &str) -> bool {
    path.ends_with(".yml") || path.ends_with(".yaml")
}

fn relative_path(root: &Path, path: &Path) -> String {
    path.strip_prefix(root)
        .unwrap_or(path)
        .components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part.to_string_lossy()),
            _ => None,
        })
        .join("/")
}

#[cfg(test)]
mod tests {
    use super::*;

    const SOURCES_YML: &str = r#"
version: 2
sources:
  - name: raw
    tables:
      - name: orders
      - name: customers
  - name: stripe
    tables:
      - name: payments
        description: card payments
"#;

    #[test]
    fn registers_models_and_sources() {
        let map = CatalogBuilder::default()
            .file("models/staging/stg_orders.sql", "select 1")
            .file("models/sources.yml", SOURCES_YML)
            .file("analyses/not_a_model.sql", "select 2")
            .build();

        assert_eq!(map.len(), 4);
        assert_eq!(
            map.get("stg_orders"),
            Some(&ReferenceEntry::model("stg_orders", "models/staging/stg_orders.sql"))
        );
        assert_eq!(
            map.get("payments"),
            Some(&ReferenceEntry::source("stripe", "payments", "models/sources.yml"))
        );
        assert!(map.get("not_a_model").is_none());
    }

    #[test]
    fn model_wins_over_source_in_any_file_order() {
        let map = CatalogBuilder::default()
            .file("models/sources.yml", SOURCES_YML)
            .file("models/marts/orders.sql", "select 1")
            .build();
        assert_eq!(map.get("orders").map(ReferenceEntry::kind), Some(ReferenceKind::Model));
    }

    #[test]
    fn duplicate_model_last_write_wins() {
        let map = CatalogBuilder::default()
            .file("models/a/orders.sql", "")
            .file("models/b/orders.sql", "")
            .build();
        assert_eq!(map.get("orders").map(ReferenceEntry::origin), Some("models/b/orders.sql"));
    }

    #[test]
    fn first_source_registration_is_kept() {
        let other = "sources:\n  - name: legacy\n    tables:\n      - name: orders\n";
        let map = CatalogBuilder::default()
            .file("models/sources.yml", SOURCES_YML)
            .file("models/legacy.yml", other)
            .build();
        assert_eq!(map.get("orders").map(ReferenceEntry::primary_arg), Some("raw"));
    }

    #[rstest]
    #[case("sources: [")]
    #[case("- just\n- a list\n")]
    #[case("sources: not-a-list")]
    #[case("")]
    fn malformed_yaml_is_skipped(#[case] content: &str) {
        let map = CatalogBuilder::default()
            .file("models/bad.yml", content)
            .file("models/orders.sql", "")
            .build();
        assert_eq!(map.len(), 1);
        assert!(map.get("orders").is_some());
    }

    #[test]
    fn incomplete_source_definitions_are_ignored() {
        let yml = "sources:\n  - tables:\n      - name: orphan\n  - name: raw\n    tables:\n      - description: no name\n      - name: kept\n";
        let map = CatalogBuilder::default().file("models/s.yml", yml).build();
        assert_eq!(map.len(), 1);
        assert!(map.get("kept").is_some());
    }

    #[test]
    fn malformed_entries_are_skipped_one_by_one() {
        let yml = "sources:\n  - name: raw\n    tables:\n      - name: orders\n      - just_a_string\n      - name: [not, a, string]\n      - name: payments\n  - bare_source\n  - name: 42\n    tables:\n      - name: numeric_group\n";
        let map = CatalogBuilder::default().file("models/s.yml", yml).build();
        assert_eq!(map.len(), 2);
        assert_eq!(map.get("orders").map(ReferenceEntry::primary_arg), Some("raw"));
        assert!(map.get("payments").is_some());
        assert!(map.get("numeric_group").is_none());
    }

    #[test]
    fn custom_models_dir() {
        let map = CatalogBuilder::new("transform/models/")
            .file("transform/models/dim_users.sql", "")
            .file("models/ignored.sql", "")
            .build();
        assert!(map.get("dim_users").is_some());
        assert!(map.get("ignored").is_none());
    }

    #[test]
    fn loads_project_directory() -> Result {
        let dir = tempfile::tempdir()?;
        let root = dir.path();
        std::fs::create_dir_all(root.join("models/staging"))?;
        std::fs::create_dir_all(root.join(".git"))?;
        std::fs::write(root.join("models/staging/stg_customers.sql"), "select 1")?;
        std::fs::write(root.join("models/sources.yml"), SOURCES_YML)?;
        std::fs::write(root.join(".git/hidden.yml"), SOURCES_YML.replace("raw", "git"))?;
        std::fs::write(root.join("README.md"), "# project")?;

        let map = CatalogBuilder::default().load_dir(root)?.build();
        assert!(map.get("stg_customers").is_some());
        assert_eq!(map.get("orders").map(ReferenceEntry::primary_arg), Some("raw"));
        assert_eq!(map.len(), 4);
        Ok(())
    }
}
