//! Persisted collection of known workspaces.
//!
//! Two stored descriptors name the same workspace when their ids match or
//! when both carry the same normalized package name. Every mutation keeps
//! the collection free of such duplicates.

use std::collections::HashMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::store::KeyValueStore;
use crate::error::{DroidsyncError, Result};
use crate::workspace::{normalize_package, WorkspaceDescriptor};

/// Store key holding the descriptor array.
pub const PROJECTS_KEY: &str = "projects";

/// Result of [`WorkspaceRegistry::upsert`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpsertOutcome {
    /// The descriptor as stored (its id may differ from the input's).
    pub descriptor: WorkspaceDescriptor,
    pub was_inserted: bool,
    pub replaced_by_package: bool,
}

/// Lookup tables over a descriptor list, first occurrence wins.
#[derive(Debug, Default)]
struct IdentityIndex {
    by_id: HashMap<String, usize>,
    by_package: HashMap<String, usize>,
}

impl IdentityIndex {
    fn build(descriptors: &[WorkspaceDescriptor]) -> Self {
        let mut index = Self::default();
        for (i, descriptor) in descriptors.iter().enumerate() {
            index.by_id.entry(descriptor.id.clone()).or_insert(i);
            if let Some(package) = descriptor.normalized_package() {
                index.by_package.entry(package).or_insert(i);
            }
        }
        index
    }
}

/// Fold descriptors sharing an id or package into single entries.
///
/// A match by id or package replaces the earlier entry's content but keeps
/// its id. After a package match the incoming id also resolves to that
/// entry, so chains of collisions collapse into one.
pub fn dedupe(descriptors: Vec<WorkspaceDescriptor>) -> Vec<WorkspaceDescriptor> {
    let mut result: Vec<WorkspaceDescriptor> = Vec::with_capacity(descriptors.len());
    let mut by_id: HashMap<String, usize> = HashMap::new();
    let mut by_package: HashMap<String, usize> = HashMap::new();

    for descriptor in descriptors {
        let package = descriptor.normalized_package();

        if let Some(&i) = by_id.get(&descriptor.id) {
            if let Some(package) = package {
                by_package.insert(package, i);
            }
            let kept_id = result[i].id.clone();
            result[i] = WorkspaceDescriptor {
                id: kept_id,
                ..descriptor
            };
            continue;
        }

        if let Some(&i) = package.as_ref().and_then(|p| by_package.get(p)) {
            let incoming_id = descriptor.id.clone();
            let kept_id = result[i].id.clone();
            result[i] = WorkspaceDescriptor {
                id: kept_id,
                ..descriptor
            };
            by_id.insert(incoming_id, i);
            continue;
        }

        let i = result.len();
        by_id.insert(descriptor.id.clone(), i);
        if let Some(package) = package {
            by_package.insert(package, i);
        }
        result.push(descriptor);
    }

    result
}

/// The persisted workspace collection.
pub struct WorkspaceRegistry {
    store: Arc<dyn KeyValueStore>,
}

impl WorkspaceRegistry {
    /// Open the registry, folding any duplicates left by older versions.
    pub fn open(store: Arc<dyn KeyValueStore>) -> Result<Self> {
        let registry = Self { store };
        registry.migrate()?;
        Ok(registry)
    }

    fn raw_records(&self) -> Vec<Value> {
        match self.store.get(PROJECTS_KEY, Value::Array(Vec::new())) {
            Value::Array(records) => records,
            Value::Null => Vec::new(),
            _ => {
                tracing::warn!("Stored '{}' is not a list, ignoring it", PROJECTS_KEY);
                Vec::new()
            }
        }
    }

    fn parse_records(records: Vec<Value>) -> Vec<WorkspaceDescriptor> {
        records
            .into_iter()
            .filter_map(|record| match serde_json::from_value(record) {
                Ok(descriptor) => Some(descriptor),
                Err(e) => {
                    tracing::warn!("Skipping malformed workspace record: {}", e);
                    None
                }
            })
            .collect()
    }

    fn migrate(&self) -> Result<()> {
        let records = self.raw_records();
        if records.is_empty() {
            return Ok(());
        }
        let before = records.len();
        let deduped = dedupe(Self::parse_records(records));
        if deduped.len() != before {
            tracing::info!(
                "Migrated workspace registry from {} to {} entries",
                before,
                deduped.len()
            );
            self.set_all(&deduped)?;
        }
        Ok(())
    }

    /// Every stored descriptor, in storage order.
    pub fn get_all(&self) -> Vec<WorkspaceDescriptor> {
        Self::parse_records(self.raw_records())
    }

    /// Descriptor with the given id.
    pub fn get(&self, id: &str) -> Option<WorkspaceDescriptor> {
        self.get_all().into_iter().find(|d| d.id == id)
    }

    /// Descriptor with the given id, or [`DroidsyncError::WorkspaceNotFound`].
    pub fn require(&self, id: &str) -> Result<WorkspaceDescriptor> {
        self.get(id).ok_or_else(|| DroidsyncError::WorkspaceNotFound {
            id: id.to_string(),
        })
    }

    fn set_all(&self, descriptors: &[WorkspaceDescriptor]) -> Result<()> {
        let value = serde_json::to_value(descriptors)
            .map_err(|e| anyhow::anyhow!("failed to serialize workspaces: {}", e))?;
        self.store.set(PROJECTS_KEY, value)
    }

    /// Insert or replace a descriptor, reconciling by id and package.
    pub fn upsert(&self, descriptor: WorkspaceDescriptor) -> Result<UpsertOutcome> {
        let mut all = self.get_all();
        let index = IdentityIndex::build(&all);
        let id_index = index.by_id.get(&descriptor.id).copied();
        let package_index = normalize_package(descriptor.package_name.as_deref())
            .and_then(|p| index.by_package.get(&p).copied());

        if let Some(pi) = package_index.filter(|&pi| Some(pi) != id_index) {
            let merged = WorkspaceDescriptor {
                id: all[pi].id.clone(),
                ..descriptor
            };
            all[pi] = merged.clone();
            if let Some(ii) = id_index {
                all.remove(ii);
            }
            self.set_all(&all)?;
            tracing::info!("Merged workspace {} by package into {}", merged.name, merged.id);
            return Ok(UpsertOutcome {
                descriptor: merged,
                was_inserted: false,
                replaced_by_package: true,
            });
        }

        if let Some(ii) = id_index {
            all[ii] = descriptor.clone();
            self.set_all(&all)?;
            tracing::info!("Updated workspace {} ({})", descriptor.name, descriptor.id);
            return Ok(UpsertOutcome {
                descriptor,
                was_inserted: false,
                replaced_by_package: false,
            });
        }

        all.push(descriptor.clone());
        self.set_all(&all)?;
        tracing::info!("Added workspace {} ({})", descriptor.name, descriptor.id);
        Ok(UpsertOutcome {
            descriptor,
            was_inserted: true,
            replaced_by_package: false,
        })
    }

    /// Remove the descriptor with `id`; false when none matched.
    pub fn delete(&self, id: &str) -> Result<bool> {
        let all = self.get_all();
        let before = all.len();
        let remaining: Vec<_> = all.into_iter().filter(|d| d.id != id).collect();
        if remaining.len() == before {
            return Ok(false);
        }
        self.set_all(&remaining)?;
        tracing::info!("Removed workspace {}", id);
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::store::MemoryStore;
    use crate::workspace::{AndroidTemplateStatus, PackageSource};
    use serde_json::json;
    use std::path::Path;

    fn ws(root: &str, package: Option<&str>) -> WorkspaceDescriptor {
        WorkspaceDescriptor::new(Path::new(root))
            .with_package(package.map(String::from), PackageSource::ApplicationId)
    }

    fn registry() -> WorkspaceRegistry {
        WorkspaceRegistry::open(Arc::new(MemoryStore::new())).unwrap()
    }

    #[test]
    fn insert_then_update_by_id() {
        let registry = registry();

        let first = registry.upsert(ws("/ws/a", Some("com.a"))).unwrap();
        assert!(first.was_inserted);
        assert!(!first.replaced_by_package);

        let mut updated = ws("/ws/a", Some("com.a"));
        updated.android_template_status = AndroidTemplateStatus::Ready;
        let second = registry.upsert(updated).unwrap();
        assert!(!second.was_inserted);
        assert!(!second.replaced_by_package);

        let all = registry.get_all();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].android_template_status, AndroidTemplateStatus::Ready);
    }

    #[test]
    fn package_match_keeps_existing_id() {
        let registry = registry();
        let original = registry.upsert(ws("/ws/old", Some("com.example.app"))).unwrap();

        let moved = registry
            .upsert(ws("/ws/new", Some("  COM.Example.App ")))
            .unwrap();

        assert!(moved.replaced_by_package);
        assert!(!moved.was_inserted);
        assert_eq!(moved.descriptor.id, original.descriptor.id);
        assert_eq!(moved.descriptor.root_dir, Path::new("/ws/new"));

        let all = registry.get_all();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].id, original.descriptor.id);
    }

    #[test]
    fn package_match_removes_separate_id_entry() {
        let registry = registry();
        let by_package = registry.upsert(ws("/ws/a", Some("com.shared"))).unwrap();
        registry.upsert(ws("/ws/b", Some("com.other"))).unwrap();

        let outcome = registry.upsert(ws("/ws/b", Some("com.shared"))).unwrap();

        assert!(outcome.replaced_by_package);
        let all = registry.get_all();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].id, by_package.descriptor.id);
        assert_eq!(all[0].root_dir, Path::new("/ws/b"));
    }

    #[test]
    fn descriptors_without_package_never_merge() {
        let registry = registry();
        registry.upsert(ws("/ws/a", None)).unwrap();
        let second = registry.upsert(ws("/ws/b", None)).unwrap();

        assert!(second.was_inserted);
        assert_eq!(registry.get_all().len(), 2);
    }

    #[test]
    fn delete_reports_whether_removed() {
        let registry = registry();
        let added = registry.upsert(ws("/ws/a", None)).unwrap();

        assert!(registry.delete(&added.descriptor.id).unwrap());
        assert!(!registry.delete(&added.descriptor.id).unwrap());
        assert!(registry.get_all().is_empty());
    }

    #[test]
    fn require_unknown_is_not_found() {
        let err = registry().require("nope").unwrap_err();
        assert!(matches!(err, DroidsyncError::WorkspaceNotFound { .. }));
    }

    #[test]
    fn dedupe_folds_chains() {
        let a = ws("/ws/a", Some("com.one"));
        let b = ws("/ws/b", Some("com.one"));
        let mut b_again = ws("/ws/b", Some("com.two"));
        b_again.name = "renamed".to_string();

        let deduped = dedupe(vec![a.clone(), b, b_again]);

        assert_eq!(deduped.len(), 1);
        assert_eq!(deduped[0].id, a.id);
        assert_eq!(deduped[0].name, "renamed");
    }

    #[test]
    fn open_migrates_duplicates_and_tolerates_bad_records() {
        let store = Arc::new(MemoryStore::new());
        let a = ws("/ws/a", Some("com.one"));
        let b = ws("/ws/b", Some("COM.ONE"));
        let c = ws("/ws/c", None);
        let mut old_record = serde_json::to_value(&c).unwrap();
        old_record
            .as_object_mut()
            .unwrap()
            .remove("androidTemplateStatus");
        store
            .set(
                PROJECTS_KEY,
                json!([
                    serde_json::to_value(&a).unwrap(),
                    serde_json::to_value(&b).unwrap(),
                    {"garbage": true},
                    old_record,
                ]),
            )
            .unwrap();

        let registry = WorkspaceRegistry::open(store.clone()).unwrap();
        let all = registry.get_all();

        assert_eq!(all.len(), 2);
        assert_eq!(all[0].id, a.id);
        assert_eq!(all[0].root_dir, Path::new("/ws/b"));
        assert_eq!(all[1].android_template_status, AndroidTemplateStatus::NotStarted);
        assert_eq!(store.get(PROJECTS_KEY, json!([])).as_array().unwrap().len(), 2);
    }

    #[test]
    fn non_list_value_reads_empty() {
        let store = Arc::new(MemoryStore::new());
        store.set(PROJECTS_KEY, json!({"oops": 1})).unwrap();

        let registry = WorkspaceRegistry::open(store).unwrap();

        assert!(registry.get_all().is_empty());
    }
}
