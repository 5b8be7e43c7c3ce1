use crate::errors::{Result, SchemaRegistryError};
use crate::schema_types::{SchemaRecord, SchemaType};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::info;

#[derive(Debug)]
struct RegistryState {
    /// Subject name -> records ordered by version (insertion order)
    by_subject: HashMap<String, Vec<SchemaRecord>>,
    /// Global schema id -> record
    by_id: HashMap<u64, SchemaRecord>,
    /// Next global id to hand out, consumed only on successful registration
    next_id: u64,
}

/// In-memory schema registry owning all subject, version and id state.
///
/// The handle is cheap to clone; clones share the same underlying store.
/// Every operation runs under one lock, so `register_schema`'s
/// duplicate-check plus id/version assignment is a single critical section:
/// two concurrent registrations of identical content under one subject
/// cannot both succeed.
#[derive(Debug, Clone)]
pub struct SchemaRegistry {
    /// Base identifier of the remote registry this instance stands in for.
    /// Never dialed; only rendered into error messages.
    base_url: String,
    state: Arc<Mutex<RegistryState>>,
}

impl SchemaRegistry {
    /// Create an empty registry.
    ///
    /// `base_url` identifies the remote counterpart this registry stands in
    /// for (e.g. `mock://testing`), and appears in error messages so callers
    /// can parse failures the same way as with a network-backed registry.
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        SchemaRegistry {
            base_url: base_url.trim_end_matches('/').to_string(),
            state: Arc::new(Mutex::new(RegistryState {
                by_subject: HashMap::new(),
                by_id: HashMap::new(),
                next_id: 1,
            })),
        }
    }

    /// Register a new schema version under a subject.
    ///
    /// Versions per subject start at 1 and increase by 1 on every successful
    /// registration; ids are unique across all subjects. Registering content
    /// byte-identical to an existing version of the same subject fails with
    /// [`SchemaRegistryError::AlreadyRegistered`] carrying the existing id,
    /// and leaves the registry untouched. Identical content under a
    /// *different* subject is a normal registration and consumes a new id.
    pub fn register_schema(
        &self,
        subject: impl Into<String>,
        schema: impl Into<String>,
        schema_type: SchemaType,
    ) -> Result<SchemaRecord> {
        let subject = subject.into();
        if subject.is_empty() {
            return Err(SchemaRegistryError::InvalidSubject(
                "subject name must not be empty".to_string(),
            ));
        }
        let schema = schema.into();

        let mut state = self.lock();

        if let Some(records) = state.by_subject.get(&subject) {
            if let Some(existing) = records.iter().find(|r| r.schema == schema) {
                return Err(SchemaRegistryError::AlreadyRegistered {
                    path: self.versions_path(&subject),
                    schema_id: existing.id,
                });
            }
        }

        let version = state.by_subject.get(&subject).map_or(0, Vec::len) as u32 + 1;
        let id = state.next_id;
        state.next_id += 1;

        let record = SchemaRecord {
            id,
            subject,
            version,
            schema_type,
            schema,
        };
        state.by_id.insert(id, record.clone());
        state
            .by_subject
            .entry(record.subject.clone())
            .or_default()
            .push(record.clone());

        info!(subject = %record.subject, schema_id = %id, version = %version, "registered new schema version");

        Ok(record)
    }

    /// Get a schema by its global id.
    pub fn get_schema_by_id(&self, id: u64) -> Result<SchemaRecord> {
        let state = self.lock();
        state
            .by_id
            .get(&id)
            .cloned()
            .ok_or_else(|| SchemaRegistryError::SchemaIdNotFound {
                path: self.ids_path(id),
            })
    }

    /// Get the latest registered version for a subject.
    pub fn get_latest_schema(&self, subject: &str) -> Result<SchemaRecord> {
        let state = self.lock();
        state
            .by_subject
            .get(subject)
            .and_then(|records| records.last())
            .cloned()
            .ok_or_else(|| SchemaRegistryError::SubjectNotFound {
                path: self.versions_path(subject),
            })
    }

    /// Get a specific version of a subject's schema.
    pub fn get_schema_version(&self, subject: &str, version: u32) -> Result<SchemaRecord> {
        let state = self.lock();
        let records =
            state
                .by_subject
                .get(subject)
                .ok_or_else(|| SchemaRegistryError::SubjectNotFound {
                    path: self.version_path(subject, version),
                })?;
        // versions are dense and 1-based, so version N sits at index N - 1
        version
            .checked_sub(1)
            .and_then(|idx| records.get(idx as usize))
            .cloned()
            .ok_or_else(|| SchemaRegistryError::VersionNotFound {
                path: self.version_path(subject, version),
            })
    }

    /// List all version numbers for a subject, ascending.
    pub fn list_versions(&self, subject: &str) -> Result<Vec<u32>> {
        let state = self.lock();
        let records =
            state
                .by_subject
                .get(subject)
                .ok_or_else(|| SchemaRegistryError::SubjectNotFound {
                    path: self.versions_path(subject),
                })?;
        Ok(records.iter().map(|r| r.version).collect())
    }

    /// List every subject with at least one registered version.
    /// Order is unspecified; sort if order matters.
    pub fn list_subjects(&self) -> Result<Vec<String>> {
        let state = self.lock();
        Ok(state.by_subject.keys().cloned().collect())
    }

    // State is only ever mutated as a complete unit inside the critical
    // section, so a poisoned lock still guards a consistent snapshot.
    fn lock(&self) -> MutexGuard<'_, RegistryState> {
        self.state
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn versions_path(&self, subject: &str) -> String {
        format!("{}/subjects/{}/versions", self.base_url, subject)
    }

    fn version_path(&self, subject: &str, version: u32) -> String {
        format!("{}/subjects/{}/versions/{}", self.base_url, subject, version)
    }

    fn ids_path(&self, id: u64) -> String {
        format!("{}/schemas/ids/{}", self.base_url, id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SCHEMA: &str = r#"{"type": "record", "name": "User", "fields": []}"#;

    #[test]
    fn empty_subject_is_rejected() {
        let registry = SchemaRegistry::new("mock://testing");
        let err = registry
            .register_schema("", SCHEMA, SchemaType::Avro)
            .unwrap_err();
        assert!(matches!(err, SchemaRegistryError::InvalidSubject(_)));
        assert_eq!(registry.list_subjects().unwrap(), Vec::<String>::new());
    }

    #[test]
    fn lookups_on_empty_registry_are_not_found() {
        let registry = SchemaRegistry::new("mock://testing");

        assert!(registry.get_schema_by_id(1).unwrap_err().is_not_found());
        assert!(registry
            .get_latest_schema("nope")
            .unwrap_err()
            .is_not_found());
        assert!(registry
            .get_schema_version("nope", 1)
            .unwrap_err()
            .is_not_found());
        assert!(registry.list_versions("nope").unwrap_err().is_not_found());
    }

    #[test]
    fn version_zero_and_past_the_end_are_not_found() {
        let registry = SchemaRegistry::new("mock://testing");
        registry
            .register_schema("events", SCHEMA, SchemaType::Avro)
            .unwrap();

        let err = registry.get_schema_version("events", 0).unwrap_err();
        assert!(matches!(err, SchemaRegistryError::VersionNotFound { .. }));
        let err = registry.get_schema_version("events", 2).unwrap_err();
        assert!(matches!(err, SchemaRegistryError::VersionNotFound { .. }));
    }

    #[test]
    fn clones_share_the_same_store() {
        let registry = SchemaRegistry::new("mock://testing");
        let clone = registry.clone();

        let record = clone
            .register_schema("events", SCHEMA, SchemaType::Json)
            .unwrap();
        let seen = registry.get_schema_by_id(record.id).unwrap();
        assert_eq!(seen, record);
    }

    #[test]
    fn failed_registration_consumes_no_id() {
        let registry = SchemaRegistry::new("mock://testing");
        let first = registry
            .register_schema("events", SCHEMA, SchemaType::Avro)
            .unwrap();
        assert_eq!(first.id, 1);

        let err = registry
            .register_schema("events", SCHEMA, SchemaType::Avro)
            .unwrap_err();
        assert_eq!(err.existing_schema_id(), Some(1));

        // next successful registration still gets id 2
        let second = registry
            .register_schema("events", "{}", SchemaType::Avro)
            .unwrap();
        assert_eq!(second.id, 2);
        assert_eq!(second.version, 2);
    }

    #[test]
    fn error_messages_render_request_paths() {
        let registry = SchemaRegistry::new("mock://testingUrl");
        registry
            .register_schema("test1", SCHEMA, SchemaType::Avro)
            .unwrap();

        let err = registry
            .register_schema("test1", SCHEMA, SchemaType::Avro)
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "POST \"mock://testingUrl/subjects/test1/versions\": schema already registered with id 1"
        );

        let err = registry.get_schema_by_id(42).unwrap_err();
        assert_eq!(
            err.to_string(),
            "GET \"mock://testingUrl/schemas/ids/42\": schema id not found"
        );

        let err = registry.get_schema_version("test1", 7).unwrap_err();
        assert_eq!(
            err.to_string(),
            "GET \"mock://testingUrl/subjects/test1/versions/7\": version not found"
        );
    }
}
