//! Configuration record service
//!
//! Enforces the business rules in front of the persistence layer:
//! identity threading, uniqueness, immutable fields, metadata schema
//! validation and list-window normalization. The mutating operations
//! delegate to the persistence traits, whose update/delete flows are
//! transactional together with the archive log.

use std::sync::Arc;

use tracing::info;

use stele_common::{ActorContext, Page, SteleError, ValidationOutcome};
use stele_persistence::{
    ConfigArchiveStorageData, ConfigPatch, ConfigQuery, ConfigStorageData, NewConfig,
    PersistenceService,
};
use stele_registry::SchemaRegistry;

use crate::model::{ConfigQueryParam, CreateConfigParam, UpdateConfigParam};

/// Window size applied when a list request passes no usable limit
pub const DEFAULT_PAGE_LIMIT: u64 = 10;

#[derive(Clone)]
pub struct ConfigService {
    persistence: Arc<dyn PersistenceService>,
    registry: Arc<SchemaRegistry>,
}

fn parse_id(raw: &str) -> anyhow::Result<i64> {
    raw.trim()
        .parse::<i64>()
        .map_err(|_| SteleError::IllegalArgument("invalid config ID".to_string()).into())
}

/// Tags are matched in storage through their quoted JSON form, so the
/// characters that would break that matching are rejected up front.
fn validate_tags(tags: &[String]) -> anyhow::Result<()> {
    for tag in tags {
        if tag.is_empty() {
            return Err(SteleError::IllegalArgument("tags must not be empty".to_string()).into());
        }
        if tag.contains('"') || tag.contains('\\') {
            return Err(SteleError::IllegalArgument(format!(
                "tag '{}' contains an unsupported character",
                tag
            ))
            .into());
        }
    }
    Ok(())
}

impl ConfigService {
    pub fn new(
        persistence: Arc<dyn PersistenceService>,
        registry: Arc<SchemaRegistry>,
    ) -> Self {
        Self {
            persistence,
            registry,
        }
    }

    /// Create a configuration record owned by the actor's tenant.
    ///
    /// The (name, tenant, type, subtype) combination must not collide
    /// with a live record, and the metadata must match the schema
    /// declared for the (type, subtype).
    pub async fn create(
        &self,
        ctx: &ActorContext,
        param: CreateConfigParam,
    ) -> anyhow::Result<ConfigStorageData> {
        if param.name.trim().is_empty() {
            return Err(SteleError::IllegalArgument("name must not be empty".to_string()).into());
        }
        if param.r#type.trim().is_empty() {
            return Err(SteleError::IllegalArgument("type must not be empty".to_string()).into());
        }

        let tags = param.tags.unwrap_or_default();
        validate_tags(&tags)?;

        // Type and subtype must be declared regardless; the metadata
        // shape is checked only when metadata is supplied.
        if !self.registry.type_exists(&param.r#type) {
            return Err(SteleError::SchemaValidation(ValidationOutcome::invalid(vec![
                format!("unknown type '{}'", param.r#type),
            ]))
            .into());
        }
        if let Some(ref subtype) = param.subtype {
            if !self.registry.subtype_exists(&param.r#type, subtype) {
                return Err(SteleError::SchemaValidation(ValidationOutcome::invalid(vec![
                    format!("unknown subtype '{}' for type '{}'", subtype, param.r#type),
                ]))
                .into());
            }
        }
        if let Some(ref metadata) = param.metadata {
            let outcome = self.registry.validate_metadata(
                &param.r#type,
                param.subtype.as_deref(),
                metadata,
            );
            if !outcome.valid {
                return Err(SteleError::SchemaValidation(outcome).into());
            }
        }

        if self
            .persistence
            .config_find_duplicate(
                &ctx.tenant_id,
                &param.name,
                &param.r#type,
                param.subtype.as_deref(),
            )
            .await?
            .is_some()
        {
            return Err(SteleError::AlreadyExists.into());
        }

        let created = self
            .persistence
            .config_insert(NewConfig {
                name: param.name,
                r#type: param.r#type,
                subtype: param.subtype,
                tags,
                tenant_id: ctx.tenant_id.clone(),
                created_by: ctx.actor_id.clone(),
                metadata: param.metadata,
            })
            .await?;

        info!(
            config_id = created.id,
            tenant_id = %created.tenant_id,
            name = %created.name,
            "config created"
        );
        Ok(created)
    }

    /// Fetch a single record. A record belonging to another tenant is
    /// indistinguishable from a missing one.
    pub async fn get(&self, ctx: &ActorContext, id: &str) -> anyhow::Result<ConfigStorageData> {
        let id = parse_id(id)?;

        match self.persistence.config_find_by_id(id).await? {
            Some(config) if config.tenant_id == ctx.tenant_id => Ok(config),
            _ => Err(SteleError::NotFound("config".to_string()).into()),
        }
    }

    /// List the tenant's records matching the filter. A missing or
    /// non-positive limit falls back to the default window; the returned
    /// total always reflects the filter, not the window.
    pub async fn list(
        &self,
        ctx: &ActorContext,
        param: ConfigQueryParam,
    ) -> anyhow::Result<Page<ConfigStorageData>> {
        let limit = match param.limit {
            Some(limit) if limit > 0 => limit as u64,
            _ => DEFAULT_PAGE_LIMIT,
        };
        let skip = param.skip.unwrap_or(0).max(0) as u64;

        let page = self
            .persistence
            .config_search_page(&ConfigQuery {
                tenant_id: ctx.tenant_id.clone(),
                r#type: param.r#type,
                subtype: param.subtype,
                tag: param.tag,
                skip,
                limit,
            })
            .await?;

        Ok(page)
    }

    /// Update a record's mutable fields. The prior state is archived and
    /// the patch applied as one atomic unit; on any failure the record
    /// and its archive log are both left untouched.
    pub async fn update(
        &self,
        ctx: &ActorContext,
        id: &str,
        param: UpdateConfigParam,
    ) -> anyhow::Result<ConfigStorageData> {
        let parsed_id = parse_id(id)?;

        for (field, present) in [
            ("name", param.name.is_some()),
            ("type", param.r#type.is_some()),
            ("subtype", param.subtype.is_some()),
        ] {
            if present {
                return Err(SteleError::IllegalArgument(format!(
                    "field '{}' is immutable and cannot be updated",
                    field
                ))
                .into());
            }
        }

        if let Some(ref tags) = param.tags {
            validate_tags(tags)?;
        }

        // Metadata is validated against the stored type/subtype, which
        // needs the record; this also yields not-found before any write.
        let existing = match self.persistence.config_find_by_id(parsed_id).await? {
            Some(config) if config.tenant_id == ctx.tenant_id => config,
            _ => return Err(SteleError::NotFound("config".to_string()).into()),
        };

        if let Some(ref metadata) = param.metadata {
            let outcome = self.registry.validate_metadata(
                &existing.r#type,
                existing.subtype.as_deref(),
                metadata,
            );
            if !outcome.valid {
                return Err(SteleError::SchemaValidation(outcome).into());
            }
        }

        let updated = self
            .persistence
            .config_update(
                parsed_id,
                &ctx.tenant_id,
                ConfigPatch {
                    tags: param.tags,
                    metadata: param.metadata,
                    last_updated_by: ctx.actor_id.clone(),
                },
            )
            .await?
            .ok_or_else(|| SteleError::NotFound("config".to_string()))?;

        info!(
            config_id = updated.id,
            tenant_id = %updated.tenant_id,
            "config updated"
        );
        Ok(updated)
    }

    /// Delete a record together with its entire archive log, atomically.
    pub async fn delete(&self, ctx: &ActorContext, id: &str) -> anyhow::Result<()> {
        let id = parse_id(id)?;

        if !self.persistence.config_delete(id, &ctx.tenant_id).await? {
            return Err(SteleError::NotFound("config".to_string()).into());
        }

        info!(config_id = id, tenant_id = %ctx.tenant_id, "config deleted");
        Ok(())
    }

    /// All archive entries of one of the tenant's records, oldest
    /// version first.
    pub async fn list_archives(
        &self,
        ctx: &ActorContext,
        id: &str,
    ) -> anyhow::Result<Vec<ConfigArchiveStorageData>> {
        let id = parse_id(id)?;

        let owned = self
            .persistence
            .config_find_by_id(id)
            .await?
            .is_some_and(|config| config.tenant_id == ctx.tenant_id);
        if !owned {
            return Err(SteleError::NotFound("config".to_string()).into());
        }

        self.persistence.archive_list(id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use serde_json::{Map, Value};

    use stele_persistence::{ARCHIVE_RETENTION_LIMIT, ConfigPersistence, MemoryPersistService};
    use stele_registry::{FieldKind, FieldSpec};

    fn registry() -> SchemaRegistry {
        SchemaRegistry::builder()
            .schema_type(
                "database",
                [
                    ("host".to_string(), FieldSpec::required(FieldKind::String)),
                    ("port".to_string(), FieldSpec::required(FieldKind::Number)),
                ],
            )
            .subtype(
                "database",
                "postgres",
                [("sslmode".to_string(), FieldSpec::optional(FieldKind::String))],
            )
            .schema_type(
                "service",
                [("replicas".to_string(), FieldSpec::optional(FieldKind::Number))],
            )
            .build()
    }

    fn service() -> (ConfigService, Arc<MemoryPersistService>) {
        let persistence = Arc::new(MemoryPersistService::new());
        let service = ConfigService::new(persistence.clone(), Arc::new(registry()));
        (service, persistence)
    }

    fn ctx() -> ActorContext {
        ActorContext::new("user-1", "tenant-a")
    }

    fn other_tenant() -> ActorContext {
        ActorContext::new("user-9", "tenant-b")
    }

    fn metadata(doc: &str) -> Map<String, Value> {
        serde_json::from_str(doc).unwrap()
    }

    fn create_param(name: &str) -> CreateConfigParam {
        CreateConfigParam {
            name: name.to_string(),
            r#type: "service".to_string(),
            subtype: None,
            tags: Some(vec!["prod".to_string()]),
            metadata: None,
        }
    }

    fn tag_patch(tag: &str) -> UpdateConfigParam {
        UpdateConfigParam {
            name: None,
            r#type: None,
            subtype: None,
            tags: Some(vec![tag.to_string()]),
            metadata: None,
        }
    }

    fn stele_error(err: &anyhow::Error) -> &SteleError {
        err.downcast_ref::<SteleError>()
            .unwrap_or_else(|| panic!("not a SteleError: {:#}", err))
    }

    #[tokio::test]
    async fn test_create_records_actor_identity() {
        let (service, _) = service();
        let created = service.create(&ctx(), create_param("edge-cache")).await.unwrap();

        assert_eq!(created.tenant_id, "tenant-a");
        assert_eq!(created.created_by, "user-1");
        assert_eq!(created.last_updated_by, "user-1");
        assert_eq!(created.tags, vec!["prod"]);
    }

    #[tokio::test]
    async fn test_create_rejects_empty_name_and_type() {
        let (service, _) = service();

        let err = service
            .create(
                &ctx(),
                CreateConfigParam {
                    name: "  ".to_string(),
                    ..create_param("x")
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(stele_error(&err), SteleError::IllegalArgument(_)));

        let err = service
            .create(
                &ctx(),
                CreateConfigParam {
                    r#type: String::new(),
                    ..create_param("edge-cache")
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(stele_error(&err), SteleError::IllegalArgument(_)));
    }

    #[tokio::test]
    async fn test_create_rejects_unknown_type() {
        let (service, _) = service();
        let err = service
            .create(
                &ctx(),
                CreateConfigParam {
                    r#type: "queue".to_string(),
                    ..create_param("edge-cache")
                },
            )
            .await
            .unwrap_err();

        match stele_error(&err) {
            SteleError::SchemaValidation(outcome) => {
                assert_eq!(outcome.errors, vec!["unknown type 'queue'"]);
            }
            other => panic!("unexpected error: {}", other),
        }
    }

    #[tokio::test]
    async fn test_create_without_metadata_skips_shape_validation() {
        let (service, _) = service();

        // "database" declares required fields, but shape validation only
        // applies when metadata is supplied.
        let created = service
            .create(
                &ctx(),
                CreateConfigParam {
                    name: "primary".to_string(),
                    r#type: "database".to_string(),
                    subtype: None,
                    tags: None,
                    metadata: None,
                },
            )
            .await
            .unwrap();
        assert_eq!(created.metadata, None);

        let fetched = service.get(&ctx(), &created.id.to_string()).await.unwrap();
        assert_eq!(fetched.metadata, None);
    }

    #[tokio::test]
    async fn test_create_rejects_unknown_subtype() {
        let (service, _) = service();
        let err = service
            .create(
                &ctx(),
                CreateConfigParam {
                    name: "primary".to_string(),
                    r#type: "database".to_string(),
                    subtype: Some("oracle".to_string()),
                    tags: None,
                    metadata: None,
                },
            )
            .await
            .unwrap_err();

        match stele_error(&err) {
            SteleError::SchemaValidation(outcome) => {
                assert_eq!(
                    outcome.errors,
                    vec!["unknown subtype 'oracle' for type 'database'"]
                );
            }
            other => panic!("unexpected error: {}", other),
        }
    }

    #[tokio::test]
    async fn test_create_validates_metadata_shape() {
        let (service, _) = service();
        let err = service
            .create(
                &ctx(),
                CreateConfigParam {
                    name: "primary".to_string(),
                    r#type: "database".to_string(),
                    subtype: None,
                    tags: None,
                    metadata: Some(metadata(r#"{"host": "db.local"}"#)),
                },
            )
            .await
            .unwrap_err();

        match stele_error(&err) {
            SteleError::SchemaValidation(outcome) => {
                assert_eq!(outcome.errors, vec!["missing required field 'port'"]);
            }
            other => panic!("unexpected error: {}", other),
        }
    }

    #[tokio::test]
    async fn test_create_duplicate_scoped_by_subtype_and_tenant() {
        let (service, _) = service();
        service.create(&ctx(), create_param("edge-cache")).await.unwrap();

        // Same four-field identity: rejected
        let err = service
            .create(&ctx(), create_param("edge-cache"))
            .await
            .unwrap_err();
        assert!(matches!(stele_error(&err), SteleError::AlreadyExists));

        // Same name under another tenant: allowed
        service
            .create(&other_tenant(), create_param("edge-cache"))
            .await
            .unwrap();

        // Same name and type with a subtype: a different identity
        service
            .create(
                &ctx(),
                CreateConfigParam {
                    name: "primary".to_string(),
                    r#type: "database".to_string(),
                    subtype: None,
                    tags: None,
                    metadata: Some(metadata(r#"{"host": "db.local", "port": 5432}"#)),
                },
            )
            .await
            .unwrap();
        service
            .create(
                &ctx(),
                CreateConfigParam {
                    name: "primary".to_string(),
                    r#type: "database".to_string(),
                    subtype: Some("postgres".to_string()),
                    tags: None,
                    metadata: Some(metadata(r#"{"host": "db.local", "port": 5432}"#)),
                },
            )
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_create_rejects_unsupported_tag_characters() {
        let (service, _) = service();
        let err = service
            .create(
                &ctx(),
                CreateConfigParam {
                    tags: Some(vec!["pro\"d".to_string()]),
                    ..create_param("edge-cache")
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(stele_error(&err), SteleError::IllegalArgument(_)));
    }

    #[tokio::test]
    async fn test_get_is_tenant_scoped() {
        let (service, _) = service();
        let created = service.create(&ctx(), create_param("edge-cache")).await.unwrap();
        let id = created.id.to_string();

        let fetched = service.get(&ctx(), &id).await.unwrap();
        assert_eq!(fetched.id, created.id);

        // Another tenant sees not-found, not a different error
        let err = service.get(&other_tenant(), &id).await.unwrap_err();
        assert!(matches!(stele_error(&err), SteleError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_get_rejects_malformed_id() {
        let (service, _) = service();
        let err = service.get(&ctx(), "not-a-number").await.unwrap_err();
        match stele_error(&err) {
            SteleError::IllegalArgument(message) => assert_eq!(message, "invalid config ID"),
            other => panic!("unexpected error: {}", other),
        }
    }

    #[tokio::test]
    async fn test_list_normalizes_limit_and_reports_total() {
        let (service, _) = service();
        for i in 0..15 {
            service
                .create(&ctx(), create_param(&format!("cfg-{:02}", i)))
                .await
                .unwrap();
        }

        // Unset limit falls back to the default window
        let page = service.list(&ctx(), ConfigQueryParam::default()).await.unwrap();
        assert_eq!(page.limit, DEFAULT_PAGE_LIMIT);
        assert_eq!(page.page_items.len(), DEFAULT_PAGE_LIMIT as usize);
        assert_eq!(page.total_count, 15);

        // Non-positive limit is normalized the same way
        let page = service
            .list(
                &ctx(),
                ConfigQueryParam {
                    limit: Some(-3),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(page.limit, DEFAULT_PAGE_LIMIT);

        // Skip beyond the total: empty page, accurate total
        let page = service
            .list(
                &ctx(),
                ConfigQueryParam {
                    skip: Some(100),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert!(page.page_items.is_empty());
        assert_eq!(page.total_count, 15);
    }

    #[tokio::test]
    async fn test_list_filters_by_type_and_tag() {
        let (service, _) = service();
        service.create(&ctx(), create_param("svc-a")).await.unwrap();
        service
            .create(
                &ctx(),
                CreateConfigParam {
                    name: "primary".to_string(),
                    r#type: "database".to_string(),
                    subtype: None,
                    tags: Some(vec!["critical".to_string()]),
                    metadata: Some(metadata(r#"{"host": "db.local", "port": 5432}"#)),
                },
            )
            .await
            .unwrap();

        let page = service
            .list(
                &ctx(),
                ConfigQueryParam {
                    r#type: Some("database".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(page.total_count, 1);
        assert_eq!(page.page_items[0].name, "primary");

        let page = service
            .list(
                &ctx(),
                ConfigQueryParam {
                    tag: Some("critical".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(page.total_count, 1);
        assert_eq!(page.page_items[0].name, "primary");
    }

    #[tokio::test]
    async fn test_update_archives_prior_state() {
        let (service, _) = service();
        let created = service.create(&ctx(), create_param("edge-cache")).await.unwrap();
        let id = created.id.to_string();

        let actor = ActorContext::new("user-2", "tenant-a");
        let updated = service.update(&actor, &id, tag_patch("staging")).await.unwrap();
        assert_eq!(updated.tags, vec!["staging"]);
        assert_eq!(updated.last_updated_by, "user-2");
        assert_eq!(updated.created_by, "user-1");

        let archives = service.list_archives(&ctx(), &id).await.unwrap();
        assert_eq!(archives.len(), 1);
        assert_eq!(archives[0].version, 1);
        assert_eq!(archives[0].tags, vec!["prod"]);
        assert_eq!(archives[0].archived_by, "user-2");
    }

    #[tokio::test]
    async fn test_update_rejects_immutable_fields() {
        let (service, _) = service();
        let created = service.create(&ctx(), create_param("edge-cache")).await.unwrap();
        let id = created.id.to_string();

        for param in [
            UpdateConfigParam {
                name: Some("renamed".to_string()),
                ..tag_patch("x")
            },
            UpdateConfigParam {
                r#type: Some("database".to_string()),
                ..tag_patch("x")
            },
            UpdateConfigParam {
                subtype: Some("postgres".to_string()),
                ..tag_patch("x")
            },
        ] {
            let err = service.update(&ctx(), &id, param).await.unwrap_err();
            assert!(matches!(stele_error(&err), SteleError::IllegalArgument(_)));
        }

        // Rejected before any write: nothing was archived
        assert!(service.list_archives(&ctx(), &id).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_update_validates_metadata_against_stored_type() {
        let (service, _) = service();
        let created = service.create(&ctx(), create_param("edge-cache")).await.unwrap();
        let id = created.id.to_string();

        let err = service
            .update(
                &ctx(),
                &id,
                UpdateConfigParam {
                    metadata: Some(metadata(r#"{"host": "db.local"}"#)),
                    ..tag_patch("x")
                },
            )
            .await
            .unwrap_err();

        // "host" is not a field of type "service"
        match stele_error(&err) {
            SteleError::SchemaValidation(outcome) => {
                assert_eq!(outcome.errors, vec!["unknown field 'host'"]);
            }
            other => panic!("unexpected error: {}", other),
        }
        assert!(service.list_archives(&ctx(), &id).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_update_wrong_tenant_is_not_found() {
        let (service, _) = service();
        let created = service.create(&ctx(), create_param("edge-cache")).await.unwrap();
        let id = created.id.to_string();

        let err = service
            .update(&other_tenant(), &id, tag_patch("x"))
            .await
            .unwrap_err();
        assert!(matches!(stele_error(&err), SteleError::NotFound(_)));
        assert!(service.list_archives(&ctx(), &id).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_archive_log_is_capped_with_gapless_versions() {
        let (service, _) = service();
        let created = service.create(&ctx(), create_param("edge-cache")).await.unwrap();
        let id = created.id.to_string();

        for i in 0..12 {
            service
                .update(&ctx(), &id, tag_patch(&format!("tag-{}", i)))
                .await
                .unwrap();
        }

        let archives = service.list_archives(&ctx(), &id).await.unwrap();
        assert_eq!(archives.len(), ARCHIVE_RETENTION_LIMIT as usize);
        let versions: Vec<i64> = archives.iter().map(|a| a.version).collect();
        assert_eq!(versions, (3..=12).collect::<Vec<i64>>());
    }

    #[tokio::test]
    async fn test_failed_update_leaves_no_trace() {
        let (service, persistence) = service();
        let created = service.create(&ctx(), create_param("edge-cache")).await.unwrap();
        let id = created.id.to_string();

        persistence.fail_next_snapshot();
        let err = service.update(&ctx(), &id, tag_patch("never")).await.unwrap_err();
        assert!(matches!(stele_error(&err), SteleError::DatabaseError(_)));

        let stored = service.get(&ctx(), &id).await.unwrap();
        assert_eq!(stored.tags, vec!["prod"]);
        assert_eq!(stored.modified_time, created.modified_time);
        assert!(service.list_archives(&ctx(), &id).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_delete_purges_archives_and_frees_identity() {
        let (service, persistence) = service();
        let created = service.create(&ctx(), create_param("edge-cache")).await.unwrap();
        let id = created.id.to_string();

        for i in 0..3 {
            service
                .update(&ctx(), &id, tag_patch(&format!("tag-{}", i)))
                .await
                .unwrap();
        }

        service.delete(&ctx(), &id).await.unwrap();

        let err = service.get(&ctx(), &id).await.unwrap_err();
        assert!(matches!(stele_error(&err), SteleError::NotFound(_)));
        assert_eq!(persistence.archive_count(created.id).await.unwrap(), 0);

        // The identity is free for reuse; the new record starts with an
        // empty archive log.
        let recreated = service.create(&ctx(), create_param("edge-cache")).await.unwrap();
        let archives = service
            .list_archives(&ctx(), &recreated.id.to_string())
            .await
            .unwrap();
        assert!(archives.is_empty());
    }

    #[tokio::test]
    async fn test_delete_is_tenant_scoped() {
        let (service, _) = service();
        let created = service.create(&ctx(), create_param("edge-cache")).await.unwrap();
        let id = created.id.to_string();

        let err = service.delete(&other_tenant(), &id).await.unwrap_err();
        assert!(matches!(stele_error(&err), SteleError::NotFound(_)));
        assert!(service.get(&ctx(), &id).await.is_ok());
    }

    #[tokio::test]
    async fn test_list_archives_is_tenant_scoped() {
        let (service, _) = service();
        let created = service.create(&ctx(), create_param("edge-cache")).await.unwrap();
        let id = created.id.to_string();
        service.update(&ctx(), &id, tag_patch("x")).await.unwrap();

        let err = service.list_archives(&other_tenant(), &id).await.unwrap_err();
        assert!(matches!(stele_error(&err), SteleError::NotFound(_)));
    }
}
