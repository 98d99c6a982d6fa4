//! Uniqueness-validated create / update / delete.
//!
//! Every entity service routes its writes through [`CrudOperations`]:
//! check, stage, commit once. Validation happens before anything is staged,
//! so a rejected call leaves the store untouched.

use std::sync::Arc;

use tracing::{debug, info};

use crate::shared::error::{PlatformError, Result};
use crate::shared::ids::parse_id_list;
use crate::shared::tsid::TsidGenerator;
use crate::usecase::aggregate::Aggregate;
use crate::usecase::repository::Repository;
use crate::usecase::unit_of_work::UnitOfWork;
use crate::usecase::ExecutionContext;

pub struct CrudOperations<T: Aggregate> {
    repository: Arc<dyn Repository<T>>,
    unit_of_work: Arc<dyn UnitOfWork>,
}

impl<T: Aggregate> CrudOperations<T> {
    pub fn new(repository: Arc<dyn Repository<T>>, unit_of_work: Arc<dyn UnitOfWork>) -> Self {
        Self {
            repository,
            unit_of_work,
        }
    }

    pub fn repository(&self) -> &dyn Repository<T> {
        self.repository.as_ref()
    }

    pub fn unit_of_work(&self) -> &dyn UnitOfWork {
        self.unit_of_work.as_ref()
    }

    /// Create with a freshly generated id. Returns the id.
    pub async fn create(&self, entity: Option<T>, ctx: &ExecutionContext) -> Result<String> {
        let mut entity = require(entity)?;
        entity.set_id(TsidGenerator::generate());
        self.insert(entity, ctx).await
    }

    /// Create an entity whose id the caller already assigned.
    pub async fn insert(&self, mut entity: T, ctx: &ExecutionContext) -> Result<String> {
        entity.validate()?;
        self.ensure_can_create(&entity).await?;

        entity.audit_mut().stamp_created(ctx);

        let mut tx = self.unit_of_work.begin(ctx);
        self.repository.add(&mut tx, &entity)?;
        self.unit_of_work.commit(tx).await?;

        info!(
            entity_type = T::ENTITY_TYPE,
            id = entity.id(),
            principal_id = %ctx.principal_id,
            "Created"
        );
        Ok(entity.id().to_string())
    }

    pub async fn update(&self, entity: Option<T>, ctx: &ExecutionContext) -> Result<()> {
        let mut entity = require(entity)?;
        self.prepare_update(&mut entity, ctx).await?;

        let mut tx = self.unit_of_work.begin(ctx);
        self.repository.update(&mut tx, &entity)?;
        self.unit_of_work.commit(tx).await?;

        info!(
            entity_type = T::ENTITY_TYPE,
            id = entity.id(),
            principal_id = %ctx.principal_id,
            "Updated"
        );
        Ok(())
    }

    /// Run every update check and stamp the entity. Returns the stored row.
    pub async fn prepare_update(&self, entity: &mut T, ctx: &ExecutionContext) -> Result<T> {
        entity.validate()?;
        if entity.id().trim().is_empty() {
            return Err(PlatformError::validation(format!(
                "{} id is required for update",
                T::ENTITY_TYPE
            )));
        }

        if !self.repository.can_update(entity).await? {
            return Err(duplicate(entity));
        }

        let stored = self
            .repository
            .find_by_id(entity.id())
            .await?
            .ok_or_else(|| PlatformError::not_found(T::ENTITY_TYPE, entity.id()))?;

        entity.audit_mut().stamp_modified(stored.audit(), ctx);
        Ok(stored)
    }

    /// Soft-delete every listed entity that exists. Unknown ids are skipped.
    pub async fn delete(&self, ids: &str, ctx: &ExecutionContext) -> Result<()> {
        let ids = parse_id_list(ids);
        if ids.is_empty() {
            debug!(entity_type = T::ENTITY_TYPE, "Delete called with no ids");
            return Ok(());
        }

        let found = self.repository.find_by_ids(&ids).await?;
        if found.is_empty() {
            debug!(entity_type = T::ENTITY_TYPE, requested = ids.len(), "Nothing to delete");
            return Ok(());
        }

        self.remove_all(&found, ctx).await
    }

    /// Remove the given entities in one repository call and one commit.
    pub async fn remove_all(&self, entities: &[T], ctx: &ExecutionContext) -> Result<()> {
        let mut tx = self.unit_of_work.begin(ctx);
        self.repository.remove(&mut tx, entities)?;
        self.unit_of_work.commit(tx).await?;

        info!(
            entity_type = T::ENTITY_TYPE,
            count = entities.len(),
            principal_id = %ctx.principal_id,
            "Deleted"
        );
        Ok(())
    }

    pub async fn ensure_can_create(&self, entity: &T) -> Result<()> {
        if self.repository.can_create(entity).await? {
            Ok(())
        } else {
            Err(duplicate(entity))
        }
    }
}

fn require<T: Aggregate>(entity: Option<T>) -> Result<T> {
    entity.ok_or_else(|| PlatformError::null_entity(T::ENTITY_TYPE))
}

fn duplicate<T: Aggregate>(entity: &T) -> PlatformError {
    PlatformError::duplicate(
        T::ENTITY_TYPE,
        T::KEY_NAME,
        entity.natural_key().unwrap_or_default(),
    )
}
