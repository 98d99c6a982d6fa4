//! Identity Resource Service

use std::sync::Arc;

use super::dto::IdentityResourceDto;
use super::entity::IdentityResource;
use crate::shared::error::Result;
use crate::usecase::{CrudOperations, ExecutionContext, Repository, UnitOfWork};

pub struct IdentityResourceService {
    crud: CrudOperations<IdentityResource>,
}

impl IdentityResourceService {
    pub fn new(repository: Arc<dyn Repository<IdentityResource>>, unit_of_work: Arc<dyn UnitOfWork>) -> Self {
        Self {
            crud: CrudOperations::new(repository, unit_of_work),
        }
    }

    /// Returns the new resource's id.
    pub async fn create(&self, dto: Option<IdentityResourceDto>, ctx: &ExecutionContext) -> Result<String> {
        self.crud.create(dto.map(IdentityResource::from), ctx).await
    }

    pub async fn update(&self, dto: Option<IdentityResourceDto>, ctx: &ExecutionContext) -> Result<()> {
        self.crud.update(dto.map(IdentityResource::from), ctx).await
    }

    /// `ids` is comma-separated; blank input does nothing.
    pub async fn delete(&self, ids: &str, ctx: &ExecutionContext) -> Result<()> {
        self.crud.delete(ids, ctx).await
    }

    pub async fn get(&self, id: &str) -> Result<Option<IdentityResourceDto>> {
        Ok(self.crud.repository().find_by_id(id).await?.map(IdentityResourceDto::from))
    }

    /// Ordered by sort id, then name.
    pub async fn list(&self) -> Result<Vec<IdentityResourceDto>> {
        let mut resources = self.crud.repository().find_all().await?;
        resources.sort_by(|a, b| a.sort_id.cmp(&b.sort_id).then_with(|| a.name.cmp(&b.name)));
        Ok(resources.into_iter().map(IdentityResourceDto::from).collect())
    }
}
