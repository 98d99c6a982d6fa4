//! API Resource Service

use std::sync::Arc;

use super::dto::ApiResourceDto;
use super::entity::ApiResource;
use crate::shared::error::Result;
use crate::usecase::{CrudOperations, ExecutionContext, Repository, UnitOfWork};

pub struct ApiResourceService {
    crud: CrudOperations<ApiResource>,
}

impl ApiResourceService {
    pub fn new(repository: Arc<dyn Repository<ApiResource>>, unit_of_work: Arc<dyn UnitOfWork>) -> Self {
        Self {
            crud: CrudOperations::new(repository, unit_of_work),
        }
    }

    /// Returns the new resource's id.
    pub async fn create(&self, dto: Option<ApiResourceDto>, ctx: &ExecutionContext) -> Result<String> {
        self.crud.create(dto.map(ApiResource::from), ctx).await
    }

    pub async fn update(&self, dto: Option<ApiResourceDto>, ctx: &ExecutionContext) -> Result<()> {
        self.crud.update(dto.map(ApiResource::from), ctx).await
    }

    /// `ids` is comma-separated; blank input does nothing.
    pub async fn delete(&self, ids: &str, ctx: &ExecutionContext) -> Result<()> {
        self.crud.delete(ids, ctx).await
    }

    pub async fn get(&self, id: &str) -> Result<Option<ApiResourceDto>> {
        Ok(self.crud.repository().find_by_id(id).await?.map(ApiResourceDto::from))
    }

    /// Ordered by sort id, then name.
    pub async fn list(&self) -> Result<Vec<ApiResourceDto>> {
        let mut resources = self.crud.repository().find_all().await?;
        resources.sort_by(|a, b| a.sort_id.cmp(&b.sort_id).then_with(|| a.name.cmp(&b.name)));
        Ok(resources.into_iter().map(ApiResourceDto::from).collect())
    }
}
