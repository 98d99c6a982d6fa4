//! Application Service

use std::sync::Arc;

use super::dto::ApplicationDto;
use super::entity::Application;
use crate::shared::error::Result;
use crate::store::Filter;
use crate::usecase::{CrudOperations, ExecutionContext, Repository, UnitOfWork};

pub struct ApplicationService {
    crud: CrudOperations<Application>,
}

impl ApplicationService {
    pub fn new(repository: Arc<dyn Repository<Application>>, unit_of_work: Arc<dyn UnitOfWork>) -> Self {
        Self {
            crud: CrudOperations::new(repository, unit_of_work),
        }
    }

    /// Returns the new application's id.
    pub async fn create(&self, dto: Option<ApplicationDto>, ctx: &ExecutionContext) -> Result<String> {
        self.crud.create(dto.map(Application::from), ctx).await
    }

    pub async fn update(&self, dto: Option<ApplicationDto>, ctx: &ExecutionContext) -> Result<()> {
        self.crud.update(dto.map(Application::from), ctx).await
    }

    /// `ids` is comma-separated; blank input does nothing.
    pub async fn delete(&self, ids: &str, ctx: &ExecutionContext) -> Result<()> {
        self.crud.delete(ids, ctx).await
    }

    pub async fn get(&self, id: &str) -> Result<Option<ApplicationDto>> {
        Ok(self.crud.repository().find_by_id(id).await?.map(ApplicationDto::from))
    }

    pub async fn find_by_code(&self, code: &str) -> Result<Option<ApplicationDto>> {
        let mut found = self
            .crud
            .repository()
            .find_where(Filter::new().eq("code", code.trim()))
            .await?;
        Ok(found.pop().map(ApplicationDto::from))
    }

    /// Live applications ordered by name, then code.
    pub async fn list(&self) -> Result<Vec<ApplicationDto>> {
        let mut apps = self.crud.repository().find_all().await?;
        apps.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.code.cmp(&b.code)));
        Ok(apps.into_iter().map(ApplicationDto::from).collect())
    }
}
