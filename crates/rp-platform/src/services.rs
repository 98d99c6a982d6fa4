//! Service wiring
//!
//! Builds every repository and service over one shared store and unit of work.

use std::sync::Arc;

use crate::api_resource::{ApiResourceRepository, ApiResourceService};
use crate::application::{ApplicationRepository, ApplicationService};
use crate::audit::AuditLogRepository;
use crate::identity_resource::{IdentityResourceRepository, IdentityResourceService};
use crate::module::{ModuleRepository, ModuleService};
use crate::store::DocumentStore;
use crate::usecase::{StoreUnitOfWork, UnitOfWork};

pub struct PlatformServices {
    pub applications: ApplicationService,
    pub api_resources: ApiResourceService,
    pub identity_resources: IdentityResourceService,
    pub modules: ModuleService,
    pub audit_logs: AuditLogRepository,
}

impl PlatformServices {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        let unit_of_work: Arc<dyn UnitOfWork> = Arc::new(StoreUnitOfWork::new(store.clone()));

        Self {
            applications: ApplicationService::new(
                Arc::new(ApplicationRepository::new(store.clone())),
                unit_of_work.clone(),
            ),
            api_resources: ApiResourceService::new(
                Arc::new(ApiResourceRepository::new(store.clone())),
                unit_of_work.clone(),
            ),
            identity_resources: IdentityResourceService::new(
                Arc::new(IdentityResourceRepository::new(store.clone())),
                unit_of_work.clone(),
            ),
            modules: ModuleService::new(Arc::new(ModuleRepository::new(store.clone())), unit_of_work),
            audit_logs: AuditLogRepository::new(store),
        }
    }
}
