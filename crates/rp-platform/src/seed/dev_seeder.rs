//! Development Data Seeder
//!
//! Seeds a sample application, its identity and API resources and a small
//! module tree through the regular services. Rows whose key already exists
//! are left alone, so running it twice is harmless.
//!
//! Sample client:
//!   Code: admin-console / Secret: DevSecret123!

use tracing::{debug, info};

use crate::application::{ApplicationDto, ClientSecret, GrantType};
use crate::api_resource::ApiResourceDto;
use crate::identity_resource::IdentityResourceDto;
use crate::module::CreateModuleRequest;
use crate::services::PlatformServices;
use crate::shared::error::Result;
use crate::usecase::ExecutionContext;

const DEV_APPLICATION_CODE: &str = "admin-console";
const DEV_SECRET: &str = "DevSecret123!";

/// Development data seeder
pub struct DevDataSeeder<'a> {
    services: &'a PlatformServices,
    ctx: ExecutionContext,
}

impl<'a> DevDataSeeder<'a> {
    pub fn new(services: &'a PlatformServices) -> Self {
        Self {
            services,
            ctx: ExecutionContext::system(),
        }
    }

    /// Seed all development data
    pub async fn seed(&self) -> Result<()> {
        info!("=== DEV DATA SEEDER ===");

        self.seed_identity_resources().await?;
        self.seed_api_resources().await?;
        if let Some(application_id) = self.seed_application().await? {
            self.seed_modules(&application_id).await?;
        }

        info!("Development data seeded");
        info!("  Client: {} / {}", DEV_APPLICATION_CODE, DEV_SECRET);
        info!("=======================");
        Ok(())
    }

    async fn seed_identity_resources(&self) -> Result<()> {
        let mut openid = IdentityResourceDto::new("openid", "OpenID");
        openid.required = true;
        openid.claims = vec!["sub".into()];
        openid.sort_id = 0;

        let mut profile = IdentityResourceDto::new("profile", "Profile");
        profile.emphasize = true;
        profile.claims = ["name", "family_name", "given_name", "preferred_username", "email"]
            .into_iter()
            .map(String::from)
            .collect();
        profile.sort_id = 1;

        for dto in [openid, profile] {
            let uri = dto.uri.clone();
            let outcome = self.services.identity_resources.create(Some(dto), &self.ctx).await;
            skip_existing("identity resource", &uri, outcome)?;
        }
        Ok(())
    }

    async fn seed_api_resources(&self) -> Result<()> {
        let mut api = ApiResourceDto::new("admin-api", "Admin API");
        api.display_name = Some("Administration API".into());
        api.scopes = vec!["admin.read".into(), "admin.write".into()];

        let outcome = self.services.api_resources.create(Some(api), &self.ctx).await;
        skip_existing("API resource", "admin-api", outcome)?;
        Ok(())
    }

    /// Returns the application id when it was created on this run.
    async fn seed_application(&self) -> Result<Option<String>> {
        if self
            .services
            .applications
            .find_by_code(DEV_APPLICATION_CODE)
            .await?
            .is_some()
        {
            debug!("Application {} already exists", DEV_APPLICATION_CODE);
            return Ok(None);
        }

        let mut app = ApplicationDto::new(DEV_APPLICATION_CODE, "Admin Console");
        app.allowed_grant_types = vec![GrantType::AuthorizationCode, GrantType::ClientCredentials];
        app.redirect_uris = vec!["http://localhost:5173/callback".into()];
        app.allowed_cors_origins = vec!["http://localhost:5173".into()];
        app.allowed_scopes = vec!["openid".into(), "profile".into(), "admin.read".into()];
        app.allow_offline_access = true;
        app.client_secrets = vec![ClientSecret::shared_secret(DEV_SECRET)];

        let id = self.services.applications.create(Some(app), &self.ctx).await?;
        info!("Created application: {}", DEV_APPLICATION_CODE);
        Ok(Some(id))
    }

    async fn seed_modules(&self, application_id: &str) -> Result<()> {
        let modules = &self.services.modules;

        let system = modules
            .create(Some(CreateModuleRequest::new(application_id, "", "System")), &self.ctx)
            .await?;
        modules
            .create(
                Some(CreateModuleRequest::new(application_id, "/system/applications", "Applications").with_parent(&system)),
                &self.ctx,
            )
            .await?;
        modules
            .create(
                Some(
                    CreateModuleRequest::new(application_id, "/system/resources", "Resources")
                        .with_parent(&system)
                        .with_sort_id(1),
                ),
                &self.ctx,
            )
            .await?;

        info!("Created module tree for {}", DEV_APPLICATION_CODE);
        Ok(())
    }
}

fn skip_existing(kind: &str, key: &str, outcome: Result<String>) -> Result<()> {
    match outcome {
        Ok(_) => {
            info!("Created {}: {}", kind, key);
            Ok(())
        }
        Err(e) if e.is_duplicate() => {
            debug!("{} {} already exists", kind, key);
            Ok(())
        }
        Err(e) => Err(e),
    }
}
