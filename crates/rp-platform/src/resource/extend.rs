//! Kind-specific resource fields carried in the `extend` column.

use serde::{Deserialize, Serialize};

use super::record::ResourceKind;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModuleExtend {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    /// Whether the node starts expanded in navigation trees
    #[serde(default)]
    pub expanded: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IdentityResourceExtend {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(default)]
    pub required: bool,
    #[serde(default)]
    pub emphasize: bool,
    #[serde(default = "default_true")]
    pub show_in_discovery_document: bool,
    /// User claim types included when this scope is granted
    #[serde(default)]
    pub claims: Vec<String>,
}

impl Default for IdentityResourceExtend {
    fn default() -> Self {
        Self {
            display_name: None,
            required: false,
            emphasize: false,
            show_in_discovery_document: true,
            claims: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiResourceExtend {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(default)]
    pub claims: Vec<String>,
    #[serde(default)]
    pub scopes: Vec<String>,
}

fn default_true() -> bool {
    true
}

/// Extend payload of any resource kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResourceExtend {
    Module(ModuleExtend),
    IdentityResource(IdentityResourceExtend),
    ApiResource(ApiResourceExtend),
}

impl ResourceExtend {
    pub fn kind(&self) -> ResourceKind {
        match self {
            Self::Module(_) => ResourceKind::Module,
            Self::IdentityResource(_) => ResourceKind::IdentityResource,
            Self::ApiResource(_) => ResourceKind::ApiResource,
        }
    }

    /// Decode JSON text for `kind`. Absent or blank text yields the kind's default.
    pub fn decode(kind: ResourceKind, raw: Option<&str>) -> serde_json::Result<Self> {
        let raw = raw.map(str::trim).filter(|raw| !raw.is_empty());
        Ok(match kind {
            ResourceKind::Module => Self::Module(decode_or_default(raw)?),
            ResourceKind::IdentityResource => Self::IdentityResource(decode_or_default(raw)?),
            ResourceKind::ApiResource => Self::ApiResource(decode_or_default(raw)?),
        })
    }

    pub fn encode(&self) -> serde_json::Result<String> {
        match self {
            Self::Module(extend) => serde_json::to_string(extend),
            Self::IdentityResource(extend) => serde_json::to_string(extend),
            Self::ApiResource(extend) => serde_json::to_string(extend),
        }
    }
}

fn decode_or_default<E>(raw: Option<&str>) -> serde_json::Result<E>
where
    E: serde::de::DeserializeOwned + Default,
{
    match raw {
        Some(raw) => serde_json::from_str(raw),
        None => Ok(E::default()),
    }
}
