//! Creation / modification stamps carried by every aggregate.

use bson::serde_helpers::chrono_datetime_as_bson_datetime;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::usecase::ExecutionContext;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditInfo {
    #[serde(with = "chrono_datetime_as_bson_datetime")]
    pub created_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub creator_id: Option<String>,

    #[serde(with = "chrono_datetime_as_bson_datetime")]
    pub updated_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_modifier_id: Option<String>,
}

impl Default for AuditInfo {
    fn default() -> Self {
        let now = Utc::now();
        Self {
            created_at: now,
            creator_id: None,
            updated_at: now,
            last_modifier_id: None,
        }
    }
}

impl AuditInfo {
    /// Stamp both pairs for a brand new row.
    pub fn stamp_created(&mut self, ctx: &ExecutionContext) {
        self.created_at = ctx.initiated_at;
        self.creator_id = Some(ctx.principal_id.clone());
        self.updated_at = ctx.initiated_at;
        self.last_modifier_id = Some(ctx.principal_id.clone());
    }

    /// Keep the stored creation pair and stamp the modification pair.
    pub fn stamp_modified(&mut self, stored: &AuditInfo, ctx: &ExecutionContext) {
        self.created_at = stored.created_at;
        self.creator_id = stored.creator_id.clone();
        self.updated_at = ctx.initiated_at;
        self.last_modifier_id = Some(ctx.principal_id.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stamp_modified_keeps_creation() {
        let creator = ExecutionContext::create("alice");
        let mut stored = AuditInfo::default();
        stored.stamp_created(&creator);

        let editor = ExecutionContext::create("bob");
        let mut incoming = AuditInfo::default();
        incoming.stamp_modified(&stored, &editor);

        assert_eq!(incoming.created_at, stored.created_at);
        assert_eq!(incoming.creator_id.as_deref(), Some("alice"));
        assert_eq!(incoming.last_modifier_id.as_deref(), Some("bob"));
        assert_eq!(incoming.updated_at, editor.initiated_at);
    }
}
