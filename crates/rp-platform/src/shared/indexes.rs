//! MongoDB Index Initialization
//!
//! Creates indexes for all collections on startup. The unique indexes mirror
//! [`UNIQUE_INDEXES`](crate::store::UNIQUE_INDEXES): partial on live rows with
//! a non-empty key, so soft-deleted rows and blank module urls never collide.

use mongodb::{bson::doc, bson::Document, options::IndexOptions, Database, IndexModel};
use tracing::info;

use crate::audit::AUDIT_LOG_COLLECTION;
use crate::resource::RESOURCE_COLLECTION;
use crate::store::{DELETED_FIELD, UNIQUE_INDEXES};

/// Initialize all MongoDB indexes
pub async fn initialize_indexes(db: &Database) -> Result<(), mongodb::error::Error> {
    info!("Initializing MongoDB indexes...");

    create_unique_indexes(db).await?;
    create_secondary_indexes(db).await?;

    info!("MongoDB indexes initialized successfully");
    Ok(())
}

async fn create_unique_indexes(db: &Database) -> Result<(), mongodb::error::Error> {
    for index in UNIQUE_INDEXES {
        let mut keys = Document::new();
        for field in index.fields {
            keys.insert(*field, 1);
        }

        let mut partial = doc! { DELETED_FIELD: false };
        partial.insert(index.key_field, doc! { "$gt": "" });

        db.collection::<Document>(index.collection)
            .create_index(
                IndexModel::builder()
                    .keys(keys)
                    .options(
                        IndexOptions::builder()
                            .name(index.name.to_string())
                            .unique(true)
                            .partial_filter_expression(partial)
                            .build(),
                    )
                    .build(),
            )
            .await?;

        info!("Created unique index {} on {}", index.name, index.collection);
    }
    Ok(())
}

/// Non-unique lookup indexes, as (collection, model).
fn secondary_indexes() -> Vec<(&'static str, IndexModel)> {
    let model = |keys: Document| IndexModel::builder().keys(keys).build();
    vec![
        // Listing by kind
        (RESOURCE_COLLECTION, model(doc! { "type": 1, "sortId": 1 })),
        // Module subtree lookups
        (RESOURCE_COLLECTION, model(doc! { "path": 1 })),
        (AUDIT_LOG_COLLECTION, model(doc! { "entityType": 1, "entityId": 1 })),
        (AUDIT_LOG_COLLECTION, model(doc! { "performedAt": -1 })),
    ]
}

async fn create_secondary_indexes(db: &Database) -> Result<(), mongodb::error::Error> {
    for (collection, model) in secondary_indexes() {
        db.collection::<Document>(collection).create_index(model).await?;
    }
    info!("Created indexes on {} and {}", RESOURCE_COLLECTION, AUDIT_LOG_COLLECTION);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_secondary_indexes_cover_resources_and_audit_logs() {
        let indexes = secondary_indexes();
        assert_eq!(indexes.len(), 4);
        assert!(indexes.iter().any(|(c, m)| *c == RESOURCE_COLLECTION && m.keys == doc! { "path": 1 }));
        assert!(indexes
            .iter()
            .any(|(c, m)| *c == AUDIT_LOG_COLLECTION && m.keys == doc! { "entityType": 1, "entityId": 1 }));
        // No options: index builds run in the background on 4.2+
        assert!(indexes.iter().all(|(_, m)| m.options.is_none()));
    }
}
