//! Generic repository over a [`DocumentStore`].
//!
//! Reads go straight to the store. Writes are staged into the caller's
//! [`Transaction`] and only reach the store on commit.

use std::marker::PhantomData;
use std::sync::Arc;

use async_trait::async_trait;
use bson::Bson;

use crate::audit::AuditAction;
use crate::shared::error::Result;
use crate::store::{DocumentStore, Filter, WriteOp, DELETED_FIELD};
use crate::usecase::aggregate::Aggregate;
use crate::usecase::unit_of_work::Transaction;

#[async_trait]
pub trait Repository<T: Aggregate>: Send + Sync {
    /// No live row in the key scope holds this entity's natural key.
    async fn can_create(&self, entity: &T) -> Result<bool>;

    /// As [`can_create`](Self::can_create), ignoring the entity's own row.
    async fn can_update(&self, entity: &T) -> Result<bool>;

    async fn find_by_id(&self, id: &str) -> Result<Option<T>>;
    async fn find_by_ids(&self, ids: &[String]) -> Result<Vec<T>>;
    async fn find_all(&self) -> Result<Vec<T>>;

    /// Live rows of this aggregate also matching `filter`'s equalities.
    async fn find_where(&self, filter: Filter) -> Result<Vec<T>>;

    fn add(&self, tx: &mut Transaction, entity: &T) -> Result<()>;
    fn update(&self, tx: &mut Transaction, entity: &T) -> Result<()>;
    fn remove(&self, tx: &mut Transaction, entities: &[T]) -> Result<()>;
}

pub struct StoreRepository<T> {
    store: Arc<dyn DocumentStore>,
    _aggregate: PhantomData<fn() -> T>,
}

impl<T: Aggregate> StoreRepository<T> {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self {
            store,
            _aggregate: PhantomData,
        }
    }

    async fn key_is_free(&self, entity: &T, exclude_self: bool) -> Result<bool> {
        let key = match entity.natural_key() {
            Some(key) if !key.is_empty() => key,
            _ => return Ok(true),
        };

        let mut filter = entity.key_scope().eq(T::KEY_FIELD, key);
        if exclude_self {
            filter = filter.exclude_id(entity.id());
        }

        Ok(self.store.count(T::COLLECTION, &filter).await? == 0)
    }

    async fn load(&self, filter: &Filter) -> Result<Vec<T>> {
        self.store
            .find(T::COLLECTION, filter)
            .await?
            .into_iter()
            .map(T::from_document)
            .collect()
    }
}

#[async_trait]
impl<T: Aggregate> Repository<T> for StoreRepository<T> {
    async fn can_create(&self, entity: &T) -> Result<bool> {
        self.key_is_free(entity, false).await
    }

    async fn can_update(&self, entity: &T) -> Result<bool> {
        self.key_is_free(entity, true).await
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<T>> {
        let mut found = self.load(&T::type_filter().id(id)).await?;
        Ok(found.pop())
    }

    async fn find_by_ids(&self, ids: &[String]) -> Result<Vec<T>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        self.load(&T::type_filter().ids(ids.to_vec())).await
    }

    async fn find_all(&self) -> Result<Vec<T>> {
        self.load(&T::type_filter()).await
    }

    async fn find_where(&self, filter: Filter) -> Result<Vec<T>> {
        let mut scoped = T::type_filter();
        scoped.equals.extend(filter.equals);
        scoped.id_in = filter.id_in;
        scoped.id_not = filter.id_not;
        self.load(&scoped).await
    }

    fn add(&self, tx: &mut Transaction, entity: &T) -> Result<()> {
        let op = WriteOp::Insert {
            collection: T::COLLECTION,
            document: entity.to_document()?,
            claim: entity.key_claim(),
        };
        tx.stage(op, T::ENTITY_TYPE, entity.id(), AuditAction::Create);
        Ok(())
    }

    fn update(&self, tx: &mut Transaction, entity: &T) -> Result<()> {
        let op = WriteOp::Replace {
            collection: T::COLLECTION,
            id: entity.id().to_string(),
            document: entity.to_document()?,
            claim: entity.key_claim(),
        };
        tx.stage(op, T::ENTITY_TYPE, entity.id(), AuditAction::Update);
        Ok(())
    }

    fn remove(&self, tx: &mut Transaction, entities: &[T]) -> Result<()> {
        for entity in entities {
            let mut removed = entity.clone();
            let stored = entity.audit().clone();
            removed.audit_mut().stamp_modified(&stored, tx.context());

            let mut document = removed.to_document()?;
            document.insert(DELETED_FIELD, Bson::Boolean(true));

            let op = WriteOp::Replace {
                collection: T::COLLECTION,
                id: entity.id().to_string(),
                document,
                claim: None,
            };
            tx.stage(op, T::ENTITY_TYPE, entity.id(), AuditAction::Delete);
        }
        Ok(())
    }
}
