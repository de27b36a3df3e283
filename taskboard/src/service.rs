use std::collections::HashMap;

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
    TransactionTrait, sea_query::Expr,
};
use tokio::sync::broadcast;

use crate::entity::{collection, task};
use crate::error::{Error, Result};
use crate::input::{CreateCollection, CreateTask};
use crate::messages::{ChangeNotification, WriteKind};
use crate::overview::CollectionWithTasks;
use crate::principal::Principal;

/// Owner-scoped store for collections and tasks.
///
/// Every operation takes the caller's [`Principal`] and filters each row it
/// reads or writes by both primary key and owner, so one principal can never
/// see or touch another's data. Each operation runs in a single transaction.
#[derive(Clone)]
pub struct TaskBoard {
    db: DatabaseConnection,
    change_tx: broadcast::Sender<ChangeNotification>,
}

impl TaskBoard {
    pub(crate) fn new(
        db: DatabaseConnection,
        change_tx: broadcast::Sender<ChangeNotification>,
    ) -> Self {
        Self { db, change_tx }
    }

    /// Get a reference to the underlying SeaORM connection.
    pub fn connection(&self) -> &DatabaseConnection {
        &self.db
    }

    /// Subscribe to notifications for committed writes.
    pub fn change_rx(&self) -> broadcast::Receiver<ChangeNotification> {
        self.change_tx.subscribe()
    }

    pub async fn create_collection(
        &self,
        principal: &Principal,
        input: CreateCollection,
    ) -> Result<collection::Model> {
        let valid = input.validate().inspect_err(|err| {
            log::warn!("rejected collection from {principal}: {err}");
        })?;

        let created = collection::ActiveModel {
            user_id: Set(principal.id().to_owned()),
            name: Set(valid.name),
            color: Set(valid.color),
            created_at: Set(Utc::now()),
            ..Default::default()
        }
        .insert(&self.db)
        .await?;

        log::debug!("{principal} created collection {}", created.id);
        self.notify("collections", WriteKind::Insert, created.id, principal);
        Ok(created)
    }

    /// Delete a collection together with its tasks.
    ///
    /// Fails with [`Error::NotFound`] when the collection is missing or owned
    /// by someone else.
    pub async fn delete_collection(
        &self,
        principal: &Principal,
        collection_id: i32,
    ) -> Result<collection::Model> {
        let txn = self.db.begin().await?;

        let Some(existing) = collection::Entity::find_by_id(collection_id)
            .filter(collection::Column::UserId.eq(principal.id()))
            .one(&txn)
            .await?
        else {
            return Err(not_found(principal, "collection", collection_id));
        };

        let tasks = task::Entity::delete_many()
            .filter(task::Column::CollectionId.eq(collection_id))
            .exec(&txn)
            .await?;

        let deleted = collection::Entity::delete_many()
            .filter(collection::Column::Id.eq(collection_id))
            .filter(collection::Column::UserId.eq(principal.id()))
            .exec(&txn)
            .await?;
        if deleted.rows_affected == 0 {
            // lost a race with a concurrent delete; the transaction rolls back on drop
            return Err(not_found(principal, "collection", collection_id));
        }

        txn.commit().await?;

        log::debug!(
            "{principal} deleted collection {collection_id} and {} task(s)",
            tasks.rows_affected
        );
        self.notify("collections", WriteKind::Delete, collection_id, principal);
        Ok(existing)
    }

    /// Create a task inside one of the caller's collections.
    ///
    /// The parent collection must belong to the caller; a missing or foreign
    /// collection is reported as [`Error::NotFound`].
    pub async fn create_task(&self, principal: &Principal, input: CreateTask) -> Result<task::Model> {
        let valid = input.validate().inspect_err(|err| {
            log::warn!("rejected task from {principal}: {err}");
        })?;

        let txn = self.db.begin().await?;

        let parent = collection::Entity::find_by_id(valid.collection_id)
            .filter(collection::Column::UserId.eq(principal.id()))
            .one(&txn)
            .await?;
        if parent.is_none() {
            return Err(not_found(principal, "collection", valid.collection_id));
        }

        let created = task::ActiveModel {
            user_id: Set(principal.id().to_owned()),
            content: Set(valid.content),
            done: Set(false),
            expires_at: Set(valid.expires_at),
            created_at: Set(Utc::now()),
            collection_id: Set(valid.collection_id),
            ..Default::default()
        }
        .insert(&txn)
        .await?;

        txn.commit().await?;

        log::debug!(
            "{principal} created task {} in collection {}",
            created.id,
            created.collection_id
        );
        self.notify("tasks", WriteKind::Insert, created.id, principal);
        Ok(created)
    }

    /// Mark a task as done.
    ///
    /// Completing an already completed task succeeds and returns it unchanged.
    /// There is no way back to pending.
    pub async fn complete_task(&self, principal: &Principal, task_id: i32) -> Result<task::Model> {
        let txn = self.db.begin().await?;

        let Some(current) = task::Entity::find_by_id(task_id)
            .filter(task::Column::UserId.eq(principal.id()))
            .one(&txn)
            .await?
        else {
            return Err(not_found(principal, "task", task_id));
        };

        if current.done {
            txn.commit().await?;
            log::debug!("task {task_id} already done");
            return Ok(current);
        }

        let updated = task::Entity::update_many()
            .col_expr(task::Column::Done, Expr::value(true))
            .filter(task::Column::Id.eq(task_id))
            .filter(task::Column::UserId.eq(principal.id()))
            .exec(&txn)
            .await?;
        if updated.rows_affected == 0 {
            return Err(not_found(principal, "task", task_id));
        }

        txn.commit().await?;

        log::debug!("{principal} completed task {task_id}");
        self.notify("tasks", WriteKind::Update, task_id, principal);
        Ok(task::Model {
            done: true,
            ..current
        })
    }

    /// The caller's collections in creation order, each with its tasks.
    pub async fn list_collections(&self, principal: &Principal) -> Result<Vec<CollectionWithTasks>> {
        let collections = collection::Entity::find()
            .filter(collection::Column::UserId.eq(principal.id()))
            .order_by_asc(collection::Column::Id)
            .all(&self.db)
            .await?;
        if collections.is_empty() {
            return Ok(Vec::new());
        }

        let ids: Vec<i32> = collections.iter().map(|c| c.id).collect();
        let tasks = task::Entity::find()
            .filter(task::Column::UserId.eq(principal.id()))
            .filter(task::Column::CollectionId.is_in(ids))
            .order_by_asc(task::Column::Id)
            .all(&self.db)
            .await?;

        let mut by_collection: HashMap<i32, Vec<task::Model>> = HashMap::new();
        for task in tasks {
            by_collection.entry(task.collection_id).or_default().push(task);
        }

        Ok(collections
            .into_iter()
            .map(|collection| CollectionWithTasks {
                tasks: by_collection.remove(&collection.id).unwrap_or_default(),
                collection,
            })
            .collect())
    }

    fn notify(&self, table: &'static str, kind: WriteKind, primary_key: i32, owner: &Principal) {
        // no subscribers is fine
        let _ = self.change_tx.send(ChangeNotification {
            table,
            kind,
            primary_key,
            owner: owner.clone(),
        });
    }
}

fn not_found(principal: &Principal, entity: &'static str, id: i32) -> Error {
    log::warn!("{principal} asked for {entity} {id}, which is absent or not theirs");
    Error::NotFound { entity, id }
}
