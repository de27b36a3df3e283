use sea_orm::{
    ConnectOptions, ConnectionTrait, Database, DbErr, EntityTrait, Schema,
    sea_query::SqliteQueryBuilder,
};
use tokio::sync::broadcast;

use crate::entity::{collection, task};
use crate::messages::ChangeNotification;
use crate::service::TaskBoard;

/// Builder for [`TaskBoard`].
///
/// ```ignore
/// let board = TaskBoardBuilder::new("sqlite:./taskboard.db?mode=rwc")
///     .with_max_connections(8)
///     .build()
///     .await?;
/// ```
pub struct TaskBoardBuilder {
    database_url: String,
    max_connections: Option<u32>,
    change_capacity: usize,
}

impl TaskBoardBuilder {
    pub fn new(url: &str) -> Self {
        Self {
            database_url: url.to_string(),
            max_connections: None,
            change_capacity: 256,
        }
    }

    pub fn with_max_connections(mut self, max: u32) -> Self {
        self.max_connections = Some(max);
        self
    }

    /// Buffer size of the change notification channel. Slow subscribers
    /// that fall further behind than this miss notifications.
    pub fn with_change_capacity(mut self, capacity: usize) -> Self {
        self.change_capacity = capacity.max(1);
        self
    }

    /// Connect, create missing tables, and return the board.
    pub async fn build(self) -> Result<TaskBoard, DbErr> {
        let mut opts = ConnectOptions::new(&self.database_url);
        if self.database_url.contains(":memory:") {
            // every pooled connection would otherwise open its own empty database
            opts.max_connections(1).min_connections(1);
        } else if let Some(max) = self.max_connections {
            opts.max_connections(max);
        }
        let db = Database::connect(opts).await?;

        create_schema(&db).await?;
        log::info!("task board ready on {}", self.database_url);

        let (change_tx, _) = broadcast::channel::<ChangeNotification>(self.change_capacity);
        Ok(TaskBoard::new(db, change_tx))
    }
}

/// Create the `collections` and `tasks` tables if they do not exist yet.
///
/// Collections go first so the foreign key from `tasks.collection_id`
/// has something to point at.
pub async fn create_schema(db: &impl ConnectionTrait) -> Result<(), DbErr> {
    create_table(db, collection::Entity).await?;
    create_table(db, task::Entity).await
}

async fn create_table<E>(db: &impl ConnectionTrait, entity: E) -> Result<(), DbErr>
where
    E: EntityTrait,
    <E::Column as std::str::FromStr>::Err: std::fmt::Debug,
{
    let table_name = entity.table_name().to_string();
    let schema = Schema::new(db.get_database_backend());
    let create_sql = schema
        .create_table_from_entity(entity)
        .if_not_exists()
        .to_owned()
        .to_string(SqliteQueryBuilder);
    log::debug!("ensuring table {table_name}");
    db.execute_unprepared(&create_sql).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_create_schema_is_repeatable() {
        let board = TaskBoardBuilder::new("sqlite::memory:")
            .build()
            .await
            .expect("Failed to build board");

        create_schema(board.connection())
            .await
            .expect("second schema pass should be a no-op");
    }

    #[tokio::test]
    async fn test_memory_database_ignores_pool_size() {
        let board = TaskBoardBuilder::new("sqlite::memory:")
            .with_max_connections(4)
            .build()
            .await
            .expect("Failed to build board");

        // a second pooled connection would see an empty database without tables
        for _ in 0..4 {
            collection::Entity::find()
                .all(board.connection())
                .await
                .expect("tables should be visible on every checkout");
        }
    }
}
