//! # Taskboard
//!
//! Owner-scoped storage for a personal task board on top of SeaORM.
//!
//! Users group tasks into colored collections, add tasks with an optional
//! expiration date, tick tasks off, and delete whole collections. Every
//! operation is performed on behalf of an explicit [`Principal`] and can only
//! ever see or change rows that principal owns.
//!
//! ## Quick start
//!
//! ```ignore
//! use taskboard::{CollectionColor, CreateCollection, CreateTask, Principal, TaskBoardBuilder};
//!
//! let board = TaskBoardBuilder::new("sqlite:./taskboard.db?mode=rwc")
//!     .build()
//!     .await?;
//!
//! let me = Principal::require(Principal::new("user_2a"))?;
//! let personal = board
//!     .create_collection(&me, CreateCollection::new("Personal", CollectionColor::Sunset))
//!     .await?;
//! let task = board
//!     .create_task(&me, CreateTask::new(personal.id, "Buy groceries"))
//!     .await?;
//! board.complete_task(&me, task.id).await?;
//! ```
//!
//! ## Key types
//!
//! - [`TaskBoard`]: the mutation service and read model
//! - [`TaskBoardBuilder`]: connects to the database and creates the schema
//! - [`Principal`] / [`IdentityResolver`]: who is calling
//! - [`Error`]: the failure taxonomy shared by all operations
//! - [`ChangeNotification`]: emitted after every committed write

pub mod connection;
pub mod entity;
pub mod error;
pub mod input;
pub mod messages;
pub mod overview;
pub mod principal;
pub mod service;

pub use connection::{TaskBoardBuilder, create_schema};
pub use entity::CollectionColor;
pub use error::{Error, Result};
pub use input::{CreateCollection, CreateTask};
pub use messages::{ChangeNotification, WriteKind};
pub use overview::{CollectionWithTasks, Progress, Urgency};
pub use principal::{FixedIdentity, IdentityResolver, Principal, resolve_principal};
pub use service::TaskBoard;

// Re-export sea-orm for users of the library
pub use sea_orm;
