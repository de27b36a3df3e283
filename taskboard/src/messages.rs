use serde::Serialize;

use crate::principal::Principal;

/// Kind of write recorded in a [`ChangeNotification`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum WriteKind {
    Insert,
    Update,
    Delete,
}

/// Emitted after every committed mutation.
///
/// Subscribe through [`TaskBoard::change_rx()`](crate::TaskBoard::change_rx)
/// to refresh views without polling. Tasks removed by a collection delete
/// are covered by the collection's notification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChangeNotification {
    /// Table that was written (`"collections"` or `"tasks"`).
    pub table: &'static str,
    pub kind: WriteKind,
    pub primary_key: i32,
    pub owner: Principal,
}
