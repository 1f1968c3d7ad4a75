pub mod sqlite_repo;

use packet_model::TaskId;

/// Thin abstraction over the packet source so the export pipeline stays
/// storage-agnostic. Any engine works as long as the task-id filter is an
/// exact match.
pub trait PacketSource {
    /// Raw payload strings for `task_id`, in engine-returned order.
    fn fetch_packets(&self, task_id: &TaskId) -> Result<Vec<String>, StoreError>;
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
}
