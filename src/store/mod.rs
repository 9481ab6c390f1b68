mod de;
pub mod json_store;
pub mod models;

use crate::error::AppError;
use models::{MatchRecord, PlayerSummaryRecord};

/// Read-only access to scrim and player documents.
pub trait DataStore {
    /// All matches, newest first.
    fn list_matches(&self) -> Result<Vec<MatchRecord>, AppError>;

    fn list_players(&self) -> Result<Vec<PlayerSummaryRecord>, AppError>;
}
