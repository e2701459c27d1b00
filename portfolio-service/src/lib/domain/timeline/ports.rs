use async_trait::async_trait;

use crate::domain::errors::ContentError;
use crate::domain::timeline::models::NewTimelineCommand;
use crate::domain::timeline::models::TimelineEntry;
use crate::domain::timeline::models::TimelineId;

/// Port for timeline operations.
#[async_trait]
pub trait TimelineServicePort: Send + Sync + 'static {
    /// # Errors
    /// * `Validation` - A field is missing
    /// * `DatabaseError` - Database operation failed
    async fn add_entry(&self, command: NewTimelineCommand) -> Result<TimelineEntry, ContentError>;

    /// # Errors
    /// * `NotFound` - Entry does not exist
    async fn delete_entry(&self, id: &TimelineId) -> Result<(), ContentError>;

    async fn list_entries(&self) -> Result<Vec<TimelineEntry>, ContentError>;
}

/// Persistence operations for timeline entries.
#[async_trait]
pub trait TimelineRepository: Send + Sync + 'static {
    async fn create(&self, entry: TimelineEntry) -> Result<TimelineEntry, ContentError>;

    async fn list_all(&self) -> Result<Vec<TimelineEntry>, ContentError>;

    /// # Errors
    /// * `NotFound` - Entry does not exist
    async fn delete(&self, id: &TimelineId) -> Result<(), ContentError>;
}
