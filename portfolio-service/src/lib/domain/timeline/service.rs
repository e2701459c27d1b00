use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;

use crate::domain::errors::required;
use crate::domain::errors::ContentError;
use crate::domain::timeline::models::NewTimelineCommand;
use crate::domain::timeline::models::TimelineEntry;
use crate::domain::timeline::models::TimelineId;
use crate::domain::timeline::ports::TimelineRepository;
use crate::domain::timeline::ports::TimelineServicePort;

pub struct TimelineService<TR>
where
    TR: TimelineRepository,
{
    repository: Arc<TR>,
}

impl<TR> TimelineService<TR>
where
    TR: TimelineRepository,
{
    pub fn new(repository: Arc<TR>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl<TR> TimelineServicePort for TimelineService<TR>
where
    TR: TimelineRepository,
{
    async fn add_entry(&self, command: NewTimelineCommand) -> Result<TimelineEntry, ContentError> {
        // Entries may be open-ended once stored, but adding one needs both ends.
        let entry = match (
            required(command.title),
            required(command.description),
            required(command.from),
            required(command.to),
        ) {
            (Some(title), Some(description), Some(from), Some(to)) => TimelineEntry {
                id: TimelineId::new(),
                title,
                description,
                from,
                to: Some(to),
                created_at: Utc::now(),
            },
            _ => {
                return Err(ContentError::Validation(
                    "All fields are required!".to_string(),
                ))
            }
        };

        self.repository.create(entry).await
    }

    async fn delete_entry(&self, id: &TimelineId) -> Result<(), ContentError> {
        self.repository.delete(id).await
    }

    async fn list_entries(&self) -> Result<Vec<TimelineEntry>, ContentError> {
        self.repository.list_all().await
    }
}
