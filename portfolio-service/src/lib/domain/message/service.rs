use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;

use crate::domain::errors::required;
use crate::domain::errors::ContentError;
use crate::domain::message::models::Message;
use crate::domain::message::models::MessageId;
use crate::domain::message::models::SendMessageCommand;
use crate::domain::message::ports::MessageRepository;
use crate::domain::message::ports::MessageServicePort;

pub struct MessageService<MR>
where
    MR: MessageRepository,
{
    repository: Arc<MR>,
}

impl<MR> MessageService<MR>
where
    MR: MessageRepository,
{
    pub fn new(repository: Arc<MR>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl<MR> MessageServicePort for MessageService<MR>
where
    MR: MessageRepository,
{
    async fn send_message(&self, command: SendMessageCommand) -> Result<Message, ContentError> {
        let message = match (
            required(command.sender_name),
            required(command.subject),
            required(command.message),
        ) {
            (Some(sender_name), Some(subject), Some(message)) => Message {
                id: MessageId::new(),
                sender_name,
                subject,
                message,
                created_at: Utc::now(),
            },
            _ => return Err(ContentError::Validation("Please Fill Full Form!".to_string())),
        };

        self.repository.create(message).await
    }

    async fn list_messages(&self) -> Result<Vec<Message>, ContentError> {
        let mut messages = self.repository.list_all().await?;
        messages.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(messages)
    }

    async fn delete_message(&self, id: &MessageId) -> Result<(), ContentError> {
        self.repository.delete(id).await
    }
}
