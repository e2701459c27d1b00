use async_trait::async_trait;

use crate::domain::errors::ContentError;
use crate::domain::message::models::Message;
use crate::domain::message::models::MessageId;
use crate::domain::message::models::SendMessageCommand;

/// Port for visitor message operations.
#[async_trait]
pub trait MessageServicePort: Send + Sync + 'static {
    /// # Errors
    /// * `Validation` - A field is missing
    async fn send_message(&self, command: SendMessageCommand) -> Result<Message, ContentError>;

    /// Messages, newest first.
    async fn list_messages(&self) -> Result<Vec<Message>, ContentError>;

    /// # Errors
    /// * `NotFound` - Message does not exist
    async fn delete_message(&self, id: &MessageId) -> Result<(), ContentError>;
}

/// Persistence operations for visitor messages.
#[async_trait]
pub trait MessageRepository: Send + Sync + 'static {
    async fn create(&self, message: Message) -> Result<Message, ContentError>;

    async fn list_all(&self) -> Result<Vec<Message>, ContentError>;

    /// # Errors
    /// * `NotFound` - Message does not exist
    async fn delete(&self, id: &MessageId) -> Result<(), ContentError>;
}
