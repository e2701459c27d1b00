use async_trait::async_trait;
use sqlx::PgPool;
use sqlx::Row;

use crate::domain::errors::ContentError;
use crate::domain::message::models::Message;
use crate::domain::message::models::MessageId;
use crate::domain::message::ports::MessageRepository;

pub struct PostgresMessageRepository {
    pool: PgPool,
}

impl PostgresMessageRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MessageRepository for PostgresMessageRepository {
    async fn create(&self, message: Message) -> Result<Message, ContentError> {
        sqlx::query(
            r#"
            INSERT INTO messages (id, sender_name, subject, message, created_at)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(message.id.0)
        .bind(&message.sender_name)
        .bind(&message.subject)
        .bind(&message.message)
        .bind(message.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| ContentError::DatabaseError(e.to_string()))?;

        Ok(message)
    }

    async fn list_all(&self) -> Result<Vec<Message>, ContentError> {
        let rows = sqlx::query(
            r#"
            SELECT id, sender_name, subject, message, created_at
            FROM messages
            ORDER BY created_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| ContentError::DatabaseError(e.to_string()))?;

        Ok(rows
            .into_iter()
            .map(|r| Message {
                id: MessageId(r.get("id")),
                sender_name: r.get("sender_name"),
                subject: r.get("subject"),
                message: r.get("message"),
                created_at: r.get("created_at"),
            })
            .collect())
    }

    async fn delete(&self, id: &MessageId) -> Result<(), ContentError> {
        let result = sqlx::query("DELETE FROM messages WHERE id = $1")
            .bind(id.0)
            .execute(&self.pool)
            .await
            .map_err(|e| ContentError::DatabaseError(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(ContentError::NotFound("Message"));
        }

        Ok(())
    }
}
