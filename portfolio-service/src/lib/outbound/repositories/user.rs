use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;
use sqlx::postgres::PgRow;
use sqlx::PgPool;
use sqlx::Row;

use crate::domain::asset::models::Asset;
use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::PasswordField;
use crate::domain::user::models::PasswordReset;
use crate::domain::user::models::Profile;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::models::UserPatch;
use crate::domain::user::ports::UserRepository;
use crate::user::errors::UserError;

const USER_COLUMNS: &str = r#"
    id, email, full_name, phone, about_me, portfolio_url,
    github_url, instagram_url, facebook_url, twitter_url, linkedin_url,
    avatar_public_id, avatar_url, resume_public_id, resume_url,
    password_hash, reset_password_token, reset_password_expires_at, created_at
"#;

pub struct PostgresUserRepository {
    pool: PgPool,
}

impl PostgresUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn row_to_user(row: &PgRow, password: PasswordField) -> Result<User, UserError> {
        let reset_token: Option<String> = row.get("reset_password_token");
        let reset_expires_at: Option<DateTime<Utc>> = row.get("reset_password_expires_at");
        let reset = match (reset_token, reset_expires_at) {
            (Some(lookup_token), Some(expires_at)) => Some(PasswordReset {
                lookup_token,
                expires_at,
            }),
            _ => None,
        };

        let password_hash = match password {
            PasswordField::Include => Some(row.get("password_hash")),
            PasswordField::Exclude => None,
        };

        Ok(User {
            id: UserId(row.get("id")),
            email: EmailAddress::new(row.get("email"))?,
            profile: Profile {
                full_name: row.get("full_name"),
                phone: row.get("phone"),
                about_me: row.get("about_me"),
                portfolio_url: row.get("portfolio_url"),
                github_url: row.get("github_url"),
                instagram_url: row.get("instagram_url"),
                facebook_url: row.get("facebook_url"),
                twitter_url: row.get("twitter_url"),
                linkedin_url: row.get("linkedin_url"),
            },
            avatar: Asset {
                public_id: row.get("avatar_public_id"),
                url: row.get("avatar_url"),
            },
            resume: Asset {
                public_id: row.get("resume_public_id"),
                url: row.get("resume_url"),
            },
            password_hash,
            reset,
            created_at: row.get("created_at"),
        })
    }

    fn map_write_error(e: sqlx::Error, email: Option<&EmailAddress>) -> UserError {
        if let Some(db_err) = e.as_database_error() {
            if db_err.is_unique_violation() && db_err.constraint() == Some("users_email_key") {
                let email = email.map(|e| e.as_str().to_string()).unwrap_or_default();
                return UserError::EmailAlreadyExists(email);
            }
        }
        UserError::DatabaseError(e.to_string())
    }
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn create(&self, user: User) -> Result<User, UserError> {
        let password_hash = user
            .password_hash
            .as_deref()
            .ok_or_else(|| UserError::Unknown("user created without a password hash".to_string()))?;

        sqlx::query(
            r#"
            INSERT INTO users (
                id, email, full_name, phone, about_me, portfolio_url,
                github_url, instagram_url, facebook_url, twitter_url, linkedin_url,
                avatar_public_id, avatar_url, resume_public_id, resume_url,
                password_hash, created_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17)
            "#,
        )
        .bind(user.id.0)
        .bind(user.email.as_str())
        .bind(&user.profile.full_name)
        .bind(&user.profile.phone)
        .bind(&user.profile.about_me)
        .bind(&user.profile.portfolio_url)
        .bind(&user.profile.github_url)
        .bind(&user.profile.instagram_url)
        .bind(&user.profile.facebook_url)
        .bind(&user.profile.twitter_url)
        .bind(&user.profile.linkedin_url)
        .bind(&user.avatar.public_id)
        .bind(&user.avatar.url)
        .bind(&user.resume.public_id)
        .bind(&user.resume.url)
        .bind(password_hash)
        .bind(user.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| Self::map_write_error(e, Some(&user.email)))?;

        Ok(user)
    }

    async fn find_by_id(
        &self,
        id: &UserId,
        password: PasswordField,
    ) -> Result<Option<User>, UserError> {
        let row = sqlx::query(&format!("SELECT {} FROM users WHERE id = $1", USER_COLUMNS))
            .bind(id.0)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| UserError::DatabaseError(e.to_string()))?;

        row.map(|r| Self::row_to_user(&r, password)).transpose()
    }

    async fn find_by_email(
        &self,
        email: &EmailAddress,
        password: PasswordField,
    ) -> Result<Option<User>, UserError> {
        let row = sqlx::query(&format!("SELECT {} FROM users WHERE email = $1", USER_COLUMNS))
            .bind(email.as_str())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| UserError::DatabaseError(e.to_string()))?;

        row.map(|r| Self::row_to_user(&r, password)).transpose()
    }

    async fn find_by_reset_lookup_token(
        &self,
        lookup_token: &str,
        now: DateTime<Utc>,
    ) -> Result<Option<User>, UserError> {
        let row = sqlx::query(&format!(
            r#"
            SELECT {}
            FROM users
            WHERE reset_password_token = $1
              AND reset_password_expires_at > $2
            "#,
            USER_COLUMNS
        ))
        .bind(lookup_token)
        .bind(now)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| UserError::DatabaseError(e.to_string()))?;

        row.map(|r| Self::row_to_user(&r, PasswordField::Exclude))
            .transpose()
    }

    async fn update(&self, id: &UserId, patch: UserPatch) -> Result<User, UserError> {
        let profile = patch.profile.as_ref();
        let (reset_touched, reset) = match &patch.reset {
            Some(reset) => (true, reset.as_ref()),
            None => (false, None),
        };

        let row = sqlx::query(&format!(
            r#"
            UPDATE users
            SET email = COALESCE($2, email),
                full_name = CASE WHEN $3 THEN $4 ELSE full_name END,
                phone = CASE WHEN $3 THEN $5 ELSE phone END,
                about_me = CASE WHEN $3 THEN $6 ELSE about_me END,
                portfolio_url = CASE WHEN $3 THEN $7 ELSE portfolio_url END,
                github_url = CASE WHEN $3 THEN $8 ELSE github_url END,
                instagram_url = CASE WHEN $3 THEN $9 ELSE instagram_url END,
                facebook_url = CASE WHEN $3 THEN $10 ELSE facebook_url END,
                twitter_url = CASE WHEN $3 THEN $11 ELSE twitter_url END,
                linkedin_url = CASE WHEN $3 THEN $12 ELSE linkedin_url END,
                avatar_public_id = COALESCE($13, avatar_public_id),
                avatar_url = COALESCE($14, avatar_url),
                resume_public_id = COALESCE($15, resume_public_id),
                resume_url = COALESCE($16, resume_url),
                password_hash = COALESCE($17, password_hash),
                reset_password_token = CASE WHEN $18 THEN $19 ELSE reset_password_token END,
                reset_password_expires_at = CASE WHEN $18 THEN $20 ELSE reset_password_expires_at END
            WHERE id = $1
            RETURNING {}
            "#,
            USER_COLUMNS
        ))
        .bind(id.0)
        .bind(patch.email.as_ref().map(|e| e.as_str()))
        .bind(profile.is_some())
        .bind(profile.map(|p| p.full_name.as_str()))
        .bind(profile.map(|p| p.phone.as_str()))
        .bind(profile.map(|p| p.about_me.as_str()))
        .bind(profile.map(|p| p.portfolio_url.as_str()))
        .bind(profile.and_then(|p| p.github_url.as_deref()))
        .bind(profile.and_then(|p| p.instagram_url.as_deref()))
        .bind(profile.and_then(|p| p.facebook_url.as_deref()))
        .bind(profile.and_then(|p| p.twitter_url.as_deref()))
        .bind(profile.and_then(|p| p.linkedin_url.as_deref()))
        .bind(patch.avatar.as_ref().map(|a| a.public_id.as_str()))
        .bind(patch.avatar.as_ref().map(|a| a.url.as_str()))
        .bind(patch.resume.as_ref().map(|a| a.public_id.as_str()))
        .bind(patch.resume.as_ref().map(|a| a.url.as_str()))
        .bind(patch.password_hash.as_deref())
        .bind(reset_touched)
        .bind(reset.map(|r| r.lookup_token.as_str()))
        .bind(reset.map(|r| r.expires_at))
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| Self::map_write_error(e, patch.email.as_ref()))?;

        match row {
            Some(r) => Self::row_to_user(&r, PasswordField::Exclude),
            None => Err(UserError::NotFound("user not found!".to_string())),
        }
    }
}
