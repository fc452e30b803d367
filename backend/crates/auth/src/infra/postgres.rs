//! PostgreSQL Repository Implementations

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::domain::entity::{
    auth_session::AuthSession,
    revoked_token::RevokedToken,
    user::{NewUser, User},
};
use crate::domain::repository::{AuthSessionRepository, RevokedTokenRepository, UserRepository};
use crate::domain::value_object::{
    bio::Bio, email::Email, phone_number::PhoneNumber, session_id::SessionId,
    token_digest::TokenDigest, user_id::UserId, user_password::UserPassword,
};
use crate::error::{AuthError, AuthResult};

/// PostgreSQL-backed auth repository
#[derive(Clone)]
pub struct PgAuthRepository {
    pool: PgPool,
}

impl PgAuthRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

// ============================================================================
// User Repository Implementation
// ============================================================================

impl UserRepository for PgAuthRepository {
    async fn create_user(&self, user: NewUser) -> AuthResult<User> {
        // The unique index decides; no separate existence check
        let inserted = sqlx::query_as::<_, (i64, DateTime<Utc>)>(
            r#"
            INSERT INTO users (
                email,
                password_hash,
                name,
                phone_number,
                height,
                bio
            ) VALUES ($1, $2, $3, $4, $5, $6)
            ON CONFLICT (email) DO NOTHING
            RETURNING user_id, created_at
            "#,
        )
        .bind(user.email.as_str())
        .bind(user.password_hash.as_phc_string())
        .bind(&user.name)
        .bind(user.phone_number.as_str())
        .bind(user.height)
        .bind(user.bio.as_ref().map(Bio::as_str))
        .fetch_optional(&self.pool)
        .await?;

        let (user_id, created_at) = inserted.ok_or(AuthError::EmailAlreadyExists)?;
        Ok(user.into_user(UserId::from_raw(user_id), created_at))
    }

    async fn find_user_by_id(&self, user_id: UserId) -> AuthResult<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT
                user_id,
                email,
                password_hash,
                name,
                phone_number,
                height,
                bio,
                created_at
            FROM users
            WHERE user_id = $1
            "#,
        )
        .bind(user_id.value())
        .fetch_optional(&self.pool)
        .await?;

        row.map(|r| r.into_user()).transpose()
    }

    async fn find_user_by_email(&self, email: &Email) -> AuthResult<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT
                user_id,
                email,
                password_hash,
                name,
                phone_number,
                height,
                bio,
                created_at
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email.as_str())
        .fetch_optional(&self.pool)
        .await?;

        row.map(|r| r.into_user()).transpose()
    }
}

// ============================================================================
// Auth Session Repository Implementation
// ============================================================================

impl AuthSessionRepository for PgAuthRepository {
    async fn create_session(&self, session: &AuthSession) -> AuthResult<()> {
        sqlx::query(
            r#"
            INSERT INTO auth_sessions (
                session_id,
                user_id,
                expires_at,
                created_at
            ) VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(session.session_id.as_str())
        .bind(session.user_id.value())
        .bind(session.expires_at)
        .bind(session.created_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find_session(&self, session_id: &SessionId) -> AuthResult<Option<AuthSession>> {
        let row = sqlx::query_as::<_, AuthSessionRow>(
            r#"
            SELECT
                session_id,
                user_id,
                expires_at,
                created_at
            FROM auth_sessions
            WHERE session_id = $1
            "#,
        )
        .bind(session_id.as_str())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(AuthSessionRow::into_session))
    }

    async fn delete_session(&self, session_id: &SessionId) -> AuthResult<bool> {
        let deleted = sqlx::query("DELETE FROM auth_sessions WHERE session_id = $1")
            .bind(session_id.as_str())
            .execute(&self.pool)
            .await?
            .rows_affected();

        Ok(deleted > 0)
    }

    async fn cleanup_expired_sessions(&self, now: DateTime<Utc>) -> AuthResult<u64> {
        let deleted = sqlx::query("DELETE FROM auth_sessions WHERE expires_at < $1")
            .bind(now)
            .execute(&self.pool)
            .await?
            .rows_affected();

        tracing::debug!(sessions_deleted = deleted, "Cleaned up expired auth sessions");

        Ok(deleted)
    }
}

// ============================================================================
// Revoked Token Repository Implementation
// ============================================================================

impl RevokedTokenRepository for PgAuthRepository {
    async fn revoke_token(&self, entry: &RevokedToken) -> AuthResult<bool> {
        let inserted = sqlx::query(
            r#"
            INSERT INTO revoked_tokens (token_digest, expires_at)
            VALUES ($1, $2)
            ON CONFLICT (token_digest) DO NOTHING
            "#,
        )
        .bind(&entry.token_digest.as_bytes()[..])
        .bind(entry.expires_at)
        .execute(&self.pool)
        .await?
        .rows_affected();

        Ok(inserted == 1)
    }

    async fn is_token_revoked(&self, digest: &TokenDigest) -> AuthResult<bool> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM revoked_tokens WHERE token_digest = $1)",
        )
        .bind(&digest.as_bytes()[..])
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }

    async fn cleanup_expired_revocations(&self, now: DateTime<Utc>) -> AuthResult<u64> {
        // `exp` has whole-second precision; keep entries through that second
        let deleted = sqlx::query(
            "DELETE FROM revoked_tokens WHERE expires_at <= $1 - INTERVAL '1 second'",
        )
        .bind(now)
        .execute(&self.pool)
        .await?
        .rows_affected();

        tracing::debug!(revocations_deleted = deleted, "Cleaned up expired token revocations");

        Ok(deleted)
    }
}

// ============================================================================
// Row types
// ============================================================================

#[derive(sqlx::FromRow)]
struct UserRow {
    user_id: i64,
    email: String,
    password_hash: String,
    name: String,
    phone_number: String,
    height: f64,
    bio: Option<String>,
    created_at: DateTime<Utc>,
}

impl UserRow {
    fn into_user(self) -> AuthResult<User> {
        Ok(User {
            user_id: UserId::from_raw(self.user_id),
            email: Email::from_db(self.email),
            password_hash: UserPassword::from_phc_string(self.password_hash)?,
            name: self.name,
            phone_number: PhoneNumber::from_db(self.phone_number),
            height: self.height,
            bio: self.bio.map(Bio::from_db),
            created_at: self.created_at,
        })
    }
}

#[derive(sqlx::FromRow)]
struct AuthSessionRow {
    session_id: String,
    user_id: i64,
    expires_at: DateTime<Utc>,
    created_at: DateTime<Utc>,
}

impl AuthSessionRow {
    fn into_session(self) -> AuthSession {
        AuthSession {
            session_id: SessionId::from_db(self.session_id),
            user_id: UserId::from_raw(self.user_id),
            expires_at: self.expires_at,
            created_at: self.created_at,
        }
    }
}
