use sqlx::FromRow;
use time::OffsetDateTime;
use uuid::Uuid;

/// Account row. The email is stored normalised; the hash is an argon2 PHC string.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub password_hash: String,
    pub created_at: OffsetDateTime,
}
