use crate::SqliteAccount;
use async_trait::async_trait;
use sqlx::SqlitePool;

use monban_core::{
    Account, AccountId, Error,
    account::NewAccount,
    error::StorageError,
    repositories::AccountRepository,
};

pub struct SqliteAccountRepository {
    pool: SqlitePool,
}

impl SqliteAccountRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

/// Map a sqlx failure to the crate error taxonomy.
///
/// UNIQUE violations get their own variant so callers can tell a constraint
/// conflict (e.g. a registration race on email) from a storage fault.
fn map_sqlx_error(e: sqlx::Error) -> Error {
    match e {
        sqlx::Error::Database(db) if db.is_unique_violation() => {
            Error::Storage(StorageError::Constraint(db.message().to_string()))
        }
        sqlx::Error::RowNotFound => Error::Storage(StorageError::NotFound),
        other => Error::Storage(StorageError::Database(other.to_string())),
    }
}

#[async_trait]
impl AccountRepository for SqliteAccountRepository {
    async fn create(&self, account: NewAccount) -> Result<Account, Error> {
        let now = chrono::Utc::now().timestamp();

        let row = sqlx::query_as::<_, SqliteAccount>(
            r#"
            INSERT INTO accounts (
                id, email, nickname, hashed_password, role, email_verified,
                verification_token, first_name, last_name, bio,
                profile_picture_url, linkedin_profile_url, github_profile_url,
                created_at, updated_at
            )
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15)
            RETURNING *
            "#,
        )
        .bind(account.id.as_str())
        .bind(&account.email)
        .bind(&account.nickname)
        .bind(&account.hashed_password)
        .bind(account.role.as_str())
        .bind(account.email_verified)
        .bind(&account.verification_token)
        .bind(&account.first_name)
        .bind(&account.last_name)
        .bind(&account.bio)
        .bind(&account.profile_picture_url)
        .bind(&account.linkedin_profile_url)
        .bind(&account.github_profile_url)
        .bind(now)
        .bind(now)
        .fetch_one(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        row.try_into()
    }

    async fn find_by_id(&self, id: &AccountId) -> Result<Option<Account>, Error> {
        let row = sqlx::query_as::<_, SqliteAccount>("SELECT * FROM accounts WHERE id = ?1")
            .bind(id.as_str())
            .fetch_optional(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

        row.map(Account::try_from).transpose()
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, Error> {
        let row = sqlx::query_as::<_, SqliteAccount>("SELECT * FROM accounts WHERE email = ?1")
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

        row.map(Account::try_from).transpose()
    }

    async fn find_by_nickname(&self, nickname: &str) -> Result<Option<Account>, Error> {
        let row = sqlx::query_as::<_, SqliteAccount>("SELECT * FROM accounts WHERE nickname = ?1")
            .bind(nickname)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

        row.map(Account::try_from).transpose()
    }

    async fn update(&self, account: &Account) -> Result<Account, Error> {
        let now = chrono::Utc::now().timestamp();

        let row = sqlx::query_as::<_, SqliteAccount>(
            r#"
            UPDATE accounts
            SET email = ?2, nickname = ?3, hashed_password = ?4, role = ?5,
                email_verified = ?6, verification_token = ?7, is_locked = ?8,
                failed_login_attempts = ?9, last_login_at = ?10,
                is_professional = ?11, professional_status_updated_at = ?12,
                first_name = ?13, last_name = ?14, bio = ?15,
                profile_picture_url = ?16, linkedin_profile_url = ?17,
                github_profile_url = ?18, updated_at = ?19
            WHERE id = ?1
            RETURNING *
            "#,
        )
        .bind(account.id.as_str())
        .bind(&account.email)
        .bind(&account.nickname)
        .bind(&account.hashed_password)
        .bind(account.role.as_str())
        .bind(account.email_verified)
        .bind(&account.verification_token)
        .bind(account.is_locked)
        .bind(i64::from(account.failed_login_attempts))
        .bind(account.last_login_at.map(|dt| dt.timestamp()))
        .bind(account.is_professional)
        .bind(account.professional_status_updated_at.map(|dt| dt.timestamp()))
        .bind(&account.first_name)
        .bind(&account.last_name)
        .bind(&account.bio)
        .bind(&account.profile_picture_url)
        .bind(&account.linkedin_profile_url)
        .bind(&account.github_profile_url)
        .bind(now)
        .fetch_one(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        row.try_into()
    }

    async fn delete(&self, id: &AccountId) -> Result<bool, Error> {
        let result = sqlx::query("DELETE FROM accounts WHERE id = ?1")
            .bind(id.as_str())
            .execute(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

        Ok(result.rows_affected() > 0)
    }

    async fn count(&self) -> Result<i64, Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM accounts")
            .fetch_one(&self.pool)
            .await
            .map_err(map_sqlx_error)
    }

    async fn list(&self, offset: i64, limit: i64) -> Result<Vec<Account>, Error> {
        let rows = sqlx::query_as::<_, SqliteAccount>(
            "SELECT * FROM accounts ORDER BY created_at, id LIMIT ?1 OFFSET ?2",
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        rows.into_iter().map(Account::try_from).collect()
    }
}
