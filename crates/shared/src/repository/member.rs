use crate::{
    abstract_trait::member::repository::UserRepositoryTrait, config::ConnectionPool,
    errors::RepositoryError, model::UserModel, repository::db_error, utils::local_now,
};
use async_trait::async_trait;
use tracing::error;

pub struct UserRepository {
    db: ConnectionPool,
}

impl UserRepository {
    pub fn new(db: ConnectionPool) -> Self {
        Self { db }
    }

    async fn get_conn(
        &self,
    ) -> Result<sqlx::pool::PoolConnection<sqlx::Postgres>, RepositoryError> {
        self.db.acquire().await.map_err(|e| {
            error!("❌ Failed to acquire DB connection: {e:?}");
            RepositoryError::from(e)
        })
    }
}

#[async_trait]
impl UserRepositoryTrait for UserRepository {
    async fn find_by_id(&self, id: i64) -> Result<UserModel, RepositoryError> {
        let mut conn = self.get_conn().await?;

        sqlx::query_as::<_, UserModel>("SELECT * FROM users WHERE id = $1 AND deleted_at IS NULL")
            .bind(id)
            .fetch_one(&mut *conn)
            .await
            .map_err(db_error("find user by id"))
    }

    async fn find_by_member_code(&self, member_code: &str) -> Result<UserModel, RepositoryError> {
        let mut conn = self.get_conn().await?;

        sqlx::query_as::<_, UserModel>(
            "SELECT * FROM users WHERE member_code = $1 AND deleted_at IS NULL",
        )
        .bind(member_code)
        .fetch_one(&mut *conn)
        .await
        .map_err(db_error("find user by member code"))
    }

    async fn find_possible_owners(
        &self,
        bank_code: &str,
        account_fragment: &str,
    ) -> Result<Vec<UserModel>, RepositoryError> {
        let mut conn = self.get_conn().await?;

        sqlx::query_as::<_, UserModel>(
            r#"
            SELECT * FROM users
            WHERE deleted_at IS NULL
              AND LOWER(bank_code) = LOWER($1)
              AND bank_account LIKE '%' || $2 || '%'
            ORDER BY id
            "#,
        )
        .bind(bank_code)
        .bind(account_fragment)
        .fetch_all(&mut *conn)
        .await
        .map_err(db_error("find possible owners"))
    }

    async fn set_member_code(
        &self,
        id: i64,
        member_code: &str,
    ) -> Result<UserModel, RepositoryError> {
        let mut conn = self.get_conn().await?;

        sqlx::query_as::<_, UserModel>(
            r#"
            UPDATE users SET member_code = $2, updated_at = $3
            WHERE id = $1 AND deleted_at IS NULL
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(member_code)
        .bind(local_now())
        .fetch_one(&mut *conn)
        .await
        .map_err(db_error("set member code"))
    }
}
