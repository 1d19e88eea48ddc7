use crate::{
    abstract_trait::bank::repository::BankRepositoryTrait, config::ConnectionPool,
    errors::RepositoryError, model::BankModel, repository::db_error,
};
use async_trait::async_trait;
use tracing::error;

pub struct BankRepository {
    db: ConnectionPool,
}

impl BankRepository {
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
impl BankRepositoryTrait for BankRepository {
    async fn find_all(&self) -> Result<Vec<BankModel>, RepositoryError> {
        let mut conn = self.get_conn().await?;

        sqlx::query_as::<_, BankModel>("SELECT * FROM banks ORDER BY id")
            .fetch_all(&mut *conn)
            .await
            .map_err(db_error("find all banks"))
    }

    async fn find_by_id(&self, id: i64) -> Result<BankModel, RepositoryError> {
        let mut conn = self.get_conn().await?;

        sqlx::query_as::<_, BankModel>("SELECT * FROM banks WHERE id = $1")
            .bind(id)
            .fetch_one(&mut *conn)
            .await
            .map_err(db_error("find bank by id"))
    }

    async fn find_by_code(&self, code: &str) -> Result<BankModel, RepositoryError> {
        let mut conn = self.get_conn().await?;

        sqlx::query_as::<_, BankModel>("SELECT * FROM banks WHERE LOWER(code) = LOWER($1)")
            .bind(code)
            .fetch_one(&mut *conn)
            .await
            .map_err(db_error("find bank by code"))
    }
}
