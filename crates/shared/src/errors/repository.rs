use thiserror::Error;

const UNIQUE_VIOLATION: &str = "23505";
const FOREIGN_KEY_VIOLATION: &str = "23503";

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("Record not found")]
    NotFound,

    #[error("Duplicate: {0}")]
    AlreadyExists(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Foreign key violation: {0}")]
    ForeignKey(String),

    #[error("Insufficient credit: available {available}, requested {requested}")]
    InsufficientCredit { available: f64, requested: f64 },

    #[error("Database error: {0}")]
    Sqlx(sqlx::Error),

    #[error("{0}")]
    Custom(String),
}

impl From<sqlx::Error> for RepositoryError {
    fn from(err: sqlx::Error) -> Self {
        if let sqlx::Error::RowNotFound = err {
            return RepositoryError::NotFound;
        }

        if let sqlx::Error::Database(db) = &err {
            let code = db.code().map(|c| c.to_string());
            let constraint = db.constraint().unwrap_or("key").to_string();

            match code.as_deref() {
                Some(UNIQUE_VIOLATION) => return RepositoryError::AlreadyExists(constraint),
                Some(FOREIGN_KEY_VIOLATION) => return RepositoryError::ForeignKey(constraint),
                _ => {}
            }
        }

        RepositoryError::Sqlx(err)
    }
}

impl RepositoryError {
    pub fn is_duplicate(&self) -> bool {
        matches!(self, RepositoryError::AlreadyExists(_))
    }
}
