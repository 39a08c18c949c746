#[derive(Debug, thiserror::Error)]
pub enum FrontDeskError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("failed to open the patient store: {0}")]
    StoreConnect(sqlx::Error),
    #[error("failed to apply the store schema: {0}")]
    Migration(sqlx::Error),
    #[error("failed to seed the store: {0}")]
    Seed(sqlx::Error),
    #[error("store query failed: {0}")]
    StoreQuery(sqlx::Error),
}

pub type FrontDeskResult<T> = std::result::Result<T, FrontDeskError>;
