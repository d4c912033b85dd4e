pub mod alerts;
pub mod applications;
pub mod contracts;
pub mod disputes;
pub mod users;

use sea_orm::{Database, DatabaseConnection, TransactionError};
use std::env;

use crate::error::ApiError;

/// Create a SeaORM database connection pool from the `DATABASE_URL` env var.
pub async fn create_pool() -> DatabaseConnection {
    let database_url = env::var("DATABASE_URL").expect("DATABASE_URL must be set");
    Database::connect(&database_url)
        .await
        .expect("Failed to connect to database")
}

/// Collapse sea-orm's transaction error split back into the core taxonomy.
pub(crate) fn flatten_txn<T>(res: Result<T, TransactionError<ApiError>>) -> Result<T, ApiError> {
    match res {
        Ok(v) => Ok(v),
        Err(TransactionError::Connection(e)) => Err(ApiError::Database(e)),
        Err(TransactionError::Transaction(e)) => Err(e),
    }
}
