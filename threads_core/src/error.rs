use thiserror::Error;

/// Failures while bringing the core up: config handling and the initial
/// database connection/migration.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("no data directory available on this platform")]
    NoDataDir,

    #[error("config io error")]
    Io(#[from] std::io::Error),

    #[error("malformed config file")]
    Config(#[from] serde_json::Error),

    #[error("fatal database error")]
    Db(#[from] sea_orm::DbErr),
}
