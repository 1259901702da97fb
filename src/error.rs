use thiserror::Error;

/// Errors raised at the dispatch boundary. These never escape the
/// dispatcher: each one is rendered into an error-flagged text response.
#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("Invalid arguments for tool '{tool}' (required: {required}): {detail}")]
    InvalidArguments {
        tool: String,
        required: String,
        detail: String,
    },

    #[error("Unknown tool: {0}")]
    UnknownTool(String),

    #[error("Failed to serialize result: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl DispatchError {
    /// Invalid-argument error naming the tool, its required fields and the
    /// underlying deserialization failure.
    pub fn invalid_arguments(
        tool: &str,
        required: &[&str],
        detail: impl std::fmt::Display,
    ) -> Self {
        Self::InvalidArguments {
            tool: tool.to_string(),
            required: required.join(", "),
            detail: detail.to_string(),
        }
    }

    pub fn unknown_tool(name: &str) -> Self {
        Self::UnknownTool(name.to_string())
    }
}

/// Errors from a single database operation. Callers never see these
/// directly: every operation converts them into a failed result envelope.
#[derive(Debug, Error)]
pub enum DbError {
    /// The session could not be established.
    #[error("Failed to connect to database: {0}")]
    Connection(#[source] sqlx::Error),

    /// The statement failed after the session was established.
    #[error("{0}")]
    Statement(#[from] sqlx::Error),

    /// The catalog returned zero columns for the named table.
    #[error("Table {table} does not exist or has no columns in database {database}")]
    TableNotFound { table: String, database: String },
}

impl DbError {
    pub fn table_not_found(table: &str, database: &str) -> Self {
        Self::TableNotFound {
            table: table.to_string(),
            database: database.to_string(),
        }
    }
}
