use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use log::{debug, error, warn};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use sqlx::mysql::{MySqlConnectOptions, MySqlRow};
use sqlx::{Column, Connection, MySqlConnection, Row, TypeInfo};

use crate::error::DbError;

const DEFAULT_PORT: u16 = 3306;

/// Caller-supplied settings for one database session. Request-scoped:
/// every call carries its own set and nothing is retained between calls.
#[derive(Debug, Clone, Deserialize)]
pub struct ConnectionParams {
    pub host: String,
    pub user: String,
    pub password: String,
    pub database: String,
    pub port: Option<u16>,
}

/// Uniform envelope returned by every database operation. All four fields
/// serialize on every result, absent values as null.
#[derive(Debug, Serialize)]
pub struct OperationResult<T> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<String>,
    pub message: String,
}

impl<T> OperationResult<T> {
    pub fn ok(data: T, message: impl Into<String>) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
            message: message.into(),
        }
    }

    /// Success without a data payload.
    pub fn ok_message(message: impl Into<String>) -> Self {
        Self {
            success: true,
            data: None,
            error: None,
            message: message.into(),
        }
    }

    /// Failure carrying only a message, no underlying error string.
    pub fn fail(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: None,
            message: message.into(),
        }
    }

    pub fn fail_with(error: impl ToString, message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(error.to_string()),
            message: message.into(),
        }
    }
}

/// One table entry from the catalog.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TableInfo {
    pub table_name: String,
    pub table_comment: String,
    pub table_type: String,
    pub engine: String,
    pub table_rows: Option<u64>,
}

/// One column entry from the catalog. `is_nullable` keeps the catalog's
/// literal YES/NO string.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnInfo {
    pub column_name: String,
    pub column_type: String,
    pub is_nullable: String,
    pub column_comment: String,
    pub column_default: Option<String>,
    pub extra: String,
}

/// A session whose server-side resources are released by an explicit close.
trait CloseSession {
    fn close_session(self) -> impl std::future::Future<Output = Result<(), sqlx::Error>> + Send;
}

impl CloseSession for MySqlConnection {
    fn close_session(self) -> impl std::future::Future<Output = Result<(), sqlx::Error>> + Send {
        self.close()
    }
}

async fn open_session(params: &ConnectionParams) -> Result<MySqlConnection, DbError> {
    let options = MySqlConnectOptions::new()
        .host(&params.host)
        .port(params.port.unwrap_or(DEFAULT_PORT))
        .username(&params.user)
        .password(&params.password)
        .database(&params.database)
        .charset("utf8mb4");
    MySqlConnection::connect_with(&options)
        .await
        .map_err(DbError::Connection)
}

/// Close the session, demoting close failures to a log line. Runs exactly
/// once after every successful open, on success and failure paths alike.
async fn finish_session<S: CloseSession>(session: S) {
    if let Err(e) = session.close_session().await {
        warn!("Error closing connection: {e}");
    }
}

/// Verify the database answers a trivial statement.
pub async fn test_connection(params: &ConnectionParams) -> OperationResult<()> {
    debug!(
        "Testing connection to database {}@{}",
        params.database, params.host
    );
    let outcome = match open_session(params).await {
        Ok(mut conn) => {
            let outcome = ping(&mut conn).await;
            finish_session(conn).await;
            outcome
        }
        Err(e) => Err(e),
    };
    test_result(outcome, &params.database, &params.host)
}

async fn ping(conn: &mut MySqlConnection) -> Result<(), DbError> {
    sqlx::query("SELECT 1").fetch_one(&mut *conn).await?;
    Ok(())
}

fn test_result(outcome: Result<(), DbError>, database: &str, host: &str) -> OperationResult<()> {
    match outcome {
        Ok(()) => OperationResult::ok_message(format!(
            "Successfully connected to database {database}@{host}"
        )),
        Err(e) => {
            error!("Connection test failed: {e}");
            OperationResult::fail_with(
                &e,
                format!("Failed to connect to database {database}@{host}: {e}"),
            )
        }
    }
}

const TABLES_SQL: &str = "\
SELECT CONVERT(table_name USING utf8) AS table_name,
       CONVERT(IFNULL(table_comment, '') USING utf8) AS table_comment,
       CONVERT(table_type USING utf8) AS table_type,
       CONVERT(IFNULL(engine, '') USING utf8) AS engine,
       table_rows
FROM information_schema.tables
WHERE table_schema = ?
ORDER BY table_name";

/// List every table in the schema. An empty schema is still a success.
pub async fn get_tables(params: &ConnectionParams) -> OperationResult<Vec<TableInfo>> {
    debug!("Getting tables from database {}", params.database);
    let outcome = match open_session(params).await {
        Ok(mut conn) => {
            let outcome = fetch_tables(&mut conn, &params.database).await;
            finish_session(conn).await;
            outcome
        }
        Err(e) => Err(e),
    };
    tables_result(outcome, &params.database)
}

async fn fetch_tables(
    conn: &mut MySqlConnection,
    database: &str,
) -> Result<Vec<TableInfo>, DbError> {
    let rows = sqlx::query(TABLES_SQL)
        .bind(database)
        .fetch_all(&mut *conn)
        .await?;
    rows.iter()
        .map(|row| {
            Ok(TableInfo {
                table_name: get_string(row, "table_name")?,
                table_comment: get_string(row, "table_comment")?,
                table_type: get_string(row, "table_type")?,
                engine: get_string(row, "engine")?,
                table_rows: get_row_count(row, "table_rows")?,
            })
        })
        .collect()
}

fn tables_result(
    outcome: Result<Vec<TableInfo>, DbError>,
    database: &str,
) -> OperationResult<Vec<TableInfo>> {
    match outcome {
        Ok(tables) => {
            debug!("Found {} tables in database {database}", tables.len());
            let message = format!(
                "Successfully retrieved {} tables from database {database}",
                tables.len()
            );
            OperationResult::ok(tables, message)
        }
        Err(e) => {
            error!("Error getting tables: {e}");
            OperationResult::fail_with(
                &e,
                format!("Failed to get tables from database {database}: {e}"),
            )
        }
    }
}

const COLUMNS_SQL: &str = "\
SELECT CONVERT(column_name USING utf8) AS column_name,
       CONVERT(column_type USING utf8) AS column_type,
       CONVERT(is_nullable USING utf8) AS is_nullable,
       CONVERT(IFNULL(column_comment, '') USING utf8) AS column_comment,
       CONVERT(column_default USING utf8) AS column_default,
       CONVERT(extra USING utf8) AS extra
FROM information_schema.columns
WHERE table_schema = ? AND table_name = ?
ORDER BY ordinal_position";

/// List the columns of one table. Zero catalog rows means the table does
/// not exist, which is a failure here, unlike an empty schema above.
pub async fn get_table_columns(
    params: &ConnectionParams,
    table_name: &str,
) -> OperationResult<Vec<ColumnInfo>> {
    debug!(
        "Getting columns for table {} in database {}",
        table_name, params.database
    );
    let outcome = match open_session(params).await {
        Ok(mut conn) => {
            let outcome = fetch_columns(&mut conn, &params.database, table_name).await;
            finish_session(conn).await;
            outcome
        }
        Err(e) => Err(e),
    };
    columns_result(outcome, table_name, &params.database)
}

async fn fetch_columns(
    conn: &mut MySqlConnection,
    database: &str,
    table_name: &str,
) -> Result<Vec<ColumnInfo>, DbError> {
    let rows = sqlx::query(COLUMNS_SQL)
        .bind(database)
        .bind(table_name)
        .fetch_all(&mut *conn)
        .await?;
    rows.iter()
        .map(|row| {
            Ok(ColumnInfo {
                column_name: get_string(row, "column_name")?,
                column_type: get_string(row, "column_type")?,
                is_nullable: get_string(row, "is_nullable")?,
                column_comment: get_string(row, "column_comment")?,
                column_default: get_opt_string(row, "column_default")?,
                extra: get_string(row, "extra")?,
            })
        })
        .collect()
}

fn columns_result(
    outcome: Result<Vec<ColumnInfo>, DbError>,
    table_name: &str,
    database: &str,
) -> OperationResult<Vec<ColumnInfo>> {
    match outcome {
        Ok(columns) if columns.is_empty() => {
            OperationResult::fail(DbError::table_not_found(table_name, database).to_string())
        }
        Ok(columns) => {
            debug!("Found {} columns in table {table_name}", columns.len());
            let message = format!(
                "Successfully retrieved {} columns from table {table_name}",
                columns.len()
            );
            OperationResult::ok(columns, message)
        }
        Err(e) => {
            error!("Error getting table columns: {e}");
            OperationResult::fail_with(
                &e,
                format!("Failed to get columns for table {table_name}: {e}"),
            )
        }
    }
}

enum QueryOutcome {
    Rows(Vec<Value>),
    Affected(u64),
}

/// Run the caller's statement verbatim. SELECT statements return their
/// rows; everything else reports the affected row count.
pub async fn execute_query(
    params: &ConnectionParams,
    query: &str,
    bind_params: Option<&[String]>,
) -> OperationResult<Value> {
    debug!("Executing query: {:.100}", query);
    let outcome = match open_session(params).await {
        Ok(mut conn) => {
            let outcome = run_query(&mut conn, query, bind_params).await;
            finish_session(conn).await;
            outcome
        }
        Err(e) => Err(e),
    };
    query_result(outcome)
}

async fn run_query(
    conn: &mut MySqlConnection,
    query: &str,
    bind_params: Option<&[String]>,
) -> Result<QueryOutcome, DbError> {
    let mut statement = sqlx::query(query);
    for param in bind_params.unwrap_or_default() {
        statement = statement.bind(param.as_str());
    }
    if is_select(query) {
        let rows = statement.fetch_all(&mut *conn).await?;
        Ok(QueryOutcome::Rows(rows.iter().map(row_to_json).collect()))
    } else {
        let result = statement.execute(&mut *conn).await?;
        Ok(QueryOutcome::Affected(result.rows_affected()))
    }
}

fn query_result(outcome: Result<QueryOutcome, DbError>) -> OperationResult<Value> {
    match outcome {
        Ok(QueryOutcome::Rows(rows)) => {
            debug!("Query returned {} rows", rows.len());
            OperationResult::ok(Value::Array(rows), "Query executed successfully")
        }
        Ok(QueryOutcome::Affected(count)) => OperationResult::ok(
            json!({ "affected_rows": count }),
            format!("Query executed successfully. Affected rows: {count}"),
        ),
        Err(e) => {
            error!("Error executing query: {e}");
            OperationResult::fail_with(&e, format!("Failed to execute query: {e}"))
        }
    }
}

fn is_select(query: &str) -> bool {
    query.trim().to_uppercase().starts_with("SELECT")
}

/// Map one row to a JSON object keyed by column name. Values that cannot
/// be decoded under their reported type degrade to null rather than
/// failing the whole result.
fn row_to_json(row: &MySqlRow) -> Value {
    let mut object = serde_json::Map::new();
    for (i, column) in row.columns().iter().enumerate() {
        let value = column_value(row, i, column.type_info().name());
        object.insert(column.name().to_string(), value);
    }
    Value::Object(object)
}

fn column_value(row: &MySqlRow, index: usize, type_name: &str) -> Value {
    match type_name {
        // tinyint(1) decodes as bool, wider tinyints as integers
        "BOOLEAN" | "TINYINT" => {
            if let Ok(value) = row.try_get::<Option<bool>, _>(index) {
                json!(value)
            } else {
                json!(row.try_get::<Option<i64>, _>(index).unwrap_or(None))
            }
        }
        "SMALLINT" | "MEDIUMINT" | "INT" | "INTEGER" | "BIGINT" => {
            json!(row.try_get::<Option<i64>, _>(index).unwrap_or(None))
        }
        "TINYINT UNSIGNED" | "SMALLINT UNSIGNED" | "MEDIUMINT UNSIGNED" | "INT UNSIGNED"
        | "BIGINT UNSIGNED" | "YEAR" => {
            json!(row.try_get::<Option<u64>, _>(index).unwrap_or(None))
        }
        "FLOAT" | "DOUBLE" | "REAL" => {
            json!(row.try_get::<Option<f64>, _>(index).unwrap_or(None))
        }
        // stringified to keep full precision
        "DECIMAL" | "NUMERIC" => match row.try_get::<Option<sqlx::types::BigDecimal>, _>(index) {
            Ok(value) => json!(value.map(|d| d.to_string())),
            Err(_) => Value::Null,
        },
        "DATE" => json!(row
            .try_get::<Option<NaiveDate>, _>(index)
            .unwrap_or(None)
            .map(|d| d.format("%Y-%m-%d").to_string())),
        "TIME" => json!(row
            .try_get::<Option<NaiveTime>, _>(index)
            .unwrap_or(None)
            .map(|t| t.format("%H:%M:%S").to_string())),
        "DATETIME" => json!(row
            .try_get::<Option<NaiveDateTime>, _>(index)
            .unwrap_or(None)
            .map(|dt| dt.format("%Y-%m-%d %H:%M:%S").to_string())),
        "TIMESTAMP" => json!(row
            .try_get::<Option<DateTime<Utc>>, _>(index)
            .unwrap_or(None)
            .map(|ts| ts.format("%Y-%m-%d %H:%M:%S").to_string())),
        "JSON" => row
            .try_get::<Option<Value>, _>(index)
            .unwrap_or(None)
            .unwrap_or(Value::Null),
        "BINARY" | "VARBINARY" | "TINYBLOB" | "BLOB" | "MEDIUMBLOB" | "LONGBLOB" => {
            match row.try_get::<Option<Vec<u8>>, _>(index) {
                Ok(value) => json!(value.map(|bytes| String::from_utf8_lossy(&bytes).into_owned())),
                Err(_) => Value::Null,
            }
        }
        // VARCHAR, CHAR, TEXT, ENUM, SET and anything newer
        _ => match row.try_get::<Option<String>, _>(index) {
            Ok(value) => json!(value),
            Err(_) => json!(row
                .try_get::<Option<Vec<u8>>, _>(index)
                .unwrap_or(None)
                .map(|bytes| String::from_utf8_lossy(&bytes).into_owned())),
        },
    }
}

/// Catalog strings can surface as byte blobs depending on the server's
/// collation settings.
fn get_string(row: &MySqlRow, column: &str) -> Result<String, DbError> {
    match row.try_get::<String, _>(column) {
        Ok(value) => Ok(value),
        Err(_) => Ok(String::from_utf8_lossy(&row.try_get::<Vec<u8>, _>(column)?).into_owned()),
    }
}

fn get_opt_string(row: &MySqlRow, column: &str) -> Result<Option<String>, DbError> {
    match row.try_get::<Option<String>, _>(column) {
        Ok(value) => Ok(value),
        Err(_) => Ok(row
            .try_get::<Option<Vec<u8>>, _>(column)?
            .map(|bytes| String::from_utf8_lossy(&bytes).into_owned())),
    }
}

/// TABLE_ROWS is unsigned on MySQL 8 and signed on some older servers.
fn get_row_count(row: &MySqlRow, column: &str) -> Result<Option<u64>, DbError> {
    match row.try_get::<Option<u64>, _>(column) {
        Ok(value) => Ok(value),
        Err(_) => Ok(row.try_get::<Option<i64>, _>(column)?.map(|v| v as u64)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use std::time::Duration;

    fn params(host: &str, port: Option<u16>) -> ConnectionParams {
        ConnectionParams {
            host: host.to_string(),
            user: "tester".to_string(),
            password: "secret".to_string(),
            database: "shop".to_string(),
            port,
        }
    }

    fn sample_table() -> TableInfo {
        TableInfo {
            table_name: "users".to_string(),
            table_comment: "registered accounts".to_string(),
            table_type: "BASE TABLE".to_string(),
            engine: "InnoDB".to_string(),
            table_rows: Some(42),
        }
    }

    fn sample_column() -> ColumnInfo {
        ColumnInfo {
            column_name: "id".to_string(),
            column_type: "bigint unsigned".to_string(),
            is_nullable: "NO".to_string(),
            column_comment: String::new(),
            column_default: None,
            extra: "auto_increment".to_string(),
        }
    }

    #[test]
    fn is_select_checks_the_leading_keyword() {
        assert!(is_select("SELECT 1"));
        assert!(is_select("  select * from users"));
        assert!(is_select("\n\tSelect id FROM t"));
        assert!(!is_select("UPDATE users SET name = 'x'"));
        assert!(!is_select("SHOW TABLES"));
        assert!(!is_select(""));
    }

    #[test]
    fn connection_params_deserialize_without_a_port() {
        let params: ConnectionParams = serde_json::from_value(json!({
            "host": "db.local",
            "user": "root",
            "password": "pw",
            "database": "shop"
        }))
        .unwrap();
        assert_eq!(params.port, None);
        assert_eq!(params.host, "db.local");
    }

    #[test]
    fn envelope_serializes_every_field_with_wire_names() {
        let result = tables_result(Ok(vec![sample_table()]), "shop");
        let value = serde_json::to_value(&result).unwrap();
        assert_eq!(value["success"], true);
        assert_eq!(value["error"], Value::Null);
        assert_eq!(
            value["message"],
            "Successfully retrieved 1 tables from database shop"
        );
        assert_eq!(value["data"][0]["tableName"], "users");
        assert_eq!(value["data"][0]["tableComment"], "registered accounts");
        assert_eq!(value["data"][0]["tableRows"], 42);
        assert!(value.as_object().unwrap().contains_key("error"));
    }

    #[test]
    fn empty_schema_is_still_a_success() {
        let result = tables_result(Ok(vec![]), "empty_db");
        assert!(result.success);
        assert_eq!(result.data, Some(vec![]));
        assert!(result.error.is_none());
        assert_eq!(
            result.message,
            "Successfully retrieved 0 tables from database empty_db"
        );
    }

    #[test]
    fn zero_columns_reports_the_table_missing() {
        let result = columns_result(Ok(vec![]), "orders", "shop");
        assert!(!result.success);
        assert!(result.data.is_none());
        assert!(result.error.is_none());
        assert_eq!(
            result.message,
            "Table orders does not exist or has no columns in database shop"
        );
    }

    #[test]
    fn column_rows_keep_data_and_message() {
        let result = columns_result(Ok(vec![sample_column()]), "orders", "shop");
        assert!(result.success);
        assert_eq!(
            result.message,
            "Successfully retrieved 1 columns from table orders"
        );
        assert_eq!(result.data, Some(vec![sample_column()]));

        let value = serde_json::to_value(&result).unwrap();
        assert_eq!(value["data"][0]["columnName"], "id");
        assert_eq!(value["data"][0]["isNullable"], "NO");
        assert_eq!(value["data"][0]["columnDefault"], Value::Null);
    }

    #[test]
    fn statement_failures_wrap_the_driver_error() {
        let err = DbError::Statement(sqlx::Error::Configuration("bad statement".into()));
        let result = columns_result(Err(err), "orders", "shop");
        assert!(!result.success);
        assert!(result.error.is_some());
        assert!(result
            .message
            .starts_with("Failed to get columns for table orders: "));
        assert!(result.message.contains("bad statement"));
    }

    #[test]
    fn select_and_mutation_outcomes_use_distinct_envelopes() {
        let rows = vec![json!({"id": 1, "name": "a"})];
        let result = query_result(Ok(QueryOutcome::Rows(rows.clone())));
        assert!(result.success);
        assert_eq!(result.data, Some(Value::Array(rows)));
        assert_eq!(result.message, "Query executed successfully");

        let result = query_result(Ok(QueryOutcome::Affected(3)));
        assert!(result.success);
        assert_eq!(result.data, Some(json!({"affected_rows": 3})));
        assert_eq!(
            result.message,
            "Query executed successfully. Affected rows: 3"
        );
    }

    #[test]
    fn query_failure_carries_both_error_and_message() {
        let err = DbError::Statement(sqlx::Error::Configuration("syntax".into()));
        let result = query_result(Err(err));
        assert!(!result.success);
        assert!(result.data.is_none());
        assert!(result.message.starts_with("Failed to execute query: "));
        assert!(result.error.is_some());
    }

    #[test]
    fn test_outcome_messages_name_database_and_host() {
        let result = test_result(Ok(()), "shop", "db.local");
        assert!(result.success);
        assert!(result.data.is_none());
        assert_eq!(
            result.message,
            "Successfully connected to database shop@db.local"
        );

        let err = DbError::Connection(sqlx::Error::Configuration("refused".into()));
        let result = test_result(Err(err), "shop", "db.local");
        assert!(!result.success);
        assert!(result
            .message
            .starts_with("Failed to connect to database shop@db.local: "));
        assert!(result
            .error
            .as_deref()
            .is_some_and(|e| e.starts_with("Failed to connect to database: ")));
    }

    struct FakeSession {
        closes: Arc<AtomicUsize>,
        fail: bool,
    }

    impl CloseSession for FakeSession {
        fn close_session(
            self,
        ) -> impl std::future::Future<Output = Result<(), sqlx::Error>> + Send {
            async move {
                self.closes.fetch_add(1, Ordering::SeqCst);
                if self.fail {
                    Err(sqlx::Error::WorkerCrashed)
                } else {
                    Ok(())
                }
            }
        }
    }

    #[tokio::test]
    async fn finish_session_closes_exactly_once() {
        let closes = Arc::new(AtomicUsize::new(0));
        finish_session(FakeSession {
            closes: closes.clone(),
            fail: false,
        })
        .await;
        assert_eq!(closes.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn finish_session_swallows_close_failures() {
        let closes = Arc::new(AtomicUsize::new(0));
        finish_session(FakeSession {
            closes: closes.clone(),
            fail: true,
        })
        .await;
        assert_eq!(closes.load(Ordering::SeqCst), 1);
    }

    // Port 1 on loopback is never serviced, so connecting fails fast
    // without any database infrastructure.
    #[tokio::test]
    async fn test_connection_failure_is_contained() {
        let result = tokio::time::timeout(
            Duration::from_secs(30),
            test_connection(&params("127.0.0.1", Some(1))),
        )
        .await
        .expect("refused connection should fail quickly");
        assert!(!result.success);
        assert!(result
            .message
            .starts_with("Failed to connect to database shop@127.0.0.1: "));
        assert!(result
            .error
            .as_deref()
            .is_some_and(|e| e.starts_with("Failed to connect to database: ")));
    }

    #[tokio::test]
    async fn get_tables_connection_failure_keeps_the_operation_message() {
        let result = tokio::time::timeout(
            Duration::from_secs(30),
            get_tables(&params("127.0.0.1", Some(1))),
        )
        .await
        .expect("refused connection should fail quickly");
        assert!(!result.success);
        assert!(result.data.is_none());
        assert!(result.message.starts_with(
            "Failed to get tables from database shop: Failed to connect to database: "
        ));
    }

    #[tokio::test]
    async fn execute_query_connection_failure_keeps_the_operation_message() {
        let result = tokio::time::timeout(
            Duration::from_secs(30),
            execute_query(&params("127.0.0.1", Some(1)), "SELECT 1", None),
        )
        .await
        .expect("refused connection should fail quickly");
        assert!(!result.success);
        assert!(result
            .message
            .starts_with("Failed to execute query: Failed to connect to database: "));
    }

    fn live_params() -> Option<ConnectionParams> {
        let host = std::env::var("TEST_MYSQL_HOST").ok()?;
        let user = std::env::var("TEST_MYSQL_USER").ok()?;
        let password = std::env::var("TEST_MYSQL_PASSWORD").ok()?;
        let database = std::env::var("TEST_MYSQL_DATABASE").ok()?;
        let port = std::env::var("TEST_MYSQL_PORT")
            .ok()
            .and_then(|p| p.parse().ok());
        Some(ConnectionParams {
            host,
            user,
            password,
            database,
            port,
        })
    }

    // The live tests below only run when the TEST_MYSQL_* variables point
    // at a reachable server.

    #[tokio::test]
    async fn live_connection_test_succeeds() {
        let Some(params) = live_params() else {
            return;
        };
        let result = test_connection(&params).await;
        assert!(result.success, "{}", result.message);
        assert!(result
            .message
            .starts_with("Successfully connected to database"));
    }

    #[tokio::test]
    async fn live_select_one_round_trips() {
        let Some(params) = live_params() else {
            return;
        };
        let result = execute_query(&params, "SELECT 1", None).await;
        assert!(result.success, "{}", result.message);
        let rows = result.data.expect("row data");
        assert_eq!(rows[0]["1"], 1);
    }

    #[tokio::test]
    async fn live_tables_listing_succeeds() {
        let Some(params) = live_params() else {
            return;
        };
        let result = get_tables(&params).await;
        assert!(result.success, "{}", result.message);
        assert!(result.data.is_some());
    }
}
