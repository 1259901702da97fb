use serde::Serialize;
use unicode_width::UnicodeWidthStr;

use crate::config::Command;
use crate::db::{self, ColumnInfo, OperationResult, TableInfo};

/// Run one command to completion and return the process exit code.
pub async fn run(command: Command) -> i32 {
    match command {
        Command::Test(connection) => {
            let result = db::test_connection(&connection.connection_params()).await;
            print_json(&result)
        }
        Command::Tables(connection) => {
            let params = connection.connection_params();
            print_tables(db::get_tables(&params).await)
        }
        Command::Columns {
            connection,
            table_name,
        } => {
            let params = connection.connection_params();
            print_columns(db::get_table_columns(&params, &table_name).await)
        }
        Command::Query { connection, query } => {
            let params = connection.connection_params();
            let result = db::execute_query(&params, &query, None).await;
            print_json(&result)
        }
    }
}

/// Print the raw result envelope; the exit code mirrors the success flag.
fn print_json<T: Serialize>(result: &OperationResult<T>) -> i32 {
    match serde_json::to_string_pretty(result) {
        Ok(text) => {
            println!("{text}");
            if result.success {
                0
            } else {
                1
            }
        }
        Err(e) => {
            eprintln!("Failed to serialize result: {e}");
            1
        }
    }
}

fn print_tables(result: OperationResult<Vec<TableInfo>>) -> i32 {
    if !result.success {
        eprintln!("{}", result.message);
        return 1;
    }
    let tables = result.data.unwrap_or_default();
    let rows: Vec<Vec<String>> = tables
        .iter()
        .map(|table| {
            vec![
                table.table_name.clone(),
                table.table_comment.clone(),
                table.table_type.clone(),
                table.engine.clone(),
                cell(table.table_rows.map(|v| v.to_string())),
            ]
        })
        .collect();
    print!(
        "{}",
        render_table(&["Table", "Comment", "Type", "Engine", "Rows"], &rows)
    );
    println!("{}", result.message);
    0
}

fn print_columns(result: OperationResult<Vec<ColumnInfo>>) -> i32 {
    if !result.success {
        eprintln!("{}", result.message);
        return 1;
    }
    let columns = result.data.unwrap_or_default();
    let rows: Vec<Vec<String>> = columns
        .iter()
        .map(|column| {
            vec![
                column.column_name.clone(),
                column.column_type.clone(),
                column.is_nullable.clone(),
                cell(column.column_default.clone()),
                column.column_comment.clone(),
                column.extra.clone(),
            ]
        })
        .collect();
    print!(
        "{}",
        render_table(
            &["Column", "Type", "Nullable", "Default", "Comment", "Extra"],
            &rows
        )
    );
    println!("{}", result.message);
    0
}

fn cell(value: Option<String>) -> String {
    value.unwrap_or_else(|| "NULL".to_string())
}

/// Width-aligned ASCII table in the style of the mysql client.
fn render_table(headers: &[&str], rows: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.width()).collect();
    for row in rows {
        for (i, value) in row.iter().enumerate() {
            widths[i] = widths[i].max(value.width());
        }
    }

    let separator = widths
        .iter()
        .map(|w| format!("+{}", "-".repeat(w + 2)))
        .collect::<String>()
        + "+\n";

    let mut output = String::new();
    output.push_str(&separator);
    let header_line = headers
        .iter()
        .zip(&widths)
        .map(|(h, w)| format!("| {:^width$} ", h, width = w))
        .collect::<String>()
        + "|\n";
    output.push_str(&header_line);
    output.push_str(&separator);

    for row in rows {
        let line = row
            .iter()
            .zip(&widths)
            .map(|(value, w)| format!("| {:<width$} ", value, width = w))
            .collect::<String>()
            + "|\n";
        output.push_str(&line);
    }
    output.push_str(&separator);
    output
}
