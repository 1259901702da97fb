//! MySQL MCP Server
//!
//! A Model Context Protocol (MCP) server for MySQL databases, speaking
//! JSON-RPC 2.0 over stdio so AI assistants can inspect schemas and run
//! queries. Connection credentials travel with every tool call and each
//! call runs on its own short-lived connection, so the server keeps no
//! database state between calls.
//!
//! # Features
//!
//! - Table and column introspection from the information_schema catalog
//! - SQL query execution with optional ordered bind parameters
//! - Connection probing
//! - One-shot terminal commands (`test`, `tables`, `columns`, `query`)
//!   for use outside an MCP host

mod cli;
mod config;
mod db;
mod error;
mod rpc;
mod server;
mod tools;

use clap::Parser;
use config::Args;
use tools::DbExecutor;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logger
    env_logger::init();

    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(e) => {
            // clap exits with 2 on usage errors; this tool reserves 1
            let _ = e.print();
            let code = match e.kind() {
                clap::error::ErrorKind::DisplayHelp | clap::error::ErrorKind::DisplayVersion => 0,
                _ => 1,
            };
            std::process::exit(code);
        }
    };

    match args.command {
        Some(command) => std::process::exit(cli::run(command).await),
        None => server::run(DbExecutor).await,
    }
}
