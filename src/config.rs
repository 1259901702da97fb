use clap::{Parser, Subcommand};

use crate::db::ConnectionParams;

/// Run with no command to serve the stdio protocol; run with a command
/// for a one-shot database operation from the terminal.
#[derive(Debug, Parser)]
#[command(name = "database-mcp-server", version, about = "MySQL database tool server")]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Test that a database connection can be established
    Test(ConnectionArgs),
    /// List all tables in a database
    Tables(ConnectionArgs),
    /// List the columns of one table
    Columns {
        #[command(flatten)]
        connection: ConnectionArgs,
        /// Table to inspect
        table_name: String,
    },
    /// Execute a SQL statement
    Query {
        #[command(flatten)]
        connection: ConnectionArgs,
        /// SQL statement to run
        query: String,
    },
}

#[derive(Debug, clap::Args)]
pub struct ConnectionArgs {
    /// Database host address
    pub host: String,
    /// Database username
    pub user: String,
    /// Database password
    pub password: String,
    /// Database name
    pub database: String,
    /// Database port, defaults to 3306
    #[arg(long)]
    pub port: Option<u16>,
}

impl ConnectionArgs {
    pub fn connection_params(&self) -> ConnectionParams {
        ConnectionParams {
            host: self.host.clone(),
            user: self.user.clone(),
            password: self.password.clone(),
            database: self.database.clone(),
            port: self.port,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_command_means_serve() {
        let args = Args::try_parse_from(["database-mcp-server"]).unwrap();
        assert!(args.command.is_none());
    }

    #[test]
    fn tables_takes_positional_connection_settings() {
        let args = Args::try_parse_from([
            "database-mcp-server",
            "tables",
            "db.local",
            "root",
            "secret",
            "shop",
        ])
        .unwrap();
        match args.command {
            Some(Command::Tables(connection)) => {
                let params = connection.connection_params();
                assert_eq!(params.host, "db.local");
                assert_eq!(params.user, "root");
                assert_eq!(params.password, "secret");
                assert_eq!(params.database, "shop");
                assert_eq!(params.port, None);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn columns_requires_a_table_name() {
        assert!(Args::try_parse_from([
            "database-mcp-server",
            "columns",
            "db.local",
            "root",
            "secret",
            "shop",
        ])
        .is_err());

        let args = Args::try_parse_from([
            "database-mcp-server",
            "columns",
            "db.local",
            "root",
            "secret",
            "shop",
            "orders",
        ])
        .unwrap();
        match args.command {
            Some(Command::Columns { table_name, .. }) => assert_eq!(table_name, "orders"),
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn query_takes_the_statement_and_port_flag() {
        let args = Args::try_parse_from([
            "database-mcp-server",
            "query",
            "db.local",
            "root",
            "secret",
            "shop",
            "SELECT 1",
            "--port",
            "3307",
        ])
        .unwrap();
        match args.command {
            Some(Command::Query { connection, query }) => {
                assert_eq!(query, "SELECT 1");
                assert_eq!(connection.port, Some(3307));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn missing_connection_settings_fail_to_parse() {
        assert!(Args::try_parse_from(["database-mcp-server", "test", "db.local"]).is_err());
    }

    #[test]
    fn unknown_commands_fail_to_parse() {
        assert!(Args::try_parse_from(["database-mcp-server", "drop"]).is_err());
    }
}
