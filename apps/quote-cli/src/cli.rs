//! # Command Line
//!
//! ```text
//! presswork-quote [--config PATH] <command>
//!
//!   search [QUERY]... [--limit N]  search active products
//!   product ID                     full product definition
//!   quote [FILE|-]                 price a request (stdin by default)
//!   order add [FILE|-]             price a request and add it to the draft
//!   order remove LINE_ID           remove a draft line
//!   order show                     print the draft (default)
//!   order clear                    empty the draft
//! ```

use std::convert::Infallible;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tokio::io::AsyncReadExt;

use crate::error::ApiError;

/// Where a request body comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestSource {
    Stdin,
    File(PathBuf),
}

impl RequestSource {
    fn parse(arg: &str) -> Result<Self, Infallible> {
        Ok(match arg {
            "" | "-" => RequestSource::Stdin,
            path => RequestSource::File(PathBuf::from(path)),
        })
    }

    /// Reads the whole request body.
    pub async fn read(&self) -> Result<String, ApiError> {
        match self {
            RequestSource::Stdin => {
                let mut body = String::new();
                tokio::io::stdin()
                    .read_to_string(&mut body)
                    .await
                    .map_err(|e| ApiError::bad_request(format!("Cannot read stdin: {}", e)))?;
                Ok(body)
            }
            RequestSource::File(path) => tokio::fs::read_to_string(path).await.map_err(|e| {
                ApiError::bad_request(format!("Cannot read request {}: {}", path.display(), e))
            }),
        }
    }
}

/// Price print and apparel products and build draft orders
#[derive(Parser, Debug, Clone, PartialEq, Eq)]
#[command(name = "presswork-quote", version)]
pub struct Invocation {
    /// quote.toml to load instead of the platform default
    #[arg(long, short = 'c', global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Search active products by name, id or category
    Search {
        query: Vec<String>,
        #[arg(long, short = 'n')]
        limit: Option<usize>,
    },
    /// Print a full product definition
    Product { id: String },
    /// Price a request without touching the draft
    Quote {
        #[arg(value_name = "FILE", default_value = "-", value_parser = RequestSource::parse)]
        source: RequestSource,
    },
    /// Work with the draft order
    Order {
        #[command(subcommand)]
        command: Option<OrderCommand>,
    },
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum OrderCommand {
    /// Price a request and append it as a new line
    Add {
        #[arg(value_name = "FILE", default_value = "-", value_parser = RequestSource::parse)]
        source: RequestSource,
    },
    /// Remove a line by id
    Remove { line_id: String },
    Show,
    Clear,
}

impl From<OrderCommand> for Command {
    fn from(command: OrderCommand) -> Self {
        Command::Order {
            command: Some(command),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;

    fn parse(line: &str) -> Result<Invocation, clap::Error> {
        Invocation::try_parse_from(std::iter::once("presswork-quote").chain(line.split_whitespace()))
    }

    #[test]
    fn test_parse_search() {
        let inv = parse("search vinyl banner --limit 5").unwrap();
        assert_eq!(inv.config, None);
        assert_eq!(
            inv.command,
            Command::Search {
                query: vec!["vinyl".to_string(), "banner".to_string()],
                limit: Some(5),
            }
        );

        let inv = parse("search").unwrap();
        assert_eq!(
            inv.command,
            Command::Search {
                query: Vec::new(),
                limit: None,
            }
        );
    }

    #[test]
    fn test_parse_config_flag_anywhere() {
        let inv = parse("quote req.json --config /etc/quote.toml").unwrap();
        assert_eq!(inv.config, Some(PathBuf::from("/etc/quote.toml")));
        assert_eq!(
            inv.command,
            Command::Quote {
                source: RequestSource::File(PathBuf::from("req.json")),
            }
        );

        let inv = parse("-c quote.toml order show").unwrap();
        assert_eq!(inv.config, Some(PathBuf::from("quote.toml")));
        assert_eq!(inv.command, Command::from(OrderCommand::Show));
    }

    #[test]
    fn test_parse_order_commands() {
        let inv = parse("order add -").unwrap();
        assert_eq!(
            inv.command,
            Command::from(OrderCommand::Add {
                source: RequestSource::Stdin,
            })
        );

        let inv = parse("quote").unwrap();
        assert_eq!(
            inv.command,
            Command::Quote {
                source: RequestSource::Stdin,
            }
        );

        let inv = parse("order").unwrap();
        assert_eq!(inv.command, Command::Order { command: None });

        let inv = parse("order remove 1234").unwrap();
        assert_eq!(
            inv.command,
            Command::from(OrderCommand::Remove {
                line_id: "1234".to_string(),
            })
        );
    }

    #[test]
    fn test_parse_errors_are_bad_requests() {
        for line in [
            "",
            "refund",
            "product",
            "order remove",
            "order submit",
            "search --limit x",
            "--config",
        ] {
            let err: ApiError = parse(line).unwrap_err().into();
            assert_eq!(err.code, ErrorCode::BadRequest, "line: {:?}", line);
        }
    }
}
