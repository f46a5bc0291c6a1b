//! # presswork-quote entry point
//!
//! ```text
//! $ echo '{"product_id":"flyer-a5","configuration":{"quantity":150}}' \
//!     | presswork-quote quote
//! {
//!   "product_id": "flyer-a5",
//!   "price": { "unit_price_cents": 80, "total_price_cents": 12000, ... },
//!   ...
//! }
//! ```
//!
//! Exit status is 0 on success (and for `--help`/`--version`) and 1 when an
//! `ApiError` is printed. Usage errors print as `BAD_REQUEST`.

use std::process::ExitCode;

use clap::error::ErrorKind;
use clap::Parser;

use presswork_quote::cli::Invocation;
use presswork_quote::error::ApiError;

#[tokio::main]
async fn main() -> ExitCode {
    let outcome = match Invocation::try_parse() {
        Ok(invocation) => presswork_quote::run(invocation).await,
        Err(err) => match err.kind() {
            ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
                print!("{err}");
                return ExitCode::SUCCESS;
            }
            _ => Err(ApiError::from(err)),
        },
    };
    println!("{}", presswork_quote::render(&outcome));

    if outcome.is_ok() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
