//! Storefront CLI

use std::process::ExitCode;

use storefront::observability;

mod cli;

#[tokio::main]
#[expect(
    clippy::print_stderr,
    reason = "the CLI reports fatal errors on stderr."
)]
async fn main() -> ExitCode {
    let cli = match cli::Cli::load() {
        Ok(cli) => cli,
        Err(error) => {
            _ = error.print();

            return if error.use_stderr() {
                ExitCode::from(2)
            } else {
                ExitCode::SUCCESS
            };
        }
    };

    if let Err(error) = observability::init_subscriber(cli.logging()) {
        eprintln!("{error}");

        return ExitCode::FAILURE;
    }

    match cli.run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("{error}");

            ExitCode::FAILURE
        }
    }
}
