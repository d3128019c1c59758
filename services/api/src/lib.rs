mod cli;
mod evaluate;
mod infra;
mod routes;
mod server;

use utbk_sim::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}
