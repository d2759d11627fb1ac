mod cli;
mod export;

use inventory_export::error::AppError;

pub fn run() -> Result<(), AppError> {
    cli::run()
}
