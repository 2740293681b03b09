use crate::cli::commands::open_service;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::import::{ImportSource, parse_rows};
use crate::errors::AppResult;
use crate::ui::messages::{success, warning};
use std::fs;

/// Replace the whole debtor list with the rows of a file.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Import { file, no_header } = cmd {
        let text = fs::read_to_string(file)?;
        let source = if *no_header {
            ImportSource::Pasted
        } else {
            ImportSource::CsvFile
        };

        let rows = parse_rows(&text, source)?;
        if rows.is_empty() {
            warning("No valid rows found; the current list is replaced by an empty one.");
        }

        let mut service = open_service(cfg)?;
        let written = service.replace(rows)?;
        success(format!("List replaced: {} debtor(s) imported from {}", written, file));
    }

    Ok(())
}
