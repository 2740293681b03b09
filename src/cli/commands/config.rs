use crate::cli::parser::Commands;
use crate::config::Config;
use crate::config::migrate::{migrate_config_file, missing_fields};
use crate::errors::{AppError, AppResult};
use crate::ui::messages::{info, success, warning};

/// Handle the `config` subcommand
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Config {
        print_config,
        check,
        migrate,
    } = cmd
    {
        let path = Config::config_file();

        // ---- PRINT CONFIG ----
        if *print_config {
            info(format!("Current configuration ({}):\n", path.display()));
            let yaml = serde_yaml::to_string(cfg)?;
            println!("{}", yaml);
        }

        if (*check || *migrate) && !path.exists() {
            return Err(AppError::Config(format!(
                "no configuration file at {} (run `debtpix init`)",
                path.display()
            )));
        }

        // ---- CHECK ----
        if *check {
            let missing = missing_fields(&path)?;
            if missing.is_empty() {
                success("Configuration file is complete.");
            } else {
                warning(format!("Missing fields: {}", missing.join(", ")));
            }
        }

        // ---- MIGRATE ----
        if *migrate {
            if migrate_config_file(&path)? {
                success(format!("Configuration file updated: {}", path.display()));
            } else {
                info("Configuration file already up to date.");
            }
        }
    }

    Ok(())
}
