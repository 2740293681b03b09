use crate::cli::commands::open_service;
use crate::cli::parser::Commands;
use crate::client::mask::format_phone;
use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::models::debtor::normalize_phone;
use crate::ui::messages::{info, success};
use crate::ui::prompt::{AutoAnswer, Prompt, StdinPrompt};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Del { phone, yes } = cmd {
        let key = normalize_phone(phone);
        if key.is_empty() {
            return Err(AppError::Validation(format!("Invalid phone: {}", phone)));
        }

        let prompt: Box<dyn Prompt> = if *yes {
            Box::new(AutoAnswer(true))
        } else {
            Box::new(StdinPrompt)
        };

        //
        // Confirmation prompt
        //
        let msg = format!("Delete debtor {}? This action is irreversible.", format_phone(&key));
        if !prompt.confirm(&msg) {
            info("Operation cancelled.");
            return Ok(());
        }

        let service = open_service(cfg)?;
        service.delete(&key)?;
        success(format!("Debtor {} has been deleted.", format_phone(&key)));
    }

    Ok(())
}
