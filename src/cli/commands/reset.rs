use crate::cli::commands::open_service;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::errors::AppResult;
use crate::ui::messages::{info, success};
use crate::ui::prompt::{AutoAnswer, Prompt, StdinPrompt};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Reset { yes } = cmd {
        let prompt: Box<dyn Prompt> = if *yes {
            Box::new(AutoAnswer(true))
        } else {
            Box::new(StdinPrompt)
        };

        if !prompt.confirm("Delete ALL debtors and ALL configuration? This action is irreversible.") {
            info("Operation cancelled.");
            return Ok(());
        }

        let mut service = open_service(cfg)?;
        service.reset()?;
        success("System reset: no debtors, empty PIX key.");
    }

    Ok(())
}
