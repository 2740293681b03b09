use crate::cli::parser::Commands;
use crate::core::auth::sha256_hex;
use crate::errors::AppResult;

pub fn handle(cmd: &Commands) -> AppResult<()> {
    if let Commands::HashPassword { password } = cmd {
        println!("admin_password_sha256: {}", sha256_hex(password));
    }
    Ok(())
}
