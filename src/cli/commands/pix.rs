use crate::cli::commands::open_service;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::errors::AppResult;
use crate::models::pix::PixConfigUpdate;
use crate::server::assets::content_type;
use crate::ui::messages::{info, success};
use crate::utils::colors::{GREY, RESET};
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use std::fs;
use std::path::Path;

/// Encode an image file as a `data:` URI, the form the PIX screen renders.
pub fn data_uri_from_file(path: &Path) -> AppResult<String> {
    let bytes = fs::read(path)?;
    let mime = content_type(path)
        .split(';')
        .next()
        .unwrap_or("application/octet-stream");
    Ok(format!("data:{};base64,{}", mime, STANDARD.encode(bytes)))
}

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Pix { key, qr_file } = cmd {
        let service = open_service(cfg)?;

        let update = PixConfigUpdate {
            key: key.clone(),
            qr_code: match qr_file {
                Some(f) => Some(data_uri_from_file(Path::new(f))?),
                None => None,
            },
        };

        if update.writes().is_empty() {
            let current = service.pix_config()?;
            let key = current
                .key
                .filter(|k| !k.is_empty())
                .unwrap_or_else(|| format!("{GREY}(empty){RESET}"));
            let qr = match current.qr_code {
                Some(q) => format!("{} bytes", q.len()),
                None => format!("{GREY}(none){RESET}"),
            };
            info(format!("PIX key : {}", key));
            info(format!("QR code : {}", qr));
            return Ok(());
        }

        service.update_pix_config(&update)?;
        success("PIX configuration updated.");
    }

    Ok(())
}
