use serde::{Deserialize, Serialize};

/// Closed set of configuration keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigKey {
    PixKey,
    QrCode,
}

impl ConfigKey {
    /// Convert enum → DB string
    pub fn to_db_str(&self) -> &'static str {
        match self {
            ConfigKey::PixKey => "pix_key",
            ConfigKey::QrCode => "qr_code",
        }
    }
}

/// Payment key and QR image as shown on the PIX screen.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PixConfig {
    pub key: Option<String>,
    #[serde(rename = "qrCode")]
    pub qr_code: Option<String>,
}

/// Partial update: absent or empty fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PixConfigUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    #[serde(default, rename = "qrCode", skip_serializing_if = "Option::is_none")]
    pub qr_code: Option<String>,
}

impl PixConfigUpdate {
    /// Fields that will actually be written, paired with their keys.
    pub fn writes(&self) -> Vec<(ConfigKey, &str)> {
        let mut out = Vec::new();
        if let Some(k) = self.key.as_deref().filter(|s| !s.is_empty()) {
            out.push((ConfigKey::PixKey, k));
        }
        if let Some(q) = self.qr_code.as_deref().filter(|s| !s.is_empty()) {
            out.push((ConfigKey::QrCode, q));
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pix_config_uses_camel_case_qr_field() {
        let cfg = PixConfig {
            key: Some("abc".into()),
            qr_code: None,
        };
        let json = serde_json::to_value(&cfg).unwrap();
        assert_eq!(json, serde_json::json!({"key": "abc", "qrCode": null}));
    }

    #[test]
    fn empty_fields_are_not_written() {
        let upd: PixConfigUpdate = serde_json::from_str(r#"{"key": "", "qrCode": "data:x"}"#).unwrap();
        assert_eq!(upd.writes(), vec![(ConfigKey::QrCode, "data:x")]);
    }
}
