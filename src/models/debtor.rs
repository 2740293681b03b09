use serde::{Deserialize, Serialize};

/// One customer's outstanding balance, keyed by the digits of the phone number.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Debtor {
    pub phone: String,
    pub name: String,
    pub value: f64,
    pub due_date: String,
    pub discount: f64,
}

impl Debtor {
    /// Amount actually charged: value minus discount.
    pub fn total(&self) -> f64 {
        self.value - self.discount
    }
}

/// A phone as it arrives in a JSON body: clients send either text or a bare number.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum PhoneInput {
    Text(String),
    Number(serde_json::Number),
}

impl PhoneInput {
    pub fn normalized(&self) -> String {
        match self {
            PhoneInput::Text(s) => normalize_phone(s),
            PhoneInput::Number(n) => normalize_phone(&n.to_string()),
        }
    }
}

impl From<&str> for PhoneInput {
    fn from(s: &str) -> Self {
        PhoneInput::Text(s.to_string())
    }
}

/// A record submitted for bulk replace. Every field is optional; the store
/// decides what survives.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct DebtorCandidate {
    #[serde(default)]
    pub phone: Option<PhoneInput>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub value: Option<f64>,
    #[serde(default)]
    pub due_date: Option<String>,
    #[serde(default)]
    pub discount: Option<f64>,
}

impl DebtorCandidate {
    /// Resolve into a storable record, or `None` when the phone has no digits.
    pub fn into_debtor(self) -> Option<Debtor> {
        let phone = self.phone.as_ref().map(PhoneInput::normalized)?;
        if phone.is_empty() {
            return None;
        }

        Some(Debtor {
            phone,
            name: self.name.unwrap_or_default(),
            value: self.value.unwrap_or(0.0),
            due_date: self.due_date.unwrap_or_default(),
            discount: self.discount.unwrap_or(0.0),
        })
    }
}

impl From<Debtor> for DebtorCandidate {
    fn from(d: Debtor) -> Self {
        Self {
            phone: Some(PhoneInput::Text(d.phone)),
            name: Some(d.name),
            value: Some(d.value),
            due_date: Some(d.due_date),
            discount: Some(d.discount),
        }
    }
}

/// Strip every non-digit character.
pub fn normalize_phone(raw: &str) -> String {
    raw.chars().filter(|c| c.is_ascii_digit()).collect()
}
