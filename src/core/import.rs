//! Parsing of pasted text and uploaded CSV into bulk-replace candidates.
//!
//! Each line holds five positional fields: phone, name, value, due date,
//! discount. Unquoted input splits on every comma; a double-quoted field may
//! contain commas.

use crate::errors::AppResult;
use crate::models::debtor::{DebtorCandidate, PhoneInput, normalize_phone};
use csv::{ReaderBuilder, StringRecord, Trim};

/// Whether the first line is a header to be discarded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportSource {
    /// Text pasted into the import box: every line is data.
    Pasted,
    /// Uploaded `.csv` file: first line is a header, even when blank.
    CsvFile,
}

pub fn parse_rows(input: &str, source: ImportSource) -> AppResult<Vec<DebtorCandidate>> {
    let body = match source {
        ImportSource::Pasted => input,
        ImportSource::CsvFile => input.split_once('\n').map_or("", |(_, rest)| rest),
    };

    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(body.as_bytes());

    let mut out = Vec::new();
    for record in reader.records() {
        if let Some(c) = parse_record(&record?) {
            out.push(c);
        }
    }
    Ok(out)
}

fn parse_record(record: &StringRecord) -> Option<DebtorCandidate> {
    let field = |i: usize| record.get(i).unwrap_or("").trim();

    let phone = normalize_phone(field(0));
    if phone.is_empty() {
        return None;
    }

    Some(DebtorCandidate {
        phone: Some(PhoneInput::Text(phone)),
        name: Some(field(1).to_string()),
        value: Some(parse_amount(field(2)).max(0.0)),
        due_date: Some(field(3).to_string()),
        discount: Some(parse_amount(field(4))),
    })
}

/// Lenient number: reads the longest numeric prefix (`"89.90 reais"` is
/// 89.9). No prefix, or a non-finite result, becomes zero.
pub fn parse_amount(s: &str) -> f64 {
    let s = s.trim();
    let end = s
        .find(|c: char| !(c.is_ascii_digit() || matches!(c, '+' | '-' | '.' | 'e' | 'E')))
        .unwrap_or(s.len());

    (1..=end)
        .rev()
        .find_map(|i| s[..i].parse::<f64>().ok())
        .filter(|v| v.is_finite())
        .unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn debtors(input: &str, source: ImportSource) -> Vec<crate::models::debtor::Debtor> {
        parse_rows(input, source)
            .unwrap()
            .into_iter()
            .filter_map(DebtorCandidate::into_debtor)
            .collect()
    }

    #[test]
    fn pasted_line_maps_positional_fields() {
        let rows = debtors("11999998888, João Silva, 89.90, 15/02, 10.00", ImportSource::Pasted);
        assert_eq!(rows.len(), 1);
        let d = &rows[0];
        assert_eq!(d.phone, "11999998888");
        assert_eq!(d.name, "João Silva");
        assert_eq!(d.value, 89.90);
        assert_eq!(d.due_date, "15/02");
        assert_eq!(d.discount, 10.00);
    }

    #[test]
    fn non_numeric_value_becomes_zero() {
        let rows = debtors("11999998888, Maria, abc, 10/03, x", ImportSource::Pasted);
        assert_eq!(rows[0].value, 0.0);
        assert_eq!(rows[0].discount, 0.0);
    }

    #[test]
    fn blank_lines_and_empty_phones_are_discarded() {
        let input = "\n11988887777, Ana, 10, 01/01, 0\n   \n, Sem Telefone, 5, 02/02, 0\nabc, Letras, 1, 03/03, 0\n";
        let rows = debtors(input, ImportSource::Pasted);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].phone, "11988887777");
    }

    #[test]
    fn csv_upload_skips_header_line() {
        let input = "telefone,nome,valor,vencimento,desconto\r\n(11) 97777-6666,Carlos,120.5,20/04,0.5\r\n";
        let rows = debtors(input, ImportSource::CsvFile);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].phone, "11977776666");
        assert_eq!(rows[0].value, 120.5);

        // pasted text keeps the same first line as data (and drops it: no digits)
        let rows = debtors(input, ImportSource::Pasted);
        assert_eq!(rows.len(), 1);
    }

    #[test]
    fn csv_upload_drops_blank_first_line_as_header() {
        let input = "\n11999998888,Ana,1,01/01,0\n11988887777,Bia,2,02/02,0\n";
        let rows = debtors(input, ImportSource::CsvFile);
        assert_eq!(rows.len(), 2);

        assert!(debtors("telefone,nome,valor", ImportSource::CsvFile).is_empty());
    }

    #[test]
    fn amounts_use_leading_number() {
        assert_eq!(parse_amount("89.90 reais"), 89.9);
        assert_eq!(parse_amount("10abc"), 10.0);
        assert_eq!(parse_amount(" -3.5"), -3.5);
        assert_eq!(parse_amount("1e2x"), 100.0);
        assert_eq!(parse_amount("1e"), 1.0);
        assert_eq!(parse_amount(".5"), 0.5);
        assert_eq!(parse_amount("R$ 10"), 0.0);
        assert_eq!(parse_amount("1e400"), 0.0);
        assert_eq!(parse_amount(""), 0.0);

        let rows = debtors("11999998888, Ana, 50 reais, 01/01, 5%", ImportSource::Pasted);
        assert_eq!(rows[0].value, 50.0);
        assert_eq!(rows[0].discount, 5.0);
    }

    #[test]
    fn short_rows_fill_defaults() {
        let rows = debtors("11966665555,Bia", ImportSource::Pasted);
        assert_eq!(rows[0].name, "Bia");
        assert_eq!(rows[0].value, 0.0);
        assert_eq!(rows[0].due_date, "");
    }

    #[test]
    fn quoted_name_may_contain_commas() {
        let rows = debtors(r#"11955554444,"Silva, João",50,01/05,0"#, ImportSource::Pasted);
        assert_eq!(rows[0].name, "Silva, João");
        assert_eq!(rows[0].value, 50.0);
    }
}
