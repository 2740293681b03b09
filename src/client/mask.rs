//! Display mask for the phone field: `(DD) DDDDD-DDDD`.

use crate::models::debtor::normalize_phone;

/// Most digits the mask shows (area code + nine-digit mobile).
pub const MAX_DIGITS: usize = 11;

/// Fewest digits worth sending to the lookup.
pub const MIN_DIGITS: usize = 10;

/// Reformat whatever the user typed, keeping only the digits that fit.
pub fn format_phone(input: &str) -> String {
    let digits: Vec<char> = normalize_phone(input).chars().take(MAX_DIGITS).collect();
    let part = |from: usize, to: usize| -> String { digits[from..to.min(digits.len())].iter().collect() };

    match digits.len() {
        0 => String::new(),
        1..=2 => format!("({}", part(0, 2)),
        3..=7 => format!("({}) {}", part(0, 2), part(2, 7)),
        _ => format!("({}) {}-{}", part(0, 2), part(2, 7), part(7, MAX_DIGITS)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mask_grows_with_input() {
        assert_eq!(format_phone(""), "");
        assert_eq!(format_phone("1"), "(1");
        assert_eq!(format_phone("11"), "(11");
        assert_eq!(format_phone("119"), "(11) 9");
        assert_eq!(format_phone("1199999"), "(11) 99999");
        assert_eq!(format_phone("11999998"), "(11) 99999-8");
        assert_eq!(format_phone("11999998888"), "(11) 99999-8888");
    }

    #[test]
    fn mask_is_stable_when_reapplied() {
        let once = format_phone("11999998888");
        assert_eq!(format_phone(&once), once);
    }

    #[test]
    fn extra_digits_and_noise_are_dropped() {
        assert_eq!(format_phone("119999988889999"), "(11) 99999-8888");
        assert_eq!(format_phone("ab(11)-9"), "(11) 9");
    }
}
