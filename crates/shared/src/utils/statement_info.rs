use crate::model::BankModel;

const SCB_CODE: &str = "scb";
const SCB_MARKER: &str = " x";
const SCB_DIGITS: usize = 4;
const DEFAULT_MARKER: &str = "/x";
const DEFAULT_DIGITS: usize = 6;

/// Finds the counterparty bank named in a statement's `info`.
///
/// Codes are tried before names, both as case-insensitive substrings.
pub fn parse_bank<'a>(info: &str, banks: &'a [BankModel]) -> Option<&'a BankModel> {
    let info = info.to_lowercase();

    banks
        .iter()
        .find(|bank| !bank.code.is_empty() && info.contains(&bank.code.to_lowercase()))
        .or_else(|| {
            banks
                .iter()
                .find(|bank| !bank.name.is_empty() && info.contains(&bank.name.to_lowercase()))
        })
}

/// Extracts the masked counterparty account digits; empty when unparseable.
pub fn parse_account_number(bank_code: &str, info: &str) -> String {
    let info = info.to_lowercase();

    let (marker, digits) = if bank_code.eq_ignore_ascii_case(SCB_CODE) {
        (SCB_MARKER, SCB_DIGITS)
    } else {
        (DEFAULT_MARKER, DEFAULT_DIGITS)
    };

    let Some((_, rest)) = info.split_once(marker) else {
        return String::new();
    };

    let candidate: String = rest.chars().take(digits).collect();

    if candidate.chars().count() == digits && candidate.chars().all(|c| c.is_ascii_digit()) {
        candidate
    } else {
        String::new()
    }
}
