//! Due dates are stored as `DD-MM-YYYY` while date inputs speak `YYYY-MM-DD`.
//! Transposition is textual so that a round trip reproduces the stored string.

use chrono::NaiveDate;

use crate::v1::ValidationError;

const STORED_FORMAT: &str = "%d-%m-%Y";
const INPUT_FORMAT: &str = "%Y-%m-%d";

/// `DD-MM-YYYY` to `YYYY-MM-DD`.
pub fn to_input_format(stored: &str) -> String {
    reverse_parts(stored)
}

/// `YYYY-MM-DD` to `DD-MM-YYYY`.
pub fn from_input_format(input: &str) -> String {
    reverse_parts(input)
}

fn reverse_parts(date: &str) -> String {
    let parts: Vec<&str> = date.split('-').collect();

    match parts.as_slice() {
        [a, b, c] => format!("{c}-{b}-{a}"),
        _ => date.to_owned(),
    }
}

pub fn parse_input_date(input: &str) -> Result<NaiveDate, ValidationError> {
    NaiveDate::parse_from_str(input.trim(), INPUT_FORMAT)
        .map_err(|_| ValidationError::InvalidDueDate(input.to_owned()))
}

pub fn parse_stored_date(stored: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(stored.trim(), STORED_FORMAT).ok()
}
