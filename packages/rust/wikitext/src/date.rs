//! Fuzzy publication-date normalization.
//!
//! Interview dates are human-entered strings in one of three shapes:
//! "Month Day, Year", "Month Year", or bare "Year". Normalization maps all
//! of them onto a [`NaiveDate`] so the catalogue can be totally ordered.
//! Anything unparseable collapses to [`NaiveDate::MIN`], which sorts before
//! every real date. The function is pure and never fails.

use chrono::NaiveDate;

/// Lowercase month names, index + 1 = month number.
const MONTHS: [&str; 12] = [
    "january",
    "february",
    "march",
    "april",
    "may",
    "june",
    "july",
    "august",
    "september",
    "october",
    "november",
    "december",
];

/// Normalize a human-entered date string to a comparable date.
///
/// - 3 tokens → "Month Day, Year" (token order is tolerated loosely,
///   punctuation and unrecognized tokens are skipped)
/// - 2 tokens → "Month Year", day defaults to 1
/// - 1 token → bare "Year", defaults to January 1
/// - anything else, or content that does not resolve to a valid date,
///   yields `NaiveDate::MIN`
pub fn parse_custom_date(text: &str) -> NaiveDate {
    let tokens: Vec<&str> = text.split_whitespace().collect();

    let parsed = match tokens.len() {
        2 | 3 => parse_month_day_year(&tokens),
        1 => parse_year(tokens[0]),
        _ => None,
    };

    parsed.unwrap_or(NaiveDate::MIN)
}

/// Lenient scan for a month name, an optional day, and a year.
fn parse_month_day_year(tokens: &[&str]) -> Option<NaiveDate> {
    let mut month: Option<u32> = None;
    let mut day: Option<u32> = None;
    let mut year: Option<i32> = None;

    for token in tokens {
        if month.is_none() {
            if let Some(m) = month_number(token) {
                month = Some(m);
                continue;
            }
        }
        let Some(n) = numeric(token) else {
            // Fuzzy: tokens that are neither a month nor a number are skipped.
            continue;
        };
        if day.is_none() && (1..=31).contains(&n) && (year.is_some() || n < 100) {
            day = Some(n as u32);
        } else if year.is_none() {
            year = Some(n as i32);
        }
    }

    NaiveDate::from_ymd_opt(year?, month?, day.unwrap_or(1))
}

/// A bare year token ("2020") maps to January 1 of that year.
fn parse_year(token: &str) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(numeric(token)? as i32, 1, 1)
}

/// Match a token against month names, allowing 3+ letter abbreviations.
fn month_number(token: &str) -> Option<u32> {
    let cleaned: String = token
        .chars()
        .filter(char::is_ascii_alphabetic)
        .collect::<String>()
        .to_ascii_lowercase();
    if cleaned.len() < 3 {
        return None;
    }
    MONTHS
        .iter()
        .position(|name| name.starts_with(&cleaned))
        .map(|i| i as u32 + 1)
}

/// Parse a number out of a token, tolerating punctuation and ordinal
/// suffixes ("5,", "2nd").
fn numeric(token: &str) -> Option<i64> {
    let trimmed = token.trim_matches(|c: char| !c.is_ascii_alphanumeric());
    let trimmed = trimmed
        .strip_suffix("st")
        .or_else(|| trimmed.strip_suffix("nd"))
        .or_else(|| trimmed.strip_suffix("rd"))
        .or_else(|| trimmed.strip_suffix("th"))
        .unwrap_or(trimmed);
    trimmed.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid test date")
    }

    #[test]
    fn three_token_form_is_day_accurate() {
        assert_eq!(parse_custom_date("March 5, 2020"), date(2020, 3, 5));
        assert_eq!(parse_custom_date("June 15, 1998"), date(1998, 6, 15));
    }

    #[test]
    fn two_token_form_defaults_to_day_one() {
        assert_eq!(parse_custom_date("March 2020"), date(2020, 3, 1));
        assert_eq!(parse_custom_date("January 2005"), date(2005, 1, 1));
    }

    #[test]
    fn bare_year_defaults_to_january_first() {
        assert_eq!(parse_custom_date("2020"), date(2020, 1, 1));
        assert_eq!(parse_custom_date("2019"), date(2019, 1, 1));
    }

    #[test]
    fn all_three_forms_land_in_the_same_year() {
        for input in ["March 5, 2020", "March 2020", "2020"] {
            assert_eq!(parse_custom_date(input).format("%Y").to_string(), "2020");
        }
    }

    #[test]
    fn unparseable_input_yields_minimum_date() {
        assert_eq!(parse_custom_date(""), NaiveDate::MIN);
        assert_eq!(parse_custom_date("not a date at all really"), NaiveDate::MIN);
        assert_eq!(parse_custom_date("???"), NaiveDate::MIN);
        assert_eq!(parse_custom_date("Sometime March"), NaiveDate::MIN);
        assert_eq!(parse_custom_date("February 31, 2020"), NaiveDate::MIN);
    }

    #[test]
    fn minimum_date_sorts_before_everything() {
        assert!(parse_custom_date("garbage") < parse_custom_date("1"));
        assert!(parse_custom_date("garbage") < parse_custom_date("June 15, 1998"));
    }

    #[test]
    fn day_first_order_is_tolerated() {
        assert_eq!(parse_custom_date("15 June 1998"), date(1998, 6, 15));
    }

    #[test]
    fn month_abbreviations_match() {
        assert_eq!(parse_custom_date("Sept 2004"), date(2004, 9, 1));
        assert_eq!(parse_custom_date("Dec 25, 1999"), date(1999, 12, 25));
    }

    #[test]
    fn catalogue_sort_order() {
        let mut inputs = vec!["2019", "June 15, 1998", "January 2005"];
        inputs.sort_by_key(|s| parse_custom_date(s));
        assert_eq!(inputs, ["June 15, 1998", "January 2005", "2019"]);
    }
}
