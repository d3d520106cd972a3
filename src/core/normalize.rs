//! Input normalization
//!
//! These filters transform raw form values into their canonical stored shape
//! before any rule is checked.

use rust_decimal::{Decimal, RoundingStrategy};

/// Filter: trim and collapse every internal whitespace run to one space
pub fn clean_text(value: &str) -> String {
    value.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Filter: cleaned and uppercased (`" c 102 3 "` becomes `"C 102 3"`)
pub fn customer_id(value: &str) -> String {
    clean_text(value).to_uppercase()
}

/// Filter: cleaned and title-cased (`"phnom   penh"` becomes `"Phnom Penh"`)
pub fn region(value: &str) -> String {
    title_case(&clean_text(value))
}

/// Filter: cleaned and lowercased, for enumerated fields
pub fn enumerated(value: &str) -> String {
    clean_text(value).to_lowercase()
}

/// Uppercase the first letter of every word, lowercase the rest
///
/// A word starts at any letter that does not follow another letter, so
/// `"o'neil"` becomes `"O'Neil"` and `"north-east"` becomes `"North-East"`.
pub fn title_case(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut prev_is_letter = false;

    for c in value.chars() {
        if c.is_alphabetic() {
            if prev_is_letter {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            prev_is_letter = true;
        } else {
            out.push(c);
            prev_is_letter = false;
        }
    }

    out
}

/// Filter: round to two decimal places the way NUMERIC(p,2) stores it
///
/// Halves round away from zero and the scale is fixed at two, so `12.5`
/// and the stored `12.50` compare and print identically.
pub fn money(value: Decimal) -> Decimal {
    let mut rounded = value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(2);
    rounded
}
