//! Lenient free-text product entry
//!
//! Each line is `name:price`. Lines that do not parse are skipped so that a
//! single typo never discards the rest of the list.

use crate::model::ProductDraft;

const SEPARATOR: char = ':';

/// Parse newline-separated `name:price` pairs
///
/// - lines without `:` are skipped
/// - the line is split on the first `:` only
/// - the price is trimmed and a trailing `currency_unit` is stripped before
///   integer parsing; lines whose price still does not parse are skipped
/// - full-width digits (`３００`, as typed with a Japanese IME) count as
///   digits, and single `_` separators between digits are allowed (`1_000`)
pub fn parse_products_from_text(text: &str, currency_unit: &str) -> Vec<ProductDraft> {
    text.trim()
        .lines()
        .filter_map(|line| parse_line(line.trim(), currency_unit))
        .collect()
}

fn parse_line(line: &str, currency_unit: &str) -> Option<ProductDraft> {
    let (name, price_text) = line.split_once(SEPARATOR)?;
    let mut price_text = price_text.trim();
    if !currency_unit.is_empty() {
        price_text = price_text.trim_end_matches(currency_unit).trim_end();
    }
    let price = normalize_integer(price_text)?.parse::<i64>().ok()?;
    Some(ProductDraft::new(name.trim(), price))
}

/// ASCII form of an integer literal, or `None` for a misplaced `_`
fn normalize_integer(text: &str) -> Option<String> {
    let mut out = String::with_capacity(text.len());
    let mut after_digit = false;
    let mut pending_separator = false;

    for ch in text.chars() {
        let ch = match ch {
            '０'..='９' => char::from_digit(ch as u32 - '０' as u32, 10)?,
            other => other,
        };
        if ch == '_' {
            if !after_digit || pending_separator {
                return None;
            }
            pending_separator = true;
            continue;
        }
        after_digit = ch.is_ascii_digit();
        if pending_separator && !after_digit {
            return None;
        }
        pending_separator = false;
        out.push(ch);
    }

    (!pending_separator).then_some(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_skips_line_without_separator() {
        let products =
            parse_products_from_text("クレープ:300\nドリンク:200\nbadline\nたこ焼き:250", "円");

        assert_eq!(
            products,
            vec![
                ProductDraft::new("クレープ", 300),
                ProductDraft::new("ドリンク", 200),
                ProductDraft::new("たこ焼き", 250),
            ]
        );
    }

    #[test]
    fn test_strips_trailing_currency_unit() {
        let products = parse_products_from_text("かき氷: 200円\nラムネ : 150 円", "円");
        assert_eq!(
            products,
            vec![ProductDraft::new("かき氷", 200), ProductDraft::new("ラムネ", 150)]
        );
    }

    #[test]
    fn test_skips_non_numeric_price() {
        let products = parse_products_from_text("Crepe:three hundred\nTea:120", "円");
        assert_eq!(products, vec![ProductDraft::new("Tea", 120)]);
    }

    #[test]
    fn test_splits_on_first_separator_only() {
        let products = parse_products_from_text("Combo: A:500", "円");
        assert!(products.is_empty());

        let products = parse_products_from_text("Set A:500", "円");
        assert_eq!(products, vec![ProductDraft::new("Set A", 500)]);
    }

    #[test]
    fn test_tolerates_blank_lines_and_crlf() {
        let products = parse_products_from_text("\r\nCrepe:300\r\n\r\nDrink:200\r\n", "円");
        assert_eq!(
            products,
            vec![ProductDraft::new("Crepe", 300), ProductDraft::new("Drink", 200)]
        );
    }

    #[test]
    fn test_empty_input_yields_nothing() {
        assert!(parse_products_from_text("", "円").is_empty());
        assert!(parse_products_from_text("   \n  ", "円").is_empty());
    }

    #[test]
    fn test_accepts_full_width_digits_and_digit_separators() {
        let products = parse_products_from_text("焼きそば:３００円\nラムネ:1_000\nかき氷:１_２００ 円", "円");
        assert_eq!(
            products,
            vec![
                ProductDraft::new("焼きそば", 300),
                ProductDraft::new("ラムネ", 1000),
                ProductDraft::new("かき氷", 1200),
            ]
        );
    }

    #[test]
    fn test_rejects_misplaced_digit_separators() {
        let products = parse_products_from_text("A:_100\nB:100_\nC:1__000\nD:-_5\nE:2_5", "円");
        assert_eq!(products, vec![ProductDraft::new("E", 25)]);
    }

    #[test]
    fn test_negative_prices_are_parsed_and_left_to_validation() {
        let products = parse_products_from_text("Refund:-50", "円");
        assert_eq!(products, vec![ProductDraft::new("Refund", -50)]);
    }
}
