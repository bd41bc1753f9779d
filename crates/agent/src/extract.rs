//! Parameter extraction helpers shared by the handlers.
//!
//! These are deliberately plain string operations: substring-after-keyword,
//! regex capture, delimiter splits. Each helper documents its exact delimiter
//! and its failure fallback; callers turn `None` into a prompt rather than an
//! error. No deeper language understanding is in scope.

use std::sync::OnceLock;

use regex::Regex;
use rust_decimal::Decimal;
use shopmate_core::AgentError;

/// Which side of the cart a query is operating on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CartAction {
    Add,
    Remove,
}

/// The substring after the last occurrence of `keyword`, trimmed, with the
/// original casing preserved. `None` when the keyword is absent or nothing
/// follows it.
pub fn after_keyword<'a>(query: &'a str, keyword: &str) -> Option<&'a str> {
    let lowered = query.to_ascii_lowercase();
    let index = lowered.rfind(keyword)?;
    let after = query[index + keyword.len()..].trim();
    (!after.is_empty()).then_some(after)
}

/// Order ids follow the literal word `order` anywhere in the query.
pub fn order_id(query: &str) -> Option<&str> {
    after_keyword(query, "order")
}

/// The phrase between `add`/`remove` and `to cart`/`from cart`. Empty
/// captures ("add to cart") yield `None`.
pub fn cart_item_name(query: &str, action: CartAction) -> Option<String> {
    let pattern = match action {
        CartAction::Add => add_to_cart_pattern(),
        CartAction::Remove => remove_from_cart_pattern(),
    };
    let lowered = query.to_lowercase();
    let captures = pattern.captures(&lowered)?;
    let name = captures.get(1)?.as_str().trim().to_string();
    (!name.is_empty()).then_some(name)
}

/// Names for comparison: the word `compare` and all commas stripped, then
/// split on the bare substring `and`. Empties are kept so the caller's
/// minimum-count check sees them.
pub fn comparison_names(query: &str) -> Vec<String> {
    query
        .to_lowercase()
        .replace("compare", "")
        .replace(',', "")
        .trim()
        .split("and")
        .map(|name| name.trim().to_string())
        .collect()
}

/// A price token with an optional `$` prefix. The one extractor with a hard
/// validation path: anything that does not parse as a non-negative decimal
/// is a format error, not a silent fallback.
pub fn parse_price_token(token: &str) -> Result<Decimal, AgentError> {
    let trimmed = token.trim_start_matches('$');
    match trimmed.parse::<Decimal>() {
        Ok(value) if value.is_sign_negative() => {
            Err(AgentError::InvalidFormat { value: token.to_string() })
        }
        Ok(value) => Ok(value),
        Err(_) => Err(AgentError::InvalidFormat { value: token.to_string() }),
    }
}

pub(crate) fn add_to_cart_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"\badd\b\s*(.*?)\s*\bto\b \bcart\b").expect("add-to-cart pattern is valid")
    })
}

pub(crate) fn remove_from_cart_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"\bremove\b\s*(.*?)\s*\bfrom\b \bcart\b")
            .expect("remove-from-cart pattern is valid")
    })
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use super::{after_keyword, cart_item_name, comparison_names, order_id, parse_price_token, CartAction};

    #[test]
    fn order_id_takes_text_after_the_last_order_keyword() {
        assert_eq!(order_id("return order 12"), Some("12"));
        assert_eq!(order_id("cancel my Order 3"), Some("3"));
        assert_eq!(order_id("return my order"), None);
        assert_eq!(order_id("return the shoes"), None);
    }

    #[test]
    fn after_keyword_preserves_value_casing() {
        assert_eq!(after_keyword("change name to Alice", "to"), Some("Alice"));
        assert_eq!(after_keyword("update address to 9 Elm St", "to"), Some("9 Elm St"));
    }

    #[test]
    fn cart_item_name_captures_between_verb_and_cart() {
        assert_eq!(
            cart_item_name("please add Blue Running Shoes to cart", CartAction::Add),
            Some("blue running shoes".to_string())
        );
        assert_eq!(
            cart_item_name("remove red t-shirt from cart now", CartAction::Remove),
            Some("red t-shirt".to_string())
        );
        assert_eq!(cart_item_name("add to cart", CartAction::Add), None);
        assert_eq!(cart_item_name("put shoes in cart", CartAction::Add), None);
    }

    #[test]
    fn comparison_names_split_on_and() {
        assert_eq!(
            comparison_names("compare blue running shoes and red t-shirt"),
            vec!["blue running shoes".to_string(), "red t-shirt".to_string()]
        );
        assert_eq!(comparison_names("compare shoes").len(), 1);
        assert_eq!(
            comparison_names("compare coffee beans and laptop charger and headphones"),
            vec![
                "coffee beans".to_string(),
                "laptop charger".to_string(),
                "headphones".to_string()
            ]
        );
    }

    #[test]
    fn price_tokens_validate_as_non_negative_decimals() {
        assert_eq!(parse_price_token("$50"), Ok(Decimal::from(50)));
        assert_eq!(parse_price_token("19.99"), Ok(Decimal::new(1999, 2)));
        assert!(parse_price_token("abc").is_err());
        assert!(parse_price_token("$-5").is_err());
        assert!(parse_price_token("$").is_err());
    }
}
