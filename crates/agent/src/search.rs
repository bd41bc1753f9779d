//! Product search, recommendation, and comparison.
//!
//! Search is a token pipeline: optional `under <price>` ceiling, optional
//! `in <color>` filter, then free keywords OR-matched against name, category,
//! and color. Purchase history prioritizes familiar categories without ever
//! emptying the result set, and the final picks are sampled through the
//! injected RNG so callers control reproducibility.

use std::collections::HashSet;
use std::fmt::Write;

use rand::seq::SliceRandom;
use rand::Rng;
use shopmate_core::{AgentError, Catalog, Product, Session, StoreConfig};

use crate::extract;

/// Query noise that never counts as a product keyword.
const STOPWORDS: &[&str] = &["show", "me", "search", "recommend", "for", "please"];

pub fn product_search<R: Rng>(
    query: &str,
    session: &Session,
    catalog: &Catalog,
    store: &StoreConfig,
    rng: &mut R,
) -> Result<String, AgentError> {
    let lowered = query.to_lowercase();
    let tokens: Vec<&str> = lowered.split_whitespace().collect();

    let mut filtered: Vec<&Product> = catalog.products().iter().collect();
    let mut reserved: HashSet<&str> = HashSet::new();

    if let Some(under_index) = tokens.iter().position(|token| *token == "under") {
        let Some(price_token) = tokens.get(under_index + 1).copied() else {
            return Err(AgentError::missing("Missing price after 'under'."));
        };
        let ceiling = extract::parse_price_token(price_token)?;
        filtered.retain(|product| product.price < ceiling);
        reserved.insert("under");
        reserved.insert(price_token);
    }

    if let Some(in_index) = tokens.iter().position(|token| *token == "in") {
        let Some(color) = tokens.get(in_index + 1).copied() else {
            return Err(AgentError::missing("Missing color after 'in'."));
        };
        filtered.retain(|product| product.color.as_deref() == Some(color));
        reserved.insert("in");
        reserved.insert(color);
    }

    let keywords: Vec<&str> = tokens
        .iter()
        .copied()
        .filter(|token| {
            !reserved.contains(token) && !STOPWORDS.contains(token) && !token.starts_with('$')
        })
        .collect();
    if !keywords.is_empty() {
        filtered.retain(|product| {
            keywords.iter().any(|keyword| product_matches_keyword(product, keyword))
        });
    }

    if filtered.is_empty() {
        return Ok("No products found. Try different search.".to_string());
    }

    // Prioritize categories the customer has bought before, unless the
    // restriction would empty the result set.
    let past_categories: HashSet<&str> = session
        .orders
        .iter()
        .flat_map(|order| order.items.iter())
        .filter_map(|id| catalog.find(*id))
        .map(|product| product.category.as_str())
        .collect();
    if !past_categories.is_empty() {
        let personalized: Vec<&Product> = filtered
            .iter()
            .copied()
            .filter(|product| past_categories.contains(product.category.as_str()))
            .collect();
        if !personalized.is_empty() {
            filtered = personalized;
        }
    }

    let sample_size = store.max_recommendations.min(filtered.len());
    let recommendations: Vec<&Product> =
        filtered.choose_multiple(rng, sample_size).copied().collect();

    let mut response = String::from("Search results/recommendations:");
    for product in &recommendations {
        let _ = write!(response, "\n{} - ${}", product.name, product.price);
    }

    // Cross-sell: shoe picks pair with a random electronics accessory.
    if recommendations.iter().any(|product| product.category == "shoes") {
        let electronics: Vec<&Product> =
            catalog.products().iter().filter(|product| product.category == "electronics").collect();
        if let Some(accessory) = electronics.choose(rng).copied() {
            let _ = write!(response, "\nSuggested accessory: {} - ${}", accessory.name, accessory.price);
        }
    }

    // Upsell: the first pick with a strictly pricier same-category
    // alternative wins; one random alternative is suggested and the scan
    // stops there.
    for product in &recommendations {
        let alternatives: Vec<&Product> = catalog
            .products()
            .iter()
            .filter(|candidate| {
                candidate.category == product.category && candidate.price > product.price
            })
            .collect();
        if let Some(upsell) = alternatives.choose(rng).copied() {
            let _ = write!(
                response,
                "\nUpsell suggestion: {} - ${} (higher quality alternative)",
                upsell.name, upsell.price
            );
            break;
        }
    }

    Ok(response)
}

fn product_matches_keyword(product: &Product, keyword: &str) -> bool {
    product.name.to_lowercase().contains(keyword)
        || product.category.to_lowercase().contains(keyword)
        || product
            .color
            .as_deref()
            .map_or(false, |color| color.to_lowercase().contains(keyword))
}

/// Side-by-side attribute table for two or more products, columns in input
/// order. Missing attributes render as `N/A`.
pub fn compare(query: &str, catalog: &Catalog) -> Result<String, AgentError> {
    let names = extract::comparison_names(query);
    if names.len() < 2 {
        return Err(AgentError::missing(
            "Please specify at least two products to compare, e.g., 'compare shoes and t-shirt'.",
        ));
    }

    let products: Vec<&Product> =
        names.iter().filter_map(|name| catalog.first_name_match(name)).collect();
    if products.len() < 2 {
        return Err(AgentError::not_found("Not enough products found for comparison."));
    }

    let mut rows: Vec<Vec<String>> = Vec::with_capacity(5);
    let mut header = vec!["Attribute".to_string()];
    header.extend(products.iter().map(|product| product.name.clone()));
    rows.push(header);

    rows.push(attribute_row("Price", &products, |product| format!("${}", product.price)));
    rows.push(attribute_row("Category", &products, |product| product.category.clone()));
    rows.push(attribute_row("Color", &products, |product| {
        product.color.clone().unwrap_or_else(|| "N/A".to_string())
    }));
    rows.push(attribute_row("Size", &products, |product| {
        product.size.clone().unwrap_or_else(|| "N/A".to_string())
    }));

    let table =
        rows.iter().map(|row| row.join(" | ")).collect::<Vec<_>>().join("\n");
    Ok(format!("Comparison:\n{table}"))
}

fn attribute_row(
    label: &str,
    products: &[&Product],
    render: impl Fn(&Product) -> String,
) -> Vec<String> {
    let mut row = vec![label.to_string()];
    row.extend(products.iter().map(|product| render(product)));
    row
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use rust_decimal::Decimal;
    use shopmate_core::{
        AppConfig, Catalog, Order, OrderId, OrderStatus, Product, ProductId, Session, StoreConfig,
    };

    use super::{compare, product_search};

    fn store() -> StoreConfig {
        AppConfig::default().store
    }

    fn rng() -> StdRng {
        StdRng::seed_from_u64(11)
    }

    fn product(id: u32, name: &str, price: i64, category: &str) -> Product {
        Product {
            id: ProductId(id),
            name: name.to_string(),
            price: Decimal::from(price),
            category: category.to_string(),
            color: None,
            size: None,
        }
    }

    #[test]
    fn price_ceiling_keeps_only_cheaper_products() {
        let catalog = Catalog::new(vec![
            product(1, "Canvas Tote", 20, "accessories"),
            product(2, "Leather Tote", 80, "accessories"),
        ]);
        let session = Session::new();

        let reply = product_search("search tote under $50", &session, &catalog, &store(), &mut rng())
            .expect("search succeeds");
        assert!(reply.contains("Canvas Tote - $20"));
        assert!(!reply.contains("Leather Tote"));
    }

    #[test]
    fn malformed_ceiling_is_a_format_error() {
        let catalog = Catalog::demo();
        let session = Session::new();

        let error = product_search("search shoes under abc", &session, &catalog, &store(), &mut rng())
            .expect_err("malformed ceiling");
        assert_eq!(
            error.user_message(),
            "Invalid price format. Please use a number like $100."
        );

        let error = product_search("search shoes under", &session, &catalog, &store(), &mut rng())
            .expect_err("missing operand");
        assert_eq!(error.user_message(), "Missing price after 'under'.");
    }

    #[test]
    fn color_filter_requires_exact_color() {
        let catalog = Catalog::demo();
        let session = Session::new();

        let reply = product_search("search shoes in blue", &session, &catalog, &store(), &mut rng())
            .expect("search succeeds");
        assert!(reply.contains("Running Shoes"));

        let reply = product_search("search shoes in green", &session, &catalog, &store(), &mut rng())
            .expect("search succeeds");
        assert_eq!(reply, "No products found. Try different search.");
    }

    #[test]
    fn keywords_match_name_category_and_color() {
        let catalog = Catalog::demo();
        let session = Session::new();

        let reply = product_search("search grocery", &session, &catalog, &store(), &mut rng())
            .expect("category keyword");
        assert!(reply.contains("Coffee Beans"));
        assert!(!reply.contains("Headphones"));

        let reply = product_search("search nonexistent-gadget", &session, &catalog, &store(), &mut rng())
            .expect("no matches");
        assert_eq!(reply, "No products found. Try different search.");
    }

    #[test]
    fn history_restricts_to_familiar_categories_when_possible() {
        let catalog = Catalog::demo();
        let mut session = Session::new();
        session.orders.push(Order {
            id: OrderId("1".to_string()),
            items: vec![ProductId(4)], // grocery
            placed_at: Utc::now(),
            status: OrderStatus::Processing,
            tracking: "TRACK-1111".to_string(),
        });

        // Keywords match both shoes and coffee; history narrows to grocery.
        let reply = product_search("search shoes beans", &session, &catalog, &store(), &mut rng())
            .expect("personalized search");
        assert!(reply.contains("Coffee Beans"));
        assert!(!reply.contains("Running Shoes"));

        // When no familiar category survives the filters, fall back to the
        // unrestricted set instead of returning nothing.
        let reply = product_search("search headphones", &session, &catalog, &store(), &mut rng())
            .expect("fallback search");
        assert!(reply.contains("Wireless Headphones"));
    }

    #[test]
    fn shoe_results_cross_sell_and_upsell() {
        let catalog = Catalog::demo();
        let session = Session::new();

        // Under $100 narrows the blue shoes to the $80 pair, which has the
        // $120 pair as its pricier alternative.
        let reply =
            product_search("search blue running shoes under $100", &session, &catalog, &store(), &mut rng())
                .expect("search succeeds");
        assert!(reply.contains("Blue Running Shoes - $80"));
        assert!(reply.contains("Suggested accessory: "));
        assert!(reply.contains("Upsell suggestion: Premium Running Shoes - $120"));
    }

    #[test]
    fn sampling_is_deterministic_under_a_seeded_rng() {
        let catalog = Catalog::demo();
        let session = Session::new();

        let first = product_search("search coffee", &session, &catalog, &store(), &mut rng())
            .expect("search succeeds");
        let second = product_search("search coffee", &session, &catalog, &store(), &mut rng())
            .expect("search succeeds");
        assert_eq!(first, second);
    }

    #[test]
    fn comparison_renders_one_column_per_product_in_input_order() {
        let catalog = Catalog::demo();
        let reply = compare("compare blue running shoes and red t-shirt", &catalog)
            .expect("comparison succeeds");
        let lines: Vec<&str> = reply.lines().collect();

        assert_eq!(lines[0], "Comparison:");
        assert_eq!(lines[1], "Attribute | Blue Running Shoes | Red T-Shirt");
        assert_eq!(lines[2], "Price | $80 | $20");
        assert_eq!(lines[3], "Category | shoes | clothing");
        assert_eq!(lines[4], "Color | blue | red");
        assert_eq!(lines[5], "Size | US 10 | M");
        assert_eq!(lines.len(), 6);
    }

    #[test]
    fn comparison_fills_missing_attributes_with_na() {
        let catalog = Catalog::demo();
        let reply = compare("compare wireless headphones and coffee beans", &catalog)
            .expect("comparison succeeds");
        assert!(reply.contains("Color | black | N/A"));
        assert!(reply.contains("Size | N/A | N/A"));
    }

    #[test]
    fn comparison_requires_two_resolvable_products() {
        let catalog = Catalog::demo();

        let error = compare("compare shoes", &catalog).expect_err("one name");
        assert!(error.user_message().starts_with("Please specify at least two products"));

        let error = compare("compare hoverboard and jetpack", &catalog)
            .expect_err("nothing resolves");
        assert_eq!(error.user_message(), "Not enough products found for comparison.");
    }
}
