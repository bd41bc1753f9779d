use shopmate_core::Catalog;

use super::CommandResult;

pub fn run(json: bool) -> CommandResult {
    let catalog = Catalog::demo();

    if json {
        return match serde_json::to_string_pretty(catalog.products()) {
            Ok(output) => CommandResult { exit_code: 0, output },
            Err(error) => CommandResult {
                exit_code: 1,
                output: format!("catalog serialization failed: {error}"),
            },
        };
    }

    let mut lines = vec![format!("{} products in catalog:", catalog.products().len())];
    for product in catalog.products() {
        let color = product.color.as_deref().unwrap_or("-");
        let size = product.size.as_deref().unwrap_or("-");
        lines.push(format!(
            "- [{}] {} | ${} | {} | color: {color} | size: {size}",
            product.id.0, product.name, product.price, product.category
        ));
    }

    CommandResult { exit_code: 0, output: lines.join("\n") }
}

#[cfg(test)]
mod tests {
    use super::run;

    #[test]
    fn lists_every_demo_product_with_attributes() {
        let result = run(false);
        assert_eq!(result.exit_code, 0);
        assert!(result.output.starts_with("7 products in catalog:"));
        assert!(result
            .output
            .contains("- [1] Blue Running Shoes | $80 | shoes | color: blue | size: US 10"));
        assert!(result.output.contains("- [4] Coffee Beans | $15 | grocery | color: - | size: -"));
    }

    #[test]
    fn json_output_round_trips_the_catalog() {
        let result = run(true);
        assert_eq!(result.exit_code, 0);

        let products: serde_json::Value =
            serde_json::from_str(&result.output).expect("output parses as JSON");
        let items = products.as_array().expect("catalog serializes as an array");
        assert_eq!(items.len(), 7);
        assert_eq!(items[0]["name"], "Blue Running Shoes");
        assert_eq!(items[0]["category"], "shoes");
    }
}
