//! Static policy texts and size-conversion tables. Both are opaque lookup
//! data as far as the handlers are concerned.

/// Policy texts keyed the way customers ask about them. Table order doubles
/// as lookup precedence when a query mentions more than one key.
const POLICY_TEXTS: &[(&str, &str)] = &[
    ("shipping", "Standard shipping: 5-7 business days. Free over $50."),
    ("returns", "Returns allowed within 30 days of purchase. No returns on sale items."),
    ("warranty", "1-year warranty on electronics. Claims require proof of purchase."),
    ("cancellations", "Orders can be canceled within 24 hours of placement."),
    (
        "faq",
        "Q: How do I track my order? A: Use order ID. Q: Payment options? A: Credit card, BNPL (simulated).",
    ),
];

#[derive(Clone, Copy, Debug, Default)]
pub struct StorePolicies;

impl StorePolicies {
    /// First policy whose key appears in the query, in table order.
    pub fn lookup(&self, query: &str) -> Option<&'static str> {
        let query = query.to_lowercase();
        POLICY_TEXTS.iter().find(|(key, _)| query.contains(key)).map(|(_, text)| *text)
    }

    /// Every policy as a `Key: text` line.
    pub fn render_all(&self) -> String {
        POLICY_TEXTS
            .iter()
            .map(|(key, text)| format!("{}: {text}", capitalize(key)))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

const SIZE_CONVERSIONS: &[(&str, &str, &str)] =
    &[("shoes", "US 10", "EU 43, UK 9"), ("clothing", "M", "EU 40, UK 12")];

#[derive(Clone, Copy, Debug, Default)]
pub struct SizeChart;

impl SizeChart {
    pub fn conversion(&self, category: &str, size: &str) -> Option<&'static str> {
        SIZE_CONVERSIONS
            .iter()
            .find(|(chart_category, chart_size, _)| *chart_category == category && *chart_size == size)
            .map(|(_, _, conversion)| *conversion)
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}
