use rust_decimal::Decimal;

use crate::domain::product::{Product, ProductId};

/// Seed row for the built-in demo catalog.
#[derive(Debug, Clone, Copy)]
struct ProductSeed {
    id: u32,
    name: &'static str,
    price: i64,
    category: &'static str,
    color: Option<&'static str>,
    size: Option<&'static str>,
}

const PRODUCT_SEEDS: &[ProductSeed] = &[
    ProductSeed {
        id: 1,
        name: "Blue Running Shoes",
        price: 80,
        category: "shoes",
        color: Some("blue"),
        size: Some("US 10"),
    },
    ProductSeed {
        id: 2,
        name: "Red T-Shirt",
        price: 20,
        category: "clothing",
        color: Some("red"),
        size: Some("M"),
    },
    ProductSeed {
        id: 3,
        name: "Wireless Headphones",
        price: 150,
        category: "electronics",
        color: Some("black"),
        size: None,
    },
    ProductSeed { id: 4, name: "Coffee Beans", price: 15, category: "grocery", color: None, size: None },
    ProductSeed {
        id: 5,
        name: "Laptop Charger",
        price: 30,
        category: "electronics",
        color: None,
        size: None,
    },
    ProductSeed {
        id: 6,
        name: "Premium Running Shoes",
        price: 120,
        category: "shoes",
        color: Some("blue"),
        size: Some("US 10"),
    },
    ProductSeed {
        id: 7,
        name: "Organic Coffee Beans",
        price: 25,
        category: "grocery",
        color: None,
        size: None,
    },
];

/// Outcome of resolving a free-text name fragment against the catalog.
/// Resolution is substring containment on the lowercased product name, so
/// short fragments legitimately land in [`NameMatch::Many`].
#[derive(Clone, Debug, PartialEq)]
pub enum NameMatch<'a> {
    None,
    One(&'a Product),
    Many(Vec<&'a Product>),
}

/// Read-only product store. Immutable after construction.
#[derive(Clone, Debug, Default)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    pub fn new(products: Vec<Product>) -> Self {
        Self { products }
    }

    /// The seven-product demo storefront.
    pub fn demo() -> Self {
        let products = PRODUCT_SEEDS
            .iter()
            .map(|seed| Product {
                id: ProductId(seed.id),
                name: seed.name.to_string(),
                price: Decimal::from(seed.price),
                category: seed.category.to_string(),
                color: seed.color.map(str::to_string),
                size: seed.size.map(str::to_string),
            })
            .collect();
        Self { products }
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn find(&self, product_id: ProductId) -> Option<&Product> {
        self.products.iter().find(|product| product.id == product_id)
    }

    /// All products whose lowercased name contains `fragment`, in catalog order.
    pub fn matching_name(&self, fragment: &str) -> Vec<&Product> {
        let fragment = fragment.to_lowercase();
        self.products
            .iter()
            .filter(|product| product.name.to_lowercase().contains(&fragment))
            .collect()
    }

    pub fn resolve_name(&self, fragment: &str) -> NameMatch<'_> {
        let mut matches = self.matching_name(fragment);
        match matches.len() {
            0 => NameMatch::None,
            1 => NameMatch::One(matches.remove(0)),
            _ => NameMatch::Many(matches),
        }
    }

    /// First product containing `fragment`, in catalog order.
    pub fn first_name_match(&self, fragment: &str) -> Option<&Product> {
        let fragment = fragment.to_lowercase();
        self.products.iter().find(|product| product.name.to_lowercase().contains(&fragment))
    }
}
