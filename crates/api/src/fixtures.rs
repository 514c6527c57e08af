//! Built-in catalog data.
//!
//! The same six categories serve two purposes: they are seeded into an empty
//! store on first access, and (without icons) they are the static listing
//! served in demo mode. The demo products are only ever served in demo mode
//! or inserted by `partshop-cli seed products`.

use rust_decimal::Decimal;

use partshop_core::ProductId;

use crate::models::{Category, NewCategory, NewProduct, Product};

/// Default categories: (name, slug, description, icon).
const DEFAULT_CATEGORIES: [(&str, &str, &str, &str); 6] = [
    ("Engine", "engine", "Performance engine parts", "Cog"),
    ("Braking", "braking", "Pads, rotors, kits", "Disc3"),
    ("Suspension", "suspension", "Coilovers, arms, bushings", "Wrench"),
    ("Electronics", "electronics", "Sensors, ECUs, harnesses", "Cpu"),
    ("LED Lighting", "lighting", "Headlights, strips, kits", "Lightbulb"),
    ("Bodywork", "bodywork", "Aero, trims, panels", "Zap"),
];

/// Demo products: (id, title, description, price in cents, category).
const DEMO_PRODUCTS: [(i64, &str, &str, i64, &str); 2] = [
    (
        1,
        "Carbon Intake Kit",
        "High-flow carbon fiber intake",
        29_999,
        "engine",
    ),
    (
        2,
        "Drilled Brake Rotors",
        "Performance rotor pair",
        18_950,
        "braking",
    ),
];

/// Categories inserted into an empty store.
#[must_use]
pub fn seed_categories() -> Vec<NewCategory> {
    DEFAULT_CATEGORIES
        .iter()
        .map(|&(name, slug, description, icon)| NewCategory {
            name: name.to_owned(),
            slug: slug.to_owned(),
            description: Some(description.to_owned()),
            icon: Some(icon.to_owned()),
        })
        .collect()
}

/// Static category listing served when no store is configured.
#[must_use]
pub fn demo_categories() -> Vec<Category> {
    DEFAULT_CATEGORIES
        .iter()
        .map(|&(name, slug, description, _)| Category {
            name: name.to_owned(),
            slug: slug.to_owned(),
            description: Some(description.to_owned()),
            icon: None,
        })
        .collect()
}

/// Products served when no store is configured.
#[must_use]
pub fn demo_products() -> Vec<Product> {
    DEMO_PRODUCTS
        .iter()
        .map(|&(id, title, description, cents, category)| Product {
            id: ProductId::new(id),
            title: title.to_owned(),
            description: Some(description.to_owned()),
            price: Decimal::new(cents, 2),
            category: category.to_owned(),
            in_stock: true,
            image_url: None,
        })
        .collect()
}

/// Demo products in insertable form, for seeding a real store.
#[must_use]
pub fn seed_products() -> Vec<NewProduct> {
    demo_products()
        .into_iter()
        .map(|p| NewProduct {
            title: p.title,
            description: p.description,
            price: p.price,
            category: p.category,
            in_stock: p.in_stock,
            image_url: p.image_url,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_and_demo_categories_share_slugs() {
        let seed: Vec<String> = seed_categories().into_iter().map(|c| c.slug).collect();
        let demo: Vec<String> = demo_categories().into_iter().map(|c| c.slug).collect();
        assert_eq!(seed, demo);
        assert_eq!(seed.len(), 6);
    }

    #[test]
    fn test_demo_categories_have_no_icons() {
        assert!(demo_categories().iter().all(|c| c.icon.is_none()));
        assert!(seed_categories().iter().all(|c| c.icon.is_some()));
    }

    #[test]
    fn test_demo_product_prices() {
        let prices: Vec<String> = demo_products()
            .iter()
            .map(|p| p.price.normalize().to_string())
            .collect();
        assert_eq!(prices, ["299.99", "189.5"]);
    }
}
