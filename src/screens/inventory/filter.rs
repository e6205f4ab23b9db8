use std::collections::BTreeSet;

use crate::model::{Product, StockLevel};
use crate::screens::inventory::state::{InventoryCriteria, StockFilter};

/// Derived view: AND of search, category and stock band, order-preserving.
pub fn filter_products(items: &[Product], criteria: &InventoryCriteria) -> Vec<Product> {
    let needle = criteria.search.trim().to_lowercase();
    items
        .iter()
        .filter(|p| {
            needle.is_empty()
                || p.name.to_lowercase().contains(&needle)
                || p.code.to_lowercase().contains(&needle)
        })
        .filter(|p| match &criteria.category {
            Some(category) => &p.category == category,
            None => true,
        })
        .filter(|p| {
            let level = p.stock_level(criteria.low_stock_threshold);
            match criteria.stock {
                StockFilter::All => true,
                StockFilter::InStock => level == StockLevel::Healthy,
                StockFilter::LowStock => level == StockLevel::Low,
                StockFilter::OutOfStock => level == StockLevel::Out,
            }
        })
        .cloned()
        .collect()
}

/// Distinct category names of the loaded products, sorted.
pub fn distinct_categories(items: &[Product]) -> Vec<String> {
    items
        .iter()
        .map(|p| p.category.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(code: &str, name: &str, category: &str, stock: u32) -> Product {
        Product {
            id: 0,
            code: code.into(),
            name: name.into(),
            category: category.into(),
            category_id: None,
            description: String::new(),
            price: 0.0,
            stock,
            active: true,
        }
    }

    fn catalogue() -> Vec<Product> {
        vec![
            product("HCOR-001", "Broca HSS 5mm", "Herramientas", 150),
            product("MATE-001", "Lámina Acero", "Materiales", 8),
            product("EQUI-001", "Soldadora MIG", "Equipos", 0),
            product("HCOR-003", "Sierra Circular", "Herramientas", 10),
        ]
    }

    fn codes(items: &[Product]) -> Vec<&str> {
        items.iter().map(|p| p.code.as_str()).collect()
    }

    #[test]
    fn empty_criteria_keeps_everything_in_order() {
        let items = catalogue();
        let view = filter_products(&items, &InventoryCriteria::default());
        assert_eq!(view, items);
    }

    #[test]
    fn search_matches_name_or_code_case_insensitively() {
        let items = catalogue();
        let criteria = InventoryCriteria {
            search: "hcor".into(),
            ..Default::default()
        };
        assert_eq!(codes(&filter_products(&items, &criteria)), vec!["HCOR-001", "HCOR-003"]);

        let criteria = InventoryCriteria {
            search: "ACERO".into(),
            ..Default::default()
        };
        assert_eq!(codes(&filter_products(&items, &criteria)), vec!["MATE-001"]);
    }

    #[test]
    fn stock_bands_use_threshold() {
        let items = catalogue();
        let mut criteria = InventoryCriteria {
            stock: StockFilter::LowStock,
            ..Default::default()
        };
        assert_eq!(codes(&filter_products(&items, &criteria)), vec!["MATE-001", "HCOR-003"]);

        criteria.stock = StockFilter::InStock;
        assert_eq!(codes(&filter_products(&items, &criteria)), vec!["HCOR-001"]);

        criteria.stock = StockFilter::OutOfStock;
        assert_eq!(codes(&filter_products(&items, &criteria)), vec!["EQUI-001"]);

        criteria.stock = StockFilter::LowStock;
        criteria.low_stock_threshold = 5;
        assert!(filter_products(&items, &criteria).is_empty());
    }

    #[test]
    fn predicates_combine_with_and() {
        let items = catalogue();
        let criteria = InventoryCriteria {
            search: "s".into(),
            category: Some("Herramientas".into()),
            stock: StockFilter::LowStock,
            ..Default::default()
        };
        assert_eq!(codes(&filter_products(&items, &criteria)), vec!["HCOR-003"]);
    }

    #[test]
    fn filtering_is_deterministic_and_idempotent() {
        let items = catalogue();
        let criteria = InventoryCriteria {
            search: "o".into(),
            ..Default::default()
        };
        let once = filter_products(&items, &criteria);
        assert_eq!(once, filter_products(&items, &criteria));
        assert_eq!(once, filter_products(&once, &criteria));
    }

    #[test]
    fn categories_are_distinct_and_sorted() {
        assert_eq!(
            distinct_categories(&catalogue()),
            vec!["Equipos", "Herramientas", "Materiales"]
        );
    }
}
