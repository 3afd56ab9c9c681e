use serde::Serialize;

use crate::model::{Coordinate, Stall, StallId};

/// A product with its pre-formatted `"name: price<unit>"` label
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DisplayProduct {
    pub name: String,
    pub price: i64,
    pub label: String,
}

/// A stall flattened for rendering
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DisplayStall {
    pub id: StallId,
    pub name: String,
    pub coordinate: Coordinate,
    pub description: Option<String>,
    pub products: Vec<DisplayProduct>,
    /// Product labels joined with newlines, in product order
    pub products_text: String,
}

impl DisplayStall {
    pub fn latitude(&self) -> f64 {
        self.coordinate.latitude()
    }

    pub fn longitude(&self) -> f64 {
        self.coordinate.longitude()
    }

    /// `"lat, lng"` with 6 decimals
    pub fn coordinate_label(&self) -> String {
        self.coordinate.label()
    }

    /// Description if present and not blank
    pub fn description_text(&self) -> Option<&str> {
        self.description
            .as_deref()
            .filter(|text| !text.trim().is_empty())
    }
}

pub fn format_product_label(name: &str, price: i64, currency_unit: &str) -> String {
    format!("{}: {}{}", name, price, currency_unit)
}

pub fn to_display_record(stall: &Stall, currency_unit: &str) -> DisplayStall {
    let products: Vec<DisplayProduct> = stall
        .products
        .iter()
        .map(|p| DisplayProduct {
            name: p.name.clone(),
            price: p.price,
            label: format_product_label(&p.name, p.price, currency_unit),
        })
        .collect();

    let products_text = products
        .iter()
        .map(|p| p.label.as_str())
        .collect::<Vec<_>>()
        .join("\n");

    DisplayStall {
        id: stall.id,
        name: stall.name.clone(),
        coordinate: stall.coordinate,
        description: stall.description.clone(),
        products,
        products_text,
    }
}

/// Compose stalls into display records, preserving input order
pub fn to_display_records(stalls: &[Stall], currency_unit: &str) -> Vec<DisplayStall> {
    stalls
        .iter()
        .map(|stall| to_display_record(stall, currency_unit))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Product, ProductId};

    fn stall_with(products: &[(&str, i64)]) -> Stall {
        Stall {
            id: StallId(3),
            name: "Yakisoba Honpo".to_string(),
            coordinate: Coordinate::new(39.7033, 141.1440).unwrap(),
            description: Some("Special sauce".to_string()),
            products: products
                .iter()
                .enumerate()
                .map(|(i, (name, price))| Product {
                    id: ProductId(i as i64 + 1),
                    stall_id: StallId(3),
                    name: name.to_string(),
                    price: *price,
                })
                .collect(),
        }
    }

    #[test]
    fn test_summary_joins_labels_in_product_order() {
        let stall = stall_with(&[("焼きそば", 300), ("焼きうどん", 350), ("ジュース", 150)]);
        let record = to_display_record(&stall, "円");

        assert_eq!(
            record.products_text,
            "焼きそば: 300円\n焼きうどん: 350円\nジュース: 150円"
        );
        assert_eq!(record.products[1].label, "焼きうどん: 350円");
        assert_eq!(record.coordinate_label(), "39.703300, 141.144000");
    }

    #[test]
    fn test_empty_product_list_yields_empty_summary() {
        let record = to_display_record(&stall_with(&[]), "円");
        assert!(record.products.is_empty());
        assert_eq!(record.products_text, "");
    }

    #[test]
    fn test_currency_unit_is_configurable() {
        let record = to_display_record(&stall_with(&[("Lemonade", 250)]), " JPY");
        assert_eq!(record.products_text, "Lemonade: 250 JPY");
    }

    #[test]
    fn test_blank_description_is_hidden() {
        let mut stall = stall_with(&[("Tea", 100)]);
        stall.description = Some("  ".to_string());
        assert_eq!(to_display_record(&stall, "円").description_text(), None);
    }
}
