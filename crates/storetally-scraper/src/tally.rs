//! Per-cycle accumulation of store figures keyed by display name.

use std::collections::BTreeMap;

use storetally_core::{ExportRecord, StoreReading};

use crate::error::ScrapeError;
use crate::parse::{parse_order_count, parse_sales};

/// Sales and order-count strings keyed by store name.
///
/// Both maps only ever grow. A later reading for the same name replaces the
/// earlier one, so two stores sharing a display name collapse into one entry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StoreTally {
    sales: BTreeMap<String, String>,
    orders: BTreeMap<String, String>,
}

impl StoreTally {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a tally from already-separated maps.
    #[must_use]
    pub fn from_maps(sales: BTreeMap<String, String>, orders: BTreeMap<String, String>) -> Self {
        Self { sales, orders }
    }

    pub fn merge(&mut self, reading: StoreReading) {
        self.sales.insert(reading.name.clone(), reading.sales);
        self.orders.insert(reading.name, reading.order_count);
    }

    /// Number of distinct store names seen.
    #[must_use]
    pub fn len(&self) -> usize {
        self.sales.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sales.is_empty()
    }

    #[must_use]
    pub fn sales(&self) -> &BTreeMap<String, String> {
        &self.sales
    }

    #[must_use]
    pub fn orders(&self) -> &BTreeMap<String, String> {
        &self.orders
    }

    /// Converts every entry of the sales map into an [`ExportRecord`], in name order.
    ///
    /// # Errors
    ///
    /// - [`ScrapeError::InvalidSales`] / [`ScrapeError::InvalidOrderCount`] if a
    ///   value does not parse.
    /// - [`ScrapeError::MissingOrderCount`] if a name has sales but no order count.
    pub fn to_export_records(&self) -> Result<Vec<ExportRecord>, ScrapeError> {
        self.sales
            .iter()
            .map(|(name, sales)| {
                let orders =
                    self.orders
                        .get(name)
                        .ok_or_else(|| ScrapeError::MissingOrderCount {
                            store: name.clone(),
                        })?;
                Ok(ExportRecord {
                    restaurant_name: name.clone(),
                    sales: parse_sales(name, sales)?,
                    order_count: parse_order_count(name, orders)?,
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reading(name: &str, sales: &str, orders: &str) -> StoreReading {
        StoreReading {
            name: name.to_string(),
            sales: sales.to_string(),
            order_count: orders.to_string(),
        }
    }

    #[test]
    fn merge_overwrites_same_name() {
        let mut tally = StoreTally::new();
        tally.merge(reading("Ebisu", "¥100", "1"));
        tally.merge(reading("Ebisu", "¥250", "2"));

        assert_eq!(tally.len(), 1);
        assert_eq!(tally.sales()["Ebisu"], "¥250");
        assert_eq!(tally.orders()["Ebisu"], "2");
    }

    #[test]
    fn merge_keeps_distinct_names() {
        let mut tally = StoreTally::new();
        tally.merge(reading("Ebisu", "¥100", "1"));
        tally.merge(reading("Meguro", "¥200", "2"));
        assert_eq!(tally.len(), 2);
        assert!(!tally.is_empty());
    }

    #[test]
    fn export_records_from_parallel_maps() {
        let tally = StoreTally::from_maps(
            BTreeMap::from([("A".to_string(), "¥100".to_string())]),
            BTreeMap::from([("A".to_string(), "3".to_string())]),
        );

        let records = tally.to_export_records().unwrap();
        assert_eq!(
            records,
            vec![ExportRecord {
                restaurant_name: "A".to_string(),
                sales: 100,
                order_count: 3,
            }]
        );
    }

    #[test]
    fn export_records_follow_name_order() {
        let mut tally = StoreTally::new();
        tally.merge(reading("Shibuya", "¥1,234", "7"));
        tally.merge(reading("Akasaka", "¥0", "0"));

        let names: Vec<String> = tally
            .to_export_records()
            .unwrap()
            .into_iter()
            .map(|r| r.restaurant_name)
            .collect();
        assert_eq!(names, ["Akasaka", "Shibuya"]);
    }

    #[test]
    fn export_records_require_order_count() {
        let tally = StoreTally::from_maps(
            BTreeMap::from([("A".to_string(), "¥100".to_string())]),
            BTreeMap::new(),
        );
        let err = tally.to_export_records().unwrap_err();
        assert!(
            matches!(err, ScrapeError::MissingOrderCount { ref store } if store == "A"),
            "expected MissingOrderCount, got: {err:?}"
        );
    }

    #[test]
    fn export_records_surface_bad_sales() {
        let mut tally = StoreTally::new();
        tally.merge(reading("A", "¥", "3"));
        assert!(matches!(
            tally.to_export_records(),
            Err(ScrapeError::InvalidSales { .. })
        ));
    }

    #[test]
    fn empty_tally_exports_nothing() {
        assert!(StoreTally::new().to_export_records().unwrap().is_empty());
    }
}
