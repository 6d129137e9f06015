use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use procura_core::{ItemId, SupplierId};

/// A supplier's offered stock line.
///
/// `quantity` is the remaining available stock. Nothing stops it going negative:
/// orders larger than the stock are still accepted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Item {
    #[serde(rename = "item_id")]
    pub id: ItemId,
    #[serde(rename = "item")]
    pub name: String,
    pub quantity: i64,
    #[serde(rename = "price_unit")]
    pub unit_price: f64,
}

impl Item {
    pub fn new(id: impl Into<ItemId>, name: impl Into<String>, quantity: i64, unit_price: f64) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            quantity,
            unit_price,
        }
    }
}

/// Supplier ID → items offered by that supplier, in insertion order.
///
/// Entries are appended, never upserted, so one supplier may list the same
/// `item_id` several times. Lookups by item code act on every match.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InventoryTable {
    suppliers: HashMap<SupplierId, Vec<Item>>,
}

impl InventoryTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn items_for(&self, supplier_id: &SupplierId) -> Option<&[Item]> {
        self.suppliers.get(supplier_id).map(Vec::as_slice)
    }

    /// Append an item to a supplier's list, creating the list if needed.
    pub fn append(&mut self, supplier_id: SupplierId, item: Item) {
        self.suppliers.entry(supplier_id).or_default().push(item);
    }

    /// Subtract `quantity` from every item of `supplier_id` whose code is `item_id`.
    ///
    /// Returns how many items were touched (zero when the supplier is unknown).
    /// Stock wraps on overflow instead of saturating.
    pub fn decrement_matching(
        &mut self,
        supplier_id: &SupplierId,
        item_id: &ItemId,
        quantity: i64,
    ) -> usize {
        self.for_each_match(supplier_id, item_id, |item| {
            item.quantity = item.quantity.wrapping_sub(quantity);
        })
    }

    /// Overwrite quantity and unit price of every item of `supplier_id` matching
    /// `update.id`. Name is left untouched.
    pub fn update_matching(&mut self, supplier_id: &SupplierId, update: &Item) -> usize {
        self.for_each_match(supplier_id, &update.id, |item| {
            item.quantity = update.quantity;
            item.unit_price = update.unit_price;
        })
    }

    pub fn supplier_count(&self) -> usize {
        self.suppliers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.suppliers.is_empty()
    }

    fn for_each_match(
        &mut self,
        supplier_id: &SupplierId,
        item_id: &ItemId,
        mut f: impl FnMut(&mut Item),
    ) -> usize {
        let Some(items) = self.suppliers.get_mut(supplier_id) else {
            return 0;
        };

        let mut touched = 0;
        for item in items.iter_mut().filter(|i| &i.id == item_id) {
            f(item);
            touched += 1;
        }
        touched
    }
}

/// Stock lines appended by the administrative seeding operation.
///
/// Same item and price under three suppliers, differing quantities.
pub fn seed_catalog() -> Vec<(SupplierId, Item)> {
    [("8888", 5000), ("9999", 6000), ("7777", 7000)]
        .into_iter()
        .map(|(supplier, quantity)| {
            (
                SupplierId::new(supplier),
                Item::new("CFBEAN", "Coffee Beans", quantity, 150.0),
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn coffee(quantity: i64) -> Item {
        Item::new("CFBEAN", "Coffee Beans", quantity, 150.0)
    }

    #[test]
    fn item_uses_wire_field_names() {
        let json = serde_json::to_value(coffee(10)).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "item_id": "CFBEAN",
                "item": "Coffee Beans",
                "quantity": 10,
                "price_unit": 150.0
            })
        );
    }

    #[test]
    fn item_decodes_with_missing_fields_as_zero_values() {
        let item: Item = serde_json::from_str(r#"{"item_id":"CFBEAN","quantity":3}"#).unwrap();
        assert_eq!(item.id, ItemId::new("CFBEAN"));
        assert_eq!(item.quantity, 3);
        assert_eq!(item.name, "");
        assert_eq!(item.unit_price, 0.0);
    }

    #[test]
    fn table_serializes_as_supplier_keyed_map() {
        let mut table = InventoryTable::new();
        table.append(SupplierId::new("8888"), coffee(1));
        let json = serde_json::to_value(&table).unwrap();
        assert_eq!(json["8888"][0]["item_id"], "CFBEAN");
    }

    #[test]
    fn decrement_touches_every_duplicate_match() {
        let supplier = SupplierId::new("8888");
        let mut table = InventoryTable::new();
        table.append(supplier.clone(), coffee(100));
        table.append(supplier.clone(), Item::new("TEA", "Tea", 50, 10.0));
        table.append(supplier.clone(), coffee(40));

        let touched = table.decrement_matching(&supplier, &ItemId::new("CFBEAN"), 30);

        assert_eq!(touched, 2);
        let items = table.items_for(&supplier).unwrap();
        assert_eq!(items[0].quantity, 70);
        assert_eq!(items[1].quantity, 50);
        assert_eq!(items[2].quantity, 10);
    }

    #[test]
    fn decrement_on_unknown_supplier_is_a_no_op() {
        let mut table = InventoryTable::new();
        let touched =
            table.decrement_matching(&SupplierId::new("nope"), &ItemId::new("CFBEAN"), 1);
        assert_eq!(touched, 0);
        assert!(table.is_empty());
    }

    #[test]
    fn decrement_wraps_at_the_integer_limits() {
        let supplier = SupplierId::new("8888");
        let mut table = InventoryTable::new();
        table.append(supplier.clone(), coffee(5000));
        table.append(supplier.clone(), coffee(i64::MIN));

        table.decrement_matching(&supplier, &ItemId::new("CFBEAN"), -i64::MAX);
        let items = table.items_for(&supplier).unwrap();
        assert_eq!(items[0].quantity, 5000i64.wrapping_add(i64::MAX));
        assert_eq!(items[1].quantity, -1);

        table.decrement_matching(&supplier, &ItemId::new("CFBEAN"), i64::MAX);
        let items = table.items_for(&supplier).unwrap();
        assert_eq!(items[0].quantity, 5000);
        assert_eq!(items[1].quantity, i64::MIN);
    }

    #[test]
    fn update_overwrites_quantity_and_price_but_not_name() {
        let supplier = SupplierId::new("9999");
        let mut table = InventoryTable::new();
        table.append(supplier.clone(), coffee(6000));

        let update = Item::new("CFBEAN", "ignored", 12, 99.5);
        assert_eq!(table.update_matching(&supplier, &update), 1);

        let item = &table.items_for(&supplier).unwrap()[0];
        assert_eq!(item.quantity, 12);
        assert_eq!(item.unit_price, 99.5);
        assert_eq!(item.name, "Coffee Beans");
    }

    #[test]
    fn seed_catalog_lists_three_suppliers() {
        let catalog = seed_catalog();
        let quantities: Vec<_> = catalog
            .iter()
            .map(|(s, i)| (s.as_str().to_string(), i.quantity))
            .collect();
        assert_eq!(
            quantities,
            vec![
                ("8888".to_string(), 5000),
                ("9999".to_string(), 6000),
                ("7777".to_string(), 7000)
            ]
        );
    }

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 256,
            ..ProptestConfig::default()
        })]

        /// Property: stock after an order is stock minus ordered quantity, wrapping at
        /// the integer limits and going negative when the order exceeds the stock.
        #[test]
        fn decrement_is_exact_subtraction(stock in any::<i64>(), ordered in any::<i64>()) {
            let supplier = SupplierId::new("7777");
            let mut table = InventoryTable::new();
            table.append(supplier.clone(), coffee(stock));

            table.decrement_matching(&supplier, &ItemId::new("CFBEAN"), ordered);

            prop_assert_eq!(
                table.items_for(&supplier).unwrap()[0].quantity,
                stock.wrapping_sub(ordered)
            );
        }
    }
}
