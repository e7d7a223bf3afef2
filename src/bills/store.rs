//! In-memory bill store
//!
//! Bills and their items live for the lifetime of the process. Access is
//! serialised through Tokio's async RwLock so handlers and the background
//! total calculation can share one store.

use std::collections::{BTreeMap, HashMap};
use tokio::sync::RwLock;

use crate::bills::error::{StoreError, StoreResult};
use crate::bills::types::{Bill, Item, NewItem, RecordId};

#[derive(Debug, Default)]
struct Inner {
    bills: BTreeMap<RecordId, Bill>,
    items: HashMap<RecordId, Vec<Item>>,
    next_bill_id: RecordId,
    next_item_id: RecordId,
}

/// Thread-safe bill and item storage
#[derive(Debug, Default)]
pub struct BillStore {
    inner: RwLock<Inner>,
}

/// Summary counts for health reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoreStats {
    pub bills: usize,
    pub items: usize,
}

impl BillStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a bill and return its id (ids start at 1)
    pub async fn create_bill(&self, bill: Bill) -> RecordId {
        let mut inner = self.inner.write().await;
        inner.next_bill_id += 1;
        let id = inner.next_bill_id;
        inner.bills.insert(id, bill);
        id
    }

    pub async fn get_bill(&self, id: RecordId) -> StoreResult<Bill> {
        self.inner
            .read()
            .await
            .bills
            .get(&id)
            .cloned()
            .ok_or(StoreError::BillNotFound)
    }

    /// All bills, optionally only those owned by `user_id`
    pub async fn list_bills(&self, user_id: Option<&str>) -> BTreeMap<RecordId, Bill> {
        let inner = self.inner.read().await;
        inner
            .bills
            .iter()
            .filter(|(_, bill)| user_id.map_or(true, |u| bill.is_owned_by(u)))
            .map(|(id, bill)| (*id, bill.clone()))
            .collect()
    }

    /// Replace an existing bill
    pub async fn update_bill(&self, id: RecordId, bill: Bill) -> StoreResult<()> {
        let mut inner = self.inner.write().await;
        let slot = inner
            .bills
            .get_mut(&id)
            .ok_or(StoreError::BillNotFound)?;
        *slot = bill;
        Ok(())
    }

    pub async fn contains_bill(&self, id: RecordId) -> bool {
        self.inner.read().await.bills.contains_key(&id)
    }

    pub async fn list_items(&self, bill_id: RecordId) -> StoreResult<Vec<Item>> {
        let inner = self.inner.read().await;
        if !inner.bills.contains_key(&bill_id) {
            return Err(StoreError::BillNotFound);
        }
        Ok(inner.items.get(&bill_id).cloned().unwrap_or_default())
    }

    /// Attach an item to a bill and return the item id
    pub async fn add_item(&self, bill_id: RecordId, item: NewItem) -> StoreResult<RecordId> {
        if !item.cost.is_finite() || item.cost < 0.0 {
            return Err(StoreError::InvalidItem(format!(
                "cost must be a non-negative number, got {}",
                item.cost
            )));
        }

        let mut inner = self.inner.write().await;
        if !inner.bills.contains_key(&bill_id) {
            return Err(StoreError::BillNotFound);
        }

        inner.next_item_id += 1;
        let item_id = inner.next_item_id;
        inner
            .items
            .entry(bill_id)
            .or_default()
            .push(Item { item_id, data: item });

        Ok(item_id)
    }

    /// Sum item costs and store the result as the bill's total
    pub async fn calculate_total(&self, bill_id: RecordId) -> StoreResult<f64> {
        let mut inner = self.inner.write().await;
        let total: f64 = inner
            .items
            .get(&bill_id)
            .map(|items| items.iter().map(Item::cost).sum())
            .unwrap_or(0.0);

        let bill = inner
            .bills
            .get_mut(&bill_id)
            .ok_or(StoreError::BillNotFound)?;
        bill.set_total(total);

        tracing::info!(bill_id, total, "Total calculated");
        Ok(total)
    }

    pub async fn stats(&self) -> StoreStats {
        let inner = self.inner.read().await;
        StoreStats {
            bills: inner.bills.len(),
            items: inner.items.values().map(Vec::len).sum(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_create_and_get_bill() {
        let store = BillStore::new();
        let id = store.create_bill(Bill::new("Dinner").owned_by("alice")).await;

        assert_eq!(id, 1);
        let bill = store.get_bill(id).await.unwrap();
        assert_eq!(bill.name(), Some("Dinner"));
        assert_eq!(store.get_bill(99).await, Err(StoreError::BillNotFound));
    }

    #[tokio::test]
    async fn test_list_bills_filters_by_user() {
        let store = BillStore::new();
        store.create_bill(Bill::new("Dinner").owned_by("alice")).await;
        store.create_bill(Bill::new("Rent").owned_by("bob")).await;
        store.create_bill(Bill::new("Groceries").owned_by("alice")).await;

        assert_eq!(store.list_bills(None).await.len(), 3);

        let alice: Vec<_> = store.list_bills(Some("alice")).await.into_keys().collect();
        assert_eq!(alice, vec![1, 3]);
        assert!(store.list_bills(Some("carol")).await.is_empty());
    }

    #[tokio::test]
    async fn test_update_missing_bill() {
        let store = BillStore::new();
        let result = store.update_bill(7, Bill::new("Ghost")).await;
        assert_eq!(result, Err(StoreError::BillNotFound));
    }

    #[tokio::test]
    async fn test_item_ids_do_not_follow_bill_count() {
        let store = BillStore::new();
        let first = store.create_bill(Bill::new("A")).await;
        let second = store.create_bill(Bill::new("B")).await;

        let i1 = store.add_item(first, NewItem::new("x", 1.0)).await.unwrap();
        let i2 = store.add_item(first, NewItem::new("y", 2.0)).await.unwrap();
        let i3 = store.add_item(second, NewItem::new("z", 3.0)).await.unwrap();

        assert_eq!((i1, i2, i3), (1, 2, 3));
        assert_eq!(store.list_items(first).await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_items_for_unknown_bill() {
        let store = BillStore::new();
        assert_eq!(
            store.list_items(5).await,
            Err(StoreError::BillNotFound)
        );
        assert_eq!(
            store.add_item(5, NewItem::new("x", 1.0)).await,
            Err(StoreError::BillNotFound)
        );
    }

    #[tokio::test]
    async fn test_rejects_negative_cost() {
        let store = BillStore::new();
        let id = store.create_bill(Bill::new("A")).await;
        let result = store.add_item(id, NewItem::new("refund", -2.0)).await;
        assert!(matches!(result, Err(StoreError::InvalidItem(_))));
    }

    #[tokio::test]
    async fn test_calculate_total() {
        let store = BillStore::new();
        let id = store.create_bill(Bill::new("Dinner")).await;
        assert_eq!(store.list_items(id).await.unwrap(), vec![]);

        store.add_item(id, NewItem::new("Pizza", 18.5).quantity(2)).await.unwrap();
        store.add_item(id, NewItem::new("Soda", 3.25)).await.unwrap();

        let total = store.calculate_total(id).await.unwrap();
        assert!((total - 21.75).abs() < f64::EPSILON);
        assert_eq!(store.get_bill(id).await.unwrap().total(), Some(total));

        let stats = store.stats().await;
        assert_eq!(stats, StoreStats { bills: 1, items: 2 });
    }

    #[tokio::test]
    async fn test_calculate_total_without_items_is_zero() {
        let store = BillStore::new();
        let id = store.create_bill(Bill::new("Empty")).await;
        assert_eq!(store.calculate_total(id).await.unwrap(), 0.0);
    }
}
