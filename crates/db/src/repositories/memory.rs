use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use scentwise_core::domain::customer::{CustomerId, CustomerPreferenceRecord};
use scentwise_core::domain::product::{ProductId, ScentProduct};
use scentwise_core::errors::ApplicationError;
use scentwise_core::scent::{PreferenceStore, ScentCatalog};

#[derive(Default)]
pub struct InMemoryScentCatalog {
    products: RwLock<HashMap<String, ScentProduct>>,
}

impl InMemoryScentCatalog {
    pub fn from_products(products: impl IntoIterator<Item = ScentProduct>) -> Self {
        let products =
            products.into_iter().map(|product| (product.id.0.clone(), product)).collect();
        Self { products: RwLock::new(products) }
    }

    /// Inserts or replaces by product id.
    pub async fn insert(&self, product: ScentProduct) {
        let mut products = self.products.write().await;
        products.insert(product.id.0.clone(), product);
    }

    pub async fn len(&self) -> usize {
        self.products.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.products.read().await.is_empty()
    }
}

#[async_trait]
impl ScentCatalog for InMemoryScentCatalog {
    async fn find_product(
        &self,
        id: &ProductId,
    ) -> Result<Option<ScentProduct>, ApplicationError> {
        let products = self.products.read().await;
        Ok(products.get(&id.0).cloned())
    }

    async fn list_products(&self) -> Result<Vec<ScentProduct>, ApplicationError> {
        let products = self.products.read().await;
        let mut listed: Vec<ScentProduct> = products.values().cloned().collect();
        listed.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(listed)
    }
}

#[derive(Default)]
pub struct InMemoryPreferenceStore {
    records: RwLock<HashMap<String, CustomerPreferenceRecord>>,
}

impl InMemoryPreferenceStore {
    /// Inserts or replaces by customer id.
    pub async fn insert(&self, record: CustomerPreferenceRecord) {
        let mut records = self.records.write().await;
        records.insert(record.customer_id.0.clone(), record);
    }

    pub async fn customer_ids(&self) -> Vec<CustomerId> {
        let records = self.records.read().await;
        let mut ids: Vec<CustomerId> =
            records.values().map(|record| record.customer_id.clone()).collect();
        ids.sort();
        ids
    }
}

#[async_trait]
impl PreferenceStore for InMemoryPreferenceStore {
    async fn find_preferences(
        &self,
        customer_id: &CustomerId,
    ) -> Result<Option<CustomerPreferenceRecord>, ApplicationError> {
        let records = self.records.read().await;
        Ok(records.get(&customer_id.0).cloned())
    }

    async fn save_preferences(
        &self,
        record: CustomerPreferenceRecord,
    ) -> Result<(), ApplicationError> {
        self.insert(record).await;
        Ok(())
    }
}
