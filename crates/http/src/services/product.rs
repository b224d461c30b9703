//! Catalogue: products, categories and product reviews

use super::resource::Resource;
use crate::client::{ApiClient, ClientError};
use crate::types::{Page, ProductQuery};
use reqwest::Method;
use serde_json::Value;
use tinyyummy_core::StorageKey;
use tracing::warn;

#[derive(Clone, Debug)]
pub struct ProductService {
    resource: Resource,
}

impl ProductService {
    pub fn new(client: ApiClient) -> Self {
        Self {
            resource: Resource::new(client, "/products"),
        }
    }

    pub async fn list(&self, page: Page, query: &ProductQuery) -> Result<Value, ClientError> {
        self.resource.list_with(page, query).await
    }

    pub async fn get(&self, product_id: &str) -> Result<Value, ClientError> {
        self.resource.get(product_id).await
    }

    pub async fn create(&self, product: &Value) -> Result<Value, ClientError> {
        self.resource.create(product).await
    }

    pub async fn update(&self, product_id: &str, product: &Value) -> Result<Value, ClientError> {
        self.resource.update(product_id, product).await
    }

    pub async fn delete(&self, product_id: &str) -> Result<Value, ClientError> {
        self.resource.delete(product_id).await
    }

    pub async fn reviews(&self, product_id: &str, page: Page) -> Result<Value, ClientError> {
        let client = self.resource.client();
        let request = client
            .request(
                Method::GET,
                &format!("{}/reviews", self.resource.item_path(product_id)),
            )
            .query(&page);
        client.execute(request).await
    }

    /// Post a review and remember for this session that the user has reviewed
    pub async fn add_review(&self, product_id: &str, review: &Value) -> Result<Value, ClientError> {
        let client = self.resource.client();
        let request = client
            .request(
                Method::POST,
                &format!("{}/reviews", self.resource.item_path(product_id)),
            )
            .json(review);
        let response = client.execute(request).await?;

        if let Err(e) = client.store().write(StorageKey::HasReviewed, "true", false) {
            warn!("Failed to record review flag: {e}");
        }
        Ok(response)
    }
}

#[derive(Clone, Debug)]
pub struct CategoryService {
    resource: Resource,
}

impl CategoryService {
    pub fn new(client: ApiClient) -> Self {
        Self {
            resource: Resource::new(client, "/categories"),
        }
    }

    pub async fn list(&self, page: Page) -> Result<Value, ClientError> {
        self.resource.list(page).await
    }

    pub async fn create(&self, category: &Value) -> Result<Value, ClientError> {
        self.resource.create(category).await
    }

    pub async fn update(&self, category_id: &str, category: &Value) -> Result<Value, ClientError> {
        self.resource.update(category_id, category).await
    }

    pub async fn delete(&self, category_id: &str) -> Result<Value, ClientError> {
        self.resource.delete(category_id).await
    }
}
