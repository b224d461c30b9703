//! Blog posts

use super::resource::Resource;
use crate::client::{ApiClient, ClientError};
use crate::types::Page;
use serde_json::Value;

#[derive(Clone, Debug)]
pub struct BlogService {
    resource: Resource,
}

impl BlogService {
    pub fn new(client: ApiClient) -> Self {
        Self {
            resource: Resource::new(client, "/blogs"),
        }
    }

    pub async fn list(&self, page: Page) -> Result<Value, ClientError> {
        self.resource.list(page).await
    }

    pub async fn get(&self, blog_id: &str) -> Result<Value, ClientError> {
        self.resource.get(blog_id).await
    }

    pub async fn create(&self, blog: &Value) -> Result<Value, ClientError> {
        self.resource.create(blog).await
    }

    pub async fn update(&self, blog_id: &str, blog: &Value) -> Result<Value, ClientError> {
        self.resource.update(blog_id, blog).await
    }

    pub async fn delete(&self, blog_id: &str) -> Result<Value, ClientError> {
        self.resource.delete(blog_id).await
    }
}
