//! CRUD calls shared by the back-office resources

use crate::client::{ApiClient, ClientError};
use crate::types::Page;
use reqwest::Method;
use serde::Serialize;
use serde_json::Value;

/// One REST collection (`/blogs`, `/foods`, ...) on the backend
#[derive(Clone, Debug)]
pub(crate) struct Resource {
    client: ApiClient,
    path: &'static str,
}

impl Resource {
    pub(crate) fn new(client: ApiClient, path: &'static str) -> Self {
        Self { client, path }
    }

    pub(crate) fn client(&self) -> &ApiClient {
        &self.client
    }

    pub(crate) fn item_path(&self, id: &str) -> String {
        format!("{}/{id}", self.path)
    }

    pub(crate) async fn list(&self, page: Page) -> Result<Value, ClientError> {
        let request = self.client.request(Method::GET, self.path).query(&page);
        self.client.execute(request).await
    }

    pub(crate) async fn list_with<Q: Serialize + ?Sized>(
        &self,
        page: Page,
        query: &Q,
    ) -> Result<Value, ClientError> {
        let request = self
            .client
            .request(Method::GET, self.path)
            .query(&page)
            .query(query);
        self.client.execute(request).await
    }

    pub(crate) async fn get(&self, id: &str) -> Result<Value, ClientError> {
        let request = self.client.request(Method::GET, &self.item_path(id));
        self.client.execute(request).await
    }

    pub(crate) async fn create(&self, body: &Value) -> Result<Value, ClientError> {
        let request = self.client.request(Method::POST, self.path).json(body);
        self.client.execute(request).await
    }

    pub(crate) async fn update(&self, id: &str, body: &Value) -> Result<Value, ClientError> {
        let request = self
            .client
            .request(Method::PUT, &self.item_path(id))
            .json(body);
        self.client.execute(request).await
    }

    pub(crate) async fn delete(&self, id: &str) -> Result<Value, ClientError> {
        let request = self.client.request(Method::DELETE, &self.item_path(id));
        self.client.execute(request).await
    }
}
