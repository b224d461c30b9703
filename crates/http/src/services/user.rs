//! Account profile and user administration

use super::resource::Resource;
use crate::client::{ApiClient, ClientError};
use crate::types::Page;
use reqwest::Method;
use serde_json::{Value, json};
use tinyyummy_core::Role;

#[derive(Clone, Debug)]
pub struct UserService {
    resource: Resource,
}

impl UserService {
    pub fn new(client: ApiClient) -> Self {
        Self {
            resource: Resource::new(client, "/users"),
        }
    }

    pub async fn profile(&self) -> Result<Value, ClientError> {
        self.resource.get("me").await
    }

    pub async fn update_profile(&self, profile: &Value) -> Result<Value, ClientError> {
        self.resource.update("me", profile).await
    }

    /// All accounts (admin)
    pub async fn list(&self, page: Page) -> Result<Value, ClientError> {
        self.resource.list(page).await
    }

    pub async fn set_role(&self, user_id: &str, role: Role) -> Result<Value, ClientError> {
        let client = self.resource.client();
        let request = client
            .request(
                Method::PUT,
                &format!("{}/role", self.resource.item_path(user_id)),
            )
            .json(&json!({ "role": role }));
        client.execute(request).await
    }

    pub async fn delete(&self, user_id: &str) -> Result<Value, ClientError> {
        self.resource.delete(user_id).await
    }
}
