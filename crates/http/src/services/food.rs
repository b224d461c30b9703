//! Foods and the meal sets built from them

use super::resource::Resource;
use crate::client::{ApiClient, ClientError};
use crate::types::Page;
use serde_json::Value;

#[derive(Clone, Debug)]
pub struct FoodService {
    resource: Resource,
}

impl FoodService {
    pub fn new(client: ApiClient) -> Self {
        Self {
            resource: Resource::new(client, "/foods"),
        }
    }

    pub async fn list(&self, page: Page) -> Result<Value, ClientError> {
        self.resource.list(page).await
    }

    pub async fn get(&self, food_id: &str) -> Result<Value, ClientError> {
        self.resource.get(food_id).await
    }

    pub async fn create(&self, food: &Value) -> Result<Value, ClientError> {
        self.resource.create(food).await
    }

    pub async fn update(&self, food_id: &str, food: &Value) -> Result<Value, ClientError> {
        self.resource.update(food_id, food).await
    }

    pub async fn delete(&self, food_id: &str) -> Result<Value, ClientError> {
        self.resource.delete(food_id).await
    }
}

#[derive(Clone, Debug)]
pub struct MealSetService {
    resource: Resource,
}

impl MealSetService {
    pub fn new(client: ApiClient) -> Self {
        Self {
            resource: Resource::new(client, "/meal-sets"),
        }
    }

    pub async fn list(&self, page: Page) -> Result<Value, ClientError> {
        self.resource.list(page).await
    }

    pub async fn get(&self, meal_set_id: &str) -> Result<Value, ClientError> {
        self.resource.get(meal_set_id).await
    }

    pub async fn create(&self, meal_set: &Value) -> Result<Value, ClientError> {
        self.resource.create(meal_set).await
    }

    pub async fn update(&self, meal_set_id: &str, meal_set: &Value) -> Result<Value, ClientError> {
        self.resource.update(meal_set_id, meal_set).await
    }

    pub async fn delete(&self, meal_set_id: &str) -> Result<Value, ClientError> {
        self.resource.delete(meal_set_id).await
    }
}
