use anyhow::Error;
use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;
use crate::server::database::{FromRow, GenericRow};
use crate::server::util::time::layout;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub(crate) struct Food {
    pub id: i64,
    pub name: String,
    pub price: Decimal,
    pub food_image: String,
    pub menu_id: i64,
    #[serde(with = "layout")]
    pub created_at: NaiveDateTime,
    #[serde(with = "layout")]
    pub updated_at: NaiveDateTime,
}

impl FromRow for Food {
    fn from_row<R: GenericRow>(row: &R) -> Result<Self, Error> {
        Ok(Self {
            id: row.try_get("id")?,
            name: row.try_get("name")?,
            price: row.try_get("price")?,
            food_image: row.try_get("food_image")?,
            menu_id: row.try_get("menu_id")?,
            created_at: row.try_get("created_at")?,
            updated_at: row.try_get("updated_at")?,
        })
    }
}

#[derive(Debug, Deserialize, Validate)]
pub(crate) struct CreateFoodRequest {
    #[validate(length(min = 2, max = 100))]
    pub name: String,
    pub price: Decimal,
    #[validate(length(min = 1))]
    pub food_image: String,
    pub menu_id: i64,
}

#[derive(Debug, Default, Deserialize, Validate)]
pub(crate) struct UpdateFoodRequest {
    #[validate(length(min = 2, max = 100))]
    pub name: Option<String>,
    pub price: Option<Decimal>,
    #[validate(length(min = 1))]
    pub food_image: Option<String>,
    pub menu_id: Option<i64>,
}

#[derive(Debug, Serialize)]
pub(crate) struct CreateFoodResponse {
    pub message: String,
    pub food: Food,
}
