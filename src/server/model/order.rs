use anyhow::Error;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use crate::server::database::{FromRow, GenericRow};
use crate::server::util::time::layout;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub(crate) struct Order {
    pub id: i64,
    #[serde(with = "layout")]
    pub order_date: NaiveDateTime,
    pub table_id: i64,
    #[serde(with = "layout")]
    pub created_at: NaiveDateTime,
    #[serde(with = "layout")]
    pub updated_at: NaiveDateTime,
}

impl FromRow for Order {
    fn from_row<R: GenericRow>(row: &R) -> Result<Self, Error> {
        Ok(Self {
            id: row.try_get("id")?,
            order_date: row.try_get("order_date")?,
            table_id: row.try_get("table_id")?,
            created_at: row.try_get("created_at")?,
            updated_at: row.try_get("updated_at")?,
        })
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct CreateOrderRequest {
    pub table_id: i64,
    /// defaults to the creation time
    #[serde(default, with = "layout::option")]
    pub order_date: Option<NaiveDateTime>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct UpdateOrderRequest {
    pub table_id: Option<i64>,
    #[serde(default, with = "layout::option")]
    pub order_date: Option<NaiveDateTime>,
}

#[derive(Debug, Serialize)]
pub(crate) struct CreateOrderResponse {
    pub message: String,
    pub order: Order,
}
