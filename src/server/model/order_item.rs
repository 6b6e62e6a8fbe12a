use std::fmt;
use std::str::FromStr;
use anyhow::{anyhow, Error};
use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;
use crate::server::database::{FromRow, GenericRow};
use crate::server::util::time::layout;

/// Portion size of an ordered dish.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub(crate) enum Quantity {
    S,
    M,
    L,
}

impl Quantity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Quantity::S => "S",
            Quantity::M => "M",
            Quantity::L => "L",
        }
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Quantity {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "S" => Ok(Self::S),
            "M" => Ok(Self::M),
            "L" => Ok(Self::L),
            s => Err(anyhow!("invalid quantity: {s}")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub(crate) struct OrderItem {
    pub id: i64,
    pub quantity: Quantity,
    pub unit_price: Decimal,
    pub food_id: i64,
    pub order_id: i64,
    #[serde(with = "layout")]
    pub created_at: NaiveDateTime,
    #[serde(with = "layout")]
    pub updated_at: NaiveDateTime,
}

impl FromRow for OrderItem {
    fn from_row<R: GenericRow>(row: &R) -> Result<Self, Error> {
        Ok(Self {
            id: row.try_get("id")?,
            quantity: row.try_get::<&str>("quantity")?.parse()?,
            unit_price: row.try_get("unit_price")?,
            food_id: row.try_get("food_id")?,
            order_id: row.try_get("order_id")?,
            created_at: row.try_get("created_at")?,
            updated_at: row.try_get("updated_at")?,
        })
    }
}

/// One line of a placement request.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub(crate) struct OrderItemRequest {
    #[validate(required)]
    pub quantity: Option<Quantity>,
    #[validate(required)]
    pub unit_price: Option<Decimal>,
    #[validate(required)]
    pub food_id: Option<i64>,
}

#[derive(Debug, Deserialize, Validate)]
pub(crate) struct PlaceOrderRequest {
    pub table_id: i64,
    #[validate(length(min = 1), nested)]
    pub order_items: Vec<OrderItemRequest>,
}

/// A validated line ready to be inserted under a fresh order.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct NewOrderItem {
    pub quantity: Quantity,
    pub unit_price: Decimal,
    pub food_id: i64,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Debug, Serialize)]
pub(crate) struct PlaceOrderResponse {
    pub message: String,
    pub order_id: i64,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct UpdateOrderItemRequest {
    pub quantity: Option<Quantity>,
    pub unit_price: Option<Decimal>,
    pub food_id: Option<i64>,
}

/// An order line joined with its food, order and table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub(crate) struct OrderLine {
    pub order_item_id: i64,
    pub order_id: i64,
    pub quantity: Quantity,
    pub unit_price: Decimal,
    pub food_id: i64,
    pub food_name: String,
    pub food_image: String,
    pub price: Decimal,
    pub table_id: i64,
    pub table_number: i32,
    pub number_of_guests: i32,
}

impl FromRow for OrderLine {
    fn from_row<R: GenericRow>(row: &R) -> Result<Self, Error> {
        Ok(Self {
            order_item_id: row.try_get("order_item_id")?,
            order_id: row.try_get("order_id")?,
            quantity: row.try_get::<&str>("quantity")?.parse()?,
            unit_price: row.try_get("unit_price")?,
            food_id: row.try_get("food_id")?,
            food_name: row.try_get("food_name")?,
            food_image: row.try_get("food_image")?,
            price: row.try_get("price")?,
            table_id: row.try_get("table_id")?,
            table_number: row.try_get("table_number")?,
            number_of_guests: row.try_get("number_of_guests")?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quantity_is_a_closed_set() {
        assert_eq!(serde_json::from_str::<Quantity>("\"M\"").unwrap(), Quantity::M);
        assert!(serde_json::from_str::<Quantity>("\"XL\"").is_err());
        assert!("m".parse::<Quantity>().is_err());
        assert_eq!("L".parse::<Quantity>().unwrap().to_string(), "L");
    }

    #[test]
    fn placement_needs_items_with_all_fields() {
        let empty: PlaceOrderRequest =
            serde_json::from_value(serde_json::json!({"table_id": 1, "order_items": []})).unwrap();
        assert!(empty.validate().is_err());

        let missing_price: PlaceOrderRequest = serde_json::from_value(serde_json::json!({
            "table_id": 1,
            "order_items": [{"quantity": "S", "food_id": 3}],
        }))
        .unwrap();
        assert!(missing_price.validate().is_err());

        let complete: PlaceOrderRequest = serde_json::from_value(serde_json::json!({
            "table_id": 1,
            "order_items": [{"quantity": "S", "unit_price": 4.5, "food_id": 3}],
        }))
        .unwrap();
        assert!(complete.validate().is_ok());
    }
}
