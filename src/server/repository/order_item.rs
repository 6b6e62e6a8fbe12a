use chrono::NaiveDateTime;
use log::{info, warn};
use validator::Validate;
use crate::server::controller::error::CustomError;
use crate::server::database::{rows_into, with_deadline, DbClient, GenericRow, GenericTransaction};
use crate::server::model::food::Food;
use crate::server::model::order_item::{
    NewOrderItem, OrderItem, OrderItemRequest, OrderLine, PlaceOrderRequest, UpdateOrderItemRequest,
};
use crate::server::repository::{self, Entity};
use crate::server::util::money::{ensure_non_negative, round_price};
use crate::server::util::time::helper::get_utc_now;
use crate::server::util::update::UpdateBuilder;

impl Entity for OrderItem {
    const NAME: &'static str = "OrderItem";
    const TABLE: &'static str = "order_item";
    const COLUMNS: &'static str = "id, quantity, unit_price, food_id, order_id, created_at, updated_at";
}

const INSERT_ORDER: &str = r#"
    INSERT INTO orders(order_date, table_id, created_at, updated_at)
    VALUES ($1, $2, $1, $1)
    RETURNING id
"#;

const INSERT_ORDER_ITEM: &str = r#"
    INSERT INTO order_item(quantity, unit_price, food_id, order_id, created_at, updated_at)
    VALUES ($1, $2, $3, $4, $5, $6)
"#;

const SELECT_ORDER_LINES: &str = r#"
    SELECT oi.id AS order_item_id, oi.order_id, oi.quantity, oi.unit_price, oi.food_id,
           f.name AS food_name, f.food_image, f.price,
           o.table_id, t.table_number, t.number_of_guests
    FROM order_item oi
    JOIN food f ON f.id = oi.food_id
    JOIN orders o ON o.id = oi.order_id
    JOIN tables t ON t.id = o.table_id
    WHERE oi.order_id = $1
    ORDER BY oi.id
"#;

/// Check every requested line and turn it into an insert record.
pub(crate) fn prepare_order_items(
    items: &[OrderItemRequest],
    now: NaiveDateTime,
) -> Result<Vec<NewOrderItem>, CustomError> {
    items
        .iter()
        .map(|item| {
            item.validate()?;
            let (Some(quantity), Some(unit_price), Some(food_id)) = (item.quantity, item.unit_price, item.food_id)
            else {
                return Err(CustomError::bad_request("order item is missing a field"));
            };
            ensure_non_negative(&unit_price, "unit_price")?;
            Ok(NewOrderItem {
                quantity,
                unit_price: round_price(unit_price),
                food_id,
                created_at: now,
                updated_at: now,
            })
        })
        .collect()
}

/// Create an order and all of its items in one transaction, returning the order id.
pub(crate) async fn place_order<C: DbClient>(client: &mut C, req: &PlaceOrderRequest) -> Result<i64, CustomError> {
    req.validate()?;
    let now = get_utc_now();
    let items = prepare_order_items(&req.order_items, now)?;

    let transaction = with_deadline(client.transaction()).await?;
    match insert_order(&transaction, req.table_id, &now, &items).await {
        Ok(order_id) => {
            with_deadline(transaction.commit()).await?;
            info!("order {} placed with {} items", order_id, items.len());
            Ok(order_id)
        }
        Err(e) => {
            if let Err(rollback) = with_deadline(transaction.rollback()).await {
                warn!("rollback of failed order placement failed, {}", rollback);
            }
            Err(e)
        }
    }
}

async fn insert_order<T: GenericTransaction>(
    transaction: &T,
    table_id: i64,
    now: &NaiveDateTime,
    items: &[NewOrderItem],
) -> Result<i64, CustomError> {
    let row = with_deadline(transaction.query_one(INSERT_ORDER, &[now, &table_id])).await?;
    let order_id = row.try_get::<i64>("id").map_err(CustomError::from_db)?;
    let statement = with_deadline(transaction.prepare(INSERT_ORDER_ITEM)).await?;
    for item in items {
        let quantity = item.quantity.as_str();
        with_deadline(transaction.execute(
            &statement,
            &[&quantity, &item.unit_price, &item.food_id, &order_id, &item.created_at, &item.updated_at],
        ))
        .await?;
    }
    Ok(order_id)
}

pub(crate) async fn update<C: DbClient>(client: &C, id: i64, req: &UpdateOrderItemRequest) -> Result<(), CustomError> {
    let unit_price = match req.unit_price {
        Some(price) => {
            ensure_non_negative(&price, "unit_price")?;
            Some(round_price(price))
        }
        None => None,
    };
    if let Some(food_id) = req.food_id {
        repository::ensure_exists::<C, Food>(client, food_id).await?;
    }
    let quantity = req.quantity.map(|q| q.as_str());
    let now = get_utc_now();
    let (statement, params) = UpdateBuilder::new(OrderItem::TABLE, &now)
        .set("quantity", quantity.as_ref())
        .set("unit_price", unit_price.as_ref())
        .set("food_id", req.food_id.as_ref())
        .finish(&id);
    repository::apply_update::<C, OrderItem>(client, &statement, &params).await
}

/// Items of one order joined with their food, order and table. Empty when nothing matches.
pub(crate) async fn lines_for_order<C: DbClient>(client: &C, order_id: i64) -> Result<Vec<OrderLine>, CustomError> {
    let rows = with_deadline(client.query(SELECT_ORDER_LINES, &[&order_id])).await?;
    rows_into(&rows)
}
