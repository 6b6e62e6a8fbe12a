use crate::server::controller::error::CustomError;
use crate::server::database::DbClient;
use crate::server::model::order::{CreateOrderRequest, Order, UpdateOrderRequest};
use crate::server::model::table::Table;
use crate::server::repository::{self, Entity};
use crate::server::util::time::helper::get_utc_now;
use crate::server::util::update::UpdateBuilder;

impl Entity for Order {
    const NAME: &'static str = "Order";
    const TABLE: &'static str = "orders";
    const COLUMNS: &'static str = "id, order_date, table_id, created_at, updated_at";
}

pub(crate) async fn create<C: DbClient>(client: &C, req: &CreateOrderRequest) -> Result<Order, CustomError> {
    repository::ensure_exists::<C, Table>(client, req.table_id).await?;
    let now = get_utc_now();
    let order_date = req.order_date.unwrap_or(now);
    repository::insert_returning(
        client,
        r#"
            INSERT INTO orders(order_date, table_id, created_at, updated_at)
            VALUES ($1, $2, $3, $3)
            RETURNING id, order_date, table_id, created_at, updated_at
        "#,
        &[&order_date, &req.table_id, &now],
    )
    .await
}

pub(crate) async fn update<C: DbClient>(client: &C, id: i64, req: &UpdateOrderRequest) -> Result<(), CustomError> {
    if let Some(table_id) = req.table_id {
        repository::ensure_exists::<C, Table>(client, table_id).await?;
    }
    let now = get_utc_now();
    let (statement, params) = UpdateBuilder::new(Order::TABLE, &now)
        .set("table_id", req.table_id.as_ref())
        .set("order_date", req.order_date.as_ref())
        .finish(&id);
    repository::apply_update::<C, Order>(client, &statement, &params).await
}
