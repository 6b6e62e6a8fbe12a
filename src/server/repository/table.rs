use crate::server::controller::error::CustomError;
use crate::server::database::DbClient;
use crate::server::model::table::{CreateTableRequest, Table, UpdateTableRequest};
use crate::server::repository::{self, Entity};
use crate::server::util::time::helper::get_utc_now;
use crate::server::util::update::UpdateBuilder;

impl Entity for Table {
    const NAME: &'static str = "Table";
    const TABLE: &'static str = "tables";
    const COLUMNS: &'static str = "id, number_of_guests, table_number, created_at, updated_at";
}

pub(crate) async fn create<C: DbClient>(client: &C, req: &CreateTableRequest) -> Result<Table, CustomError> {
    let now = get_utc_now();
    repository::insert_returning(
        client,
        r#"
            INSERT INTO tables(number_of_guests, table_number, created_at, updated_at)
            VALUES ($1, $2, $3, $3)
            RETURNING id, number_of_guests, table_number, created_at, updated_at
        "#,
        &[&req.number_of_guests, &req.table_number, &now],
    )
    .await
}

pub(crate) async fn update<C: DbClient>(client: &C, id: i64, req: &UpdateTableRequest) -> Result<(), CustomError> {
    let now = get_utc_now();
    let (statement, params) = UpdateBuilder::new(Table::TABLE, &now)
        .set("number_of_guests", req.number_of_guests.as_ref())
        .set("table_number", req.table_number.as_ref())
        .finish(&id);
    repository::apply_update::<C, Table>(client, &statement, &params).await
}
