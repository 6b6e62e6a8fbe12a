//! Queries per entity, written once against [`DbClient`].

pub(crate) mod food;
pub(crate) mod invoice;
pub(crate) mod menu;
pub(crate) mod order;
pub(crate) mod order_item;
pub(crate) mod table;
pub(crate) mod user;

use tokio_postgres::types::ToSql;
use crate::server::controller::error::CustomError;
use crate::server::database::{rows_into, row_into, with_deadline, DbClient, FromRow, GenericRow};
use crate::server::model::{ListResponse, Page};

/// A row type stored in its own table.
pub(crate) trait Entity: FromRow {
    /// name used in messages, e.g. `Menu`
    const NAME: &'static str;
    const TABLE: &'static str;
    const COLUMNS: &'static str;
}

/// Page through a table ordered by id, with the total row count.
pub(crate) async fn list<C: DbClient, E: Entity>(client: &C, page: Page) -> Result<ListResponse<E>, CustomError> {
    let count_stmt = format!("SELECT COUNT(*) AS total_count FROM {}", E::TABLE);
    let total_count = match with_deadline(client.query_opt(&count_stmt, &[])).await? {
        Some(row) => row.try_get::<i64>("total_count").map_err(CustomError::from_db)?,
        None => 0,
    };
    let page_stmt = format!(
        "SELECT {} FROM {} ORDER BY id LIMIT $1 OFFSET $2",
        E::COLUMNS,
        E::TABLE
    );
    let offset = page.offset();
    let rows = with_deadline(client.query(&page_stmt, &[&page.size, &offset])).await?;
    Ok(ListResponse {
        total_count,
        items: rows_into(&rows)?,
    })
}

pub(crate) async fn get<C: DbClient, E: Entity>(client: &C, id: i64) -> Result<E, CustomError> {
    let stmt = format!("SELECT {} FROM {} WHERE id = $1", E::COLUMNS, E::TABLE);
    match with_deadline(client.query_opt(&stmt, &[&id])).await? {
        Some(row) => row_into(&row),
        None => Err(CustomError::not_found(E::NAME)),
    }
}

/// Fail with `NotFound` unless a row with `id` exists in `E`'s table.
pub(crate) async fn ensure_exists<C: DbClient, E: Entity>(client: &C, id: i64) -> Result<(), CustomError> {
    let stmt = format!("SELECT id FROM {} WHERE id = $1", E::TABLE);
    match with_deadline(client.query_opt(&stmt, &[&id])).await? {
        Some(_) => Ok(()),
        None => Err(CustomError::not_found(E::NAME)),
    }
}

/// Run an `INSERT ... RETURNING` and decode the stored row.
pub(crate) async fn insert_returning<C: DbClient, E: Entity>(
    client: &C,
    statement: &str,
    params: &[&(dyn ToSql + Sync)],
) -> Result<E, CustomError> {
    match with_deadline(client.query_opt(statement, params)).await? {
        Some(row) => row_into(&row),
        None => Err(CustomError::DbError),
    }
}

/// Run a built update, `NotFound` when it touched no row.
pub(crate) async fn apply_update<C: DbClient, E: Entity>(
    client: &C,
    statement: &str,
    params: &[&(dyn ToSql + Sync)],
) -> Result<(), CustomError> {
    match with_deadline(client.execute(statement, params)).await? {
        0 => Err(CustomError::not_found(E::NAME)),
        _ => Ok(()),
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use super::fixtures::*;
    use crate::server::database::mock::{MockClient, MockReply};
    use crate::server::model::menu::Menu;

    #[tokio::test]
    async fn list_on_empty_table() {
        let client = MockClient::new([
            MockReply::Rows(vec![count(0)]),
            MockReply::Rows(vec![]),
        ]);
        let page = list::<_, Menu>(&client, Page::default()).await.unwrap();
        assert_eq!(page.total_count, 0);
        assert!(page.items.is_empty());
        let journal = client.journal();
        assert_eq!(journal[0], "SELECT COUNT(*) AS total_count FROM menu");
        assert!(journal[1].ends_with("FROM menu ORDER BY id LIMIT $1 OFFSET $2"));
    }

    #[tokio::test]
    async fn list_decodes_rows() {
        let client = MockClient::new([
            MockReply::Rows(vec![count(12)]),
            MockReply::Rows(vec![
                menu_row(11, "Dinner", "Mains", "2024-01-01 10:00:00"),
                menu_row(12, "Brunch", "Mains", "2024-01-02 10:00:00"),
            ]),
        ]);
        let page = list::<_, Menu>(&client, Page { number: 2, size: 10 }).await.unwrap();
        assert_eq!(page.total_count, 12);
        assert_eq!(page.items.iter().map(|m| m.id).collect::<Vec<_>>(), vec![11, 12]);
    }

    #[tokio::test]
    async fn get_missing_is_not_found() {
        let client = MockClient::new([MockReply::Rows(vec![])]);
        let err = get::<_, Menu>(&client, 404).await.unwrap_err();
        assert!(matches!(err, CustomError::NotFound(msg) if msg == "Menu not found"));
    }

    #[tokio::test]
    async fn query_failure_is_internal() {
        let client = MockClient::new([MockReply::Fail("connection reset")]);
        let err = get::<_, Menu>(&client, 1).await.unwrap_err();
        assert!(matches!(err, CustomError::DbError));
    }

    #[tokio::test]
    async fn update_touching_nothing_is_not_found() {
        let client = MockClient::new([MockReply::Affected(0)]);
        let err = apply_update::<_, Menu>(&client, "UPDATE menu SET updated_at = $1 WHERE id = $2", &[])
            .await
            .unwrap_err();
        assert!(matches!(err, CustomError::NotFound(_)));
    }
}
