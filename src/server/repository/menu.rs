use crate::server::controller::error::CustomError;
use crate::server::database::DbClient;
use crate::server::model::menu::{check_window, CreateMenuRequest, Menu, UpdateMenuRequest};
use crate::server::repository::{self, Entity};
use crate::server::util::time::helper::get_utc_now;
use crate::server::util::update::UpdateBuilder;

impl Entity for Menu {
    const NAME: &'static str = "Menu";
    const TABLE: &'static str = "menu";
    const COLUMNS: &'static str = "id, name, category, start_date, end_date, created_at, updated_at";
}

pub(crate) async fn create<C: DbClient>(client: &C, req: &CreateMenuRequest) -> Result<Menu, CustomError> {
    check_window(req.start_date.as_ref(), req.end_date.as_ref())?;
    let now = get_utc_now();
    repository::insert_returning(
        client,
        r#"
            INSERT INTO menu(name, category, start_date, end_date, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $5)
            RETURNING id, name, category, start_date, end_date, created_at, updated_at
        "#,
        &[&req.name, &req.category, &req.start_date, &req.end_date, &now],
    )
    .await
}

pub(crate) async fn update<C: DbClient>(client: &C, id: i64, req: &UpdateMenuRequest) -> Result<(), CustomError> {
    match (&req.start_date, &req.end_date) {
        (Some(_), Some(_)) => check_window(req.start_date.as_ref(), req.end_date.as_ref())?,
        (None, None) => {}
        // one bound moves, compare it with the stored other one
        _ => {
            let stored: Menu = repository::get(client, id).await?;
            check_window(
                req.start_date.as_ref().or(stored.start_date.as_ref()),
                req.end_date.as_ref().or(stored.end_date.as_ref()),
            )?;
        }
    }
    let now = get_utc_now();
    let (statement, params) = UpdateBuilder::new(Menu::TABLE, &now)
        .set("name", req.name.as_ref())
        .set("category", req.category.as_ref())
        .set("start_date", req.start_date.as_ref())
        .set("end_date", req.end_date.as_ref())
        .finish(&id);
    repository::apply_update::<C, Menu>(client, &statement, &params).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::server::database::mock::{MockClient, MockReply};
    use crate::server::repository::fixtures::*;
    use crate::server::util::time::helper::set_utc_now;

    #[tokio::test]
    async fn create_then_get_round_trips() {
        set_utc_now(ts("2024-02-01 09:30:00").and_utc().timestamp());
        let req = CreateMenuRequest {
            name: "Dinner".into(),
            category: "Mains".into(),
            start_date: None,
            end_date: None,
        };
        let stored = menu_row(5, "Dinner", "Mains", "2024-02-01 09:30:00");
        let client = MockClient::new([
            MockReply::Rows(vec![stored.clone()]),
            MockReply::Rows(vec![stored]),
        ]);
        let created = create(&client, &req).await.unwrap();
        let fetched: Menu = repository::get(&client, created.id).await.unwrap();
        assert_eq!(created, fetched);
        assert_eq!((fetched.name.as_str(), fetched.category.as_str()), ("Dinner", "Mains"));
        assert_eq!(fetched.created_at, ts("2024-02-01 09:30:00"));
    }

    #[tokio::test]
    async fn create_rejects_inverted_window_before_querying() {
        let req = CreateMenuRequest {
            name: "Dinner".into(),
            category: "Mains".into(),
            start_date: Some(ts("2024-03-01 00:00:00")),
            end_date: Some(ts("2024-02-01 00:00:00")),
        };
        let client = MockClient::new([]);
        assert!(matches!(create(&client, &req).await, Err(CustomError::BadRequest(_))));
        assert!(client.journal().is_empty());
    }

    #[tokio::test]
    async fn update_with_one_field_writes_only_that_column() {
        set_utc_now(ts("2024-02-02 08:00:00").and_utc().timestamp());
        let client = MockClient::new([MockReply::Affected(1)]);
        let req = UpdateMenuRequest {
            category: Some("Desserts".into()),
            ..Default::default()
        };
        update(&client, 5, &req).await.unwrap();
        assert_eq!(
            client.journal(),
            vec!["UPDATE menu SET updated_at = $1, category = $2 WHERE id = $3"]
        );
    }

    #[tokio::test]
    async fn single_bound_is_checked_against_stored_window() {
        use crate::server::database::mock::MockRow;
        use tokio_postgres::types::Type;
        let stored = MockRow::new()
            .col("id", Type::INT8, 5i64)
            .col("name", Type::TEXT, "Dinner")
            .col("category", Type::TEXT, "Mains")
            .col("start_date", Type::TIMESTAMP, Some(ts("2024-05-01 00:00:00")))
            .col("end_date", Type::TIMESTAMP, None::<chrono::NaiveDateTime>)
            .col("created_at", Type::TIMESTAMP, ts("2024-01-01 00:00:00"))
            .col("updated_at", Type::TIMESTAMP, ts("2024-01-01 00:00:00"));
        let client = MockClient::new([MockReply::Rows(vec![stored])]);
        let req = UpdateMenuRequest {
            end_date: Some(ts("2024-04-01 00:00:00")),
            ..Default::default()
        };
        assert!(matches!(update(&client, 5, &req).await, Err(CustomError::BadRequest(_))));
        assert_eq!(client.journal().len(), 1);
    }
}
