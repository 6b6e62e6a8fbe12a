use chrono::Duration;
use rust_decimal::Decimal;
use crate::server::controller::error::CustomError;
use crate::server::database::DbClient;
use crate::server::model::invoice::{CreateInvoiceRequest, Invoice, InvoiceView, UpdateInvoiceRequest};
use crate::server::model::order::Order;
use crate::server::repository::{self, order_item, Entity};
use crate::server::util::time::helper::get_utc_now;
use crate::server::util::update::UpdateBuilder;

const PAYMENT_DUE_AFTER_DAYS: i64 = 1;

impl Entity for Invoice {
    const NAME: &'static str = "Invoice";
    const TABLE: &'static str = "invoice";
    const COLUMNS: &'static str =
        "id, order_id, payment_method, payment_status, payment_due_date, created_at, updated_at";
}

pub(crate) async fn create<C: DbClient>(client: &C, req: &CreateInvoiceRequest) -> Result<Invoice, CustomError> {
    repository::ensure_exists::<C, Order>(client, req.order_id).await?;
    let now = get_utc_now();
    let due = now + Duration::days(PAYMENT_DUE_AFTER_DAYS);
    repository::insert_returning(
        client,
        r#"
            INSERT INTO invoice(order_id, payment_method, payment_status, payment_due_date, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $5)
            RETURNING id, order_id, payment_method, payment_status, payment_due_date, created_at, updated_at
        "#,
        &[
            &req.order_id,
            &req.payment_method.as_str(),
            &req.payment_status.as_str(),
            &due,
            &now,
        ],
    )
    .await
}

pub(crate) async fn update<C: DbClient>(client: &C, id: i64, req: &UpdateInvoiceRequest) -> Result<(), CustomError> {
    let method = req.payment_method.map(|m| m.as_str());
    let status = req.payment_status.map(|s| s.as_str());
    let now = get_utc_now();
    let (statement, params) = UpdateBuilder::new(Invoice::TABLE, &now)
        .set("payment_method", method.as_ref())
        .set("payment_status", status.as_ref())
        .set("payment_due_date", req.payment_due_date.as_ref())
        .finish(&id);
    repository::apply_update::<C, Invoice>(client, &statement, &params).await
}

/// The invoice together with what is owed for its order.
pub(crate) async fn view<C: DbClient>(client: &C, id: i64) -> Result<InvoiceView, CustomError> {
    let invoice: Invoice = repository::get(client, id).await?;
    let lines = order_item::lines_for_order(client, invoice.order_id).await?;
    let Some(first) = lines.first() else {
        return Err(CustomError::not_found("Order items"));
    };
    let table_number = first.table_number;
    let payment_due = lines.iter().map(|line| line.price).sum::<Decimal>();
    Ok(InvoiceView {
        invoice_id: invoice.id,
        order_id: invoice.order_id,
        payment_method: invoice.payment_method,
        payment_status: invoice.payment_status,
        payment_due,
        table_number,
        payment_due_date: invoice.payment_due_date,
        order_details: lines,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;
    use tokio_postgres::types::Type;
    use crate::server::database::mock::{MockClient, MockReply, MockRow};
    use crate::server::model::invoice::{PaymentMethod, PaymentStatus};
    use crate::server::repository::fixtures::*;
    use crate::server::util::time::helper::set_utc_now;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn invoice_row(id: i64, order_id: i64, due: &str) -> MockRow {
        MockRow::new()
            .col("id", Type::INT8, id)
            .col("order_id", Type::INT8, order_id)
            .col("payment_method", Type::TEXT, "CASH")
            .col("payment_status", Type::TEXT, "PENDING")
            .col("payment_due_date", Type::TIMESTAMP, ts(due))
            .col("created_at", Type::TIMESTAMP, ts("2024-04-10 19:00:00"))
            .col("updated_at", Type::TIMESTAMP, ts("2024-04-10 19:00:00"))
    }

    #[tokio::test]
    async fn create_requires_the_order() {
        let client = MockClient::new([MockReply::Rows(vec![])]);
        let req = CreateInvoiceRequest {
            order_id: 5,
            payment_method: PaymentMethod::Cash,
            payment_status: PaymentStatus::Pending,
        };
        let err = create(&client, &req).await.unwrap_err();
        assert!(matches!(err, CustomError::NotFound(msg) if msg == "Order not found"));
    }

    #[tokio::test]
    async fn create_decodes_stored_invoice() {
        set_utc_now(ts("2024-04-10 19:00:00").and_utc().timestamp());
        let client = MockClient::new([
            MockReply::Rows(vec![id_row(31)]),
            MockReply::Rows(vec![invoice_row(3, 31, "2024-04-11 19:00:00")]),
        ]);
        let req = CreateInvoiceRequest {
            order_id: 31,
            payment_method: PaymentMethod::Cash,
            payment_status: PaymentStatus::default(),
        };
        let invoice = create(&client, &req).await.unwrap();
        assert_eq!(invoice.payment_status, PaymentStatus::Pending);
        assert_eq!(invoice.payment_due_date, ts("2024-04-11 19:00:00"));
    }

    #[tokio::test]
    async fn view_of_single_item_order() {
        let client = MockClient::new([
            MockReply::Rows(vec![invoice_row(3, 31, "2024-04-11 19:00:00")]),
            MockReply::Rows(vec![order_line_row(1, 31, "Ramen", dec("12.50"), dec("11.00"), 2, 7, 4)]),
        ]);
        let summary = view(&client, 3).await.unwrap();
        assert_eq!(summary.payment_due, dec("12.50"));
        assert_eq!(summary.table_number, 7);
        assert_eq!(summary.payment_method, PaymentMethod::Cash);
        assert_eq!(summary.order_details.len(), 1);
    }

    #[tokio::test]
    async fn view_sums_food_prices() {
        let client = MockClient::new([
            MockReply::Rows(vec![invoice_row(3, 31, "2024-04-11 19:00:00")]),
            MockReply::Rows(vec![
                order_line_row(1, 31, "Ramen", dec("12.50"), dec("12.50"), 2, 7, 4),
                order_line_row(2, 31, "Gyoza", dec("6.25"), dec("6.25"), 2, 7, 4),
            ]),
        ]);
        assert_eq!(view(&client, 3).await.unwrap().payment_due, dec("18.75"));
    }

    #[tokio::test]
    async fn view_without_items_is_not_found() {
        let client = MockClient::new([
            MockReply::Rows(vec![invoice_row(3, 31, "2024-04-11 19:00:00")]),
            MockReply::Rows(vec![]),
        ]);
        assert!(matches!(view(&client, 3).await, Err(CustomError::NotFound(_))));
    }

    #[tokio::test]
    async fn single_field_update_advances_updated_at() {
        set_utc_now(ts("2024-04-12 08:00:00").and_utc().timestamp());
        let client = MockClient::new([MockReply::Affected(1)]);
        let req = UpdateInvoiceRequest {
            payment_status: Some(PaymentStatus::Paid),
            ..Default::default()
        };
        update(&client, 3, &req).await.unwrap();
        assert_eq!(
            client.journal(),
            vec!["UPDATE invoice SET updated_at = $1, payment_status = $2 WHERE id = $3"]
        );
        let bound = client.bound();
        assert_eq!(bound[0][0], format!("{:?}", ts("2024-04-12 08:00:00")));
        assert_eq!(bound[0][1], "\"PAID\"");
        assert_eq!(bound[0][2], "3");
    }
}
