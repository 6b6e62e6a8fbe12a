use std::str::FromStr;
use anyhow::{anyhow, Error};
use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use crate::server::database::{FromRow, GenericRow};
use crate::server::model::order_item::OrderLine;
use crate::server::util::time::layout;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub(crate) enum PaymentMethod {
    #[serde(rename = "CARD")]
    Card,
    #[serde(rename = "CASH")]
    Cash,
    /// not chosen yet
    #[default]
    #[serde(rename = "")]
    Unspecified,
}

impl PaymentMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::Card => "CARD",
            PaymentMethod::Cash => "CASH",
            PaymentMethod::Unspecified => "",
        }
    }
}

impl FromStr for PaymentMethod {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "CARD" => Ok(Self::Card),
            "CASH" => Ok(Self::Cash),
            "" => Ok(Self::Unspecified),
            s => Err(anyhow!("invalid payment method: {s}")),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub(crate) enum PaymentStatus {
    #[default]
    Pending,
    Paid,
}

impl PaymentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::Pending => "PENDING",
            PaymentStatus::Paid => "PAID",
        }
    }
}

impl FromStr for PaymentStatus {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "PENDING" => Ok(Self::Pending),
            "PAID" => Ok(Self::Paid),
            s => Err(anyhow!("invalid payment status: {s}")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub(crate) struct Invoice {
    pub id: i64,
    pub order_id: i64,
    pub payment_method: PaymentMethod,
    pub payment_status: PaymentStatus,
    #[serde(with = "layout")]
    pub payment_due_date: NaiveDateTime,
    #[serde(with = "layout")]
    pub created_at: NaiveDateTime,
    #[serde(with = "layout")]
    pub updated_at: NaiveDateTime,
}

impl FromRow for Invoice {
    fn from_row<R: GenericRow>(row: &R) -> Result<Self, Error> {
        Ok(Self {
            id: row.try_get("id")?,
            order_id: row.try_get("order_id")?,
            payment_method: row.try_get::<&str>("payment_method")?.parse()?,
            payment_status: row.try_get::<&str>("payment_status")?.parse()?,
            payment_due_date: row.try_get("payment_due_date")?,
            created_at: row.try_get("created_at")?,
            updated_at: row.try_get("updated_at")?,
        })
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct CreateInvoiceRequest {
    pub order_id: i64,
    #[serde(default)]
    pub payment_method: PaymentMethod,
    #[serde(default)]
    pub payment_status: PaymentStatus,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct UpdateInvoiceRequest {
    pub payment_method: Option<PaymentMethod>,
    pub payment_status: Option<PaymentStatus>,
    #[serde(default, with = "layout::option")]
    pub payment_due_date: Option<NaiveDateTime>,
}

#[derive(Debug, Serialize)]
pub(crate) struct CreateInvoiceResponse {
    pub message: String,
    pub invoice: Invoice,
}

/// Invoice fields combined with the payment summary of its order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub(crate) struct InvoiceView {
    pub invoice_id: i64,
    pub order_id: i64,
    pub payment_method: PaymentMethod,
    pub payment_status: PaymentStatus,
    pub payment_due: Decimal,
    pub table_number: i32,
    #[serde(with = "layout")]
    pub payment_due_date: NaiveDateTime,
    pub order_details: Vec<OrderLine>,
}
