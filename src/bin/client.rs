use std::str::FromStr;
use anyhow::{anyhow, Error};
use clap::{Args, Parser, Subcommand};
use reqwest::{Client, Response, StatusCode};
use serde::Deserialize;
use serde_json::{json, Value};

#[derive(Parser, Debug)]
#[command(name = "restaurant-client")]
#[command(about = "client cli used by restaurant staffs to interact with the server", version, long_about = None
)]
struct Cli {
    #[arg(long, env = "RESTAURANT_HOST", default_value = "http://localhost:8080")]
    host: String,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Parser, Debug)]
enum Commands {
    /// menu related ops
    #[command(arg_required_else_help = true)]
    Menu(MenuArgs),
    /// order related ops
    #[command(arg_required_else_help = true)]
    Order(OrderArgs),
    /// invoice related ops
    #[command(arg_required_else_help = true)]
    Invoice(InvoiceArgs),
}

#[derive(Debug, Args)]
struct MenuArgs {
    #[command(subcommand)]
    command: MenuCmds,
}

#[derive(Debug, Subcommand)]
enum MenuCmds {
    List {
        #[arg(long, default_value_t = 1)]
        page: i64,
        #[arg(long, default_value_t = 10)]
        per_page: i64,
    },
}

#[derive(Debug, Args)]
struct OrderArgs {
    #[command(subcommand)]
    command: OrderCmds,
}

#[derive(Debug, Subcommand)]
enum OrderCmds {
    /// place an order with all of its items at once
    #[command(arg_required_else_help = true)]
    Place {
        #[arg(short = 't', long, help = "Table id to order for", value_parser = clap::value_parser!(i64).range(1..))]
        table: i64,
        #[arg(long = "item", help = "FOOD_ID:QUANTITY:UNIT_PRICE, e.g. 3:M:12.50", value_name = "ITEM", num_args = 1..)]
        items: Vec<ItemSpec>,
    },
}

#[derive(Debug, Args)]
struct InvoiceArgs {
    #[command(subcommand)]
    command: InvoiceCmds,
}

#[derive(Debug, Subcommand)]
enum InvoiceCmds {
    #[command(arg_required_else_help = true)]
    Show { id: i64 },
}

#[derive(Debug, Clone)]
struct ItemSpec {
    food_id: i64,
    quantity: String,
    unit_price: String,
}

impl FromStr for ItemSpec {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts = s.split(':').collect::<Vec<_>>();
        let [food_id, quantity, unit_price] = parts.as_slice() else {
            return Err(anyhow!("expected FOOD_ID:QUANTITY:UNIT_PRICE, got {}", s));
        };
        Ok(Self {
            food_id: food_id.parse()?,
            quantity: quantity.to_string(),
            unit_price: unit_price.to_string(),
        })
    }
}

#[derive(Debug, Deserialize)]
struct PlaceOrderResponse {
    order_id: i64,
}

async fn report_failure(res: Response) -> Result<(), Error> {
    let status = res.status();
    let body = res.json::<Value>().await.unwrap_or(Value::Null);
    let reason = body["error"].as_str().or(body["message"].as_str()).unwrap_or("");
    match status {
        StatusCode::BAD_REQUEST => println!("Bad request, {}", reason),
        StatusCode::NOT_FOUND => println!("Resource not found, {}", reason),
        unexpected => println!("got unexpected status code, {}", unexpected),
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    let args = Cli::parse();
    let client = Client::new();

    match args.command {
        Commands::Menu(menu) => match menu.command {
            MenuCmds::List { page, per_page } => {
                let res = client
                    .get(format!("{}/menu", args.host))
                    .query(&[("page", page), ("recordPerPage", per_page)])
                    .send()
                    .await?;
                if res.status() != StatusCode::OK {
                    return report_failure(res).await;
                }
                let body = res.json::<Value>().await?;
                println!("{} menus in total", body["total_count"]);
                for menu in body["items"].as_array().into_iter().flatten() {
                    println!("#{} {} ({})", menu["id"], menu["name"], menu["category"]);
                }
            }
        },
        Commands::Order(order) => match order.command {
            OrderCmds::Place { table, items } => {
                println!("placing {} items for table={}", items.len(), table);
                let order_items = items
                    .iter()
                    .map(|item| {
                        json!({
                            "food_id": item.food_id,
                            "quantity": item.quantity,
                            "unit_price": item.unit_price,
                        })
                    })
                    .collect::<Vec<_>>();
                let res = client
                    .post(format!("{}/order-item", args.host))
                    .json(&json!({ "table_id": table, "order_items": order_items }))
                    .send()
                    .await?;
                if res.status() != StatusCode::OK {
                    return report_failure(res).await;
                }
                let placed = res.json::<PlaceOrderResponse>().await?;
                println!("order placed successfully, order id = {}", placed.order_id);
            }
        },
        Commands::Invoice(invoice) => match invoice.command {
            InvoiceCmds::Show { id } => {
                let res = client.get(format!("{}/invoice/{}", args.host, id)).send().await?;
                if res.status() != StatusCode::OK {
                    return report_failure(res).await;
                }
                let view = res.json::<Value>().await?;
                println!(
                    "invoice #{} for order #{} at table {}",
                    view["invoice_id"], view["order_id"], view["table_number"]
                );
                for line in view["order_details"].as_array().into_iter().flatten() {
                    println!("  {} x{} {}", line["food_name"], line["quantity"], line["price"]);
                }
                println!(
                    "due {} by {}, status {}",
                    view["payment_due"], view["payment_due_date"], view["payment_status"]
                );
            }
        },
    };
    Ok(())
}
