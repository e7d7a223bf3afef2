//! BillsWithFriends CLI
//!
//! Command-line interface for BillsWithFriends operations:
//! - Create, inspect and total bills
//! - Show the accountability leaderboard
//! - Turn receipt text into CSV rows (and optionally bill items)

use billswithfriends::bills::{Bill, Item, NewItem, RecordId};
use billswithfriends::receipt::{write_csv, ReceiptParser};
use billswithfriends::social::LeaderboardEntry;
use clap::{Parser, Subcommand};
use std::collections::BTreeMap;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "billswithfriends")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Split bills, plan expenses and keep friends accountable")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// API server URL
    #[arg(long, default_value = "http://localhost:8000", global = true)]
    pub api_url: String,

    /// Output format (table, json)
    #[arg(short, long, default_value = "table", global = true)]
    pub format: String,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Manage bills
    Bills {
        #[command(subcommand)]
        command: BillCommands,
    },

    /// Show the accountability leaderboard
    Leaderboard,

    /// Parse receipt text into Item,Quantity,Price rows
    Receipt {
        /// Text file with one receipt line per line (OCR output)
        file: PathBuf,
        /// Output CSV file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Also add the parsed rows as items on this bill
        #[arg(long)]
        bill_id: Option<RecordId>,
    },

    /// Generate default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(Subcommand)]
pub enum BillCommands {
    /// List bills
    List {
        /// Only bills owned by this user
        #[arg(long)]
        user_id: Option<String>,
    },

    /// Create a bill
    Create {
        #[arg(long)]
        name: String,
        #[arg(long)]
        user_id: String,
    },

    /// Show a bill and its items
    Show { id: RecordId },

    /// Add an item to a bill
    AddItem {
        id: RecordId,
        #[arg(long)]
        name: String,
        /// Line cost (already multiplied out for the quantity)
        #[arg(long)]
        cost: f64,
        #[arg(long)]
        quantity: Option<u32>,
    },

    /// Start total calculation for a bill
    Calculate { id: RecordId },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();
    let json_output = cli.format == "json";

    match cli.command {
        Commands::Bills { command } => match command {
            BillCommands::List { user_id } => {
                let mut request = client.get(format!("{}/bills", cli.api_url));
                if let Some(user_id) = &user_id {
                    request = request.query(&[("user_id", user_id)]);
                }
                let response = send(request, &cli.api_url).await;
                let bills: BTreeMap<RecordId, Bill> = expect_success(response).await?.json().await?;

                if json_output {
                    println!("{}", serde_json::to_string_pretty(&bills)?);
                } else if bills.is_empty() {
                    println!("No bills yet.");
                    println!();
                    println!("Create one with:");
                    println!("  billswithfriends bills create --name Dinner --user-id alice");
                } else {
                    println!("{:<6} {:<24} {:<16} {}", "ID", "Name", "Owner", "Total");
                    println!("{}", "-".repeat(60));
                    for (id, bill) in &bills {
                        print_bill_row(*id, bill);
                    }
                }
            }

            BillCommands::Create { name, user_id } => {
                let bill = Bill::new(name).owned_by(user_id);
                let response = send(
                    client.post(format!("{}/bills", cli.api_url)).json(&bill),
                    &cli.api_url,
                )
                .await;
                let created: serde_json::Value = expect_success(response).await?.json().await?;

                if json_output {
                    println!("{}", serde_json::to_string_pretty(&created)?);
                } else {
                    println!("Created bill {}", created["id"].as_u64().unwrap_or(0));
                }
            }

            BillCommands::Show { id } => {
                let response = send(
                    client.get(format!("{}/bills/{}", cli.api_url, id)),
                    &cli.api_url,
                )
                .await;
                let bill: Bill = expect_success(response).await?.json().await?;

                let response = send(
                    client.get(format!("{}/bills/{}/items", cli.api_url, id)),
                    &cli.api_url,
                )
                .await;
                let items: Vec<Item> = expect_success(response).await?.json().await?;

                if json_output {
                    let out = serde_json::json!({ "bill": bill, "items": items });
                    println!("{}", serde_json::to_string_pretty(&out)?);
                } else {
                    print_bill_row(id, &bill);
                    println!();
                    if items.is_empty() {
                        println!("No items.");
                    } else {
                        println!("{:<8} {:<24} {:<8} {}", "Item", "Name", "Qty", "Cost");
                        println!("{}", "-".repeat(50));
                        for item in &items {
                            println!(
                                "{:<8} {:<24} {:<8} {:.2}",
                                item.item_id,
                                item.data.name.as_deref().unwrap_or("-"),
                                item.data.quantity.unwrap_or(1),
                                item.cost()
                            );
                        }
                    }
                }
            }

            BillCommands::AddItem {
                id,
                name,
                cost,
                quantity,
            } => {
                let mut item = NewItem::new(name, cost);
                if let Some(quantity) = quantity {
                    item = item.quantity(quantity);
                }
                let item_id = add_item(&client, &cli.api_url, id, &item).await?;
                println!("Added item {} to bill {}", item_id, id);
            }

            BillCommands::Calculate { id } => {
                let response = send(
                    client.post(format!("{}/bills/{}/calculate", cli.api_url, id)),
                    &cli.api_url,
                )
                .await;
                let body: serde_json::Value = expect_success(response).await?.json().await?;
                println!("{}", body["message"].as_str().unwrap_or("Calculation started"));
                println!("Run `billswithfriends bills show {}` to see the total.", id);
            }
        },

        Commands::Leaderboard => {
            let response = send(
                client.get(format!("{}/leaderboard", cli.api_url)),
                &cli.api_url,
            )
            .await;
            let entries: Vec<LeaderboardEntry> = expect_success(response).await?.json().await?;

            if json_output {
                println!("{}", serde_json::to_string_pretty(&entries)?);
            } else if entries.is_empty() {
                println!("Leaderboard is empty.");
            } else {
                println!(
                    "{:<4} {:<20} {:>8} {:>10} {:>12}",
                    "#", "User", "Points", "Days late", "Total"
                );
                println!("{}", "-".repeat(58));
                for (rank, entry) in entries.iter().enumerate() {
                    println!(
                        "{:<4} {:<20} {:>8} {:>10} {:>12.2}",
                        rank + 1,
                        entry.user,
                        entry.metrics.points,
                        entry.metrics.days_late,
                        entry.metrics.total_amount
                    );
                }
            }
        }

        Commands::Receipt {
            file,
            output,
            bill_id,
        } => {
            if !file.exists() {
                eprintln!("File not found: {:?}", file);
                std::process::exit(1);
            }

            let text = std::fs::read_to_string(&file)?;
            let lines = ReceiptParser::new()?.parse(&text);

            match &output {
                Some(path) => {
                    write_csv(&lines, std::fs::File::create(path)?)?;
                    eprintln!("Wrote {} rows to {:?}", lines.len(), path);
                }
                None => write_csv(&lines, std::io::stdout().lock())?,
            }

            if let Some(bill_id) = bill_id {
                let mut added = 0;
                for item in lines.iter().filter_map(|line| line.to_new_item()) {
                    add_item(&client, &cli.api_url, bill_id, &item).await?;
                    added += 1;
                }
                eprintln!("Added {} items to bill {}", added, bill_id);
            }
        }

        Commands::Config { output } => {
            let config = billswithfriends::config::generate_default_config();

            match output {
                Some(path) => {
                    if let Some(parent) = path.parent() {
                        std::fs::create_dir_all(parent)?;
                    }
                    std::fs::write(&path, &config)?;
                    println!("Config written to {:?}", path);
                }
                None => {
                    print!("{}", config);
                }
            }
        }
    }

    Ok(())
}

/// Send a request, exiting with a hint when the API is unreachable
async fn send(request: reqwest::RequestBuilder, api_url: &str) -> reqwest::Response {
    match request.send().await {
        Ok(response) => response,
        Err(e) => {
            eprintln!("Cannot connect to BillsWithFriends API at {}", api_url);
            eprintln!("Error: {}", e);
            eprintln!();
            eprintln!("Make sure the API server is running:");
            eprintln!("  cargo run --bin billswithfriends-api");
            std::process::exit(1);
        }
    }
}

/// Exit with the API's error message on a non-2xx status
async fn expect_success(
    response: reqwest::Response,
) -> anyhow::Result<reqwest::Response> {
    if response.status().is_success() {
        return Ok(response);
    }

    let status = response.status();
    let body: serde_json::Value = response.json().await.unwrap_or_default();
    let message = body["error"]["message"]
        .as_str()
        .unwrap_or_else(|| status.canonical_reason().unwrap_or("request failed"));
    eprintln!("Failed ({}): {}", status, message);
    std::process::exit(1);
}

async fn add_item(
    client: &reqwest::Client,
    api_url: &str,
    bill_id: RecordId,
    item: &NewItem,
) -> anyhow::Result<RecordId> {
    let response = send(
        client
            .post(format!("{}/bills/{}/items", api_url, bill_id))
            .json(item),
        api_url,
    )
    .await;
    let body: serde_json::Value = expect_success(response).await?.json().await?;
    Ok(body["item_id"].as_u64().unwrap_or(0))
}

fn print_bill_row(id: RecordId, bill: &Bill) {
    let total = bill
        .total()
        .map(|t| format!("{:.2}", t))
        .unwrap_or_else(|| "-".to_string());
    println!(
        "{:<6} {:<24} {:<16} {}",
        id,
        display_field(bill.get("name")),
        display_field(bill.get("user_id")),
        total
    );
}

/// Strings print bare; other JSON values print as JSON
fn display_field(value: Option<&serde_json::Value>) -> String {
    match value {
        Some(serde_json::Value::String(s)) => s.clone(),
        Some(serde_json::Value::Null) | None => "-".to_string(),
        Some(other) => other.to_string(),
    }
}
