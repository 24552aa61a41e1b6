//! Demo of the order desk: a small menu, one cart checked out as a dine-in order, the order
//! walked through the kitchen, and the resulting statistics printed as a report and as CSV.
//!
//! Usage: `order-desk [--config order-desk.toml]`

use clap::Parser;
use order_desk::cart_actor::CheckoutDetails;
use order_desk::config::SystemConfig;
use order_desk::lifecycle::{setup_tracing, OrderSystem};
use order_desk::model::{
    CartCreate, MenuItemCreate, OrderStatus, OrderType, StaffCredential, StaffRole,
};
use order_desk::stats::{render_report, workbook};
use rust_decimal::Decimal;
use std::path::PathBuf;
use tracing::{error, info, Instrument};

/// Walks one dine-in order from the menu to the statistics report.
#[derive(Parser)]
#[command(name = "order-desk", version)]
struct Cli {
    /// TOML configuration file; defaults apply when omitted
    #[arg(short, long)]
    config: Option<PathBuf>,
}

fn dish(name: &str, cents: i64, category: &str) -> MenuItemCreate {
    MenuItemCreate {
        name: name.to_string(),
        price: Decimal::new(cents, 2),
        description: String::new(),
        category: category.to_string(),
    }
}

#[tokio::main]
async fn main() -> Result<(), String> {
    let cli = Cli::parse();
    setup_tracing();

    let config = match &cli.config {
        Some(path) => SystemConfig::load(path).map_err(|e| e.to_string())?,
        None => SystemConfig::default(),
    };
    info!(?config, "Starting order desk");

    let system = OrderSystem::from_config(config);

    let span = tracing::info_span!("menu_setup");
    let (soup, steak, lemonade) = async {
        let menu = &system.menu_client;
        let soup = menu.create_menu_item(dish("Tomato soup", 650, "starters")).await?;
        let steak = menu.create_menu_item(dish("Ribeye steak", 2400, "mains")).await?;
        let lemonade = menu.create_menu_item(dish("Lemonade", 350, "drinks")).await?;
        Ok::<_, order_desk::menu_actor::MenuError>((soup, steak, lemonade))
    }
    .instrument(span)
    .await
    .map_err(|e| e.to_string())?;

    let span = tracing::info_span!("cart");
    let order_id = async {
        let cart = system
            .cart_client
            .open_cart(CartCreate {
                customer: Some("Ada".to_string()),
                ..Default::default()
            })
            .await
            .map_err(|e| e.to_string())?;
        let manager = system.cart_client.manager(cart);
        let menu = &system.menu_client;

        for (item, quantity) in [(soup, 2), (steak, 1), (lemonade, 2), (soup, 1)] {
            let line = menu.line_item(item, quantity).await.map_err(|e| e.to_string())?;
            manager.add(line).await.map_err(|e| e.to_string())?;
        }
        manager
            .update_instructions(steak, "medium rare")
            .await
            .map_err(|e| e.to_string())?;
        manager
            .update_quantity(lemonade, 1)
            .await
            .map_err(|e| e.to_string())?;

        let total = manager.calculate_total().await.map_err(|e| e.to_string())?;
        info!(%total, "Cart ready");

        let order_id = manager
            .checkout(CheckoutDetails {
                customer: "Ada".to_string(),
                order_type: OrderType::DineIn,
                table_number: Some(4),
            })
            .await
            .map_err(|e| e.to_string())?;
        system
            .cart_client
            .close_cart(cart)
            .await
            .map_err(|e| e.to_string())?;
        Ok::<_, String>(order_id)
    }
    .instrument(span)
    .await?;

    let waiter = StaffCredential::new("waiter-1", StaffRole::Waiter);
    let chef = StaffCredential::new("chef-1", StaffRole::Kitchen);
    let steps = [
        (&waiter, OrderStatus::Confirmed),
        (&chef, OrderStatus::Preparing),
        (&chef, OrderStatus::Ready),
        (&waiter, OrderStatus::Served),
    ];
    let span = tracing::info_span!("kitchen", order = %order_id);
    async {
        for (staff, status) in steps {
            if let Err(e) = system.order_client.update_status(staff, order_id, status).await {
                error!(error = %e, "Status change rejected");
            }
        }
    }
    .instrument(span)
    .await;

    let stats = system.stats().await.map_err(|e| e.to_string())?;
    println!("{}", render_report(&stats));
    for sheet in workbook(&stats) {
        println!("# {}\n{}", sheet.name, sheet.to_csv());
    }

    system.shutdown().await?;
    info!("Order desk stopped");
    Ok(())
}
