use super::{settle_with_spinner, ui};
use crate::checkout::WhatsAppCheckout;
use crate::core::config::AppConfig;
use crate::core::order::{Order, ShareableItem, load_yaml};
use crate::session::PricingSession;
use anyhow::Result;
use chrono::Local;
use std::path::Path;
use tracing::warn;

fn checkout_for(config: &AppConfig) -> WhatsAppCheckout {
    let checkout = WhatsAppCheckout::from_config(&config.whatsapp);
    if checkout.phone_number().is_empty() {
        warn!("No WhatsApp phone number configured, links will ask for a contact");
    }
    checkout
}

fn print_links(message: &str, web: &str, app: Option<&str>) {
    println!("{message}");
    ui::print_separator();
    println!("{}", ui::style_text("Send via WhatsApp", ui::StyleType::Title));
    println!("{} {}", ui::style_text("Web:", ui::StyleType::Label), web);
    if let Some(app) = app {
        println!("{} {}", ui::style_text("App:", ui::StyleType::Label), app);
    }
}

pub async fn run_order(
    config: &AppConfig,
    session: &PricingSession,
    order_path: &Path,
) -> Result<()> {
    let order: Order = load_yaml(order_path)?;
    if order.items.is_empty() {
        anyhow::bail!("Order in {} has no items", order_path.display());
    }

    let ctx = settle_with_spinner(session).await?;
    let checkout = checkout_for(config);
    let message = checkout.order_message(&order, &ctx, Local::now().naive_local());

    print_links(
        &message,
        checkout.web_url(&message)?.as_str(),
        Some(checkout.app_url(&message)?.as_str()),
    );
    Ok(())
}

pub async fn run_share(
    config: &AppConfig,
    session: &PricingSession,
    item_path: &Path,
) -> Result<()> {
    let item: ShareableItem = load_yaml(item_path)?;

    let ctx = settle_with_spinner(session).await?;
    let checkout = checkout_for(config);
    let message = checkout.item_message(&item, &ctx);

    print_links(&message, checkout.web_url(&message)?.as_str(), None);
    Ok(())
}
