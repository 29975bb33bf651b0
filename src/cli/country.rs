use super::{settle_with_spinner, ui};
use crate::core::config::AppConfig;
use crate::core::{Country, PreferenceStore};
use crate::session::PricingSession;
use anyhow::{Context, Result};
use std::sync::Arc;

/// Persists `select` when given, otherwise shows the resolved country.
pub async fn run(
    config: &AppConfig,
    preferences: Arc<dyn PreferenceStore>,
    select: Option<Country>,
) -> Result<()> {
    if let Some(country) = select {
        preferences
            .save_country(country)
            .with_context(|| format!("Failed to save country {country}"))?;
        println!(
            "{} {} ({})",
            ui::style_text("Country set to", ui::StyleType::Label),
            ui::style_text(country.code(), ui::StyleType::Value),
            country.currency_code()
        );
        return Ok(());
    }

    let session = PricingSession::from_config(config, preferences, None).await?;
    let ctx = settle_with_spinner(&session).await?;

    println!("{}", super::price::context_summary(&ctx));
    let details = format!(
        "{} · currency {} {}",
        session.origin(),
        ctx.currency_code(),
        ctx.country().currency_symbol()
    );
    println!("{}", ui::style_text(&details, ui::StyleType::Subtle));
    Ok(())
}
