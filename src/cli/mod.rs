//! Command implementations behind the `vitrina` binary

pub mod checkout;
pub mod country;
pub mod price;
pub mod setup;
pub mod ui;

use crate::pricing::PriceContext;
use crate::session::PricingSession;
use anyhow::Result;

/// Waits for the session's exchange rate with a spinner on screen.
pub async fn settle_with_spinner(session: &PricingSession) -> Result<PriceContext> {
    let ctx = session.context();
    if !ctx.rate().is_pending() {
        return Ok(ctx);
    }

    let spinner = ui::new_spinner(&format!(
        "Fetching {} -> {} exchange rate...",
        ctx.base().currency_code(),
        ctx.currency_code()
    ))?;
    let ctx = session.settled().await;
    spinner.finish_and_clear();
    Ok(ctx)
}
