use super::{settle_with_spinner, ui};
use crate::pricing::PriceContext;
use crate::session::PricingSession;
use anyhow::Result;
use comfy_table::Cell;

/// One-line description of the context: country, currency and rate origin.
pub fn context_summary(ctx: &PriceContext) -> String {
    let rate = if ctx.uses_base_currency() {
        "prices shown in base currency".to_string()
    } else {
        format!(
            "1 {} = {} {} ({:?})",
            ctx.base().currency_code(),
            ctx.rate().value(),
            ctx.currency_code(),
            ctx.rate().source()
        )
    };
    format!(
        "{} {} {} {}",
        ui::style_text("Country:", ui::StyleType::Label),
        ui::style_text(
            &format!("{} ({})", ctx.country(), ctx.country().locale()),
            ui::StyleType::Value
        ),
        ui::style_text("·", ui::StyleType::Subtle),
        rate
    )
}

pub fn price_table(ctx: &PriceContext, amounts: &[f64]) -> String {
    let mut table = ui::new_styled_table();
    table.set_header(vec![
        ui::header_cell(&format!("Price ({})", ctx.base().currency_code())),
        ui::header_cell(&format!("Converted ({})", ctx.currency_code())),
        ui::header_cell("Display"),
        ui::header_cell("Rate"),
    ]);

    for amount in amounts {
        table.add_row(vec![
            ui::amount_cell(&format!("{amount:.2}")),
            ui::amount_cell(&format!("{:.2}", ctx.convert(*amount))),
            Cell::new(ctx.format_price(*amount)),
            ui::rate_source_cell(ctx.rate().source()),
        ]);
    }
    table.to_string()
}

pub async fn run(session: &PricingSession, amounts: &[f64]) -> Result<()> {
    let ctx = settle_with_spinner(session).await?;
    println!("{}", context_summary(&ctx));
    println!("{}", price_table(&ctx, amounts));
    Ok(())
}
