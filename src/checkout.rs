//! Checkout over WhatsApp: order and item-share messages plus the links that carry them.
//!
//! Unit prices go through the display pipeline once; subtotals and the total are
//! sums of the displayed unit prices so the message always adds up.

use crate::core::config::WhatsAppConfig;
use crate::core::order::{Order, ShareableItem};
use crate::pricing::PriceContext;
use anyhow::{Context, Result};
use chrono::NaiveDateTime;
use url::Url;

const DATE_FORMAT: &str = "%d/%m/%Y, %H:%M:%S";

pub struct WhatsAppCheckout {
    phone_number: String,
    store_name: String,
}

impl WhatsAppCheckout {
    /// Keeps only the digits of `phone_number`, as the WhatsApp links expect.
    pub fn new(phone_number: &str, store_name: &str) -> Self {
        Self {
            phone_number: phone_number.chars().filter(char::is_ascii_digit).collect(),
            store_name: store_name.to_string(),
        }
    }

    pub fn from_config(config: &WhatsAppConfig) -> Self {
        Self::new(&config.phone_number, &config.store_name)
    }

    pub fn phone_number(&self) -> &str {
        &self.phone_number
    }

    pub fn order_message(
        &self,
        order: &Order,
        ctx: &PriceContext,
        placed_at: NaiveDateTime,
    ) -> String {
        let mut message = format!("*NUEVO PEDIDO - {}*\n\n", self.store_name);

        message.push_str("*Productos:*\n");
        let mut total = 0.0;
        for (index, item) in order.items.iter().enumerate() {
            let unit = ctx.display_amount(item.price);
            let subtotal = unit * f64::from(item.quantity);
            total += subtotal;

            message.push_str(&format!("{}. *{}*\n", index + 1, item.name));
            message.push_str(&format!("   Cantidad: {}\n", item.quantity));
            message.push_str(&format!("   Precio: {}\n", ctx.format_amount(unit)));
            if let Some(sku) = &item.sku {
                message.push_str(&format!("   SKU: {sku}\n"));
            }
            message.push_str(&format!("   Subtotal: {}\n\n", ctx.format_amount(subtotal)));
        }
        message.push_str(&format!("*Total: {}*\n\n", ctx.format_amount(total)));

        message.push_str(&format!("*Cliente:* {}\n", order.customer_name));
        if let Some(phone) = &order.customer_phone {
            message.push_str(&format!("*Teléfono:* {phone}\n"));
        }
        if let Some(email) = &order.customer_email {
            message.push_str(&format!("*Email:* {email}\n"));
        }
        message.push('\n');

        if let Some(address) = &order.shipping_address {
            message.push_str("*Dirección de Envío:*\n");
            message.push_str(&format!("{}\n", address.street));
            message.push_str(&format!(
                "{}, {} {}\n",
                address.city, address.state, address.zip_code
            ));
            message.push_str(&format!("{}\n\n", address.country));
        }

        if let Some(notes) = &order.notes {
            message.push_str(&format!("*Notas:* {notes}\n\n"));
        }

        message.push_str(&format!("*Fecha:* {}\n", placed_at.format(DATE_FORMAT)));
        message
    }

    pub fn item_message(&self, item: &ShareableItem, ctx: &PriceContext) -> String {
        let mut message = format!("*{}* - {}\n\n", item.name, self.store_name);

        if let Some(description) = item.description.as_deref().filter(|d| !d.is_empty()) {
            message.push_str(&format!("{description}\n\n"));
        }

        message.push_str(&format!("*Precio:* {}\n", ctx.format_price(item.price)));

        if let (Some(compare), Some(discount)) = (item.compare_price, item.discount_percent()) {
            message.push_str(&format!(
                "*Precio regular:* ~{}~ ({discount}% OFF)\n",
                ctx.format_price(compare)
            ));
        }

        if let Some(collection) = &item.collection {
            message.push_str(&format!("*Colección:* {collection}\n"));
        }

        message.push_str("\n¿Te interesa? ¡Contáctanos para más información!");
        message
    }

    /// `https://wa.me/<phone>?text=<message>`, opens WhatsApp Web or the app.
    pub fn web_url(&self, message: &str) -> Result<Url> {
        Url::parse_with_params(
            &format!("https://wa.me/{}", self.phone_number),
            &[("text", message)],
        )
        .context("Failed to build WhatsApp web link")
    }

    /// `whatsapp://send?phone=<phone>&text=<message>`, for mobile apps.
    pub fn app_url(&self, message: &str) -> Result<Url> {
        Url::parse_with_params(
            "whatsapp://send",
            &[("phone", self.phone_number.as_str()), ("text", message)],
        )
        .context("Failed to build WhatsApp app link")
    }
}
