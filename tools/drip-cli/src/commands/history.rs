//! Purchase history display.

use anyhow::Result;
use drip_commerce::checkout::Order;
use drip_commerce::ledger::OrderLedger;
use drip_commerce::UserId;
use drip_data::DATE_FORMAT;

use super::HistoryArgs;
use crate::context::Context;
use crate::output::Output;

/// Run the history command.
pub fn run(args: HistoryArgs, ctx: &Context) -> Result<()> {
    let ledger = ctx.ledger()?;
    let orders = ledger.history(&UserId::new(args.username.as_str()))?;

    if ctx.output.is_json() {
        ctx.output.json(&orders);
        return Ok(());
    }

    ctx.output.header(&format!("Purchase history of {}", args.username));
    render(&orders, &ctx.output);
    Ok(())
}

/// Render a list of orders, oldest first.
pub fn render(orders: &[Order], output: &Output) {
    if orders.is_empty() {
        output.warn("No previous shopping history.");
        return;
    }

    for order in orders {
        output.info(&format!(
            "{} | total {}",
            order.placed_at.format(DATE_FORMAT),
            order.total
        ));
        for line in &order.line_items {
            output.list_item(&format!(
                "{} - {} x {}",
                line.title, line.unit_price, line.quantity
            ));
        }
        output.kv("Shipping address", &order.shipping_address.one_line());
        if let Some(payment) = order.payment_method {
            output.kv("Payment", payment.as_str());
        }
    }
}
