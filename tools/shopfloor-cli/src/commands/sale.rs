//! Sale composition from the command line.

use std::str::FromStr;

use anyhow::{bail, Result};
use dialoguer::Confirm;
use shopfloor_commerce::catalog::CatalogCache;
use shopfloor_commerce::checkout::{Notification, SALE_FAILED};
use shopfloor_commerce::pos::CATALOG_LOAD_FAILED;
use shopfloor_commerce::sale::{SalePricing, QUANTITY_CHOICES};
use shopfloor_commerce::{ItemId, PointOfSale};

use super::SaleArgs;
use crate::context::Context;

/// One `--item` argument: an item id as typed and the quantity to sell.
///
/// The id stays raw text until it is matched against the catalog, which
/// may serve `12` as a number or as a string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemSpec {
    pub input: String,
    pub quantity: u32,
}

impl FromStr for ItemSpec {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let (id, quantity) = match s.rsplit_once(':') {
            Some((id, qty)) => match qty.trim().parse::<u32>() {
                Ok(qty) => (id, qty),
                Err(_) => (s, 1),
            },
            None => (s, 1),
        };

        if id.trim().is_empty() {
            return Err("item id is empty".to_string());
        }
        if !QUANTITY_CHOICES.contains(&quantity) {
            return Err(format!(
                "quantity must be between {} and {}",
                QUANTITY_CHOICES.start(),
                QUANTITY_CHOICES.end()
            ));
        }

        Ok(Self {
            input: id.trim().to_string(),
            quantity,
        })
    }
}

/// Match every `--item` against the loaded catalog, keeping argument order.
fn resolve_items(catalog: &CatalogCache, specs: &[ItemSpec]) -> Result<Vec<(ItemId, u32)>> {
    specs
        .iter()
        .map(|spec| match catalog.find_by_input(&spec.input) {
            Some(item) => Ok((item.id.clone(), spec.quantity)),
            None => bail!("Item {} is not in the catalog", spec.input),
        })
        .collect()
}

/// Run the sale command.
pub async fn run(args: SaleArgs, ctx: &Context) -> Result<()> {
    let client = ctx.session_client()?;
    let mut pos = PointOfSale::new(client);

    let spinner = ctx.output.spinner("Loading catalog...");
    let entered = pos.enter().await;
    spinner.finish_and_clear();
    if entered.is_err() {
        bail!(last_message(pos.take_notifications(), CATALOG_LOAD_FAILED));
    }

    pos.set_customer_name(args.customer);
    pos.set_customer_phone(args.phone);

    for (id, quantity) in resolve_items(pos.catalog(), &args.items)? {
        if !pos.add_item(&id) {
            ctx.output
                .warn(&format!("Item {} is already in the sale; ignoring", id));
            continue;
        }
        pos.set_quantity(&id, quantity);
    }

    let pricing = pos.pricing();
    print_pricing(ctx, &pos.sale().customer.name, &pricing);

    let pending = match pos.prepare_submission() {
        Ok(pending) => pending,
        Err(e) => bail!(e),
    };

    if args.dry_run {
        if ctx.output.is_json() {
            ctx.output.json(pending.payload());
        } else {
            ctx.output.info("Dry run: sale not recorded");
        }
        return Ok(());
    }

    if !args.yes && !ctx.output.is_json() {
        let confirmed = Confirm::new()
            .with_prompt(format!("Record this sale for {}?", pricing.total))
            .default(true)
            .interact()?;
        if !confirmed {
            ctx.output.info("Sale not recorded");
            return Ok(());
        }
    }

    let spinner = ctx.output.spinner("Recording sale...");
    let outcome = pending.dispatch(pos.client()).await;
    spinner.finish_and_clear();

    let completed = pos.complete_submission(outcome);
    let notifications = pos.take_notifications();
    if completed.is_err() {
        bail!(last_message(notifications, SALE_FAILED));
    }

    if ctx.output.is_json() {
        ctx.output.json(&serde_json::json!({
            "recorded": true,
            "sale": pending.payload(),
        }));
    } else {
        for notification in &notifications {
            ctx.output.notification(notification);
        }
    }

    Ok(())
}

fn last_message(notifications: Vec<Notification>, fallback: &str) -> String {
    notifications
        .into_iter()
        .last()
        .map(|n| n.message)
        .unwrap_or_else(|| fallback.to_string())
}

fn print_pricing(ctx: &Context, customer: &str, pricing: &SalePricing) {
    if ctx.output.is_json() {
        return;
    }

    ctx.output.header(&format!("Sale for {}", customer.trim()));
    let widths = [8, 28, 10, 5, 12];
    ctx.output
        .table_header(&["ID", "ITEM", "PRICE", "QTY", "SUBTOTAL"], &widths);
    for line in &pricing.lines {
        ctx.output.table_row(
            &[
                &line.item_id.to_string(),
                &line.name,
                &line.unit_price.to_string(),
                &line.quantity.to_string(),
                &line.subtotal.to_string(),
            ],
            &widths,
        );
    }
    ctx.output.kv("Total", &pricing.total.to_string());
}
