//! Inventory entry commands.

use anyhow::{bail, Context as _, Result};
use chrono::{Local, NaiveDate};
use dialoguer::Confirm;
use shopfloor_commerce::EntryId;
use shopfloor_data::ApiClient;
use shopfloor_plant::inventory::{ENTRY_DELETE_FAILED, ENTRY_SAVE_FAILED};
use shopfloor_plant::wire::parse_date;
use shopfloor_plant::{InventoryEntry, InventoryEntryForm, InventoryService, SupplierService};

use super::suppliers::{failed, resolve_supplier};
use super::{EntryFields, InventoryArgs, InventoryCommand};
use crate::context::Context;

/// Run the inventory command.
pub async fn run(args: InventoryArgs, ctx: &Context) -> Result<()> {
    let client = ctx.session_client()?;
    let service = InventoryService::new(&client);
    let suppliers = SupplierService::new(&client);

    match args.command {
        InventoryCommand::List => list(&service, ctx).await,
        InventoryCommand::Show { id } => {
            let entry = service
                .get(&EntryId::parse(&id))
                .await
                .map_err(|e| failed(e, "could not load inventory entry"))?;
            print_entry(&entry, ctx);
            Ok(())
        }
        InventoryCommand::Add {
            product,
            quantity,
            fields,
        } => {
            let today = Local::now().date_naive();
            let mut form = InventoryEntryForm::new(product, quantity, today);
            apply_fields(&mut form, &fields)?;
            if let Some(supplier) = &fields.supplier {
                form.supplier_id = Some(resolve_supplier(&suppliers, supplier).await?);
            }
            add(&service, &form, ctx).await
        }
        InventoryCommand::Update {
            id,
            product,
            quantity,
            no_supplier,
            fields,
        } => {
            let id = EntryId::parse(&id);
            let current = service
                .get(&id)
                .await
                .map_err(|e| failed(e, "could not load inventory entry"))?;

            let mut form = current.details;
            if let Some(product) = product {
                form.product_name = product;
            }
            if let Some(quantity) = quantity {
                form.quantity = quantity;
            }
            apply_fields(&mut form, &fields)?;
            if no_supplier {
                form.supplier_id = None;
            } else if let Some(supplier) = &fields.supplier {
                form.supplier_id = Some(resolve_supplier(&suppliers, supplier).await?);
            }
            update(&service, &id, &form, ctx).await
        }
        InventoryCommand::Delete { id, yes } => {
            delete(&service, &EntryId::parse(&id), yes, ctx).await
        }
    }
}

/// Parse a `YYYY-MM-DD` argument.
pub(crate) fn parse_date_arg(input: &str) -> Result<NaiveDate> {
    parse_date(input).with_context(|| format!("Invalid date '{}', expected YYYY-MM-DD", input))
}

/// Copy the date and comments over. Suppliers need a lookup and are
/// handled by the caller.
fn apply_fields(form: &mut InventoryEntryForm, fields: &EntryFields) -> Result<()> {
    if let Some(date) = &fields.date {
        form.received_on = Some(parse_date_arg(date)?);
    }
    if let Some(comments) = &fields.comments {
        form.comments = comments.clone();
    }
    Ok(())
}

async fn list<C: ApiClient>(service: &InventoryService<C>, ctx: &Context) -> Result<()> {
    let spinner = ctx.output.spinner("Loading inventory entries...");
    let result = service.list().await;
    spinner.finish_and_clear();
    let entries = result.map_err(|e| failed(e, "could not load inventory entries"))?;

    if ctx.output.is_json() {
        ctx.output.json(&entries);
        return Ok(());
    }

    if entries.is_empty() {
        ctx.output.info("No inventory entries");
        return Ok(());
    }

    ctx.output
        .header(&format!("Inventory entries ({})", entries.len()));
    let widths = [6, 28, 8, 12, 24];
    ctx.output
        .table_header(&["ID", "PRODUCT", "QTY", "RECEIVED", "SUPPLIER"], &widths);
    for entry in &entries {
        let d = &entry.details;
        ctx.output.table_row(
            &[
                &entry.id.to_string(),
                &d.product_name,
                &d.quantity.to_string(),
                &date_label(d.received_on),
                entry.supplier_name.as_deref().unwrap_or("N/A"),
            ],
            &widths,
        );
    }

    Ok(())
}

pub(crate) fn date_label(date: Option<NaiveDate>) -> String {
    date.map(|d| d.to_string()).unwrap_or_else(|| "-".to_string())
}

fn print_entry(entry: &InventoryEntry, ctx: &Context) {
    if ctx.output.is_json() {
        ctx.output.json(entry);
        return;
    }

    let d = &entry.details;
    ctx.output.header(&format!("Inventory entry {}", entry.id));
    ctx.output.kv("product", &d.product_name);
    ctx.output.kv("quantity", &d.quantity.to_string());
    ctx.output.kv("received", &date_label(d.received_on));
    let supplier = match (&entry.supplier_name, &d.supplier_id) {
        (Some(name), _) => name.clone(),
        (None, Some(id)) => id.to_string(),
        (None, None) => "N/A".to_string(),
    };
    ctx.output.kv("supplier", &supplier);
    ctx.output.kv("comments", &d.comments);
}

async fn add<C: ApiClient>(
    service: &InventoryService<C>,
    form: &InventoryEntryForm,
    ctx: &Context,
) -> Result<()> {
    let spinner = ctx.output.spinner("Saving inventory entry...");
    let result = service.create(form).await;
    spinner.finish_and_clear();
    let id = result.map_err(|e| failed(e, ENTRY_SAVE_FAILED))?;

    if ctx.output.is_json() {
        ctx.output.json(&serde_json::json!({ "created": true, "id": id }));
    } else {
        match id {
            Some(id) => ctx
                .output
                .success(&format!("Inventory entry created (id {})", id)),
            None => ctx.output.success("Inventory entry created"),
        }
    }
    Ok(())
}

async fn update<C: ApiClient>(
    service: &InventoryService<C>,
    id: &EntryId,
    form: &InventoryEntryForm,
    ctx: &Context,
) -> Result<()> {
    let spinner = ctx.output.spinner("Saving inventory entry...");
    let result = service.update(id, form).await;
    spinner.finish_and_clear();
    result.map_err(|e| failed(e, ENTRY_SAVE_FAILED))?;

    if ctx.output.is_json() {
        ctx.output.json(&serde_json::json!({ "updated": true, "id": id }));
    } else {
        ctx.output.success(&format!("Inventory entry {} updated", id));
    }
    Ok(())
}

async fn delete<C: ApiClient>(
    service: &InventoryService<C>,
    id: &EntryId,
    yes: bool,
    ctx: &Context,
) -> Result<()> {
    if !yes {
        if ctx.output.is_json() {
            bail!("Refusing to delete without --yes in JSON mode");
        }
        let confirmed = Confirm::new()
            .with_prompt(format!("Delete inventory entry {}?", id))
            .default(false)
            .interact()?;
        if !confirmed {
            ctx.output.info("Cancelled");
            return Ok(());
        }
    }

    service
        .delete(id)
        .await
        .map_err(|e| failed(e, ENTRY_DELETE_FAILED))?;

    if ctx.output.is_json() {
        ctx.output.json(&serde_json::json!({ "deleted": true, "id": id }));
    } else {
        ctx.output.success(&format!("Inventory entry {} deleted", id));
    }
    Ok(())
}
