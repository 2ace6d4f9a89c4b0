//! Delivery estimate commands.

use anyhow::{bail, Result};
use dialoguer::Confirm;
use shopfloor_commerce::{EstimateId, SupplierId};
use shopfloor_data::ApiClient;
use shopfloor_plant::estimates::{ESTIMATE_DELETE_FAILED, ESTIMATE_SAVE_FAILED};
use shopfloor_plant::{Estimate, EstimateForm, EstimateService, SupplierService};

use super::inventory::{date_label, parse_date_arg};
use super::suppliers::{failed, resolve_supplier};
use super::{EstimatesArgs, EstimatesCommand};
use crate::context::Context;

/// Run the estimates command.
pub async fn run(args: EstimatesArgs, ctx: &Context) -> Result<()> {
    let client = ctx.session_client()?;
    let service = EstimateService::new(&client);
    let suppliers = SupplierService::new(&client);

    match args.command {
        EstimatesCommand::List { supplier } => {
            list(&service, &suppliers, &SupplierId::parse(&supplier), ctx).await
        }
        EstimatesCommand::Show { id } => {
            let estimate = service
                .get(&EstimateId::parse(&id))
                .await
                .map_err(|e| failed(e, "could not load delivery estimate"))?;
            print_estimate(&estimate, ctx);
            Ok(())
        }
        EstimatesCommand::Add {
            supplier,
            product,
            quantity,
            date,
            comments,
        } => {
            let supplier_id = resolve_supplier(&suppliers, &supplier).await?;
            let mut form =
                EstimateForm::new(supplier_id, product, quantity, parse_date_arg(&date)?);
            if let Some(comments) = comments {
                form.comments = comments;
            }
            add(&service, &form, ctx).await
        }
        EstimatesCommand::Update {
            id,
            supplier,
            product,
            quantity,
            date,
            comments,
        } => {
            let id = EstimateId::parse(&id);
            let current = service
                .get(&id)
                .await
                .map_err(|e| failed(e, "could not load delivery estimate"))?;

            let mut form = current.details;
            if let Some(supplier) = supplier {
                form.supplier_id = Some(resolve_supplier(&suppliers, &supplier).await?);
            }
            if let Some(product) = product {
                form.product_name = product;
            }
            if let Some(quantity) = quantity {
                form.quantity = quantity;
            }
            if let Some(date) = date {
                form.expected_on = Some(parse_date_arg(&date)?);
            }
            if let Some(comments) = comments {
                form.comments = comments;
            }
            update(&service, &id, &form, ctx).await
        }
        EstimatesCommand::Delete { id, yes } => {
            delete(&service, &EstimateId::parse(&id), yes, ctx).await
        }
    }
}

async fn list<C: ApiClient>(
    service: &EstimateService<C>,
    suppliers: &SupplierService<C>,
    supplier_id: &SupplierId,
    ctx: &Context,
) -> Result<()> {
    let spinner = ctx.output.spinner("Loading delivery estimates...");
    let supplier = suppliers.get(supplier_id).await;
    let estimates = match supplier {
        Ok(_) => Some(service.for_supplier(supplier_id).await),
        Err(_) => None,
    };
    spinner.finish_and_clear();

    let supplier = supplier.map_err(|e| failed(e, "could not load supplier"))?;
    let estimates = match estimates {
        Some(result) => result.map_err(|e| failed(e, "could not load delivery estimates"))?,
        None => Vec::new(),
    };

    if ctx.output.is_json() {
        ctx.output.json(&serde_json::json!({
            "supplier": supplier,
            "estimates": estimates,
        }));
        return Ok(());
    }

    ctx.output.header(&format!(
        "Delivery estimates for {} ({})",
        supplier.details.name,
        estimates.len()
    ));
    if estimates.is_empty() {
        ctx.output.info("No delivery estimates");
        return Ok(());
    }

    let widths = [6, 28, 8, 12, 28];
    ctx.output
        .table_header(&["ID", "PRODUCT", "QTY", "EXPECTED", "COMMENTS"], &widths);
    for estimate in &estimates {
        let d = &estimate.details;
        ctx.output.table_row(
            &[
                &estimate.id.to_string(),
                &d.product_name,
                &d.quantity.to_string(),
                &date_label(d.expected_on),
                &d.comments,
            ],
            &widths,
        );
    }

    Ok(())
}

fn print_estimate(estimate: &Estimate, ctx: &Context) {
    if ctx.output.is_json() {
        ctx.output.json(estimate);
        return;
    }

    let d = &estimate.details;
    ctx.output
        .header(&format!("Delivery estimate {}", estimate.id));
    let supplier = d
        .supplier_id
        .as_ref()
        .map(|id| id.to_string())
        .unwrap_or_else(|| "N/A".to_string());
    ctx.output.kv("supplier", &supplier);
    ctx.output.kv("product", &d.product_name);
    ctx.output.kv("quantity", &d.quantity.to_string());
    ctx.output.kv("expected", &date_label(d.expected_on));
    ctx.output.kv("comments", &d.comments);
}

async fn add<C: ApiClient>(
    service: &EstimateService<C>,
    form: &EstimateForm,
    ctx: &Context,
) -> Result<()> {
    let spinner = ctx.output.spinner("Saving delivery estimate...");
    let result = service.create(form).await;
    spinner.finish_and_clear();
    let id = result.map_err(|e| failed(e, ESTIMATE_SAVE_FAILED))?;

    if ctx.output.is_json() {
        ctx.output.json(&serde_json::json!({ "created": true, "id": id }));
    } else {
        match id {
            Some(id) => ctx
                .output
                .success(&format!("Delivery estimate created (id {})", id)),
            None => ctx.output.success("Delivery estimate created"),
        }
    }
    Ok(())
}

async fn update<C: ApiClient>(
    service: &EstimateService<C>,
    id: &EstimateId,
    form: &EstimateForm,
    ctx: &Context,
) -> Result<()> {
    let spinner = ctx.output.spinner("Saving delivery estimate...");
    let result = service.update(id, form).await;
    spinner.finish_and_clear();
    result.map_err(|e| failed(e, ESTIMATE_SAVE_FAILED))?;

    if ctx.output.is_json() {
        ctx.output.json(&serde_json::json!({ "updated": true, "id": id }));
    } else {
        ctx.output
            .success(&format!("Delivery estimate {} updated", id));
    }
    Ok(())
}

async fn delete<C: ApiClient>(
    service: &EstimateService<C>,
    id: &EstimateId,
    yes: bool,
    ctx: &Context,
) -> Result<()> {
    if !yes {
        if ctx.output.is_json() {
            bail!("Refusing to delete without --yes in JSON mode");
        }
        let confirmed = Confirm::new()
            .with_prompt(format!("Delete delivery estimate {}?", id))
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
        .map_err(|e| failed(e, ESTIMATE_DELETE_FAILED))?;

    if ctx.output.is_json() {
        ctx.output.json(&serde_json::json!({ "deleted": true, "id": id }));
    } else {
        ctx.output
            .success(&format!("Delivery estimate {} deleted", id));
    }
    Ok(())
}
