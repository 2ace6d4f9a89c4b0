//! Supplier management commands.

use anyhow::{bail, Context as _, Result};
use dialoguer::Confirm;
use shopfloor_commerce::SupplierId;
use shopfloor_data::ApiClient;
use shopfloor_plant::suppliers::{find_supplier, SUPPLIER_DELETE_FAILED, SUPPLIER_SAVE_FAILED};
use shopfloor_plant::{PlantError, Supplier, SupplierForm, SupplierService};

use super::{SupplierFields, SuppliersArgs, SuppliersCommand};
use crate::context::Context;

/// Run the suppliers command.
pub async fn run(args: SuppliersArgs, ctx: &Context) -> Result<()> {
    let service = SupplierService::new(ctx.session_client()?);

    match args.command {
        SuppliersCommand::List => list(&service, ctx).await,
        SuppliersCommand::Show { id } => show(&service, &SupplierId::parse(&id), ctx).await,
        SuppliersCommand::Add { name, fields } => {
            let form = apply_fields(SupplierForm::new(name), fields);
            add(&service, &form, ctx).await
        }
        SuppliersCommand::Update { id, name, fields } => {
            update(&service, &SupplierId::parse(&id), name, fields, ctx).await
        }
        SuppliersCommand::Delete { id, yes } => {
            delete(&service, &SupplierId::parse(&id), yes, ctx).await
        }
    }
}

fn apply_fields(mut form: SupplierForm, fields: SupplierFields) -> SupplierForm {
    if let Some(contact) = fields.contact {
        form.contact = contact;
    }
    if let Some(phone) = fields.phone {
        form.phone = phone;
    }
    if let Some(email) = fields.email {
        form.email = email;
    }
    if let Some(address) = fields.address {
        form.address = address;
    }
    form
}

pub(crate) fn failed(error: PlantError, fallback: &str) -> anyhow::Error {
    anyhow::anyhow!(error.user_message(fallback))
}

/// Match operator input against the supplier list.
pub(crate) async fn resolve_supplier<C: ApiClient>(
    service: &SupplierService<C>,
    input: &str,
) -> Result<SupplierId> {
    let suppliers = service
        .list()
        .await
        .map_err(|e| failed(e, "could not load suppliers"))?;
    find_supplier(&suppliers, input)
        .map(|s| s.id.clone())
        .with_context(|| format!("Supplier {} does not exist", input.trim()))
}

async fn list<C: ApiClient>(service: &SupplierService<C>, ctx: &Context) -> Result<()> {
    let spinner = ctx.output.spinner("Loading suppliers...");
    let result = service.list().await;
    spinner.finish_and_clear();
    let suppliers = result.map_err(|e| failed(e, "could not load suppliers"))?;

    if ctx.output.is_json() {
        ctx.output.json(&suppliers);
        return Ok(());
    }

    if suppliers.is_empty() {
        ctx.output.info("No suppliers");
        return Ok(());
    }

    ctx.output.header(&format!("Suppliers ({})", suppliers.len()));
    let widths = [6, 28, 20, 16, 28];
    ctx.output
        .table_header(&["ID", "NAME", "CONTACT", "PHONE", "EMAIL"], &widths);
    for supplier in &suppliers {
        let d = &supplier.details;
        ctx.output.table_row(
            &[&supplier.id.to_string(), &d.name, &d.contact, &d.phone, &d.email],
            &widths,
        );
    }

    Ok(())
}

async fn show<C: ApiClient>(
    service: &SupplierService<C>,
    id: &SupplierId,
    ctx: &Context,
) -> Result<()> {
    let supplier = service
        .get(id)
        .await
        .map_err(|e| failed(e, "could not load supplier"))?;
    print_supplier(&supplier, ctx);
    Ok(())
}

fn print_supplier(supplier: &Supplier, ctx: &Context) {
    if ctx.output.is_json() {
        ctx.output.json(supplier);
        return;
    }

    let d = &supplier.details;
    ctx.output.header(&format!("Supplier {}", supplier.id));
    ctx.output.kv("name", &d.name);
    ctx.output.kv("contact", &d.contact);
    ctx.output.kv("phone", &d.phone);
    ctx.output.kv("email", &d.email);
    ctx.output.kv("address", &d.address);
}

async fn add<C: ApiClient>(
    service: &SupplierService<C>,
    form: &SupplierForm,
    ctx: &Context,
) -> Result<()> {
    let spinner = ctx.output.spinner("Saving supplier...");
    let result = service.create(form).await;
    spinner.finish_and_clear();
    let id = result.map_err(|e| failed(e, SUPPLIER_SAVE_FAILED))?;

    if ctx.output.is_json() {
        ctx.output.json(&serde_json::json!({ "created": true, "id": id }));
    } else {
        match id {
            Some(id) => ctx.output.success(&format!("Supplier created (id {})", id)),
            None => ctx.output.success("Supplier created"),
        }
    }
    Ok(())
}

async fn update<C: ApiClient>(
    service: &SupplierService<C>,
    id: &SupplierId,
    name: Option<String>,
    fields: SupplierFields,
    ctx: &Context,
) -> Result<()> {
    let current = service
        .get(id)
        .await
        .map_err(|e| failed(e, "could not load supplier"))?;

    let mut form = apply_fields(current.details, fields);
    if let Some(name) = name {
        form.name = name;
    }

    let spinner = ctx.output.spinner("Saving supplier...");
    let result = service.update(id, &form).await;
    spinner.finish_and_clear();
    result.map_err(|e| failed(e, SUPPLIER_SAVE_FAILED))?;

    if ctx.output.is_json() {
        ctx.output.json(&serde_json::json!({ "updated": true, "id": id }));
    } else {
        ctx.output.success(&format!("Supplier {} updated", id));
    }
    Ok(())
}

async fn delete<C: ApiClient>(
    service: &SupplierService<C>,
    id: &SupplierId,
    yes: bool,
    ctx: &Context,
) -> Result<()> {
    if !yes {
        if ctx.output.is_json() {
            bail!("Refusing to delete without --yes in JSON mode");
        }
        let confirmed = Confirm::new()
            .with_prompt(format!("Delete supplier {} and its delivery estimates?", id))
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
        .map_err(|e| failed(e, SUPPLIER_DELETE_FAILED))?;

    if ctx.output.is_json() {
        ctx.output.json(&serde_json::json!({ "deleted": true, "id": id }));
    } else {
        ctx.output.success(&format!("Supplier {} deleted", id));
    }
    Ok(())
}
