//! Production registration commands.

use anyhow::{anyhow, bail, Result};
use shopfloor_commerce::{EmployeeId, ItemId, MachineId};
use shopfloor_data::ApiClient;
use shopfloor_plant::production::{
    PICKERS_LOAD_FAILED, PRODUCTION_RECORDED, PRODUCTION_SAVE_FAILED,
};
use shopfloor_plant::{MachineStatus, ProductionRecorder, Shift};

use super::{ProductionArgs, ProductionCommand};
use crate::context::Context;

/// Run the production command.
pub async fn run(args: ProductionArgs, ctx: &Context) -> Result<()> {
    let mut recorder = ProductionRecorder::new(ctx.session_client()?);

    let spinner = ctx.output.spinner("Loading machines and products...");
    let loaded = recorder.load_pickers().await;
    spinner.finish_and_clear();
    loaded.map_err(|_| anyhow!(PICKERS_LOAD_FAILED))?;

    match args.command {
        ProductionCommand::Options => list_options(&recorder, ctx),
        ProductionCommand::Record {
            machine,
            product,
            quantity,
            hours,
            status,
            shift,
            description,
            employee,
        } => {
            let (machine_id, product_id) = resolve_pickers(&recorder, &machine, &product)?;
            let status: MachineStatus = status.parse().map_err(|e: String| anyhow!(e))?;
            let shift: Shift = shift.parse().map_err(|e: String| anyhow!(e))?;

            let form = recorder.form_mut();
            form.employee_id = EmployeeId::parse(&employee);
            form.machine_id = Some(machine_id.clone());
            form.product_id = Some(product_id.clone());
            form.quantity = Some(quantity);
            form.hours_worked = Some(hours);
            form.status = status;
            form.shift = shift;
            form.description = description;

            let spinner = ctx.output.spinner("Saving record...");
            let result = recorder.submit().await;
            spinner.finish_and_clear();
            result.map_err(|e| anyhow!(e.user_message(PRODUCTION_SAVE_FAILED)))?;

            if ctx.output.is_json() {
                ctx.output.json(&serde_json::json!({
                    "recorded": true,
                    "machine": machine_id,
                    "product": product_id,
                    "quantity": quantity,
                    "status": status,
                }));
            } else {
                ctx.output.success(&format!(
                    "{}: {} units on machine {} ({})",
                    PRODUCTION_RECORDED, quantity, machine_id, status
                ));
            }
            Ok(())
        }
    }
}

/// Match machine and product input against the loaded pickers.
fn resolve_pickers<C: ApiClient>(
    recorder: &ProductionRecorder<C>,
    machine: &str,
    product: &str,
) -> Result<(MachineId, ItemId)> {
    let Some(machine) = recorder.find_machine(machine) else {
        bail!("Machine {} is not on the machine list", machine.trim());
    };
    let Some(product) = recorder.products().find_by_input(product) else {
        bail!("Product {} is not in the catalog", product.trim());
    };
    Ok((machine.id.clone(), product.id.clone()))
}

fn list_options<C: ApiClient>(recorder: &ProductionRecorder<C>, ctx: &Context) -> Result<()> {
    if ctx.output.is_json() {
        ctx.output.json(&serde_json::json!({
            "machines": recorder.machines(),
            "products": recorder.products().items(),
            "statuses": MachineStatus::ALL,
        }));
        return Ok(());
    }

    let widths = [8, 32];
    ctx.output
        .header(&format!("Machines ({})", recorder.machines().len()));
    ctx.output.table_header(&["ID", "NAME"], &widths);
    for machine in recorder.machines() {
        ctx.output
            .table_row(&[&machine.id.to_string(), &machine.name], &widths);
    }

    ctx.output
        .header(&format!("Products ({})", recorder.products().len()));
    ctx.output.table_header(&["ID", "NAME"], &widths);
    for item in recorder.products().items() {
        ctx.output.table_row(&[&item.id.to_string(), &item.name], &widths);
    }

    let statuses: Vec<&str> = MachineStatus::ALL.iter().map(|s| s.as_str()).collect();
    ctx.output.kv("statuses", &statuses.join(", "));
    Ok(())
}
