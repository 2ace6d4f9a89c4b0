//! Machine fault commands.

use anyhow::{anyhow, bail, Context as _, Result};
use chrono::{DateTime, Local, NaiveDateTime, TimeZone, Utc};
use shopfloor_commerce::{EmployeeId, MachineId};
use shopfloor_data::ApiClient;
use shopfloor_plant::faults::{FAULT_REPORTED, FAULT_REPORT_FAILED, MACHINES_LOAD_FAILED};
use shopfloor_plant::{FaultReporter, Severity};

use super::{FaultsArgs, FaultsCommand};
use crate::context::Context;
use crate::output::severity_badge;

const INPUT_FORMATS: [&str; 4] = [
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
];

/// Run the faults command.
pub async fn run(args: FaultsArgs, ctx: &Context) -> Result<()> {
    let mut reporter = FaultReporter::new(ctx.session_client()?);

    let spinner = ctx.output.spinner("Loading machines...");
    let loaded = reporter.load_machines().await.map(|m| m.len());
    spinner.finish_and_clear();

    match args.command {
        FaultsCommand::Machines => {
            loaded.map_err(|_| anyhow!(MACHINES_LOAD_FAILED))?;
            list_machines(&reporter, ctx)
        }
        FaultsCommand::Report {
            machine,
            description,
            severity,
            at,
            employee,
        } => {
            if loaded.is_err() {
                ctx.output.warn(MACHINES_LOAD_FAILED);
            }

            let machine_id = resolve_machine(&reporter, loaded.is_ok(), &machine)?;

            let severity: Severity = severity.parse().map_err(|e: String| anyhow!(e))?;
            let reported_at = match at {
                Some(at) => parse_local_time(&at)?,
                None => Utc::now(),
            };

            let form = reporter.form_mut();
            form.employee_id = EmployeeId::parse(&employee);
            form.machine_id = Some(machine_id.clone());
            form.description = description;
            form.severity = severity;
            form.reported_at = Some(reported_at);

            let spinner = ctx.output.spinner("Sending report...");
            let result = reporter.submit().await;
            spinner.finish_and_clear();
            result.map_err(|e| anyhow!(e.user_message(FAULT_REPORT_FAILED)))?;

            if ctx.output.is_json() {
                ctx.output.json(&serde_json::json!({
                    "reported": true,
                    "machine": machine_id,
                    "severity": severity,
                }));
            } else {
                let name = reporter
                    .machine(&machine_id)
                    .map(|m| m.name.clone())
                    .unwrap_or_else(|| machine_id.to_string());
                ctx.output.success(&format!(
                    "{}: {} [{}]",
                    FAULT_REPORTED,
                    name,
                    severity_badge(severity.as_str())
                ));
            }
            Ok(())
        }
    }
}

/// Match operator input against the loaded machine list. Without a list
/// the id is sent as typed.
fn resolve_machine<C: ApiClient>(
    reporter: &FaultReporter<C>,
    loaded: bool,
    input: &str,
) -> Result<MachineId> {
    if !loaded {
        return Ok(MachineId::parse(input));
    }
    match reporter.find_machine(input) {
        Some(machine) => Ok(machine.id.clone()),
        None => bail!("Machine {} is not on the machine list", input.trim()),
    }
}

fn list_machines<C: ApiClient>(reporter: &FaultReporter<C>, ctx: &Context) -> Result<()> {
    if ctx.output.is_json() {
        ctx.output.json(&reporter.machines());
        return Ok(());
    }

    ctx.output
        .header(&format!("Machines ({})", reporter.machines().len()));
    let widths = [8, 32];
    ctx.output.table_header(&["ID", "NAME"], &widths);
    for machine in reporter.machines() {
        ctx.output
            .table_row(&[&machine.id.to_string(), &machine.name], &widths);
    }
    Ok(())
}

/// Parse an operator-entered local timestamp.
fn parse_local_time(input: &str) -> Result<DateTime<Utc>> {
    let input = input.trim();
    let naive = INPUT_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(input, format).ok())
        .with_context(|| format!("Invalid date '{}', expected YYYY-MM-DD HH:MM[:SS]", input))?;

    let local = Local
        .from_local_datetime(&naive)
        .earliest()
        .with_context(|| format!("'{}' does not exist in the local time zone", input))?;
    Ok(local.with_timezone(&Utc))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use shopfloor_data::{FakeClient, Method};
    use shopfloor_plant::faults::MACHINES_PATH;

    #[tokio::test]
    async fn test_resolve_machine_with_text_ids() {
        let fake = FakeClient::new();
        fake.reply_json(
            Method::Get,
            MACHINES_PATH,
            200,
            json!([{"id": "12", "nombre": "Prensa"}]),
        );
        let mut reporter = FaultReporter::new(&fake);
        reporter.load_machines().await.unwrap();

        let id = resolve_machine(&reporter, true, "12").unwrap();
        assert_eq!(id, MachineId::Text("12".to_string()));
        assert!(reporter.machine(&id).is_some());
        assert!(resolve_machine(&reporter, true, "13").is_err());
    }

    #[test]
    fn test_resolve_machine_without_list() {
        let reporter = FaultReporter::new(FakeClient::new());
        let id = resolve_machine(&reporter, false, "12").unwrap();
        assert_eq!(id, MachineId::Int(12));
    }

    #[test]
    fn test_parse_local_time_formats() {
        let a = parse_local_time("2024-03-09 14:05:00").unwrap();
        let b = parse_local_time("2024-03-09T14:05").unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_parse_local_time_matches_local_zone() {
        let parsed = parse_local_time("2024-06-01 08:30").unwrap();
        let local = parsed.with_timezone(&Local);
        assert_eq!(local.format("%Y-%m-%d %H:%M").to_string(), "2024-06-01 08:30");
    }

    #[test]
    fn test_parse_local_time_rejects_garbage() {
        assert!(parse_local_time("yesterday").is_err());
        assert!(parse_local_time("2024-13-01 10:00").is_err());
    }
}
