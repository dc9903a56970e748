//! Output formatting for CLI responses

use anyhow::Error;
use colored::Colorize;
use padlink_engine::{CanonicalReport, ControllerButtons, SlotSnapshot, TickSummary};
use serde::Serialize;
use serde_json::json;

use crate::error::CliError;

/// A supported controller seen during enumeration.
#[derive(Debug, Clone, Serialize)]
pub struct ListedController {
    pub family: padlink_engine::ControllerFamily,
    pub name: String,
    pub vendor_id: u16,
    pub product_id: u16,
    pub connection_type: padlink_engine::ConnectionType,
    pub path: String,
}

/// Print error in JSON format
pub fn print_error_json(error: &Error) {
    let error_json = json!({
        "success": false,
        "error": {
            "message": error.to_string(),
            "type": error_type_name(error)
        }
    });
    match serde_json::to_string_pretty(&error_json) {
        Ok(s) => println!("{s}"),
        Err(e) => eprintln!("Failed to format error as JSON: {e}"),
    }
}

/// Print error in human-readable format
pub fn print_error_human(error: &Error) {
    eprintln!("{} {}", "Error:".red().bold(), error);

    let mut source = error.source();
    while let Some(err) = source {
        eprintln!("  {} {}", "Caused by:".yellow(), err);
        source = err.source();
    }
}

fn error_type_name(error: &Error) -> &'static str {
    match error.downcast_ref::<CliError>() {
        Some(CliError::NoControllers) => "no_controllers",
        Some(CliError::InvalidConfiguration(_)) => "invalid_configuration",
        Some(CliError::ConfigExists(_)) => "config_exists",
        Some(CliError::TransportUnavailable(_)) => "transport_unavailable",
        None => "error",
    }
}

pub fn print_controller_list(controllers: &[ListedController], json: bool) {
    if json {
        let output = json!({
            "success": true,
            "controllers": controllers
        });
        match serde_json::to_string_pretty(&output) {
            Ok(s) => println!("{s}"),
            Err(e) => eprintln!("Failed to format controller list as JSON: {e}"),
        }
        return;
    }

    if controllers.is_empty() {
        println!("{}", "No supported controllers found".yellow());
        return;
    }

    println!("{}", "Connected Controllers:".bold());
    for controller in controllers {
        println!(
            "  {} {} ({:04x}:{:04x}, {})",
            "●".green(),
            controller.family.name().bold(),
            controller.vendor_id,
            controller.product_id,
            controller.connection_type
        );
        println!("    {}", controller.path.dimmed());
    }
}

/// `A|B|DPAD_UP`, or `-` when nothing is held.
pub fn format_buttons(buttons: ControllerButtons) -> String {
    let names: Vec<&str> = buttons.iter_names().map(|(name, _)| name).collect();
    if names.is_empty() {
        "-".to_string()
    } else {
        names.join("|")
    }
}

pub fn format_report(report: &CanonicalReport) -> String {
    format!(
        "buttons={} L=({:+.2},{:+.2}) R=({:+.2},{:+.2}) LT={:.2} RT={:.2}",
        format_buttons(report.buttons),
        report.left_stick_x,
        report.left_stick_y,
        report.right_stick_x,
        report.right_stick_y,
        report.left_trigger,
        report.right_trigger
    )
}

pub fn print_snapshot(tick: u64, snapshot: &SlotSnapshot, json: bool) {
    if json {
        let line = json!({
            "tick": tick,
            "family": snapshot.family,
            "port": snapshot.port,
            "report": snapshot.report,
        });
        println!("{line}");
        return;
    }

    let pressed = snapshot.report.pressed(&snapshot.last_report);
    let released = snapshot.report.released(&snapshot.last_report);
    let mut line = format!(
        "[{tick:>6}] {}#{} {}",
        snapshot.family.name().cyan(),
        snapshot.port,
        format_report(&snapshot.report)
    );
    if !pressed.is_empty() {
        line.push_str(&format!(" +{}", format_buttons(pressed)).green().to_string());
    }
    if !released.is_empty() {
        line.push_str(&format!(" -{}", format_buttons(released)).red().to_string());
    }
    println!("{line}");
}

pub fn print_watch_summary(ticks: u64, totals: &TickSummary, json: bool) {
    if json {
        println!("{}", json!({ "ticks": ticks, "totals": totals }));
        return;
    }
    println!(
        "{} {} ticks, {} polls ({} ok, {} timed out, {} skipped, {} removed)",
        "Stopped:".bold(),
        ticks,
        totals.polled,
        totals.succeeded,
        totals.timed_out,
        totals.skipped,
        totals.removed
    );
}
