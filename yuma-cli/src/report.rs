//! Terminal summary report
use itertools::Itertools;
use yuma::prelude::{AlmanacTable, Anomaly};

/// Prints a human readable summary of this almanac
pub fn summary(table: &AlmanacTable) {
    match table.date {
        Some(date) => println!(
            "[{}] YUMA almanac, week {} (full GPS week {})",
            date,
            table.week().unwrap_or_default(),
            date.gps_week(),
        ),
        None => println!(
            "[unknown date] YUMA almanac, week {}",
            table.week().unwrap_or_default()
        ),
    }

    println!(
        "  {} satellite(s) ({} healthy): {}",
        table.len(),
        table.healthy().count(),
        table.iter().map(|r| r.sv()).join(", ")
    );

    let unhealthy = table
        .iter()
        .filter(|r| !r.is_healthy())
        .map(|r| format!("{} (0x{:02X})", r.sv(), r.health.bits()))
        .join(", ");
    if !unhealthy.is_empty() {
        println!("  unhealthy: {}", unhealthy);
    }

    for error in table.errors.iter() {
        println!("  skipped {}", error);
    }

    let duplicates = table
        .anomalies
        .iter()
        .filter(|a| matches!(a, Anomaly::DuplicatePrn { .. }))
        .count();
    if duplicates > 0 {
        println!("  {} duplicated PRN(s)", duplicates);
    }
    for anomaly in table
        .anomalies
        .iter()
        .filter(|a| !matches!(a, Anomaly::DuplicatePrn { .. }))
    {
        println!("  {}", anomaly);
    }
}
