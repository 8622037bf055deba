// Output rendering - flat category/field/value table and summary file

use anyhow::{Context, Result};
use std::path::Path;

use crate::record::StatementRecord;
use crate::summary::generate_summary;

/// Default output paths, matching the original report layout
pub const DEFAULT_CSV_PATH: &str = "statement_comprehensive.csv";
pub const DEFAULT_SUMMARY_PATH: &str = "portfolio_summary.txt";

// ============================================================================
// TABLE LAYOUT
// ============================================================================

/// Flatten a record into table rows, in the fixed category order:
/// Basic Info, Portfolio Balance, Asset Allocation, Performance, Vesting,
/// then (iff any plans exist) a blank separator row, the Plan Details
/// header, and one row per plan entry.
///
/// Scalar rows are three columns. The Plan Details header and entry rows
/// are four columns - an irregularity inherited from the report format
/// this tool replaces, preserved for downstream consumers.
pub fn to_rows(record: &StatementRecord) -> Vec<Vec<String>> {
    let scalar = |category: &str, field: &str, value: &str| {
        vec![category.to_string(), field.to_string(), value.to_string()]
    };

    let mut rows = vec![
        scalar("Basic Info", "Account Holder Name", &record.account_holder_name),
        scalar("Basic Info", "Statement Period Start", &record.statement_start_date),
        scalar("Basic Info", "Statement Period End", &record.statement_end_date),
        scalar("Portfolio Balance", "Beginning Balance", &record.beginning_balance),
        scalar("Portfolio Balance", "Ending Balance", &record.ending_balance),
        scalar("Portfolio Balance", "Total Portfolio Balance", &record.total_portfolio_balance),
        scalar("Asset Allocation", "Equities Value", &record.equities_value),
        scalar("Asset Allocation", "Equities Percentage", &record.equities_percentage),
        scalar("Asset Allocation", "Fixed Income Value", &record.fixed_income_value),
        scalar("Asset Allocation", "Fixed Income Percentage", &record.fixed_income_percentage),
        scalar("Asset Allocation", "Multi-Asset Value", &record.multi_asset_value),
        scalar("Asset Allocation", "Multi-Asset Percentage", &record.multi_asset_percentage),
        scalar("Performance", "Employee Contributions", &record.employee_contributions),
        scalar("Performance", "Employer Contributions", &record.employer_contributions),
        scalar("Performance", "Total Gains/Loss", &record.total_gains_loss),
        scalar("Performance", "Personal Rate of Return", &record.personal_rate_of_return),
        scalar("Performance", "Average Monthly Contribution", &record.average_monthly_contribution),
        scalar(
            "Performance",
            "Estimated Monthly Income at Retirement",
            &record.estimated_monthly_income_at_retirement,
        ),
        scalar("Vesting", "Vesting Status", &record.vesting_status),
    ];

    if !record.plan_entries.is_empty() {
        rows.push(vec![String::new(), String::new(), String::new()]);
        rows.push(vec![
            "Plan Details".to_string(),
            "Plan Number".to_string(),
            "Plan Type".to_string(),
            "Balance".to_string(),
        ]);
        for plan in &record.plan_entries {
            rows.push(vec![
                "Plan Details".to_string(),
                plan.plan_number.clone(),
                plan.plan_type.clone(),
                plan.balance.clone(),
            ]);
        }
    }

    rows
}

// ============================================================================
// FILE SINKS
// ============================================================================

fn try_save_csv(record: &StatementRecord, path: &Path) -> Result<()> {
    // flexible: the Plan Details block widens to four columns
    let mut writer = csv::WriterBuilder::new()
        .flexible(true)
        .from_path(path)
        .with_context(|| format!("Failed to create CSV file: {}", path.display()))?;

    writer.write_record(["Category", "Field", "Value"])?;
    for row in to_rows(record) {
        writer.write_record(&row)?;
    }
    writer
        .flush()
        .with_context(|| format!("Failed to flush CSV file: {}", path.display()))?;

    Ok(())
}

/// Write the table export. Failures are logged and reported as `false`,
/// never propagated - an unsaved file must not abort the run.
pub fn save_csv(record: &StatementRecord, path: &Path) -> bool {
    match try_save_csv(record, path) {
        Ok(()) => {
            log::info!("Table export saved to {}", path.display());
            true
        }
        Err(e) => {
            log::error!("Error saving CSV: {e:#}");
            false
        }
    }
}

fn try_save_summary(record: &StatementRecord, path: &Path) -> Result<()> {
    let summary = generate_summary(record);
    std::fs::write(path, summary)
        .with_context(|| format!("Failed to write summary file: {}", path.display()))?;
    Ok(())
}

/// Write the prose summary. Same contract as [`save_csv`].
pub fn save_summary(record: &StatementRecord, path: &Path) -> bool {
    match try_save_summary(record, path) {
        Ok(()) => {
            log::info!("Portfolio summary saved to {}", path.display());
            true
        }
        Err(e) => {
            log::error!("Error saving summary: {e:#}");
            false
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================
