use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

use statement_extractor::{
    extract, generate_summary, save_csv, save_summary, StatementRecord, DEFAULT_CSV_PATH,
    DEFAULT_SUMMARY_PATH,
};

#[derive(Parser, Debug)]
#[command(
    name = "statement-extractor",
    version,
    about = "Extract structured data from a retirement plan statement PDF"
)]
struct Cli {
    /// Statement PDF to extract. Omit to use the built-in sample data.
    pdf: Option<PathBuf>,

    /// Force the built-in sample data even when a PDF is given
    #[arg(long)]
    sample: bool,

    /// Destination for the Category/Field/Value table
    #[arg(long, default_value = DEFAULT_CSV_PATH)]
    csv_out: PathBuf,

    /// Destination for the prose summary
    #[arg(long, default_value = DEFAULT_SUMMARY_PATH)]
    summary_out: PathBuf,

    /// Print the record as JSON instead of the console report
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    pretty_env_logger::init();
    let cli = Cli::parse();

    let record = extract(cli.pdf.as_deref(), cli.sample);

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&record)?);
    } else {
        print_report(&record);

        println!("\n{}", "=".repeat(80));
        println!("PORTFOLIO PERFORMANCE & VESTING ANALYSIS");
        println!("{}", "=".repeat(80));
        println!("{}", generate_summary(&record));
    }

    let csv_ok = save_csv(&record, &cli.csv_out);
    let summary_ok = save_summary(&record, &cli.summary_out);

    if csv_ok && summary_ok {
        println!("\n✓ All files saved successfully");
        println!("  1. {} - complete structured data", cli.csv_out.display());
        println!("  2. {} - natural language summary", cli.summary_out.display());
    } else {
        println!("\n⚠ Some files may not have been saved properly");
    }

    Ok(())
}

/// Console report of every extracted field. Presentation only - the
/// extraction modules never print.
fn print_report(record: &StatementRecord) {
    println!("{}", "=".repeat(80));
    println!("EXTRACTED DATA SUMMARY");
    println!("{}", "=".repeat(80));

    println!("\nBASIC INFORMATION:");
    println!("  Account Holder: {}", record.account_holder_name);
    println!(
        "  Statement Period: {} to {}",
        record.statement_start_date, record.statement_end_date
    );

    println!("\nPORTFOLIO PERFORMANCE:");
    println!("  Beginning Balance: {}", record.beginning_balance);
    println!("  Ending Balance: {}", record.ending_balance);
    println!("  Total Gains/Loss: {}", record.total_gains_loss);
    println!("  Personal Rate of Return: {}", record.personal_rate_of_return);

    println!("\nCONTRIBUTIONS:");
    println!("  Employee Contributions: {}", record.employee_contributions);
    println!("  Employer Contributions: {}", record.employer_contributions);
    println!(
        "  Average Monthly Contribution: {}",
        record.average_monthly_contribution
    );

    println!("\nASSET ALLOCATION:");
    println!(
        "  Equities: {} ({})",
        record.equities_value, record.equities_percentage
    );
    println!(
        "  Fixed Income: {} ({})",
        record.fixed_income_value, record.fixed_income_percentage
    );
    println!(
        "  Multi-Asset: {} ({})",
        record.multi_asset_value, record.multi_asset_percentage
    );

    println!("\nVESTING STATUS:");
    println!("  {}", record.vesting_status);

    if !record.plan_entries.is_empty() {
        println!("\nPLAN BREAKDOWN:");
        for plan in &record.plan_entries {
            println!(
                "  Plan {}: {} - {}",
                plan.plan_number, plan.plan_type, plan.balance
            );
        }
    }

    println!("\nRETIREMENT PROJECTION:");
    println!(
        "  Estimated Monthly Income at Retirement: {}",
        record.estimated_monthly_income_at_retirement
    );

    println!("{}", "=".repeat(80));
}
