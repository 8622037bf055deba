// Field extraction - ordered pattern rules over the raw statement text
//
// Each field has its own chain of candidate patterns, tried in priority
// order against the full text buffer. First match wins; no match leaves
// the field at its placeholder. Chains are independent per field - this
// is pattern search over a known layout, not grammar parsing.

use once_cell::sync::Lazy;
use regex::Regex;
use std::path::Path;

use crate::pdf;
use crate::record::{sample_record, PlanEntry, StatementRecord};

// ============================================================================
// COMPILED PATTERNS
// ============================================================================

static NAME_LASTNAME: Lazy<Regex> = Lazy::new(|| Regex::new(r"LASTNAME\|([^|]+)").unwrap());
static NAME_FIRSTNAME: Lazy<Regex> = Lazy::new(|| Regex::new(r"FIRSTNAME\|([^|]+)").unwrap());
static NAME_LABELED: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"Account holder:\s*([A-Z\s-]+)").unwrap());

static PERIOD: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"For\s+([A-Za-z]+ \d+, \d{4})\s+to\s+([A-Za-z]+ \d+, \d{4})").unwrap());
static PERIOD_Q1_2021: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"January 1, 2021.*?March 31, 2021").unwrap());

static BALANCE_AS_OF: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"Your balance on [^:]+:\s*\$([0-9,]+\.\d{2})").unwrap());
static BALANCE_ENDING: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"Ending balance\s*\$([0-9,]+\.\d{2})").unwrap());
static BALANCE_BEGINNING: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"Beginning balance\s*\$([0-9,]+\.\d{2})").unwrap());

// Allocation table rows. Only the Equities row carries the dollar sign in
// this layout; the other two print the bare amount.
static ALLOC_EQUITIES: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"Equities\s*\$([0-9,]+\.\d{2})\s*([0-9.]+)%").unwrap());
static ALLOC_FIXED_INCOME: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"Fixed Income\s*([0-9,]+\.\d{2})\s*([0-9.]+)%").unwrap());
static ALLOC_MULTI_ASSET: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"Multi-Asset\s*([0-9,]+\.\d{2})\s*([0-9.]+)%").unwrap());

static EMPLOYEE_CONTRIB: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"Your contributions\s*([0-9,]+\.\d{2})").unwrap());
static EMPLOYER_CONTRIB: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"Employer contributions\s*([0-9,]+\.\d{2})").unwrap());
static GAINS_LOSS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"Gains/Loss\s*([0-9,]+\.\d{2})").unwrap());
static RATE_OF_RETURN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"Personal rate of return.*?([0-9.]+)%").unwrap());
static MONTHLY_INCOME: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"estimated monthly lifetime income of \$([0-9,]+\.\d{2})").unwrap());
static MONTHLY_CONTRIB: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"average monthly contribution of \$([0-9,]+\.\d{2})").unwrap());

// Vesting section excerpts. Each pattern captures up to the next section
// boundary (blank line or a new capitalized line, or the fixed headings
// that follow the vesting block in this layout).
static VESTING_SECTIONS: Lazy<Vec<Regex>> = Lazy::new(|| {
    vec![
        Regex::new(r"(?si)(What you have vested.*?)(?:Your investments|Total)").unwrap(),
        Regex::new(r"(?si)(vested percentage.*?)(?:\n\n|\n[A-Z])").unwrap(),
        Regex::new(r"(?si)(delayed vesting provision.*?)(?:\n\n|\n[A-Z])").unwrap(),
        Regex::new(r"(?si)(vesting rules.*?)(?:\n\n|\n[A-Z])").unwrap(),
    ]
});

// Generic "percent vested ... dollar amount" pairs, anywhere in the text
static VESTED_PERCENT_AMOUNT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\d+)%.*?\$([0-9,]+\.\d{2})").unwrap());

// One sub-plan block: number, one of the five fixed plan labels, then its
// balance line further down the block
static PLAN_ENTRY: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?s)(\d+)\s+(RETIREMENT PLAN|VOLUNTARY EMPLOYEE RETIREMENT PLAN|MATCHING PLAN|BASIC PLAN|SUPPLEMENTAL RETIREMENT ANNUITY PLAN).*?Balance as of Mar 31, 2021\s*\$([0-9,]+\.\d{2})",
    )
    .unwrap()
});

// ============================================================================
// PER-FIELD RULES
// ============================================================================

/// First rule: pipe-delimited name markers embedded in the statement's
/// data layer. Second rule: a labeled "Account holder:" line.
pub fn extract_account_holder_name(text: &str) -> Option<String> {
    let lastname = NAME_LASTNAME.captures(text);
    let firstname = NAME_FIRSTNAME.captures(text);

    if let (Some(last), Some(first)) = (lastname, firstname) {
        return Some(format!(
            "{} {}",
            first[1].trim(),
            last[1].trim()
        ));
    }

    NAME_LABELED
        .captures(text)
        .map(|caps| caps[1].trim().to_string())
}

/// Statement period as (start, end)
pub fn extract_statement_dates(text: &str) -> Option<(String, String)> {
    if let Some(caps) = PERIOD.captures(text) {
        return Some((caps[1].to_string(), caps[2].to_string()));
    }

    // Known-period alternative for statements where the "For ... to ..."
    // line is mangled by text extraction
    if PERIOD_Q1_2021.is_match(text) {
        return Some(("January 1, 2021".to_string(), "March 31, 2021".to_string()));
    }

    None
}

/// Ending/total balance (one match sets both) and beginning balance,
/// each independently optional
pub struct Balances {
    pub ending: Option<String>,
    pub beginning: Option<String>,
}

pub fn extract_portfolio_balances(text: &str) -> Balances {
    let ending = [&BALANCE_AS_OF, &BALANCE_ENDING]
        .iter()
        .find_map(|re| re.captures(text))
        .map(|caps| format!("${}", &caps[1]));

    let beginning = BALANCE_BEGINNING
        .captures(text)
        .map(|caps| format!("${}", &caps[1]));

    Balances { ending, beginning }
}

/// One (value, percentage) pair per asset class, each independently optional
pub fn extract_asset_allocation(text: &str) -> [Option<(String, String)>; 3] {
    let classes = [&ALLOC_EQUITIES, &ALLOC_FIXED_INCOME, &ALLOC_MULTI_ASSET];

    classes.map(|re| {
        re.captures(text)
            .map(|caps| (format!("${}", &caps[1]), format!("{}%", &caps[2])))
    })
}

fn currency_capture(re: &Regex, text: &str) -> Option<String> {
    re.captures(text).map(|caps| format!("${}", &caps[1]))
}

fn percent_capture(re: &Regex, text: &str) -> Option<String> {
    re.captures(text).map(|caps| format!("{}%", &caps[1]))
}

/// Vesting status - a prioritized decision over several independent
/// signals. The order is significant: later checks are only reached when
/// all earlier ones fail.
pub fn extract_vesting_status(text: &str) -> String {
    // Gather vesting-labeled excerpts for the lower-priority checks
    let excerpts: Vec<String> = VESTING_SECTIONS
        .iter()
        .flat_map(|re| {
            re.captures_iter(text)
                .map(|caps| caps[1].to_string())
                .collect::<Vec<_>>()
        })
        .collect();

    // (a) any generic "percent vested ... amount" pair anywhere in the text
    let pairs: Vec<String> = VESTED_PERCENT_AMOUNT
        .captures_iter(text)
        .map(|caps| format!("{}% (${})", &caps[1], &caps[2]))
        .collect();

    if !pairs.is_empty() {
        return format!("Vesting percentages found: {}", pairs.join(", "));
    }

    // (b) delayed vesting phrase within a vesting excerpt
    if excerpts
        .iter()
        .any(|e| e.to_lowercase().contains("delayed vesting provision"))
    {
        return "Delayed vesting provision applies - employer maintains vesting information"
            .to_string();
    }

    // (c) "100%" within a vesting excerpt
    if excerpts.iter().any(|e| e.contains("100%")) {
        return "100% vested in participant contributions".to_string();
    }

    // (d) nothing recognizable
    crate::record::VESTING_NOT_SPECIFIED.to_string()
}

/// Every sub-plan block in the statement, in document order
pub fn extract_plan_entries(text: &str) -> Vec<PlanEntry> {
    PLAN_ENTRY
        .captures_iter(text)
        .map(|caps| PlanEntry {
            plan_number: caps[1].to_string(),
            plan_type: caps[2].to_string(),
            balance: format!("${}", &caps[3]),
        })
        .collect()
}

// ============================================================================
// EXTRACTION DRIVER
// ============================================================================

/// Populate a record from raw statement text. Pure: no I/O, no fallback -
/// unmatched fields keep their placeholders.
pub fn extract_from_text(text: &str) -> StatementRecord {
    let mut record = StatementRecord::default();

    if let Some(name) = extract_account_holder_name(text) {
        record.account_holder_name = name;
    }

    if let Some((start, end)) = extract_statement_dates(text) {
        record.statement_start_date = start;
        record.statement_end_date = end;
    }

    let balances = extract_portfolio_balances(text);
    if let Some(ending) = balances.ending {
        record.total_portfolio_balance = ending.clone();
        record.ending_balance = ending;
    }
    if let Some(beginning) = balances.beginning {
        record.beginning_balance = beginning;
    }

    let [equities, fixed_income, multi_asset] = extract_asset_allocation(text);
    if let Some((value, pct)) = equities {
        record.equities_value = value;
        record.equities_percentage = pct;
    }
    if let Some((value, pct)) = fixed_income {
        record.fixed_income_value = value;
        record.fixed_income_percentage = pct;
    }
    if let Some((value, pct)) = multi_asset {
        record.multi_asset_value = value;
        record.multi_asset_percentage = pct;
    }

    if let Some(v) = currency_capture(&EMPLOYEE_CONTRIB, text) {
        record.employee_contributions = v;
    }
    if let Some(v) = currency_capture(&EMPLOYER_CONTRIB, text) {
        record.employer_contributions = v;
    }
    if let Some(v) = currency_capture(&GAINS_LOSS, text) {
        record.total_gains_loss = v;
    }
    if let Some(v) = percent_capture(&RATE_OF_RETURN, text) {
        record.personal_rate_of_return = v;
    }
    if let Some(v) = currency_capture(&MONTHLY_INCOME, text) {
        record.estimated_monthly_income_at_retirement = v;
    }
    if let Some(v) = currency_capture(&MONTHLY_CONTRIB, text) {
        record.average_monthly_contribution = v;
    }

    record.vesting_status = extract_vesting_status(text);
    record.plan_entries = extract_plan_entries(text);

    record
}

/// Run one extraction. Falls back to the fixed sample record when sample
/// mode is requested, no path is given, the PDF cannot be read, or the
/// extracted text is empty. Never fails.
pub fn extract(path: Option<&Path>, use_sample: bool) -> StatementRecord {
    if use_sample {
        log::info!("Sample mode requested, using built-in statement data");
        return sample_record();
    }

    let Some(path) = path else {
        log::warn!("No PDF path provided, using built-in statement data");
        return sample_record();
    };

    match pdf::extract_text(path) {
        Ok(text) => from_extracted_text(&text),
        Err(e) => {
            log::warn!("PDF read failed ({e:#}), using built-in statement data");
            sample_record()
        }
    }
}

/// Post-read step of [`extract`]: an empty buffer counts as "no input"
/// and falls back to the sample record like the other failure modes.
fn from_extracted_text(text: &str) -> StatementRecord {
    if text.trim().is_empty() {
        log::warn!("PDF yielded no text, using built-in statement data");
        return sample_record();
    }

    extract_from_text(text)
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::{
        NAME_NOT_FOUND, START_DATE_NOT_FOUND, VALUE_NOT_FOUND, VESTING_NOT_SPECIFIED,
    };

    #[test]
    fn test_name_from_pipe_markers() {
        let text = "header LASTNAME|WU| FIRSTNAME|YU-HSIN| footer";
        assert_eq!(
            extract_account_holder_name(text),
            Some("YU-HSIN WU".to_string())
        );
    }

    #[test]
    fn test_name_from_labeled_line() {
        // The character class runs across whitespace, so the capture must be
        // terminated by a non-matching character (here the comma)
        let text = "Account holder: JANE SMITH-DOE, Plan 102";
        assert_eq!(
            extract_account_holder_name(text),
            Some("JANE SMITH-DOE".to_string())
        );
    }

    #[test]
    fn test_name_pipe_markers_win_over_label() {
        let text = "Account holder: WRONG NAME\nLASTNAME|WU|FIRSTNAME|YU-HSIN|";
        assert_eq!(
            extract_account_holder_name(text),
            Some("YU-HSIN WU".to_string())
        );
    }

    #[test]
    fn test_name_miss_returns_none() {
        assert_eq!(extract_account_holder_name("no names here"), None);
    }

    #[test]
    fn test_statement_dates_primary_pattern() {
        let text = "For January 1, 2021 to March 31, 2021";
        assert_eq!(
            extract_statement_dates(text),
            Some(("January 1, 2021".to_string(), "March 31, 2021".to_string()))
        );
    }

    #[test]
    fn test_statement_dates_known_period_alternative() {
        let text = "Statement January 1, 2021 through March 31, 2021 period";
        assert_eq!(
            extract_statement_dates(text),
            Some(("January 1, 2021".to_string(), "March 31, 2021".to_string()))
        );
    }

    #[test]
    fn test_balances_as_of_sets_ending() {
        let text = "Your balance on Mar 31, 2021: $501,974.66";
        let balances = extract_portfolio_balances(text);
        assert_eq!(balances.ending, Some("$501,974.66".to_string()));
        assert_eq!(balances.beginning, None);
    }

    #[test]
    fn test_balances_ending_fallback_pattern() {
        let text = "Beginning balance $460,806.88\nEnding balance $501,974.66";
        let balances = extract_portfolio_balances(text);
        assert_eq!(balances.ending, Some("$501,974.66".to_string()));
        assert_eq!(balances.beginning, Some("$460,806.88".to_string()));
    }

    #[test]
    fn test_allocation_all_three_classes() {
        let text = "Equities $351,832.90 70.09%\nFixed Income 59,636.94 11.88%\nMulti-Asset 90,504.82 18.03%";
        let [equities, fixed_income, multi_asset] = extract_asset_allocation(text);

        assert_eq!(
            equities,
            Some(("$351,832.90".to_string(), "70.09%".to_string()))
        );
        assert_eq!(
            fixed_income,
            Some(("$59,636.94".to_string(), "11.88%".to_string()))
        );
        assert_eq!(
            multi_asset,
            Some(("$90,504.82".to_string(), "18.03%".to_string()))
        );
    }

    #[test]
    fn test_allocation_classes_independent() {
        let text = "Equities $351,832.90 70.09%";
        let [equities, fixed_income, multi_asset] = extract_asset_allocation(text);

        assert!(equities.is_some());
        assert!(fixed_income.is_none());
        assert!(multi_asset.is_none());
    }

    #[test]
    fn test_vesting_percent_pairs_compose_summary() {
        let text = "80% vested worth $1,000.00 and 100% vested worth $2,500.00";
        assert_eq!(
            extract_vesting_status(text),
            "Vesting percentages found: 80% ($1,000.00), 100% ($2,500.00)"
        );
    }

    #[test]
    fn test_vesting_percent_pairs_beat_delayed_provision() {
        // Both signals present: rule (a) must win over rule (b)
        let text = "What you have vested\n\
                    A delayed vesting provision applies to this plan.\n\
                    Your investments\n\
                    You are 50% vested, worth $9,999.99 today";
        let status = extract_vesting_status(text);
        assert!(status.starts_with("Vesting percentages found:"));
        assert!(status.contains("50% ($9,999.99)"));
    }

    #[test]
    fn test_vesting_delayed_provision() {
        let text = "What you have vested\n\
                    A delayed vesting provision applies to employer amounts.\n\
                    Your investments";
        assert_eq!(
            extract_vesting_status(text),
            "Delayed vesting provision applies - employer maintains vesting information"
        );
    }

    #[test]
    fn test_vesting_fully_vested() {
        let text = "What you have vested\n\
                    You are 100% in your own contributions.\n\
                    Your investments";
        assert_eq!(
            extract_vesting_status(text),
            "100% vested in participant contributions"
        );
    }

    #[test]
    fn test_vesting_not_specified() {
        assert_eq!(
            extract_vesting_status("nothing relevant here"),
            VESTING_NOT_SPECIFIED
        );
    }

    #[test]
    fn test_plan_entries_in_document_order() {
        let text = "3 MATCHING PLAN\nsome filler\nBalance as of Mar 31, 2021 $46,554.92\n\
                    1 RETIREMENT PLAN\nmore filler\nBalance as of Mar 31, 2021 $228,743.55";
        let plans = extract_plan_entries(text);

        assert_eq!(plans.len(), 2);
        assert_eq!(plans[0].plan_number, "3");
        assert_eq!(plans[0].plan_type, "MATCHING PLAN");
        assert_eq!(plans[0].balance, "$46,554.92");
        assert_eq!(plans[1].plan_number, "1");
        assert_eq!(plans[1].plan_type, "RETIREMENT PLAN");
    }

    #[test]
    fn test_plan_entries_ignore_unknown_labels() {
        let text = "7 MYSTERY PLAN\nBalance as of Mar 31, 2021 $1.00";
        assert!(extract_plan_entries(text).is_empty());
    }

    #[test]
    fn test_field_miss_leaves_only_that_placeholder() {
        // Ending balance present, everything else missing
        let text = "Ending balance $501,974.66";
        let record = extract_from_text(text);

        assert_eq!(record.ending_balance, "$501,974.66");
        assert_eq!(record.total_portfolio_balance, "$501,974.66");
        assert_eq!(record.beginning_balance, VALUE_NOT_FOUND);
        assert_eq!(record.account_holder_name, NAME_NOT_FOUND);
        assert_eq!(record.statement_start_date, START_DATE_NOT_FOUND);
        assert_eq!(record.equities_value, VALUE_NOT_FOUND);
        assert!(record.plan_entries.is_empty());
    }

    #[test]
    fn test_extract_from_full_synthetic_statement() {
        let text = "LASTNAME|WU|FIRSTNAME|YU-HSIN|\n\
                    For January 1, 2021 to March 31, 2021\n\
                    Your balance on Mar 31, 2021: $501,974.66\n\
                    Beginning balance $460,806.88\n\
                    Equities $351,832.90 70.09%\n\
                    Fixed Income 59,636.94 11.88%\n\
                    Multi-Asset 90,504.82 18.03%\n\
                    Your contributions 8,250.02\n\
                    Employer contributions 7,425.03\n\
                    Gains/Loss 25,492.73\n\
                    Personal rate of return for this period 5.45%\n\
                    an estimated monthly lifetime income of $8,568.00\n\
                    based on your average monthly contribution of $3,466.00\n\
                    1 RETIREMENT PLAN\nBalance as of Mar 31, 2021 $228,743.55\n\
                    3 MATCHING PLAN\nBalance as of Mar 31, 2021 $46,554.92\n";
        let record = extract_from_text(text);

        assert_eq!(record.account_holder_name, "YU-HSIN WU");
        assert_eq!(record.statement_start_date, "January 1, 2021");
        assert_eq!(record.statement_end_date, "March 31, 2021");
        assert_eq!(record.ending_balance, "$501,974.66");
        assert_eq!(record.beginning_balance, "$460,806.88");
        assert_eq!(record.equities_percentage, "70.09%");
        assert_eq!(record.fixed_income_value, "$59,636.94");
        assert_eq!(record.employee_contributions, "$8,250.02");
        assert_eq!(record.employer_contributions, "$7,425.03");
        assert_eq!(record.total_gains_loss, "$25,492.73");
        assert_eq!(record.personal_rate_of_return, "5.45%");
        assert_eq!(record.estimated_monthly_income_at_retirement, "$8,568.00");
        assert_eq!(record.average_monthly_contribution, "$3,466.00");
        assert_eq!(record.plan_entries.len(), 2);
    }

    #[test]
    fn test_extract_no_path_falls_back_to_sample() {
        let record = extract(None, false);
        assert!(record.same_fields(&sample_record()));
    }

    #[test]
    fn test_extract_sample_mode() {
        let record = extract(None, true);
        assert!(record.same_fields(&sample_record()));
    }

    #[test]
    fn test_extract_unreadable_pdf_falls_back_to_sample() {
        let record = extract(Some(Path::new("missing_statement.pdf")), false);
        assert!(record.same_fields(&sample_record()));
    }

    #[test]
    fn test_empty_extracted_text_falls_back_to_sample() {
        let record = from_extracted_text("  \n\t ");
        assert!(record.same_fields(&sample_record()));
    }

    #[test]
    fn test_non_empty_extracted_text_is_not_sample() {
        let record = from_extracted_text("Ending balance $1.00");
        assert!(!record.same_fields(&sample_record()));
        assert_eq!(record.ending_balance, "$1.00");
    }
}
