// Statement record - the single aggregate produced by one extraction run

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ============================================================================
// PLACEHOLDERS
// ============================================================================

/// Placeholder for the account holder name when no pattern matches
pub const NAME_NOT_FOUND: &str = "Account Holder (Name not clearly identified)";

/// Placeholders for the statement period
pub const START_DATE_NOT_FOUND: &str = "Start Date Not Found";
pub const END_DATE_NOT_FOUND: &str = "End Date Not Found";

/// Placeholder for every currency/percentage field
pub const VALUE_NOT_FOUND: &str = "Not Found";

/// Placeholder for the vesting status (also the lowest-priority decision)
pub const VESTING_NOT_SPECIFIED: &str = "Vesting information not clearly specified";

// ============================================================================
// CORE TYPES
// ============================================================================

/// One retirement sub-plan found in the statement
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanEntry {
    pub plan_number: String,
    pub plan_type: String,
    pub balance: String,
}

impl PlanEntry {
    pub fn new(plan_number: &str, plan_type: &str, balance: &str) -> Self {
        PlanEntry {
            plan_number: plan_number.to_string(),
            plan_type: plan_type.to_string(),
            balance: balance.to_string(),
        }
    }
}

/// Everything extracted from one statement.
///
/// Every scalar field is a formatted currency/percentage string or an
/// explicit placeholder, never absent. `plan_entries` may be empty.
/// The record is populated once per run and read-only afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatementRecord {
    // Basic info
    pub account_holder_name: String,
    pub statement_start_date: String,
    pub statement_end_date: String,

    // Portfolio balances
    pub beginning_balance: String,
    pub ending_balance: String,
    pub total_portfolio_balance: String,

    // Asset allocation (value, percentage) per asset class
    pub equities_value: String,
    pub equities_percentage: String,
    pub fixed_income_value: String,
    pub fixed_income_percentage: String,
    pub multi_asset_value: String,
    pub multi_asset_percentage: String,

    // Contributions and performance
    pub employee_contributions: String,
    pub employer_contributions: String,
    pub total_gains_loss: String,
    pub personal_rate_of_return: String,
    pub estimated_monthly_income_at_retirement: String,
    pub average_monthly_contribution: String,

    // Vesting
    pub vesting_status: String,

    // Sub-plan breakdown, in document order
    pub plan_entries: Vec<PlanEntry>,

    /// When this record was produced (provenance, not statement data)
    pub extracted_at: DateTime<Utc>,
}

impl Default for StatementRecord {
    fn default() -> Self {
        StatementRecord {
            account_holder_name: NAME_NOT_FOUND.to_string(),
            statement_start_date: START_DATE_NOT_FOUND.to_string(),
            statement_end_date: END_DATE_NOT_FOUND.to_string(),
            beginning_balance: VALUE_NOT_FOUND.to_string(),
            ending_balance: VALUE_NOT_FOUND.to_string(),
            total_portfolio_balance: VALUE_NOT_FOUND.to_string(),
            equities_value: VALUE_NOT_FOUND.to_string(),
            equities_percentage: VALUE_NOT_FOUND.to_string(),
            fixed_income_value: VALUE_NOT_FOUND.to_string(),
            fixed_income_percentage: VALUE_NOT_FOUND.to_string(),
            multi_asset_value: VALUE_NOT_FOUND.to_string(),
            multi_asset_percentage: VALUE_NOT_FOUND.to_string(),
            employee_contributions: VALUE_NOT_FOUND.to_string(),
            employer_contributions: VALUE_NOT_FOUND.to_string(),
            total_gains_loss: VALUE_NOT_FOUND.to_string(),
            personal_rate_of_return: VALUE_NOT_FOUND.to_string(),
            estimated_monthly_income_at_retirement: VALUE_NOT_FOUND.to_string(),
            average_monthly_contribution: VALUE_NOT_FOUND.to_string(),
            vesting_status: VESTING_NOT_SPECIFIED.to_string(),
            plan_entries: Vec::new(),
            extracted_at: Utc::now(),
        }
    }
}

impl StatementRecord {
    /// Compare statement data, ignoring the provenance timestamp
    pub fn same_fields(&self, other: &StatementRecord) -> bool {
        self.account_holder_name == other.account_holder_name
            && self.statement_start_date == other.statement_start_date
            && self.statement_end_date == other.statement_end_date
            && self.beginning_balance == other.beginning_balance
            && self.ending_balance == other.ending_balance
            && self.total_portfolio_balance == other.total_portfolio_balance
            && self.equities_value == other.equities_value
            && self.equities_percentage == other.equities_percentage
            && self.fixed_income_value == other.fixed_income_value
            && self.fixed_income_percentage == other.fixed_income_percentage
            && self.multi_asset_value == other.multi_asset_value
            && self.multi_asset_percentage == other.multi_asset_percentage
            && self.employee_contributions == other.employee_contributions
            && self.employer_contributions == other.employer_contributions
            && self.total_gains_loss == other.total_gains_loss
            && self.personal_rate_of_return == other.personal_rate_of_return
            && self.estimated_monthly_income_at_retirement
                == other.estimated_monthly_income_at_retirement
            && self.average_monthly_contribution == other.average_monthly_contribution
            && self.vesting_status == other.vesting_status
            && self.plan_entries == other.plan_entries
    }
}

// ============================================================================
// FALLBACK DATASET
// ============================================================================

/// The fixed sample statement used whenever real extraction is unavailable
/// or unrequested. Values are literal, taken from the canonical Q1 2021
/// statement this layout was built against.
pub fn sample_record() -> StatementRecord {
    StatementRecord {
        account_holder_name: "YU-HSIN WU".to_string(),
        statement_start_date: "January 1, 2021".to_string(),
        statement_end_date: "March 31, 2021".to_string(),
        beginning_balance: "$460,806.88".to_string(),
        ending_balance: "$501,974.66".to_string(),
        total_portfolio_balance: "$501,974.66".to_string(),
        equities_value: "$351,832.90".to_string(),
        equities_percentage: "70.09%".to_string(),
        fixed_income_value: "$59,636.94".to_string(),
        fixed_income_percentage: "11.88%".to_string(),
        multi_asset_value: "$90,504.82".to_string(),
        multi_asset_percentage: "18.03%".to_string(),
        employee_contributions: "$8,250.02".to_string(),
        employer_contributions: "$7,425.03".to_string(),
        total_gains_loss: "$25,492.73".to_string(),
        personal_rate_of_return: "5.45%".to_string(),
        estimated_monthly_income_at_retirement: "$8,568.00".to_string(),
        average_monthly_contribution: "$3,466.00".to_string(),
        vesting_status: "Delayed vesting provision applies for employer contributions - \
                         employer maintains vesting information. 100% vested in \
                         voluntary/personal contributions."
            .to_string(),
        plan_entries: vec![
            PlanEntry::new("1", "RETIREMENT PLAN", "$228,743.55"),
            PlanEntry::new("2", "VOLUNTARY EMPLOYEE RETIREMENT PLAN", "$182,726.29"),
            PlanEntry::new("3", "MATCHING PLAN", "$46,554.92"),
            PlanEntry::new("4", "BASIC PLAN", "$22,187.84"),
            PlanEntry::new("5", "SUPPLEMENTAL RETIREMENT ANNUITY PLAN", "$21,762.06"),
        ],
        extracted_at: Utc::now(),
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_record_has_placeholders_everywhere() {
        let record = StatementRecord::default();

        assert_eq!(record.account_holder_name, NAME_NOT_FOUND);
        assert_eq!(record.statement_start_date, START_DATE_NOT_FOUND);
        assert_eq!(record.statement_end_date, END_DATE_NOT_FOUND);
        assert_eq!(record.beginning_balance, VALUE_NOT_FOUND);
        assert_eq!(record.personal_rate_of_return, VALUE_NOT_FOUND);
        assert_eq!(record.vesting_status, VESTING_NOT_SPECIFIED);
        assert!(record.plan_entries.is_empty());
    }

    #[test]
    fn test_sample_record_canonical_values() {
        let record = sample_record();

        assert_eq!(record.account_holder_name, "YU-HSIN WU");
        assert_eq!(record.total_portfolio_balance, "$501,974.66");
        assert_eq!(record.personal_rate_of_return, "5.45%");
        assert_eq!(record.plan_entries.len(), 5);
        assert_eq!(record.plan_entries[2].plan_type, "MATCHING PLAN");
        assert_eq!(record.plan_entries[4].balance, "$21,762.06");
    }

    #[test]
    fn test_same_fields_ignores_timestamp() {
        let a = sample_record();
        let mut b = sample_record();
        b.extracted_at = chrono::DateTime::from_timestamp(0, 0).unwrap();

        assert!(a.same_fields(&b));
    }

    #[test]
    fn test_same_fields_detects_difference() {
        let a = sample_record();
        let mut b = sample_record();
        b.ending_balance = "$0.00".to_string();

        assert!(!a.same_fields(&b));
    }

    #[test]
    fn test_record_serializes_to_json() {
        let record = sample_record();
        let json = serde_json::to_string(&record).unwrap();

        assert!(json.contains("YU-HSIN WU"));
        assert!(json.contains("plan_entries"));
    }
}
