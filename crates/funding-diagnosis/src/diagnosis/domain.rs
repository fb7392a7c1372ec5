use super::tables::Region;
use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

/// Yes/no answer to a questionnaire item. Unset answers are modelled as `None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", try_from = "String")]
pub enum Answer {
    Yes,
    No,
}

impl Answer {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Yes => "Yes",
            Self::No => "No",
        }
    }
}

impl FromStr for Answer {
    type Err = UnknownCode;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_lowercase().as_str() {
            "yes" | "y" | "true" | "sí" | "si" => Ok(Self::Yes),
            "no" | "n" | "false" => Ok(Self::No),
            _ => Err(UnknownCode::new("answer", value)),
        }
    }
}

impl TryFrom<String> for Answer {
    type Error = UnknownCode;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Raised when a categorical code is outside its closed set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownCode {
    kind: &'static str,
    value: String,
}

impl UnknownCode {
    pub(crate) fn new(kind: &'static str, value: &str) -> Self {
        Self {
            kind,
            value: value.trim().to_string(),
        }
    }
}

impl fmt::Display for UnknownCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown {} '{}'", self.kind, self.value)
    }
}

impl std::error::Error for UnknownCode {}

/// Equity-statement line items for one fiscal year.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BalanceYear {
    pub share_capital: f64,
    pub share_premium: f64,
    pub reserves: f64,
    pub treasury_shares: f64,
    pub prior_results: f64,
    pub other_contributions: f64,
    pub current_result: f64,
    pub interim_dividend: f64,
    pub other_equity_instruments: f64,
}

impl BalanceYear {
    pub fn set(&mut self, field: BalanceField, value: f64) {
        let slot = match field {
            BalanceField::ShareCapital => &mut self.share_capital,
            BalanceField::SharePremium => &mut self.share_premium,
            BalanceField::Reserves => &mut self.reserves,
            BalanceField::TreasuryShares => &mut self.treasury_shares,
            BalanceField::PriorResults => &mut self.prior_results,
            BalanceField::OtherContributions => &mut self.other_contributions,
            BalanceField::CurrentResult => &mut self.current_result,
            BalanceField::InterimDividend => &mut self.interim_dividend,
            BalanceField::OtherEquityInstruments => &mut self.other_equity_instruments,
        };
        *slot = value;
    }

    pub fn get(&self, field: BalanceField) -> f64 {
        match field {
            BalanceField::ShareCapital => self.share_capital,
            BalanceField::SharePremium => self.share_premium,
            BalanceField::Reserves => self.reserves,
            BalanceField::TreasuryShares => self.treasury_shares,
            BalanceField::PriorResults => self.prior_results,
            BalanceField::OtherContributions => self.other_contributions,
            BalanceField::CurrentResult => self.current_result,
            BalanceField::InterimDividend => self.interim_dividend,
            BalanceField::OtherEquityInstruments => self.other_equity_instruments,
        }
    }

    /// Share capital plus share premium.
    pub fn paid_in_capital(&self) -> f64 {
        self.share_capital + self.share_premium
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BalanceField {
    ShareCapital,
    SharePremium,
    Reserves,
    TreasuryShares,
    PriorResults,
    OtherContributions,
    CurrentResult,
    InterimDividend,
    OtherEquityInstruments,
}

impl BalanceField {
    pub const fn ordered() -> [Self; 9] {
        [
            Self::ShareCapital,
            Self::SharePremium,
            Self::Reserves,
            Self::TreasuryShares,
            Self::PriorResults,
            Self::OtherContributions,
            Self::CurrentResult,
            Self::InterimDividend,
            Self::OtherEquityInstruments,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::ShareCapital => "Share capital",
            Self::SharePremium => "Share premium",
            Self::Reserves => "Reserves",
            Self::TreasuryShares => "Treasury shares",
            Self::PriorResults => "Prior-year results",
            Self::OtherContributions => "Other member contributions",
            Self::CurrentResult => "Current-year result",
            Self::InterimDividend => "Interim dividend",
            Self::OtherEquityInstruments => "Other equity instruments",
        }
    }
}

/// Full questionnaire snapshot supplied by the caller.
///
/// Every field has a zero/unset default so partial JSON documents deserialize.
/// Blank strings in categorical or date fields are read as unset.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormData {
    #[serde(deserialize_with = "blank_as_none")]
    pub region: Option<Region>,
    #[serde(deserialize_with = "blank_as_none")]
    pub audited_accounts: Option<Answer>,
    pub cash: f64,
    pub monthly_burn: f64,
    pub runway_override: Option<f64>,

    pub balance_minus_1: BalanceYear,
    pub balance_minus_2: BalanceYear,

    #[serde(deserialize_with = "blank_as_none")]
    pub last_raise_date: Option<NaiveDate>,
    pub last_raise_amount: f64,
    pub convertible_notes: f64,
    #[serde(deserialize_with = "blank_as_none")]
    pub note_conversion_date: Option<NaiveDate>,
    #[serde(deserialize_with = "blank_as_none")]
    pub revenue_history: Option<Answer>,
    #[serde(deserialize_with = "blank_as_none")]
    pub tax_lease: Option<Answer>,
    #[serde(deserialize_with = "blank_as_none")]
    pub existing_program_debt: Option<Answer>,
    pub existing_program_debt_amount: f64,

    pub rd_spend_n1: f64,
    pub rd_spend_n: f64,
    pub in_house_rd_n1: f64,
    pub in_house_rd_n: f64,

    #[serde(deserialize_with = "blank_as_none")]
    pub industrial_capex: Option<Answer>,
    #[serde(deserialize_with = "blank_as_none")]
    pub hire_doctorates: Option<Answer>,
    #[serde(deserialize_with = "blank_as_none")]
    pub internationalize: Option<Answer>,

    pub deduction_rd_n2: f64,
    /// Falls back to `rd_spend_n1` when unset.
    pub deduction_rd_n1: Option<f64>,
    /// Falls back to `rd_spend_n` when unset.
    pub deduction_rd_n: Option<f64>,
    pub subsidized_n2: f64,
    pub subsidized_n1: f64,
    pub subsidized_n: f64,
    #[serde(deserialize_with = "blank_as_none")]
    pub ip_held_domestically: Option<Answer>,
    #[serde(deserialize_with = "blank_as_none")]
    pub social_security_rebate: Option<Answer>,
    #[serde(deserialize_with = "blank_as_none")]
    pub innovative_sme_seal: Option<Answer>,
}

impl FormData {
    pub fn with_balances(mut self, minus_1: BalanceYear, minus_2: BalanceYear) -> Self {
        self.balance_minus_1 = minus_1;
        self.balance_minus_2 = minus_2;
        self
    }
}

fn blank_as_none<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
    T::Err: fmt::Display,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => value.parse().map(Some).map_err(serde::de::Error::custom),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CriterionKind {
    Ok,
    Fail,
    Warning,
    Value,
    Info,
}

impl CriterionKind {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Ok => "OK",
            Self::Fail => "FAIL",
            Self::Warning => "WARN",
            Self::Value => "VALUE",
            Self::Info => "INFO",
        }
    }
}

pub const STATUS_OK: &str = "OK";
pub const STATUS_NOT_MET: &str = "Not met";
pub const STATUS_UNSET: &str = "\u{2014}";

/// One rendered rule line of a checklist.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CriterionResult {
    pub label: String,
    pub status: String,
    pub kind: CriterionKind,
}

impl CriterionResult {
    pub fn new(label: impl Into<String>, status: impl Into<String>, kind: CriterionKind) -> Self {
        Self {
            label: label.into(),
            status: status.into(),
            kind,
        }
    }

    pub fn ok(label: impl Into<String>) -> Self {
        Self::new(label, STATUS_OK, CriterionKind::Ok)
    }

    pub fn fail(label: impl Into<String>) -> Self {
        Self::new(label, STATUS_NOT_MET, CriterionKind::Fail)
    }

    pub fn warning(label: impl Into<String>, status: impl Into<String>) -> Self {
        Self::new(label, status, CriterionKind::Warning)
    }

    pub fn info(label: impl Into<String>, status: impl Into<String>) -> Self {
        Self::new(label, status, CriterionKind::Info)
    }

    pub fn check(label: impl Into<String>, passed: bool) -> Self {
        if passed {
            Self::ok(label)
        } else {
            Self::fail(label)
        }
    }

    pub fn is_ok(&self) -> bool {
        self.kind == CriterionKind::Ok
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Program {
    VentureDebt,
    InnovationLender,
    RegionalFunds,
    NationalGrants,
    TaxDeductions,
}

impl Program {
    pub const fn ordered() -> [Self; 5] {
        [
            Self::VentureDebt,
            Self::InnovationLender,
            Self::RegionalFunds,
            Self::NationalGrants,
            Self::TaxDeductions,
        ]
    }

    pub const fn title(self) -> &'static str {
        match self {
            Self::VentureDebt => "ENISA",
            Self::InnovationLender => "CDTI",
            Self::RegionalFunds => "Regional funds",
            Self::NationalGrants => "Other national grants",
            Self::TaxDeductions => "R&D tax deductions",
        }
    }
}

/// Checklist produced by a program evaluator.
///
/// `conclusion` is `None` for purely informational blocks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChecklistBlock {
    pub program: Program,
    pub title: String,
    pub criteria: Vec<CriterionResult>,
    pub conclusion: Option<CriterionResult>,
}

impl ChecklistBlock {
    pub fn new(
        program: Program,
        criteria: Vec<CriterionResult>,
        conclusion: Option<CriterionResult>,
    ) -> Self {
        Self {
            program,
            title: program.title().to_string(),
            criteria,
            conclusion,
        }
    }

    pub fn is_eligible(&self) -> bool {
        self.conclusion
            .as_ref()
            .map(CriterionResult::is_ok)
            .unwrap_or(false)
    }

    pub fn criterion(&self, label_prefix: &str) -> Option<&CriterionResult> {
        self.criteria
            .iter()
            .find(|criterion| criterion.label.starts_with(label_prefix))
    }
}
