use serde::{Deserialize, Serialize};

/// Validated application record consumed by the evaluator.
///
/// Instances are normally produced by [`IntakeGuard`](super::intake::IntakeGuard) from an
/// [`ApplicationForm`]; the evaluator re-checks them so hand-built values cannot slip a zero
/// divisor or an out-of-range credit score past the rules.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApplicationInput {
    pub credit_score: u16,
    pub annual_income: f64,
    pub employment_years: f64,
    pub monthly_debt: f64,
    pub down_payment: f64,
    pub loan_amount: f64,
    pub loan_term_years: u16,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub applicant_age: Option<u8>,
}

impl ApplicationInput {
    pub fn monthly_income(&self) -> f64 {
        self.annual_income / 12.0
    }

    pub fn loan_term_months(&self) -> u32 {
        u32::from(self.loan_term_years) * 12
    }
}

/// Raw value captured by a form widget before type coercion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FormValue {
    Number(f64),
    Text(String),
    /// Anything else a JSON client sent (booleans, arrays, objects). Rejected at intake.
    Other(serde_json::Value),
}

impl From<f64> for FormValue {
    fn from(value: f64) -> Self {
        FormValue::Number(value)
    }
}

impl From<u32> for FormValue {
    fn from(value: u32) -> Self {
        FormValue::Number(f64::from(value))
    }
}

impl From<&str> for FormValue {
    fn from(value: &str) -> Self {
        FormValue::Text(value.to_string())
    }
}

/// Loosely-typed submission as it arrives from the form, CSV rows, or CLI flags.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ApplicationForm {
    #[serde(default)]
    pub credit_score: Option<FormValue>,
    #[serde(default)]
    pub annual_income: Option<FormValue>,
    #[serde(default)]
    pub employment_years: Option<FormValue>,
    #[serde(default)]
    pub monthly_debt: Option<FormValue>,
    #[serde(default)]
    pub down_payment: Option<FormValue>,
    #[serde(default)]
    pub loan_amount: Option<FormValue>,
    #[serde(default)]
    pub loan_term_years: Option<FormValue>,
    #[serde(default)]
    pub applicant_age: Option<FormValue>,
}

impl From<&ApplicationInput> for ApplicationForm {
    fn from(input: &ApplicationInput) -> Self {
        Self {
            credit_score: Some(FormValue::Number(f64::from(input.credit_score))),
            annual_income: Some(FormValue::Number(input.annual_income)),
            employment_years: Some(FormValue::Number(input.employment_years)),
            monthly_debt: Some(FormValue::Number(input.monthly_debt)),
            down_payment: Some(FormValue::Number(input.down_payment)),
            loan_amount: Some(FormValue::Number(input.loan_amount)),
            loan_term_years: Some(FormValue::Number(f64::from(input.loan_term_years))),
            applicant_age: input
                .applicant_age
                .map(|age| FormValue::Number(f64::from(age))),
        }
    }
}

/// The fixed criteria every application is measured against, in reporting order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CriterionKind {
    CreditScore,
    DebtToIncome,
    DownPayment,
    EmploymentHistory,
    PaymentToIncome,
}

impl CriterionKind {
    pub const ALL: [CriterionKind; 5] = [
        CriterionKind::CreditScore,
        CriterionKind::DebtToIncome,
        CriterionKind::DownPayment,
        CriterionKind::EmploymentHistory,
        CriterionKind::PaymentToIncome,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            CriterionKind::CreditScore => "credit score",
            CriterionKind::DebtToIncome => "debt-to-income ratio",
            CriterionKind::DownPayment => "down payment ratio",
            CriterionKind::EmploymentHistory => "employment history",
            CriterionKind::PaymentToIncome => "payment-to-income ratio",
        }
    }
}

/// Loan payment figures shown next to the verdict.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PaymentBreakdown {
    pub principal: f64,
    pub monthly_payment: f64,
    pub annual_rate: f64,
    pub term_months: u32,
}
