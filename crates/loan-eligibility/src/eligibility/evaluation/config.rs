use serde::{Deserialize, Serialize};

pub const DEFAULT_MINIMUM_CREDIT_SCORE: u16 = 620;
pub const DEFAULT_MAXIMUM_DEBT_TO_INCOME: f64 = 0.43;
pub const DEFAULT_MINIMUM_DOWN_PAYMENT_RATIO: f64 = 0.20;
pub const DEFAULT_MINIMUM_EMPLOYMENT_YEARS: f64 = 2.0;
pub const DEFAULT_MAXIMUM_PAYMENT_TO_INCOME: f64 = 0.28;
pub const DEFAULT_ANNUAL_INTEREST_RATE: f64 = 0.06;

/// Which amount is amortized when estimating the monthly payment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PrincipalBasis {
    #[default]
    LoanAmount,
    NetOfDownPayment,
}

/// Thresholds the evaluator applies. Inclusive on every bound.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EligibilityConfig {
    pub minimum_credit_score: u16,
    pub maximum_debt_to_income: f64,
    pub minimum_down_payment_ratio: f64,
    pub minimum_employment_years: f64,
    pub maximum_payment_to_income: f64,
    pub annual_interest_rate: f64,
    #[serde(default)]
    pub principal_basis: PrincipalBasis,
}

impl Default for EligibilityConfig {
    fn default() -> Self {
        Self {
            minimum_credit_score: DEFAULT_MINIMUM_CREDIT_SCORE,
            maximum_debt_to_income: DEFAULT_MAXIMUM_DEBT_TO_INCOME,
            minimum_down_payment_ratio: DEFAULT_MINIMUM_DOWN_PAYMENT_RATIO,
            minimum_employment_years: DEFAULT_MINIMUM_EMPLOYMENT_YEARS,
            maximum_payment_to_income: DEFAULT_MAXIMUM_PAYMENT_TO_INCOME,
            annual_interest_rate: DEFAULT_ANNUAL_INTEREST_RATE,
            principal_basis: PrincipalBasis::LoanAmount,
        }
    }
}
