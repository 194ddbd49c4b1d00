use super::super::domain::{ApplicationInput, CriterionKind, PaymentBreakdown};
use super::super::intake::{fields, InputError};
use super::super::payment::monthly_payment;
use super::config::{EligibilityConfig, PrincipalBasis};
use super::CriterionOutcome;

/// Full-precision ratios used for threshold comparison.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct DerivedRatios {
    pub down_payment_ratio: f64,
    pub debt_to_income_ratio: f64,
    pub payment_to_income_ratio: f64,
    pub payment: PaymentBreakdown,
}

pub(crate) fn derive_ratios(
    input: &ApplicationInput,
    config: &EligibilityConfig,
) -> Result<DerivedRatios, InputError> {
    if input.loan_amount == 0.0 {
        return Err(InputError::Zero {
            field: fields::LOAN_AMOUNT,
        });
    }
    if input.annual_income == 0.0 {
        return Err(InputError::Zero {
            field: fields::ANNUAL_INCOME,
        });
    }

    let principal = match config.principal_basis {
        PrincipalBasis::LoanAmount => input.loan_amount,
        PrincipalBasis::NetOfDownPayment => (input.loan_amount - input.down_payment).max(0.0),
    };
    let term_months = input.loan_term_months();
    let estimated_payment = monthly_payment(principal, term_months, config.annual_interest_rate);
    let monthly_income = input.monthly_income();

    let ratios = DerivedRatios {
        down_payment_ratio: input.down_payment / input.loan_amount,
        debt_to_income_ratio: (input.monthly_debt + estimated_payment) / monthly_income,
        payment_to_income_ratio: estimated_payment / monthly_income,
        payment: PaymentBreakdown {
            principal,
            monthly_payment: estimated_payment,
            annual_rate: config.annual_interest_rate,
            term_months,
        },
    };

    let all_finite = ratios.down_payment_ratio.is_finite()
        && ratios.debt_to_income_ratio.is_finite()
        && ratios.payment_to_income_ratio.is_finite();
    if !all_finite {
        return Err(InputError::NonFinite {
            field: fields::ANNUAL_INCOME,
        });
    }

    Ok(ratios)
}

/// Apply every criterion without short-circuiting, in `CriterionKind::ALL` order.
pub(crate) fn assess(
    input: &ApplicationInput,
    ratios: &DerivedRatios,
    config: &EligibilityConfig,
) -> Vec<CriterionOutcome> {
    vec![
        credit_score(input.credit_score, config),
        debt_to_income(ratios.debt_to_income_ratio, config),
        down_payment(ratios.down_payment_ratio, config),
        employment_history(input.employment_years, config),
        payment_to_income(ratios.payment_to_income_ratio, config),
    ]
}

pub(crate) fn credit_score(score: u16, config: &EligibilityConfig) -> CriterionOutcome {
    let minimum = config.minimum_credit_score;
    let passed = score >= minimum;
    let note = if passed {
        format!("Credit score ({score}) meets the minimum required ({minimum})")
    } else {
        format!("Credit score ({score}) is below the minimum required ({minimum})")
    };

    CriterionOutcome {
        criterion: CriterionKind::CreditScore,
        passed,
        actual: f64::from(score),
        threshold: f64::from(minimum),
        note,
    }
}

pub(crate) fn debt_to_income(ratio: f64, config: &EligibilityConfig) -> CriterionOutcome {
    let maximum = config.maximum_debt_to_income;
    let passed = ratio <= maximum;
    let note = if passed {
        format!(
            "Debt-to-income ratio ({}) is within the maximum allowed ({})",
            percent(ratio),
            percent(maximum)
        )
    } else {
        format!(
            "Debt-to-income ratio ({}) exceeds the maximum allowed ({})",
            percent(ratio),
            percent(maximum)
        )
    };

    CriterionOutcome {
        criterion: CriterionKind::DebtToIncome,
        passed,
        actual: ratio,
        threshold: maximum,
        note,
    }
}

pub(crate) fn down_payment(ratio: f64, config: &EligibilityConfig) -> CriterionOutcome {
    let minimum = config.minimum_down_payment_ratio;
    let passed = ratio >= minimum;
    let note = if passed {
        format!(
            "Down payment ratio ({}) meets the minimum required ({})",
            percent(ratio),
            percent(minimum)
        )
    } else {
        format!(
            "Down payment ratio ({}) is below the minimum required ({})",
            percent(ratio),
            percent(minimum)
        )
    };

    CriterionOutcome {
        criterion: CriterionKind::DownPayment,
        passed,
        actual: ratio,
        threshold: minimum,
        note,
    }
}

pub(crate) fn employment_history(years: f64, config: &EligibilityConfig) -> CriterionOutcome {
    let minimum = config.minimum_employment_years;
    let passed = years >= minimum;
    let note = if passed {
        format!("Employment history ({years} years) meets the minimum required ({minimum} years)")
    } else {
        format!(
            "Employment history ({years} years) is below the minimum required ({minimum} years)"
        )
    };

    CriterionOutcome {
        criterion: CriterionKind::EmploymentHistory,
        passed,
        actual: years,
        threshold: minimum,
        note,
    }
}

pub(crate) fn payment_to_income(ratio: f64, config: &EligibilityConfig) -> CriterionOutcome {
    let maximum = config.maximum_payment_to_income;
    let passed = ratio <= maximum;
    let note = if passed {
        format!(
            "Monthly payment to income ratio ({}) is within the maximum allowed ({})",
            percent(ratio),
            percent(maximum)
        )
    } else {
        format!(
            "Monthly payment to income ratio ({}) exceeds the maximum allowed ({})",
            percent(ratio),
            percent(maximum)
        )
    };

    CriterionOutcome {
        criterion: CriterionKind::PaymentToIncome,
        passed,
        actual: ratio,
        threshold: maximum,
        note,
    }
}

fn percent(ratio: f64) -> String {
    format!("{:.2}%", ratio * 100.0)
}
