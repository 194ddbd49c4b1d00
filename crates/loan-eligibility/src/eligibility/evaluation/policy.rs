use super::super::domain::{ApplicationInput, CriterionKind};
use super::super::payment::round_to;
use super::config::EligibilityConfig;
use super::rules::DerivedRatios;
use super::CriterionOutcome;

const CREDIT_SCORE_WEIGHT: f64 = 0.25;
const DEBT_TO_INCOME_WEIGHT: f64 = 0.25;
const DOWN_PAYMENT_WEIGHT: f64 = 0.20;
const EMPLOYMENT_WEIGHT: f64 = 0.15;
const PAYMENT_TO_INCOME_WEIGHT: f64 = 0.15;

/// Approval requires every criterion to pass.
pub(crate) fn decide(criteria: &[CriterionOutcome]) -> bool {
    criteria.iter().all(|outcome| outcome.passed)
}

pub(crate) fn failed_criteria(criteria: &[CriterionOutcome]) -> Vec<CriterionKind> {
    criteria
        .iter()
        .filter(|outcome| !outcome.passed)
        .map(|outcome| outcome.criterion)
        .collect()
}

/// Weighted 0-100 indication of how comfortably the application clears each threshold.
///
/// Each factor scores 1.0 once it sits a full margin inside its threshold, 0.5 exactly at
/// the threshold, and slides linearly toward 0 beyond it. Informational only: approval is
/// decided by [`decide`].
pub(crate) fn strength_score(
    input: &ApplicationInput,
    ratios: &DerivedRatios,
    config: &EligibilityConfig,
) -> f64 {
    let credit = graded_floor(
        f64::from(input.credit_score),
        f64::from(config.minimum_credit_score),
        100.0,
        200.0,
    );
    let debt_to_income = graded_ceiling(
        ratios.debt_to_income_ratio,
        config.maximum_debt_to_income,
        0.10,
        0.20,
    );
    let down_payment = graded_floor(
        ratios.down_payment_ratio,
        config.minimum_down_payment_ratio,
        0.10,
        0.20,
    );
    let employment = graded_floor(
        input.employment_years,
        config.minimum_employment_years,
        3.0,
        6.0,
    );
    let payment_to_income = graded_ceiling(
        ratios.payment_to_income_ratio,
        config.maximum_payment_to_income,
        0.05,
        0.10,
    );

    let weighted = credit * CREDIT_SCORE_WEIGHT
        + debt_to_income * DEBT_TO_INCOME_WEIGHT
        + down_payment * DOWN_PAYMENT_WEIGHT
        + employment * EMPLOYMENT_WEIGHT
        + payment_to_income * PAYMENT_TO_INCOME_WEIGHT;

    round_to(weighted * 100.0, 1)
}

// Higher is better: full marks at `minimum + margin`.
fn graded_floor(value: f64, minimum: f64, margin: f64, span: f64) -> f64 {
    if value >= minimum + margin {
        return 1.0;
    }
    (0.5 + (value - minimum) / span).max(0.0)
}

// Lower is better: full marks at `maximum - margin`.
fn graded_ceiling(value: f64, maximum: f64, margin: f64, span: f64) -> f64 {
    if value <= maximum - margin {
        return 1.0;
    }
    (0.5 + (maximum - value) / span).max(0.0)
}

pub(crate) fn summary(approved: bool, criteria: &[CriterionOutcome]) -> String {
    if approved {
        return format!("eligible: all {} criteria met", criteria.len());
    }

    let failed: Vec<&str> = failed_criteria(criteria)
        .into_iter()
        .map(CriterionKind::label)
        .collect();
    format!("not eligible: {} below policy", failed.join(", "))
}
