mod config;
mod policy;
pub(crate) mod rules;

pub use config::{
    EligibilityConfig, PrincipalBasis, DEFAULT_ANNUAL_INTEREST_RATE,
    DEFAULT_MAXIMUM_DEBT_TO_INCOME, DEFAULT_MAXIMUM_PAYMENT_TO_INCOME,
    DEFAULT_MINIMUM_CREDIT_SCORE, DEFAULT_MINIMUM_DOWN_PAYMENT_RATIO,
    DEFAULT_MINIMUM_EMPLOYMENT_YEARS,
};

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::domain::{ApplicationForm, ApplicationInput, CriterionKind, PaymentBreakdown};
use super::intake::{InputError, IntakeGuard};
use super::payment::round_to;

pub const DOWN_PAYMENT_RATIO: &str = "down_payment_ratio";
pub const DEBT_TO_INCOME_RATIO: &str = "debt_to_income_ratio";
pub const PAYMENT_TO_INCOME_RATIO: &str = "payment_to_income_ratio";

const DISPLAY_PLACES: i32 = 2;

/// Stateless evaluator that applies the threshold configuration to an application.
#[derive(Debug, Clone, Default)]
pub struct EligibilityEngine {
    config: EligibilityConfig,
    guard: IntakeGuard,
}

impl EligibilityEngine {
    pub fn new(config: EligibilityConfig) -> Self {
        Self::with_guard(config, IntakeGuard::default())
    }

    pub fn with_guard(config: EligibilityConfig, guard: IntakeGuard) -> Self {
        Self { config, guard }
    }

    pub fn config(&self) -> &EligibilityConfig {
        &self.config
    }

    pub fn guard(&self) -> &IntakeGuard {
        &self.guard
    }

    /// Evaluate a typed application. Fails only when the input itself is invalid.
    pub fn evaluate(&self, input: &ApplicationInput) -> Result<EligibilityDecision, InputError> {
        self.guard.check(input)?;

        let ratios = rules::derive_ratios(input, &self.config)?;
        let criteria = rules::assess(input, &ratios, &self.config);
        let approved = policy::decide(&criteria);
        let strength_score = policy::strength_score(input, &ratios, &self.config);

        let mut computed_ratios = BTreeMap::new();
        computed_ratios.insert(
            DOWN_PAYMENT_RATIO.to_string(),
            round_to(ratios.down_payment_ratio, DISPLAY_PLACES),
        );
        computed_ratios.insert(
            DEBT_TO_INCOME_RATIO.to_string(),
            round_to(ratios.debt_to_income_ratio, DISPLAY_PLACES),
        );
        computed_ratios.insert(
            PAYMENT_TO_INCOME_RATIO.to_string(),
            round_to(ratios.payment_to_income_ratio, DISPLAY_PLACES),
        );

        let payment = PaymentBreakdown {
            principal: round_to(ratios.payment.principal, DISPLAY_PLACES),
            monthly_payment: round_to(ratios.payment.monthly_payment, DISPLAY_PLACES),
            ..ratios.payment
        };

        debug!(
            approved,
            failed = criteria.iter().filter(|outcome| !outcome.passed).count(),
            strength_score,
            "eligibility evaluated"
        );

        Ok(EligibilityDecision {
            approved,
            reasons: criteria.iter().map(|outcome| outcome.note.clone()).collect(),
            computed_ratios,
            criteria,
            payment,
            strength_score,
        })
    }

    /// Coerce and evaluate a raw form, reporting every input problem on failure.
    pub fn evaluate_form(
        &self,
        form: &ApplicationForm,
    ) -> Result<EligibilityDecision, Vec<InputError>> {
        let input = self.guard.screen_form(form)?;
        self.evaluate(&input).map_err(|err| vec![err])
    }
}

/// Evaluate `input` against `config` with the default intake policy.
pub fn evaluate(
    input: &ApplicationInput,
    config: &EligibilityConfig,
) -> Result<EligibilityDecision, InputError> {
    EligibilityEngine::new(config.clone()).evaluate(input)
}

/// Result of one criterion, kept alongside the rendered reason for audits and display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CriterionOutcome {
    pub criterion: CriterionKind,
    pub passed: bool,
    pub actual: f64,
    pub threshold: f64,
    pub note: String,
}

/// Verdict for a single submission.
///
/// `reasons` always holds one entry per criterion, in [`CriterionKind::ALL`] order, whether
/// the criterion passed or failed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EligibilityDecision {
    pub approved: bool,
    pub reasons: Vec<String>,
    pub computed_ratios: BTreeMap<String, f64>,
    pub criteria: Vec<CriterionOutcome>,
    pub payment: PaymentBreakdown,
    pub strength_score: f64,
}

impl EligibilityDecision {
    pub fn summary(&self) -> String {
        policy::summary(self.approved, &self.criteria)
    }

    pub fn failed_criteria(&self) -> Vec<CriterionKind> {
        policy::failed_criteria(&self.criteria)
    }

    pub fn outcome(&self, criterion: CriterionKind) -> Option<&CriterionOutcome> {
        self.criteria
            .iter()
            .find(|outcome| outcome.criterion == criterion)
    }

    pub fn ratio(&self, name: &str) -> Option<f64> {
        self.computed_ratios.get(name).copied()
    }
}
