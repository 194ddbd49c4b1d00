use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::response::Response;
use serde_json::Value;

use crate::advice::{AdviceError, EducationTopic, LoanAdvisor};
use crate::eligibility::domain::{ApplicationForm, ApplicationInput, FormValue};
use crate::eligibility::evaluation::{EligibilityConfig, EligibilityDecision, EligibilityEngine};
use crate::eligibility::service::EligibilityService;

/// Baseline application that clears every threshold.
pub(super) fn scenario_a() -> ApplicationInput {
    ApplicationInput {
        credit_score: 700,
        annual_income: 80_000.0,
        employment_years: 5.0,
        monthly_debt: 500.0,
        down_payment: 40_000.0,
        loan_amount: 200_000.0,
        loan_term_years: 30,
        applicant_age: None,
    }
}

/// Zero-rate application whose ratios land exactly on each threshold.
pub(super) fn boundary_input() -> ApplicationInput {
    ApplicationInput {
        credit_score: 620,
        annual_income: 120_000.0,
        employment_years: 2.0,
        monthly_debt: 3_300.0,
        down_payment: 24_000.0,
        loan_amount: 120_000.0,
        loan_term_years: 10,
        applicant_age: Some(30),
    }
}

pub(super) fn zero_rate_config() -> EligibilityConfig {
    EligibilityConfig {
        annual_interest_rate: 0.0,
        ..EligibilityConfig::default()
    }
}

pub(super) fn engine() -> EligibilityEngine {
    EligibilityEngine::new(EligibilityConfig::default())
}

pub(super) fn scenario_a_form() -> ApplicationForm {
    ApplicationForm::from(&scenario_a())
}

pub(super) fn text_form() -> ApplicationForm {
    ApplicationForm {
        credit_score: Some(FormValue::from("700")),
        annual_income: Some(FormValue::from("80,000")),
        employment_years: Some(FormValue::from(" 5 ")),
        monthly_debt: Some(FormValue::from("500.00")),
        down_payment: Some(FormValue::from("40000")),
        loan_amount: Some(FormValue::from("200_000")),
        loan_term_years: Some(FormValue::from("30")),
        applicant_age: None,
    }
}

pub(super) fn failed_count(decision: &EligibilityDecision) -> usize {
    decision
        .criteria
        .iter()
        .filter(|outcome| !outcome.passed)
        .count()
}

#[derive(Default)]
pub(super) struct RecordingAdvisor {
    calls: Mutex<Vec<String>>,
}

impl RecordingAdvisor {
    pub(super) fn calls(&self) -> Vec<String> {
        self.calls.lock().expect("advisor mutex poisoned").clone()
    }
}

#[async_trait]
impl LoanAdvisor for RecordingAdvisor {
    async fn advise(
        &self,
        input: &ApplicationInput,
        decision: &EligibilityDecision,
    ) -> Result<String, AdviceError> {
        self.calls
            .lock()
            .expect("advisor mutex poisoned")
            .push(format!("advise:{}", input.credit_score));
        Ok(format!("advice for {}", decision.summary()))
    }

    async fn educate(&self, topic: EducationTopic) -> Result<String, AdviceError> {
        self.calls
            .lock()
            .expect("advisor mutex poisoned")
            .push(format!("educate:{}", topic.slug()));
        Ok(format!("all about {}", topic.title()))
    }
}

pub(super) struct FailingAdvisor;

#[async_trait]
impl LoanAdvisor for FailingAdvisor {
    async fn advise(
        &self,
        _input: &ApplicationInput,
        _decision: &EligibilityDecision,
    ) -> Result<String, AdviceError> {
        Err(AdviceError::Upstream { status: 429 })
    }

    async fn educate(&self, _topic: EducationTopic) -> Result<String, AdviceError> {
        Err(AdviceError::EmptyResponse)
    }
}

pub(super) fn service() -> EligibilityService {
    EligibilityService::new(engine())
}

pub(super) fn service_with_advisor(advisor: Arc<dyn LoanAdvisor>) -> EligibilityService {
    EligibilityService::new(engine()).with_advisor(advisor)
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
