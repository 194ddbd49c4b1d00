use std::sync::Arc;

use serde::Serialize;
use tracing::{info, warn};

use super::domain::ApplicationForm;
use super::evaluation::{EligibilityDecision, EligibilityEngine};
use super::intake::InputError;
use crate::advice::{AdviceError, EducationTopic, LoanAdvisor};

/// Service composing the evaluation engine with the optional advisor.
#[derive(Clone)]
pub struct EligibilityService {
    engine: Arc<EligibilityEngine>,
    advisor: Option<Arc<dyn LoanAdvisor>>,
}

impl EligibilityService {
    pub fn new(engine: EligibilityEngine) -> Self {
        Self {
            engine: Arc::new(engine),
            advisor: None,
        }
    }

    pub fn with_advisor(mut self, advisor: Arc<dyn LoanAdvisor>) -> Self {
        self.advisor = Some(advisor);
        self
    }

    pub fn engine(&self) -> &EligibilityEngine {
        &self.engine
    }

    pub fn advice_available(&self) -> bool {
        self.advisor.is_some()
    }

    /// Screen and evaluate a submitted form.
    pub fn check(&self, form: &ApplicationForm) -> Result<EligibilityDecision, ServiceError> {
        let decision = self
            .engine
            .evaluate_form(form)
            .map_err(ServiceError::Input)?;

        info!(
            approved = decision.approved,
            summary = %decision.summary(),
            "eligibility decision issued"
        );
        Ok(decision)
    }

    /// Evaluate the form and ask the advisor to explain the outcome.
    pub async fn advise(&self, form: &ApplicationForm) -> Result<AdvisedDecision, ServiceError> {
        let advisor = self.advisor.as_ref().ok_or(AdviceError::Unavailable)?;
        let input = self
            .engine
            .guard()
            .screen_form(form)
            .map_err(ServiceError::Input)?;
        let decision = self
            .engine
            .evaluate(&input)
            .map_err(|err| ServiceError::Input(vec![err]))?;

        let advice = advisor.advise(&input, &decision).await.map_err(|err| {
            warn!(error = %err, "advice request failed");
            err
        })?;

        Ok(AdvisedDecision { decision, advice })
    }

    pub async fn educate(&self, topic: EducationTopic) -> Result<String, ServiceError> {
        let advisor = self.advisor.as_ref().ok_or(AdviceError::Unavailable)?;
        let content = advisor.educate(topic).await.map_err(|err| {
            warn!(error = %err, topic = topic.slug(), "education request failed");
            err
        })?;
        Ok(content)
    }
}

/// Decision paired with narrative advice.
#[derive(Debug, Clone, Serialize)]
pub struct AdvisedDecision {
    pub decision: EligibilityDecision,
    pub advice: String,
}

/// Error raised by the eligibility service.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("{} input problem(s), first: {}", .0.len(), first_problem(.0))]
    Input(Vec<InputError>),
    #[error(transparent)]
    Advice(#[from] AdviceError),
}

fn first_problem(problems: &[InputError]) -> String {
    problems
        .first()
        .map(ToString::to_string)
        .unwrap_or_else(|| "none".to_string())
}
