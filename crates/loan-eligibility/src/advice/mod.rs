//! Narrative advice and financial education layered on top of a decision.
//!
//! Advice is optional: when no provider is configured the evaluator keeps working and the
//! routes answer with `503 Service Unavailable`.

mod gemini;
mod prompt;

pub use gemini::{extract_text, GeminiAdvisor};
pub use prompt::{advice_prompt, education_prompt};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::eligibility::{ApplicationInput, EligibilityDecision};

/// Topics offered in the financial education panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EducationTopic {
    CreditScores,
    DebtToIncome,
    DownPaymentStrategies,
    LoanTermsAndRates,
    FinancialPlanning,
}

impl EducationTopic {
    pub const ALL: [EducationTopic; 5] = [
        EducationTopic::CreditScores,
        EducationTopic::DebtToIncome,
        EducationTopic::DownPaymentStrategies,
        EducationTopic::LoanTermsAndRates,
        EducationTopic::FinancialPlanning,
    ];

    pub const fn title(self) -> &'static str {
        match self {
            EducationTopic::CreditScores => "Understanding Credit Scores",
            EducationTopic::DebtToIncome => "Debt-to-Income Ratio",
            EducationTopic::DownPaymentStrategies => "Down Payment Strategies",
            EducationTopic::LoanTermsAndRates => "Loan Terms and Interest Rates",
            EducationTopic::FinancialPlanning => "Financial Planning",
        }
    }

    pub const fn slug(self) -> &'static str {
        match self {
            EducationTopic::CreditScores => "credit_scores",
            EducationTopic::DebtToIncome => "debt_to_income",
            EducationTopic::DownPaymentStrategies => "down_payment_strategies",
            EducationTopic::LoanTermsAndRates => "loan_terms_and_rates",
            EducationTopic::FinancialPlanning => "financial_planning",
        }
    }

    pub fn from_slug(value: &str) -> Option<Self> {
        let normalized = value.trim().to_ascii_lowercase().replace('-', "_");
        Self::ALL
            .into_iter()
            .find(|topic| topic.slug() == normalized)
    }
}

/// Errors raised while fetching advice from a provider.
#[derive(Debug, thiserror::Error)]
pub enum AdviceError {
    #[error("AI-powered advice is currently unavailable")]
    Unavailable,
    #[error("advice request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("advice provider responded with status {status}")]
    Upstream { status: u16 },
    #[error("advice provider returned an empty response")]
    EmptyResponse,
}

/// Provider of narrative advice for a decided application.
#[async_trait]
pub trait LoanAdvisor: Send + Sync {
    async fn advise(
        &self,
        input: &ApplicationInput,
        decision: &EligibilityDecision,
    ) -> Result<String, AdviceError>;

    async fn educate(&self, topic: EducationTopic) -> Result<String, AdviceError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn topics_resolve_from_slugs() {
        assert_eq!(
            EducationTopic::from_slug("credit-scores"),
            Some(EducationTopic::CreditScores)
        );
        assert_eq!(
            EducationTopic::from_slug(" Financial_Planning "),
            Some(EducationTopic::FinancialPlanning)
        );
        assert_eq!(EducationTopic::from_slug("crypto"), None);
    }

    #[test]
    fn every_topic_round_trips_through_its_slug() {
        for topic in EducationTopic::ALL {
            assert_eq!(EducationTopic::from_slug(topic.slug()), Some(topic));
        }
    }
}
