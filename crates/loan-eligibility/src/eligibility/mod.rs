//! Loan application intake and threshold evaluation.

pub mod batch;
pub mod domain;
pub mod evaluation;
pub mod intake;
pub mod payment;
pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use batch::{screen_csv, BatchError, BatchTally, ScreenedRow, ScreenedRowView};
pub use domain::{ApplicationForm, ApplicationInput, CriterionKind, FormValue, PaymentBreakdown};
pub use evaluation::{
    evaluate, CriterionOutcome, EligibilityConfig, EligibilityDecision, EligibilityEngine,
    PrincipalBasis,
};
pub use intake::{InputError, IntakeGuard, IntakePolicy};
pub use router::eligibility_router;
pub use service::{AdvisedDecision, EligibilityService, ServiceError};
