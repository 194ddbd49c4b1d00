use loan_eligibility::advice::GeminiAdvisor;
use loan_eligibility::config::AppConfig;
use loan_eligibility::eligibility::{EligibilityEngine, EligibilityService};
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use tracing::{info, warn};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Wire the evaluator with the configured thresholds and, when a key is present, the advisor.
pub(crate) fn eligibility_service(config: &AppConfig) -> EligibilityService {
    let service = EligibilityService::new(EligibilityEngine::new(config.eligibility.clone()));

    match GeminiAdvisor::from_config(&config.advisor) {
        Some(advisor) => {
            info!(model = %config.advisor.model, "advice provider configured");
            service.with_advisor(Arc::new(advisor))
        }
        None => {
            warn!("GEMINI_API_KEY not set; advice and education routes will answer 503");
            service
        }
    }
}
