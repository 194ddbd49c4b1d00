use chrono::Local;
use clap::{Args, ValueEnum};
use loan_eligibility::config::AppConfig;
use loan_eligibility::eligibility::{
    screen_csv, ApplicationForm, ApplicationInput, BatchTally, EligibilityConfig,
    EligibilityDecision, EligibilityEngine, FormValue,
};
use loan_eligibility::error::AppError;
use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;

#[derive(Args, Debug, Default)]
pub(crate) struct CheckArgs {
    /// Credit score (300-850)
    #[arg(long)]
    pub(crate) credit_score: Option<String>,
    /// Gross annual income
    #[arg(long)]
    pub(crate) annual_income: Option<String>,
    /// Years with current employer or in the same line of work
    #[arg(long)]
    pub(crate) employment_years: Option<String>,
    /// Recurring monthly debt payments
    #[arg(long)]
    pub(crate) monthly_debt: Option<String>,
    /// Cash put down at closing
    #[arg(long)]
    pub(crate) down_payment: Option<String>,
    /// Requested loan amount
    #[arg(long)]
    pub(crate) loan_amount: Option<String>,
    /// Loan term in whole years
    #[arg(long)]
    pub(crate) loan_term_years: Option<String>,
    /// Applicant age, optional
    #[arg(long)]
    pub(crate) applicant_age: Option<String>,
    /// Print the decision as JSON instead of a report
    #[arg(long)]
    pub(crate) json: bool,
}

impl CheckArgs {
    fn form(&self) -> ApplicationForm {
        let text = |value: &Option<String>| value.as_deref().map(FormValue::from);
        ApplicationForm {
            credit_score: text(&self.credit_score),
            annual_income: text(&self.annual_income),
            employment_years: text(&self.employment_years),
            monthly_debt: text(&self.monthly_debt),
            down_payment: text(&self.down_payment),
            loan_amount: text(&self.loan_amount),
            loan_term_years: text(&self.loan_term_years),
            applicant_age: text(&self.applicant_age),
        }
    }
}

#[derive(Args, Debug)]
pub(crate) struct BatchArgs {
    /// CSV export whose headers match the application form fields
    #[arg(long)]
    pub(crate) csv: PathBuf,
    /// Print one JSON object per row instead of a table
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Run a single scenario instead of all three
    #[arg(long, value_enum)]
    pub(crate) scenario: Option<DemoScenario>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum DemoScenario {
    /// Qualified applicant
    A,
    /// Credit score below the minimum
    B,
    /// Down payment below the minimum ratio
    C,
}

impl DemoScenario {
    const ALL: [DemoScenario; 3] = [DemoScenario::A, DemoScenario::B, DemoScenario::C];

    fn label(self) -> &'static str {
        match self {
            DemoScenario::A => "Scenario A: qualified applicant",
            DemoScenario::B => "Scenario B: low credit score",
            DemoScenario::C => "Scenario C: small down payment",
        }
    }

    pub(crate) fn input(self) -> ApplicationInput {
        let baseline = ApplicationInput {
            credit_score: 700,
            annual_income: 80_000.0,
            employment_years: 5.0,
            monthly_debt: 500.0,
            down_payment: 40_000.0,
            loan_amount: 200_000.0,
            loan_term_years: 30,
            applicant_age: None,
        };
        match self {
            DemoScenario::A => baseline,
            DemoScenario::B => ApplicationInput {
                credit_score: 600,
                ..baseline
            },
            DemoScenario::C => ApplicationInput {
                down_payment: 10_000.0,
                ..baseline
            },
        }
    }
}

pub(crate) fn run_check(args: CheckArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let engine = EligibilityEngine::new(config.eligibility);

    let decision = match engine.evaluate_form(&args.form()) {
        Ok(decision) => decision,
        Err(problems) => {
            println!("Application rejected before evaluation:");
            for problem in &problems {
                println!("- {}: {}", problem.field(), problem);
            }
            return match problems.into_iter().next() {
                Some(first) => Err(AppError::from(first)),
                None => Ok(()),
            };
        }
    };

    if args.json {
        match serde_json::to_string_pretty(&decision) {
            Ok(json) => println!("{}", json),
            Err(err) => println!("Decision payload unavailable: {}", err),
        }
        return Ok(());
    }

    println!(
        "Loan eligibility check ({})",
        Local::now().format("%Y-%m-%d %H:%M")
    );
    render_decision(&decision, engine.config());
    Ok(())
}

pub(crate) fn run_batch(args: BatchArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let engine = EligibilityEngine::new(config.eligibility);

    let file = File::open(&args.csv)?;
    let rows = screen_csv(BufReader::new(file), &engine)?;
    let tally = BatchTally::from_rows(&rows);

    if args.json {
        for row in &rows {
            match serde_json::to_string(&row.view()) {
                Ok(json) => println!("{}", json),
                Err(err) => println!("Row {} payload unavailable: {}", row.row, err),
            }
        }
        return Ok(());
    }

    println!(
        "Batch screening of {} ({})",
        args.csv.display(),
        Local::now().format("%Y-%m-%d %H:%M")
    );
    for row in &rows {
        let view = row.view();
        let verdict = match view.approved {
            Some(true) => "APPROVED",
            Some(false) => "NOT APPROVED",
            None => "REJECTED",
        };
        println!("- row {} | {} | {}", view.row, verdict, view.summary);
        for error in &view.errors {
            println!("    - {}", error);
        }
    }
    println!(
        "\nTotals: {} approved | {} not approved | {} rejected input",
        tally.approved, tally.denied, tally.rejected
    );
    Ok(())
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let engine = EligibilityEngine::default();
    let scenarios = match args.scenario {
        Some(scenario) => vec![scenario],
        None => DemoScenario::ALL.to_vec(),
    };

    println!("Loan eligibility demo (default thresholds)");
    for scenario in scenarios {
        let input = scenario.input();
        let decision = engine.evaluate(&input)?;
        println!("\n{}", scenario.label());
        println!(
            "  Applicant: credit {} | income ${:.0} | {} years employed | debt ${:.0}/mo",
            input.credit_score, input.annual_income, input.employment_years, input.monthly_debt
        );
        println!(
            "  Request: ${:.0} over {} years with ${:.0} down",
            input.loan_amount, input.loan_term_years, input.down_payment
        );
        render_decision(&decision, engine.config());
    }
    Ok(())
}

pub(crate) fn render_decision(decision: &EligibilityDecision, config: &EligibilityConfig) {
    let verdict = if decision.approved {
        "APPROVED"
    } else {
        "NOT APPROVED"
    };
    println!("Verdict: {} ({})", verdict, decision.summary());
    println!("Strength score: {:.1}/100", decision.strength_score);

    let payment = &decision.payment;
    println!(
        "Estimated payment: ${:.2}/mo on ${:.2} at {:.2}% for {} months",
        payment.monthly_payment,
        payment.principal,
        payment.annual_rate * 100.0,
        payment.term_months
    );

    println!("Ratios");
    for (name, value) in &decision.computed_ratios {
        println!("- {}: {:.2}%", name, value * 100.0);
    }

    println!(
        "Criteria (minimum credit {} | max DTI {:.0}% | min down {:.0}% | min employment {} years | max PTI {:.0}%)",
        config.minimum_credit_score,
        config.maximum_debt_to_income * 100.0,
        config.minimum_down_payment_ratio * 100.0,
        config.minimum_employment_years,
        config.maximum_payment_to_income * 100.0
    );
    for outcome in &decision.criteria {
        let mark = if outcome.passed { "pass" } else { "fail" };
        println!("- [{}] {}", mark, outcome.note);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn demo_scenarios_reach_expected_verdicts() {
        let engine = EligibilityEngine::default();

        let verdicts: Vec<bool> = DemoScenario::ALL
            .into_iter()
            .map(|scenario| {
                engine
                    .evaluate(&scenario.input())
                    .expect("scenario input is valid")
                    .approved
            })
            .collect();

        assert_eq!(verdicts, vec![true, false, false]);
    }

    #[test]
    fn check_args_become_a_text_form() {
        let args = CheckArgs {
            credit_score: Some("700".to_string()),
            annual_income: Some("80,000".to_string()),
            employment_years: Some("5".to_string()),
            monthly_debt: Some("500".to_string()),
            down_payment: Some("40000".to_string()),
            loan_amount: Some("200000".to_string()),
            loan_term_years: Some("30".to_string()),
            applicant_age: None,
            json: false,
        };

        let decision = EligibilityEngine::default()
            .evaluate_form(&args.form())
            .expect("form is valid");

        assert!(decision.approved);
        let baseline = EligibilityEngine::default()
            .evaluate(&DemoScenario::A.input())
            .expect("scenario input is valid");
        assert_eq!(decision, baseline);
    }

    #[test]
    fn missing_check_flags_are_reported_per_field() {
        let problems = EligibilityEngine::default()
            .evaluate_form(&CheckArgs::default().form())
            .expect_err("empty form rejected");

        assert_eq!(problems.len(), 7);
        assert_eq!(problems[0].field(), "credit_score");
    }
}
