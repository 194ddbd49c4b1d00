use super::common::*;
use crate::eligibility::domain::{ApplicationForm, FormValue};
use crate::eligibility::intake::{InputError, IntakeGuard, IntakePolicy};

#[test]
fn text_values_are_coerced_into_typed_input() {
    let input = IntakeGuard::default()
        .application_from_form(&text_form())
        .expect("form coerces");

    assert_eq!(input, scenario_a());
}

#[test]
fn typed_input_round_trips_through_the_form() {
    let input = IntakeGuard::default()
        .application_from_form(&scenario_a_form())
        .expect("form coerces");

    assert_eq!(input, scenario_a());
}

#[test]
fn missing_and_blank_fields_are_reported() {
    let mut form = text_form();
    form.loan_amount = None;
    form.monthly_debt = Some(FormValue::from("   "));

    let problems = IntakeGuard::default()
        .screen_form(&form)
        .expect_err("incomplete form");

    assert_eq!(
        problems,
        vec![
            InputError::MissingField {
                field: "monthly_debt"
            },
            InputError::MissingField {
                field: "loan_amount"
            },
        ]
    );
}

#[test]
fn every_problem_is_collected_in_field_order() {
    let form = ApplicationForm {
        credit_score: Some(FormValue::from("excellent")),
        annual_income: Some(FormValue::Number(-1.0)),
        employment_years: Some(FormValue::Number(3.0)),
        monthly_debt: Some(FormValue::Number(0.0)),
        down_payment: Some(FormValue::Number(10_000.0)),
        loan_amount: Some(FormValue::Number(150_000.0)),
        loan_term_years: Some(FormValue::Number(0.0)),
        applicant_age: Some(FormValue::Number(17.0)),
    };

    let problems = IntakeGuard::default()
        .screen_form(&form)
        .expect_err("invalid form");

    let fields: Vec<&str> = problems.iter().map(InputError::field).collect();
    assert_eq!(
        fields,
        vec![
            "credit_score",
            "annual_income",
            "loan_term_years",
            "applicant_age"
        ]
    );
    assert_eq!(
        problems[0].to_string(),
        "credit_score must be numeric (found \"excellent\")"
    );
    assert_eq!(problems[1].to_string(), "annual_income cannot be negative (found -1)");
    assert_eq!(problems[2].to_string(), "loan_term_years must be greater than 0");
    assert_eq!(
        problems[3].to_string(),
        "applicant_age must be between 18 and 120 (found 17)"
    );
}

#[test]
fn application_from_form_returns_the_first_problem() {
    let mut form = text_form();
    form.annual_income = Some(FormValue::Number(0.0));
    form.loan_amount = Some(FormValue::Number(0.0));

    let err = IntakeGuard::default()
        .application_from_form(&form)
        .expect_err("zero divisors rejected");

    assert_eq!(
        err,
        InputError::Zero {
            field: "annual_income"
        }
    );
}

#[test]
fn credit_score_outside_range_is_not_clamped() {
    for raw in [299.0, 851.0, 1200.0] {
        let mut form = text_form();
        form.credit_score = Some(FormValue::Number(raw));

        let err = IntakeGuard::default()
            .application_from_form(&form)
            .expect_err("out of range");

        assert_eq!(
            err,
            InputError::OutOfRange {
                field: "credit_score",
                found: raw,
                min: 300.0,
                max: 850.0,
            }
        );
    }
}

#[test]
fn credit_score_bounds_are_accepted() {
    for raw in ["300", "850"] {
        let mut form = text_form();
        form.credit_score = Some(FormValue::from(raw));
        assert!(IntakeGuard::default().application_from_form(&form).is_ok());
    }
}

#[test]
fn fractional_whole_number_fields_are_rejected() {
    let mut form = text_form();
    form.credit_score = Some(FormValue::Number(700.5));
    form.loan_term_years = Some(FormValue::from("15.5"));

    let problems = IntakeGuard::default()
        .screen_form(&form)
        .expect_err("fractional values");

    assert!(matches!(
        problems[0],
        InputError::NotWholeNumber {
            field: "credit_score",
            ..
        }
    ));
    assert!(matches!(
        problems[1],
        InputError::NotWholeNumber {
            field: "loan_term_years",
            ..
        }
    ));
}

#[test]
fn down_payment_above_loan_amount_is_rejected() {
    let mut form = text_form();
    form.down_payment = Some(FormValue::Number(250_000.0));

    let err = IntakeGuard::default()
        .application_from_form(&form)
        .expect_err("down payment too large");

    assert_eq!(err.field(), "down_payment");
    assert!(matches!(err, InputError::DownPaymentExceedsLoan { .. }));
}

#[test]
fn non_finite_text_is_rejected() {
    let mut form = text_form();
    form.monthly_debt = Some(FormValue::from("inf"));

    let err = IntakeGuard::default()
        .application_from_form(&form)
        .expect_err("infinite debt");

    assert_eq!(
        err,
        InputError::NonFinite {
            field: "monthly_debt"
        }
    );
}

#[test]
fn custom_policy_limits_loan_term() {
    let guard = IntakeGuard::with_policy(IntakePolicy {
        maximum_loan_term_years: 30,
        ..IntakePolicy::default()
    });
    let mut form = text_form();
    form.loan_term_years = Some(FormValue::from("40"));

    let err = guard
        .application_from_form(&form)
        .expect_err("term too long");

    assert!(matches!(
        err,
        InputError::OutOfRange {
            field: "loan_term_years",
            ..
        }
    ));
}

#[test]
fn typed_input_problems_cover_negative_amounts() {
    let mut input = scenario_a();
    input.monthly_debt = -10.0;
    input.employment_years = f64::NAN;

    let problems = IntakeGuard::default().problems(&input);

    assert_eq!(
        problems,
        vec![
            InputError::NonFinite {
                field: "employment_years"
            },
            InputError::Negative {
                field: "monthly_debt",
                value: -10.0
            },
        ]
    );
}

#[test]
fn form_deserializes_mixed_json_values() {
    let form: ApplicationForm = serde_json::from_value(serde_json::json!({
        "credit_score": 700,
        "annual_income": "80000",
        "employment_years": 5,
        "monthly_debt": 500.0,
        "down_payment": "40,000",
        "loan_amount": 200000,
        "loan_term_years": "30"
    }))
    .expect("form json");

    let input = IntakeGuard::default()
        .application_from_form(&form)
        .expect("form coerces");

    assert_eq!(input, scenario_a());
}

#[test]
fn non_scalar_json_values_are_not_numeric() {
    let form: ApplicationForm = serde_json::from_value(serde_json::json!({
        "credit_score": 700,
        "annual_income": false,
        "employment_years": { "years": 5 },
        "monthly_debt": 500,
        "down_payment": 40000,
        "loan_amount": 200000,
        "loan_term_years": 30
    }))
    .expect("form json");

    let problems = IntakeGuard::default()
        .screen_form(&form)
        .expect_err("non-numeric values rejected");

    assert_eq!(
        problems,
        vec![
            InputError::NotNumeric {
                field: "annual_income",
                value: "false".to_string(),
            },
            InputError::NotNumeric {
                field: "employment_years",
                value: "{\"years\":5}".to_string(),
            },
        ]
    );
}
