use super::domain::{ApplicationForm, ApplicationInput, FormValue};

/// Validation errors raised before any eligibility verdict is produced.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum InputError {
    #[error("{field} is required")]
    MissingField { field: &'static str },
    #[error("{field} must be numeric (found {value:?})")]
    NotNumeric { field: &'static str, value: String },
    #[error("{field} must be a whole number (found {value})")]
    NotWholeNumber { field: &'static str, value: f64 },
    #[error("{field} must be a finite number")]
    NonFinite { field: &'static str },
    #[error("{field} cannot be negative (found {value})")]
    Negative { field: &'static str, value: f64 },
    #[error("{field} must be greater than 0")]
    Zero { field: &'static str },
    #[error("{field} must be between {min} and {max} (found {found})")]
    OutOfRange {
        field: &'static str,
        found: f64,
        min: f64,
        max: f64,
    },
    #[error("down payment ({down_payment:.2}) cannot be greater than loan amount ({loan_amount:.2})")]
    DownPaymentExceedsLoan { down_payment: f64, loan_amount: f64 },
}

impl InputError {
    /// Name of the form field the user has to correct.
    pub fn field(&self) -> &'static str {
        match self {
            InputError::MissingField { field }
            | InputError::NotNumeric { field, .. }
            | InputError::NotWholeNumber { field, .. }
            | InputError::NonFinite { field }
            | InputError::Negative { field, .. }
            | InputError::Zero { field }
            | InputError::OutOfRange { field, .. } => field,
            InputError::DownPaymentExceedsLoan { .. } => fields::DOWN_PAYMENT,
        }
    }
}

pub mod fields {
    pub const CREDIT_SCORE: &str = "credit_score";
    pub const ANNUAL_INCOME: &str = "annual_income";
    pub const EMPLOYMENT_YEARS: &str = "employment_years";
    pub const MONTHLY_DEBT: &str = "monthly_debt";
    pub const DOWN_PAYMENT: &str = "down_payment";
    pub const LOAN_AMOUNT: &str = "loan_amount";
    pub const LOAN_TERM_YEARS: &str = "loan_term_years";
    pub const APPLICANT_AGE: &str = "applicant_age";
}

const CREDIT_SCORE_FLOOR: u16 = 300;
const CREDIT_SCORE_CEILING: u16 = 850;
const MINIMUM_APPLICANT_AGE: u8 = 18;
const MAXIMUM_APPLICANT_AGE: u8 = 120;
const MAXIMUM_LOAN_TERM_YEARS: u16 = 50;

/// Range limits applied at the form boundary.
#[derive(Debug, Clone, PartialEq)]
pub struct IntakePolicy {
    pub credit_score_floor: u16,
    pub credit_score_ceiling: u16,
    pub minimum_applicant_age: u8,
    pub maximum_applicant_age: u8,
    pub maximum_loan_term_years: u16,
}

impl Default for IntakePolicy {
    fn default() -> Self {
        Self {
            credit_score_floor: CREDIT_SCORE_FLOOR,
            credit_score_ceiling: CREDIT_SCORE_CEILING,
            minimum_applicant_age: MINIMUM_APPLICANT_AGE,
            maximum_applicant_age: MAXIMUM_APPLICANT_AGE,
            maximum_loan_term_years: MAXIMUM_LOAN_TERM_YEARS,
        }
    }
}

/// Guard responsible for producing `ApplicationInput` instances.
#[derive(Debug, Clone, Default)]
pub struct IntakeGuard {
    policy: IntakePolicy,
}

impl IntakeGuard {
    pub fn with_policy(policy: IntakePolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> &IntakePolicy {
        &self.policy
    }

    /// Coerce a raw form into a validated application, reporting the first offending field.
    pub fn application_from_form(
        &self,
        form: &ApplicationForm,
    ) -> Result<ApplicationInput, InputError> {
        self.screen_form(form).map_err(|problems| {
            problems
                .into_iter()
                .next()
                .unwrap_or(InputError::MissingField {
                    field: fields::CREDIT_SCORE,
                })
        })
    }

    /// Coerce a raw form, collecting every problem so the user can fix them in one pass.
    ///
    /// The `Err` vector is never empty.
    pub fn screen_form(&self, form: &ApplicationForm) -> Result<ApplicationInput, Vec<InputError>> {
        let mut problems = Vec::new();

        let credit_score = whole(fields::CREDIT_SCORE, form.credit_score.as_ref())
            .and_then(|score| {
                self.credit_score_in_range(score)?;
                Ok(score as u16)
            })
            .map_err(|err| problems.push(err))
            .ok();

        let annual_income = number(fields::ANNUAL_INCOME, form.annual_income.as_ref())
            .and_then(|value| positive(fields::ANNUAL_INCOME, value))
            .map_err(|err| problems.push(err))
            .ok();

        let employment_years = number(fields::EMPLOYMENT_YEARS, form.employment_years.as_ref())
            .and_then(|value| non_negative(fields::EMPLOYMENT_YEARS, value))
            .map_err(|err| problems.push(err))
            .ok();

        let monthly_debt = number(fields::MONTHLY_DEBT, form.monthly_debt.as_ref())
            .and_then(|value| non_negative(fields::MONTHLY_DEBT, value))
            .map_err(|err| problems.push(err))
            .ok();

        let down_payment = number(fields::DOWN_PAYMENT, form.down_payment.as_ref())
            .and_then(|value| non_negative(fields::DOWN_PAYMENT, value))
            .map_err(|err| problems.push(err))
            .ok();

        let loan_amount = number(fields::LOAN_AMOUNT, form.loan_amount.as_ref())
            .and_then(|value| positive(fields::LOAN_AMOUNT, value))
            .map_err(|err| problems.push(err))
            .ok();

        let loan_term_years = whole(fields::LOAN_TERM_YEARS, form.loan_term_years.as_ref())
            .and_then(|term| {
                self.loan_term_in_range(term)?;
                Ok(term as u16)
            })
            .map_err(|err| problems.push(err))
            .ok();

        let applicant_age = match form.applicant_age.as_ref() {
            None => Some(None),
            Some(value) => whole(fields::APPLICANT_AGE, Some(value))
                .and_then(|age| {
                    self.age_in_range(age)?;
                    Ok(Some(age as u8))
                })
                .map_err(|err| problems.push(err))
                .ok(),
        };

        if let (Some(down_payment), Some(loan_amount)) = (down_payment, loan_amount) {
            if let Err(err) = down_payment_within_loan(down_payment, loan_amount) {
                problems.push(err);
            }
        }

        match (
            credit_score,
            annual_income,
            employment_years,
            monthly_debt,
            down_payment,
            loan_amount,
            loan_term_years,
            applicant_age,
        ) {
            (
                Some(credit_score),
                Some(annual_income),
                Some(employment_years),
                Some(monthly_debt),
                Some(down_payment),
                Some(loan_amount),
                Some(loan_term_years),
                Some(applicant_age),
            ) if problems.is_empty() => Ok(ApplicationInput {
                credit_score,
                annual_income,
                employment_years,
                monthly_debt,
                down_payment,
                loan_amount,
                loan_term_years,
                applicant_age,
            }),
            _ => Err(problems),
        }
    }

    /// Re-check an already typed application. Returns the first problem found.
    pub fn check(&self, input: &ApplicationInput) -> Result<(), InputError> {
        match self.problems(input).into_iter().next() {
            Some(problem) => Err(problem),
            None => Ok(()),
        }
    }

    /// Every problem with an already typed application, in field order.
    pub fn problems(&self, input: &ApplicationInput) -> Vec<InputError> {
        let checks = [
            self.credit_score_in_range(i64::from(input.credit_score)),
            positive(fields::ANNUAL_INCOME, input.annual_income).map(drop),
            non_negative(fields::EMPLOYMENT_YEARS, input.employment_years).map(drop),
            non_negative(fields::MONTHLY_DEBT, input.monthly_debt).map(drop),
            non_negative(fields::DOWN_PAYMENT, input.down_payment).map(drop),
            positive(fields::LOAN_AMOUNT, input.loan_amount).map(drop),
            self.loan_term_in_range(i64::from(input.loan_term_years)),
            input
                .applicant_age
                .map(|age| self.age_in_range(i64::from(age)))
                .unwrap_or(Ok(())),
        ];

        let mut problems: Vec<InputError> = checks.into_iter().filter_map(Result::err).collect();

        let amounts_valid = !problems.iter().any(|problem| {
            matches!(problem.field(), fields::DOWN_PAYMENT | fields::LOAN_AMOUNT)
        });
        if amounts_valid {
            if let Err(err) = down_payment_within_loan(input.down_payment, input.loan_amount) {
                problems.push(err);
            }
        }

        problems
    }

    fn credit_score_in_range(&self, score: i64) -> Result<(), InputError> {
        let floor = i64::from(self.policy.credit_score_floor);
        let ceiling = i64::from(self.policy.credit_score_ceiling);
        if score < floor || score > ceiling {
            return Err(InputError::OutOfRange {
                field: fields::CREDIT_SCORE,
                found: score as f64,
                min: floor as f64,
                max: ceiling as f64,
            });
        }
        Ok(())
    }

    fn loan_term_in_range(&self, term: i64) -> Result<(), InputError> {
        if term < 0 {
            return Err(InputError::Negative {
                field: fields::LOAN_TERM_YEARS,
                value: term as f64,
            });
        }
        if term == 0 {
            return Err(InputError::Zero {
                field: fields::LOAN_TERM_YEARS,
            });
        }
        let max = i64::from(self.policy.maximum_loan_term_years);
        if term > max {
            return Err(InputError::OutOfRange {
                field: fields::LOAN_TERM_YEARS,
                found: term as f64,
                min: 1.0,
                max: max as f64,
            });
        }
        Ok(())
    }

    fn age_in_range(&self, age: i64) -> Result<(), InputError> {
        let min = i64::from(self.policy.minimum_applicant_age);
        let max = i64::from(self.policy.maximum_applicant_age);
        if age < min || age > max {
            return Err(InputError::OutOfRange {
                field: fields::APPLICANT_AGE,
                found: age as f64,
                min: min as f64,
                max: max as f64,
            });
        }
        Ok(())
    }
}

fn number(field: &'static str, value: Option<&FormValue>) -> Result<f64, InputError> {
    let parsed = match value {
        None => return Err(InputError::MissingField { field }),
        Some(FormValue::Number(number)) => *number,
        Some(FormValue::Text(raw)) => {
            let cleaned: String = raw
                .trim()
                .chars()
                .filter(|ch| *ch != ',' && *ch != '_')
                .collect();
            if cleaned.is_empty() {
                return Err(InputError::MissingField { field });
            }
            cleaned.parse::<f64>().map_err(|_| InputError::NotNumeric {
                field,
                value: raw.clone(),
            })?
        }
        Some(FormValue::Other(other)) => {
            return Err(InputError::NotNumeric {
                field,
                value: other.to_string(),
            })
        }
    };

    if !parsed.is_finite() {
        return Err(InputError::NonFinite { field });
    }
    Ok(parsed)
}

fn whole(field: &'static str, value: Option<&FormValue>) -> Result<i64, InputError> {
    let parsed = number(field, value)?;
    if parsed.fract() != 0.0 || parsed.abs() > i64::MAX as f64 {
        return Err(InputError::NotWholeNumber {
            field,
            value: parsed,
        });
    }
    Ok(parsed as i64)
}

fn non_negative(field: &'static str, value: f64) -> Result<f64, InputError> {
    if !value.is_finite() {
        return Err(InputError::NonFinite { field });
    }
    if value < 0.0 {
        return Err(InputError::Negative { field, value });
    }
    Ok(value)
}

fn positive(field: &'static str, value: f64) -> Result<f64, InputError> {
    let value = non_negative(field, value)?;
    if value == 0.0 {
        return Err(InputError::Zero { field });
    }
    Ok(value)
}

fn down_payment_within_loan(down_payment: f64, loan_amount: f64) -> Result<(), InputError> {
    if down_payment > loan_amount {
        return Err(InputError::DownPaymentExceedsLoan {
            down_payment,
            loan_amount,
        });
    }
    Ok(())
}
