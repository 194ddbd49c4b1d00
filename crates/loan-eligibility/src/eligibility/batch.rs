//! Screen a CSV export of form submissions in one pass.
//!
//! Headers follow the [`ApplicationForm`] field names; missing columns and blank cells are
//! reported as missing fields on the affected rows rather than failing the whole batch.

use std::io::Read;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::domain::{ApplicationForm, FormValue};
use super::evaluation::{EligibilityDecision, EligibilityEngine};
use super::intake::InputError;

/// Error raised when the CSV itself cannot be read.
#[derive(Debug, thiserror::Error)]
pub enum BatchError {
    #[error("failed to read CSV row {row}: {source}")]
    Csv {
        row: usize,
        #[source]
        source: csv::Error,
    },
}

/// Outcome for one CSV row. Rows are numbered from 1, excluding the header.
#[derive(Debug, Clone, PartialEq)]
pub struct ScreenedRow {
    pub row: usize,
    pub result: Result<EligibilityDecision, Vec<InputError>>,
}

impl ScreenedRow {
    pub fn view(&self) -> ScreenedRowView {
        match &self.result {
            Ok(decision) => ScreenedRowView {
                row: self.row,
                approved: Some(decision.approved),
                summary: decision.summary(),
                errors: Vec::new(),
            },
            Err(problems) => ScreenedRowView {
                row: self.row,
                approved: None,
                summary: "input rejected".to_string(),
                errors: problems.iter().map(ToString::to_string).collect(),
            },
        }
    }
}

/// Flattened row representation for printing or JSON output.
#[derive(Debug, Clone, Serialize)]
pub struct ScreenedRowView {
    pub row: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub approved: Option<bool>,
    pub summary: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<String>,
}

/// Totals across a screened batch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct BatchTally {
    pub approved: usize,
    pub denied: usize,
    pub rejected: usize,
}

impl BatchTally {
    pub fn from_rows(rows: &[ScreenedRow]) -> Self {
        rows.iter().fold(Self::default(), |mut tally, row| {
            match &row.result {
                Ok(decision) if decision.approved => tally.approved += 1,
                Ok(_) => tally.denied += 1,
                Err(_) => tally.rejected += 1,
            }
            tally
        })
    }
}

/// Raw CSV cells. Every cell stays text so coercion problems land on the row, not the reader.
#[derive(Debug, Deserialize)]
struct CsvRow {
    #[serde(default)]
    credit_score: Option<String>,
    #[serde(default)]
    annual_income: Option<String>,
    #[serde(default)]
    employment_years: Option<String>,
    #[serde(default)]
    monthly_debt: Option<String>,
    #[serde(default)]
    down_payment: Option<String>,
    #[serde(default)]
    loan_amount: Option<String>,
    #[serde(default)]
    loan_term_years: Option<String>,
    #[serde(default)]
    applicant_age: Option<String>,
}

impl From<CsvRow> for ApplicationForm {
    fn from(row: CsvRow) -> Self {
        let cell = |value: Option<String>| value.map(FormValue::Text);
        Self {
            credit_score: cell(row.credit_score),
            annual_income: cell(row.annual_income),
            employment_years: cell(row.employment_years),
            monthly_debt: cell(row.monthly_debt),
            down_payment: cell(row.down_payment),
            loan_amount: cell(row.loan_amount),
            loan_term_years: cell(row.loan_term_years),
            applicant_age: cell(row.applicant_age),
        }
    }
}

pub fn screen_csv<R: Read>(
    reader: R,
    engine: &EligibilityEngine,
) -> Result<Vec<ScreenedRow>, BatchError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut rows = Vec::new();
    for (index, record) in csv_reader.deserialize::<CsvRow>().enumerate() {
        let row = index + 1;
        let cells = record.map_err(|source| BatchError::Csv { row, source })?;
        let form = ApplicationForm::from(cells);
        let result = engine.evaluate_form(&form);
        if let Err(problems) = &result {
            warn!(row, problems = problems.len(), "batch row rejected");
        }
        rows.push(ScreenedRow { row, result });
    }

    debug!(rows = rows.len(), "batch screened");
    Ok(rows)
}
