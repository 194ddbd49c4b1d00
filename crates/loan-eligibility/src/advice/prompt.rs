use std::fmt::Write;

use super::EducationTopic;
use crate::eligibility::{ApplicationInput, EligibilityDecision};

pub fn advice_prompt(input: &ApplicationInput, decision: &EligibilityDecision) -> String {
    let mut prompt = String::from(
        "As a financial advisor, analyze this loan application and provide detailed advice.\n\n",
    );

    prompt.push_str("Applicant Details:\n");
    if let Some(age) = input.applicant_age {
        let _ = writeln!(prompt, "- Age: {age}");
    }
    let _ = writeln!(prompt, "- Annual Income: {:.2}", input.annual_income);
    let _ = writeln!(prompt, "- Years of Employment: {}", input.employment_years);
    let _ = writeln!(prompt, "- Credit Score: {}", input.credit_score);
    let _ = writeln!(prompt, "- Loan Amount: {:.2}", input.loan_amount);
    let _ = writeln!(prompt, "- Down Payment: {:.2}", input.down_payment);
    let _ = writeln!(prompt, "- Monthly Debt: {:.2}", input.monthly_debt);
    let _ = writeln!(prompt, "- Loan Term: {} years", input.loan_term_years);

    prompt.push_str("\nEligibility Result:\n");
    let _ = writeln!(prompt, "- Eligible: {}", decision.approved);
    let _ = writeln!(prompt, "- Strength Score: {:.1}%", decision.strength_score);
    let _ = writeln!(
        prompt,
        "- Estimated Monthly Payment: {:.2} at {:.1}% annual interest",
        decision.payment.monthly_payment,
        decision.payment.annual_rate * 100.0
    );

    prompt.push_str("\nAnalysis Reasons:\n");
    for reason in &decision.reasons {
        let _ = writeln!(prompt, "- {reason}");
    }

    prompt.push_str(
        "\nPlease provide:\n\
         1. A detailed analysis of the application\n\
         2. Specific recommendations for improvement if not eligible\n\
         3. Financial advice regarding the loan terms\n\
         4. Potential risks and considerations\n\
         5. Alternative options if applicable\n\n\
         Format the response in clear sections with bullet points where appropriate.\n",
    );

    prompt
}

pub fn education_prompt(topic: EducationTopic) -> String {
    format!(
        "As a financial educator, provide clear and concise information about: {}\n\n\
         Please include:\n\
         1. Basic explanation\n\
         2. Key points to remember\n\
         3. Common mistakes to avoid\n\
         4. Best practices\n\
         5. Additional resources\n\n\
         Format the response in a clear, easy-to-understand manner with bullet points where appropriate.\n",
        topic.title()
    )
}
