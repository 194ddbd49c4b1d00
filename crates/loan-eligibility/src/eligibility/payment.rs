//! Fixed-rate amortization.

/// Level monthly payment that retires `principal` over `term_months` at `annual_rate`.
///
/// A non-positive principal or an empty term yields no payment. A zero rate degrades to
/// straight-line repayment.
pub fn monthly_payment(principal: f64, term_months: u32, annual_rate: f64) -> f64 {
    if principal <= 0.0 || term_months == 0 {
        return 0.0;
    }

    let months = f64::from(term_months);
    let monthly_rate = annual_rate / 12.0;
    if monthly_rate == 0.0 {
        return principal / months;
    }

    let growth = (1.0 + monthly_rate).powf(months);
    principal * (monthly_rate * growth) / (growth - 1.0)
}

/// Round half away from zero to `places` decimals for display.
pub fn round_to(value: f64, places: i32) -> f64 {
    let scale = 10f64.powi(places);
    (value * scale).round() / scale
}
