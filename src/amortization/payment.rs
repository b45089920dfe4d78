//! Fixed-rate annuity payment

/// Convert an annual percentage rate into a monthly decimal rate
pub fn monthly_rate(annual_rate_percent: f64) -> f64 {
    annual_rate_percent / 100.0 / 12.0
}

/// Level monthly payment that repays `principal` over `term_years`
///
/// Returns 0 when there is nothing to repay or no term. A zero rate falls
/// back to straight-line repayment (principal / months). Terms too long for
/// the growth factor to stay finite pay interest only.
pub fn monthly_payment(principal: f64, annual_rate_percent: f64, term_years: u32) -> f64 {
    let n = term_years.saturating_mul(12);
    if principal <= 0.0 || n == 0 {
        return 0.0;
    }

    let r = monthly_rate(annual_rate_percent);
    if r == 0.0 {
        return principal / n as f64;
    }

    let growth = (1.0 + r).powf(n as f64);
    if !growth.is_finite() {
        return principal * r;
    }
    principal * (r * growth) / (growth - 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_monthly_payment_zero_rate() {
        assert_eq!(monthly_payment(120_000.0, 0.0, 10), 1_000.0);
    }

    #[test]
    fn test_monthly_payment_standard_loan() {
        // 240k over 30 years at 5%: the textbook figure is 1288.37
        let payment = monthly_payment(240_000.0, 5.0, 30);
        assert_relative_eq!(payment, 1_288.37, epsilon = 0.01);
    }

    #[test]
    fn test_monthly_payment_degenerate_inputs() {
        assert_eq!(monthly_payment(0.0, 5.0, 30), 0.0);
        assert_eq!(monthly_payment(-10.0, 5.0, 30), 0.0);
        assert_eq!(monthly_payment(100_000.0, 5.0, 0), 0.0);
    }

    #[test]
    fn test_monthly_payment_extreme_term() {
        let straight_line = monthly_payment(100_000.0, 0.0, u32::MAX);
        assert!(straight_line > 0.0 && straight_line.is_finite());

        // Growth overflows, leaving interest only
        let payment = monthly_payment(100_000.0, 5.0, u32::MAX);
        assert_relative_eq!(payment, 100_000.0 * 0.05 / 12.0);

        let long = monthly_payment(100_000.0, 5.0, 100);
        assert!(long.is_finite() && long > 100_000.0 * 0.05 / 12.0);
    }

    #[test]
    fn test_higher_rate_means_higher_payment() {
        let low = monthly_payment(200_000.0, 3.0, 25);
        let high = monthly_payment(200_000.0, 6.0, 25);
        assert!(high > low);
    }
}
