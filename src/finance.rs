//! Shared financial math used by the division estimates and the revenue
//! projection endpoint. Every division that quotes a loan or lease payment
//! goes through [`monthly_payment`] rather than carrying its own copy of
//! the amortization formula.

/// Standard amortized monthly payment: `P * r(1+r)^n / ((1+r)^n - 1)`
/// for principal `p`, annual rate `annual_rate` and term `term_months`.
///
/// A zero rate degenerates to straight-line principal repayment. Zero or
/// negative terms and principals return 0 rather than erroring; callers
/// quote estimates, they do not underwrite.
pub fn monthly_payment(principal: f64, annual_rate: f64, term_months: u32) -> f64 {
    if principal <= 0.0 || term_months == 0 {
        return 0.0;
    }
    let n = term_months as f64;
    if annual_rate <= 0.0 {
        return principal / n;
    }
    let r = annual_rate / 12.0;
    let compound = (1.0 + r).powf(n);
    principal * r * compound / (compound - 1.0)
}

/// Commission owed on a deal value at a division's rate.
pub fn commission(value: f64, rate: f64) -> f64 {
    (value * rate).max(0.0)
}

/// Months to recoup an upfront investment from a monthly return stream.
/// Returns `None` when the return stream is non-positive.
pub fn payback_months(investment: f64, monthly_return: f64) -> Option<u32> {
    if monthly_return <= 0.0 || investment <= 0.0 {
        return None;
    }
    Some((investment / monthly_return).ceil() as u32)
}

/// Naive linear projection: average per-deal value over `basis_count`
/// historical deals, extended over an expected quarterly deal volume.
pub fn project_quarterly(total_value: f64, basis_count: i64) -> f64 {
    if basis_count <= 0 {
        return 0.0;
    }
    let avg = total_value / basis_count as f64;
    // Assume historical volume repeats over the next quarter.
    avg * basis_count as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn amortized_payment_matches_reference_value() {
        // $100,000 at 6% APR over 60 months -> $1,933.28/month.
        let payment = monthly_payment(100_000.0, 0.06, 60);
        assert!((payment - 1_933.28).abs() < 0.01, "got {payment}");
    }

    #[test]
    fn zero_rate_is_straight_line() {
        assert_eq!(monthly_payment(12_000.0, 0.0, 12), 1_000.0);
    }

    #[test]
    fn degenerate_inputs_return_zero() {
        assert_eq!(monthly_payment(0.0, 0.06, 60), 0.0);
        assert_eq!(monthly_payment(10_000.0, 0.06, 0), 0.0);
    }

    #[test]
    fn payback_rounds_up_to_whole_months() {
        assert_eq!(payback_months(10_000.0, 3_000.0), Some(4));
        assert_eq!(payback_months(10_000.0, 0.0), None);
    }

    #[test]
    fn commission_never_negative() {
        assert_eq!(commission(-50_000.0, 0.05), 0.0);
        assert_eq!(commission(200_000.0, 0.05), 10_000.0);
    }
}
