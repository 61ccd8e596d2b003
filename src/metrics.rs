// src/metrics.rs
//
// Derived-field formulas for the daily operating record. These are recomputed
// from their inputs on every save and never hand-edited. A zero divisor is
// never an error: the denominator is substituted or the result short-circuits
// to zero.

/// Achievement rate in percent, one decimal. A zero target substitutes 1 as
/// the denominator rather than failing.
pub fn achievement_rate(actual_revenue: f64, target_revenue: f64) -> f64 {
    let denominator = if target_revenue > 0.0 { target_revenue } else { 1.0 };
    round_to(actual_revenue / denominator * 100.0, 1)
}

/// Average ticket (revenue per customer), rounded to the nearest dollar.
/// Zero customers short-circuits to 0.
pub fn average_ticket(actual_revenue: f64, customer_count: i64) -> f64 {
    if customer_count > 0 {
        (actual_revenue / customer_count as f64).round()
    } else {
        0.0
    }
}

/// Labor contribution (revenue per labor hour), truncated to a whole dollar.
/// Zero hours short-circuits to 0.
pub fn labor_contribution(actual_revenue: f64, labor_hours: f64) -> f64 {
    if labor_hours > 0.0 {
        (actual_revenue / labor_hours).trunc()
    } else {
        0.0
    }
}

/// Gift campaign sell-through in percent, one decimal. Zero allocation
/// short-circuits to 0.
pub fn sell_through_rate(allocated: f64, remaining: f64) -> f64 {
    if allocated > 0.0 {
        round_to((allocated - remaining) / allocated * 100.0, 1)
    } else {
        0.0
    }
}

fn round_to(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    (value * factor).round() / factor
}
