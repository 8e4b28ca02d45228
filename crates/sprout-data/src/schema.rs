//! Column names of the growth table.

/// Calendar date of the observation, kept as ISO `YYYY-MM-DD` text.
pub const DATE: &str = "date";
/// Acquisition channel (`paid`, `organic`, `referral`, ...).
pub const CHANNEL: &str = "channel";
/// Region code. `NA` is a real region, not a missing value.
pub const REGION: &str = "region";
/// User identifier.
pub const USER_ID: &str = "user_id";
/// Session count.
pub const SESSIONS: &str = "sessions";
/// Signup count.
pub const SIGNUPS: &str = "signups";
/// Order count.
pub const ORDERS: &str = "orders";
/// Revenue in USD.
pub const REVENUE_USD: &str = "revenue_usd";
/// Acquisition cost in USD. May be absent on otherwise valid rows.
pub const COST_USD: &str = "cost_usd";

/// All columns in file order.
pub const COLUMNS: [&str; 9] = [
    DATE,
    CHANNEL,
    REGION,
    USER_ID,
    SESSIONS,
    SIGNUPS,
    ORDERS,
    REVENUE_USD,
    COST_USD,
];

/// Columns coerced to `Float64` on load.
pub const NUMERIC_COLUMNS: [&str; 5] = [SESSIONS, SIGNUPS, ORDERS, REVENUE_USD, COST_USD];

/// Columns that must be present for a row to enter the regressions.
pub const CORE_COLUMNS: [&str; 4] = [SESSIONS, SIGNUPS, ORDERS, REVENUE_USD];

/// Whether `name` is one of the numeric columns.
pub fn is_numeric(name: &str) -> bool {
    NUMERIC_COLUMNS.contains(&name)
}
