//! Spend tracking over the usage log and cost alerts.

use opsdeck_store::Store;

use crate::spec::{ParamKind, ParamSpec, ReportSpec, ScalarDefault, Shape};

pub const REPORTS: &[ReportSpec] = &[
    ReportSpec {
        name: "costs.daily_spend",
        store: Store::UsageTracking,
        description: "Total spend per day over the window",
        sql: "\
SELECT date(timestamp) AS day, SUM(cost_usd) AS total_cost
FROM usage_log
WHERE date(timestamp) >= date('now', ?1)
GROUP BY date(timestamp)
ORDER BY day",
        params: &[ParamSpec {
            name: "days",
            kind: ParamKind::DaysBack,
            default: Some("30"),
        }],
        shape: Shape::Rows,
    },
    ReportSpec {
        name: "costs.model_breakdown",
        store: Store::UsageTracking,
        description: "Spend and call count per model over the window",
        sql: "\
SELECT model, SUM(cost_usd) AS total_cost, COUNT(*) AS call_count
FROM usage_log
WHERE date(timestamp) >= date('now', ?1)
GROUP BY model
ORDER BY total_cost DESC",
        params: &[ParamSpec {
            name: "days",
            kind: ParamKind::DaysBack,
            default: Some("30"),
        }],
        shape: Shape::Rows,
    },
    ReportSpec {
        name: "costs.skill_breakdown",
        store: Store::UsageTracking,
        description: "Spend and call count per skill over the window",
        sql: "\
SELECT skill, SUM(cost_usd) AS total_cost, COUNT(*) AS call_count
FROM usage_log
WHERE date(timestamp) >= date('now', ?1)
GROUP BY skill
ORDER BY total_cost DESC",
        params: &[ParamSpec {
            name: "days",
            kind: ParamKind::DaysBack,
            default: Some("30"),
        }],
        shape: Shape::Rows,
    },
    ReportSpec {
        name: "costs.monthly_projection",
        store: Store::UsageTracking,
        description: "Last week's average daily spend extrapolated to 30 days",
        sql: "\
SELECT ROUND(AVG(daily_total) * 30, 2) FROM (
    SELECT SUM(cost_usd) AS daily_total
    FROM usage_log
    WHERE date(timestamp) >= date('now', '-7 days')
    GROUP BY date(timestamp)
)",
        params: &[],
        shape: Shape::Scalar(ScalarDefault::Float(0.0)),
    },
    ReportSpec {
        name: "costs.active_alerts",
        store: Store::UsageTracking,
        description: "Unacknowledged cost alerts, newest first",
        sql: "\
SELECT alert_type, threshold_usd, current_value_usd, triggered_at, created_at
FROM cost_alerts
WHERE acknowledged = 0
ORDER BY created_at DESC",
        params: &[],
        shape: Shape::Rows,
    },
    ReportSpec {
        name: "costs.total_spend_month",
        store: Store::UsageTracking,
        description: "Total spend in the current calendar month",
        sql: "\
SELECT COALESCE(SUM(cost_usd), 0) FROM usage_log
WHERE strftime('%Y-%m', timestamp) = strftime('%Y-%m', 'now')",
        params: &[],
        shape: Shape::Scalar(ScalarDefault::Float(0.0)),
    },
];
