//! Scheduled-job health over the cron run log.

use opsdeck_store::Store;

use crate::spec::{ParamKind, ParamSpec, ReportSpec, ScalarDefault, Shape};

pub const REPORTS: &[ReportSpec] = &[
    ReportSpec {
        name: "cron.jobs_summary",
        store: Store::CronLog,
        description: "Per-job last run, 7-day success rate, and failure count",
        sql: "\
SELECT
    job_name,
    MAX(started_at) AS last_run,
    (SELECT status FROM cron_runs cr2
     WHERE cr2.job_name = cr.job_name
     ORDER BY started_at DESC LIMIT 1) AS last_status,
    (SELECT duration_seconds FROM cron_runs cr3
     WHERE cr3.job_name = cr.job_name
     ORDER BY started_at DESC LIMIT 1) AS last_duration,
    COUNT(*) AS runs_7d,
    SUM(CASE WHEN status = 'failed' THEN 1 ELSE 0 END) AS failures_7d,
    ROUND(
        (COUNT(*) - SUM(CASE WHEN status = 'failed' THEN 1 ELSE 0 END)) * 100.0 / COUNT(*),
        1
    ) AS success_rate_7d
FROM cron_runs cr
WHERE started_at >= datetime('now', '-7 days')
GROUP BY job_name
ORDER BY job_name",
        params: &[],
        shape: Shape::Rows,
    },
    ReportSpec {
        name: "cron.stale_jobs",
        store: Store::CronLog,
        description: "Jobs still marked running after the staleness threshold",
        sql: "\
SELECT job_name, started_at, duration_seconds FROM cron_runs
WHERE status = 'running'
  AND started_at <= datetime('now', ?1)
ORDER BY started_at",
        params: &[ParamSpec {
            name: "threshold_minutes",
            kind: ParamKind::MinutesBack,
            default: Some("30"),
        }],
        shape: Shape::Rows,
    },
    ReportSpec {
        name: "cron.job_runs",
        store: Store::CronLog,
        description: "Recent run history for one job",
        sql: "\
SELECT started_at, status, duration_seconds, error_message
FROM cron_runs
WHERE job_name = ?1
ORDER BY started_at DESC
LIMIT ?2",
        params: &[
            ParamSpec {
                name: "job_name",
                kind: ParamKind::Text,
                default: None,
            },
            ParamSpec {
                name: "limit",
                kind: ParamKind::Int,
                default: Some("50"),
            },
        ],
        shape: Shape::Rows,
    },
    ReportSpec {
        name: "cron.duration_history",
        store: Store::CronLog,
        description: "Successful-run duration series for one job",
        sql: "\
SELECT started_at, duration_seconds
FROM cron_runs
WHERE job_name = ?1 AND status = 'success'
  AND started_at >= datetime('now', ?2)
ORDER BY started_at",
        params: &[
            ParamSpec {
                name: "job_name",
                kind: ParamKind::Text,
                default: None,
            },
            ParamSpec {
                name: "days",
                kind: ParamKind::DaysBack,
                default: Some("14"),
            },
        ],
        shape: Shape::Rows,
    },
    ReportSpec {
        name: "cron.total_jobs",
        store: Store::CronLog,
        description: "Count of distinct job names ever logged",
        sql: "SELECT COUNT(DISTINCT job_name) FROM cron_runs",
        params: &[],
        shape: Shape::Scalar(ScalarDefault::Int(0)),
    },
];
