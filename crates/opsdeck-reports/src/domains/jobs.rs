//! Job market scan results: scored postings and weekly trend snapshots.

use opsdeck_store::Store;

use crate::spec::{ParamKind, ParamSpec, ReportSpec, ScalarDefault, Shape};

pub const REPORTS: &[ReportSpec] = &[
    ReportSpec {
        name: "jobs.high_match",
        store: Store::JobMarket,
        description: "Postings at or above the match-score floor, best first",
        sql: "\
SELECT *
FROM job_scores
WHERE match_score >= ?1
ORDER BY match_score DESC, created_at DESC",
        params: &[ParamSpec {
            name: "min_score",
            kind: ParamKind::Int,
            default: Some("70"),
        }],
        shape: Shape::Rows,
    },
    ReportSpec {
        name: "jobs.all",
        store: Store::JobMarket,
        description: "Most recently scanned postings",
        sql: "\
SELECT *
FROM job_scores
ORDER BY created_at DESC
LIMIT ?1",
        params: &[ParamSpec {
            name: "limit",
            kind: ParamKind::Int,
            default: Some("50"),
        }],
        shape: Shape::Rows,
    },
    ReportSpec {
        name: "jobs.market_trends",
        store: Store::JobMarket,
        description: "Last twelve weekly market snapshots, newest first",
        sql: "\
SELECT *
FROM market_trends
ORDER BY week_start DESC
LIMIT 12",
        params: &[],
        shape: Shape::Rows,
    },
    ReportSpec {
        name: "jobs.score_distribution",
        store: Store::JobMarket,
        description: "Posting counts per match-score bracket",
        sql: "\
SELECT
    CASE
        WHEN match_score >= 90 THEN '90-100'
        WHEN match_score >= 80 THEN '80-89'
        WHEN match_score >= 70 THEN '70-79'
        WHEN match_score >= 50 THEN '50-69'
        ELSE 'Below 50'
    END AS bracket,
    COUNT(*) AS count
FROM job_scores
GROUP BY bracket
ORDER BY bracket DESC",
        params: &[],
        shape: Shape::Rows,
    },
    ReportSpec {
        name: "jobs.total",
        store: Store::JobMarket,
        description: "Count of every posting ever scored",
        sql: "SELECT COUNT(*) FROM job_scores",
        params: &[],
        shape: Shape::Scalar(ScalarDefault::Int(0)),
    },
];
