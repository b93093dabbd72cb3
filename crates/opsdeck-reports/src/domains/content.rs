//! Content pipeline state over the ideas store.

use opsdeck_store::Store;

use crate::spec::{ParamKind, ParamSpec, ReportSpec, Shape};

pub const REPORTS: &[ReportSpec] = &[
    ReportSpec {
        name: "content.ideas_by_status",
        store: Store::ContentIdeas,
        description: "Every idea, pipeline order first, then most recently touched",
        sql: "\
SELECT id, title, status, post_type, source_type, created_at, updated_at
FROM content_ideas
ORDER BY
    CASE status
        WHEN 'published' THEN 4
        WHEN 'drafted' THEN 3
        WHEN 'approved' THEN 2
        WHEN 'pitched' THEN 1
        ELSE 5
    END,
    updated_at DESC",
        params: &[],
        shape: Shape::Rows,
    },
    ReportSpec {
        name: "content.publishing_pace",
        store: Store::ContentIdeas,
        description: "Published posts per ISO week over the window",
        sql: "\
SELECT
    strftime('%Y-W%W', updated_at) AS week,
    COUNT(*) AS count
FROM content_ideas
WHERE status = 'published'
  AND updated_at >= date('now', ?1)
GROUP BY week
ORDER BY week",
        params: &[ParamSpec {
            name: "weeks",
            kind: ParamKind::WeeksBack,
            default: Some("8"),
        }],
        shape: Shape::Rows,
    },
    ReportSpec {
        name: "content.post_types",
        store: Store::ContentIdeas,
        description: "Idea count per post type",
        sql: "\
SELECT post_type, COUNT(*) AS count
FROM content_ideas
GROUP BY post_type
ORDER BY count DESC",
        params: &[],
        shape: Shape::Rows,
    },
    ReportSpec {
        name: "content.dedup_stats",
        store: Store::ContentIdeas,
        description: "Total ideas and how many were marked duplicates",
        sql: "\
SELECT
    (SELECT COUNT(*) FROM content_ideas) AS total,
    (SELECT COUNT(*) FROM content_ideas WHERE duplicate_of IS NOT NULL) AS duplicates",
        params: &[],
        shape: Shape::Row,
    },
    ReportSpec {
        name: "content.recent_activity",
        store: Store::ContentIdeas,
        description: "Most recently touched ideas",
        sql: "\
SELECT title, status, post_type, updated_at
FROM content_ideas
ORDER BY updated_at DESC
LIMIT ?1",
        params: &[ParamSpec {
            name: "limit",
            kind: ParamKind::Int,
            default: Some("10"),
        }],
        shape: Shape::Rows,
    },
    ReportSpec {
        name: "content.status_counts",
        store: Store::ContentIdeas,
        description: "Idea count per status",
        sql: "SELECT status, COUNT(*) AS count FROM content_ideas GROUP BY status",
        params: &[],
        shape: Shape::Rows,
    },
];
