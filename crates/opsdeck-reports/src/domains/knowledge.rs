//! Knowledge base holdings: sources, chunk counts, acquisition history.

use opsdeck_store::Store;

use crate::spec::{ParamKind, ParamSpec, ReportSpec, Shape};

pub const REPORTS: &[ReportSpec] = &[
    ReportSpec {
        name: "knowledge.sources_by_type",
        store: Store::KnowledgeBase,
        description: "Source counts grouped by type, largest first",
        sql: "\
SELECT source_type, COUNT(*) AS count
FROM sources
GROUP BY source_type
ORDER BY count DESC",
        params: &[],
        shape: Shape::Rows,
    },
    ReportSpec {
        name: "knowledge.recent_sources",
        store: Store::KnowledgeBase,
        description: "Most recently added sources",
        sql: "\
SELECT id, title, source_type, url, summary, created_at
FROM sources
ORDER BY created_at DESC
LIMIT ?1",
        params: &[ParamSpec {
            name: "limit",
            kind: ParamKind::Int,
            default: Some("30"),
        }],
        shape: Shape::Rows,
    },
    ReportSpec {
        name: "knowledge.sources_of_type",
        store: Store::KnowledgeBase,
        description: "Sources of one type, newest first",
        sql: "\
SELECT id, title, url, summary, created_at
FROM sources
WHERE source_type = ?1
ORDER BY created_at DESC
LIMIT ?2",
        params: &[
            ParamSpec {
                name: "source_type",
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
        name: "knowledge.all_sources",
        store: Store::KnowledgeBase,
        description: "Every source with a truncated summary, for browsing",
        sql: "\
SELECT id, title, source_type, url,
       SUBSTR(summary, 1, 200) AS summary_short,
       created_at
FROM sources
ORDER BY created_at DESC",
        params: &[],
        shape: Shape::Rows,
    },
    ReportSpec {
        name: "knowledge.stats",
        store: Store::KnowledgeBase,
        description: "Totals: sources held and chunks indexed",
        sql: "\
SELECT
    (SELECT COUNT(*) FROM sources) AS sources,
    (SELECT COUNT(*) FROM chunks) AS chunks",
        params: &[],
        shape: Shape::Row,
    },
    ReportSpec {
        name: "knowledge.recent_acquisitions",
        store: Store::KnowledgeBase,
        description: "Latest acquisition runs with the source they landed",
        sql: "\
SELECT a.scan_source, a.discovery_date, s.title, s.source_type
FROM acquisition_metadata a
JOIN sources s ON a.source_id = s.id
ORDER BY a.created_at DESC
LIMIT ?1",
        params: &[ParamSpec {
            name: "limit",
            kind: ParamKind::Int,
            default: Some("10"),
        }],
        shape: Shape::Rows,
    },
];
