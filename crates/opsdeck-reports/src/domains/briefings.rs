//! Morning briefing documents and the signals attached to them.

use std::collections::BTreeMap;

use opsdeck_store::{Store, StoreReader};
use opsdeck_types::{Row, Value};

use crate::error::Result;
use crate::spec::{ParamKind, ParamSpec, ReportOutput, ReportSpec, Shape, run};

/// Shared by the registry entry and [`signals_by_category`], which re-groups
/// the same projection for the briefing detail view.
const LATEST_SIGNALS: ReportSpec = ReportSpec {
    name: "briefings.latest_signals",
    store: Store::Briefings,
    description: "Signals across every themed briefing, newest briefing first",
    sql: "\
SELECT s.*
FROM signals s
JOIN briefings b ON s.briefing_id = b.id
WHERE b.theme IS NOT NULL
ORDER BY b.created_at DESC, s.category, s.source",
    params: &[],
    shape: Shape::Rows,
};

pub const REPORTS: &[ReportSpec] = &[
    ReportSpec {
        name: "briefings.all",
        store: Store::Briefings,
        description: "Themed briefings, newest first",
        sql: "\
SELECT *
FROM briefings
WHERE theme IS NOT NULL
ORDER BY created_at DESC",
        params: &[],
        shape: Shape::Rows,
    },
    ReportSpec {
        name: "briefings.detail",
        store: Store::Briefings,
        description: "One briefing document by id",
        sql: "SELECT * FROM briefings WHERE id = ?1",
        params: &[ParamSpec {
            name: "id",
            kind: ParamKind::Int,
            default: None,
        }],
        shape: Shape::Row,
    },
    ReportSpec {
        name: "briefings.signals",
        store: Store::Briefings,
        description: "Signals attached to one briefing, grouped-readout order",
        sql: "\
SELECT *
FROM signals
WHERE briefing_id = ?1
ORDER BY category, source",
        params: &[ParamSpec {
            name: "briefing_id",
            kind: ParamKind::Int,
            default: None,
        }],
        shape: Shape::Rows,
    },
    LATEST_SIGNALS,
];

/// Latest signals bucketed by category, for the grouped briefing readout.
///
/// Signals with no category land under `uncategorized`.
pub fn signals_by_category(reader: &StoreReader) -> Result<BTreeMap<String, Vec<Row>>> {
    let rows = match run(reader, &LATEST_SIGNALS, &BTreeMap::new())? {
        ReportOutput::Rows(rows) => rows,
        _ => Vec::new(),
    };

    let mut grouped: BTreeMap<String, Vec<Row>> = BTreeMap::new();
    for row in rows {
        let category = match row.get("category") {
            Some(Value::Text(name)) => name.clone(),
            _ => "uncategorized".to_string(),
        };
        grouped.entry(category).or_default().push(row);
    }
    Ok(grouped)
}
