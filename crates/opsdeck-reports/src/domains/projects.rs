//! Side-project tracker: status board, milestones, logged hours.

use opsdeck_store::Store;

use crate::spec::{ParamKind, ParamSpec, ReportSpec, Shape};

pub const REPORTS: &[ReportSpec] = &[
    ReportSpec {
        name: "projects.all",
        store: Store::ProjectHub,
        description: "Every project, working set first, then recency",
        sql: "\
SELECT
    id, name, classification, status, health_score,
    progress_pct, tech_stack, last_updated, description
FROM projects
ORDER BY
    CASE status
        WHEN 'active' THEN 1
        WHEN 'on_hold' THEN 2
        WHEN 'not_started' THEN 3
        WHEN 'completed' THEN 4
        ELSE 5
    END,
    last_updated DESC",
        params: &[],
        shape: Shape::Rows,
    },
    ReportSpec {
        name: "projects.detail",
        store: Store::ProjectHub,
        description: "One project by id",
        sql: "SELECT * FROM projects WHERE id = ?1",
        params: &[ParamSpec {
            name: "id",
            kind: ParamKind::Int,
            default: None,
        }],
        shape: Shape::Row,
    },
    ReportSpec {
        name: "projects.milestones",
        store: Store::ProjectHub,
        description: "One project's milestones by due date",
        sql: "\
SELECT title, due_date, completed_at, status
FROM milestones
WHERE project_id = ?1
ORDER BY due_date",
        params: &[ParamSpec {
            name: "project_id",
            kind: ParamKind::Int,
            default: None,
        }],
        shape: Shape::Rows,
    },
    ReportSpec {
        name: "projects.time_entries",
        store: Store::ProjectHub,
        description: "One project's latest logged time",
        sql: "\
SELECT description, hours, logged_at
FROM time_entries
WHERE project_id = ?1
ORDER BY logged_at DESC
LIMIT ?2",
        params: &[
            ParamSpec {
                name: "project_id",
                kind: ParamKind::Int,
                default: None,
            },
            ParamSpec {
                name: "limit",
                kind: ParamKind::Int,
                default: Some("20"),
            },
        ],
        shape: Shape::Rows,
    },
    ReportSpec {
        name: "projects.summary",
        store: Store::ProjectHub,
        description: "Active projects, hours this week, overdue milestones",
        sql: "\
SELECT
    (SELECT COUNT(*) FROM projects WHERE status = 'active') AS active,
    (SELECT ROUND(COALESCE(SUM(hours), 0), 1) FROM time_entries
     WHERE date(logged_at) >= date('now', '-7 days')) AS hours_week,
    (SELECT COUNT(*) FROM milestones
     WHERE due_date < date('now') AND completed_at IS NULL) AS overdue",
        params: &[],
        shape: Shape::Row,
    },
];

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use opsdeck_store::Store;
    use opsdeck_testing::{TestDeck, fixtures};
    use opsdeck_types::Value;

    use crate::registry::find_report;
    use crate::spec::{ReportOutput, run};

    fn seeded_deck() -> TestDeck {
        let deck = TestDeck::new();
        deck.seed_schema(Store::ProjectHub).seed(
            Store::ProjectHub,
            &format!(
                "INSERT INTO projects (id, name, status, last_updated) VALUES
                 (1, 'Dash rebuild', 'active', '{d1}'),
                 (2, 'Garden sensors', 'active', '{d3}'),
                 (3, 'Old site', 'completed', '{d2}'),
                 (4, 'Paused thing', 'on_hold', '{d1}');
                 INSERT INTO milestones (project_id, title, due_date, completed_at, status) VALUES
                 (1, 'Ship v1', '{overdue}', NULL, 'open'),
                 (1, 'Wireframes', '{done_due}', '{done_at}', 'done'),
                 (1, 'Beta invite', '{future}', NULL, 'open');
                 INSERT INTO time_entries (project_id, description, hours, logged_at) VALUES
                 (1, 'api wiring', 2.5, '{d1}'),
                 (1, 'css pass', 1.0, '{d2}'),
                 (2, 'sensor calibration', 4.0, '{d30}');",
                d1 = fixtures::days_ago(1),
                d2 = fixtures::days_ago(2),
                d3 = fixtures::days_ago(3),
                d30 = fixtures::days_ago(30),
                overdue = fixtures::date_days_ago(5),
                done_due = fixtures::date_days_ago(10),
                done_at = fixtures::days_ago(9),
                future = fixtures::date_days_ahead(14),
            ),
        );
        deck
    }

    #[test]
    fn board_leads_with_the_working_set() {
        let deck = seeded_deck();
        let spec = find_report("projects.all").unwrap();
        let ReportOutput::Rows(rows) = run(&deck.reader(), spec, &BTreeMap::new()).unwrap()
        else {
            panic!("expected rows");
        };

        let names: Vec<&str> = rows
            .iter()
            .filter_map(|r| r.get("name").and_then(Value::as_str))
            .collect();
        assert_eq!(
            names,
            vec!["Dash rebuild", "Garden sensors", "Paused thing", "Old site"]
        );
    }

    #[test]
    fn detail_picks_one_project() {
        let deck = seeded_deck();
        let spec = find_report("projects.detail").unwrap();
        let args = BTreeMap::from([("id".to_string(), "2".to_string())]);
        let ReportOutput::Row(row) = run(&deck.reader(), spec, &args).unwrap() else {
            panic!("expected row");
        };
        assert_eq!(row.get("name"), Some(&Value::Text("Garden sensors".into())));
    }

    #[test]
    fn milestones_walk_the_due_dates() {
        let deck = seeded_deck();
        let spec = find_report("projects.milestones").unwrap();
        let args = BTreeMap::from([("project_id".to_string(), "1".to_string())]);
        let ReportOutput::Rows(rows) = run(&deck.reader(), spec, &args).unwrap() else {
            panic!("expected rows");
        };

        let titles: Vec<&str> = rows
            .iter()
            .filter_map(|r| r.get("title").and_then(Value::as_str))
            .collect();
        assert_eq!(titles, vec!["Wireframes", "Ship v1", "Beta invite"]);
    }

    #[test]
    fn time_entries_stay_scoped_to_the_project() {
        let deck = seeded_deck();
        let spec = find_report("projects.time_entries").unwrap();
        let args = BTreeMap::from([
            ("project_id".to_string(), "1".to_string()),
            ("limit".to_string(), "1".to_string()),
        ]);
        let ReportOutput::Rows(rows) = run(&deck.reader(), spec, &args).unwrap() else {
            panic!("expected rows");
        };

        assert_eq!(rows.len(), 1);
        assert_eq!(
            rows[0].get("description"),
            Some(&Value::Text("api wiring".into()))
        );
    }

    #[test]
    fn summary_folds_the_three_pulse_numbers() {
        let deck = seeded_deck();
        let spec = find_report("projects.summary").unwrap();
        let ReportOutput::Row(row) = run(&deck.reader(), spec, &BTreeMap::new()).unwrap()
        else {
            panic!("expected row");
        };

        assert_eq!(row.get("active"), Some(&Value::Integer(2)));
        // the month-old calibration session is outside the week
        assert_eq!(row.get("hours_week"), Some(&Value::Real(3.5)));
        assert_eq!(row.get("overdue"), Some(&Value::Integer(1)));
    }
}
