//! Kids' chore rotation: today's board and the running completion tallies.

use opsdeck_store::Store;

use crate::spec::{ParamKind, ParamSpec, ReportSpec, ScalarDefault, Shape};

pub const REPORTS: &[ReportSpec] = &[
    ReportSpec {
        name: "chores.kid_count",
        store: Store::ChoreSchedule,
        description: "Kids currently in the rotation",
        sql: "SELECT COUNT(*) FROM kids WHERE active = 1",
        params: &[],
        shape: Shape::Scalar(ScalarDefault::Int(0)),
    },
    ReportSpec {
        name: "chores.chore_count",
        store: Store::ChoreSchedule,
        description: "Chores currently in the rotation",
        sql: "SELECT COUNT(*) FROM chores WHERE active = 1",
        params: &[],
        shape: Shape::Scalar(ScalarDefault::Int(0)),
    },
    ReportSpec {
        name: "chores.today",
        store: Store::ChoreSchedule,
        description: "Today's board: who owes what, alphabetical",
        sql: "\
SELECT k.name AS kid_name, c.name AS chore_name,
       c.difficulty, a.status
FROM assignments a
JOIN kids k ON a.kid_id = k.id
JOIN chores c ON a.chore_id = c.id
WHERE a.assigned_date = date('now')
ORDER BY k.name, c.name",
        params: &[],
        shape: Shape::Rows,
    },
    ReportSpec {
        name: "chores.weekly_completion",
        store: Store::ChoreSchedule,
        description: "Per-kid completion rate since Monday",
        sql: "\
SELECT k.name,
       SUM(CASE WHEN a.status = 'done' THEN 1 ELSE 0 END) AS done,
       COUNT(*) AS total,
       ROUND(SUM(CASE WHEN a.status = 'done' THEN 1.0 ELSE 0 END)
             / COUNT(*) * 100, 1) AS pct
FROM assignments a
JOIN kids k ON a.kid_id = k.id
WHERE a.assigned_date >= date('now', 'weekday 1', '-7 days')
  AND a.assigned_date <= date('now')
GROUP BY k.id
ORDER BY k.name",
        params: &[],
        shape: Shape::Rows,
    },
    ReportSpec {
        name: "chores.pending_today",
        store: Store::ChoreSchedule,
        description: "Assignments still open on today's board",
        sql: "\
SELECT COUNT(*) FROM assignments
WHERE status = 'pending' AND assigned_date = date('now')",
        params: &[],
        shape: Shape::Scalar(ScalarDefault::Int(0)),
    },
    ReportSpec {
        name: "chores.recent_completions",
        store: Store::ChoreSchedule,
        description: "Latest finished chores, newest first",
        sql: "\
SELECT c.name AS chore_name, k.name AS kid_name, a.completed_at
FROM assignments a
JOIN kids k ON a.kid_id = k.id
JOIN chores c ON a.chore_id = c.id
WHERE a.status = 'done'
ORDER BY a.completed_at DESC
LIMIT ?1",
        params: &[ParamSpec {
            name: "limit",
            kind: ParamKind::Int,
            default: Some("10"),
        }],
        shape: Shape::Rows,
    },
];
