//! Family meal planning: the active week's plan and the recipe shelf.
//!
//! The planner keeps at most one plan in play, preferring `active` over
//! `draft`. Reports that scope to "this week" resolve that plan inline, so
//! a household with no open plan reads as empty rather than erroring.

use opsdeck_store::Store;

use crate::spec::{ParamKind, ParamSpec, ReportSpec, ScalarDefault, Shape};

pub const REPORTS: &[ReportSpec] = &[
    ReportSpec {
        name: "meals.recipe_count",
        store: Store::MealPlanning,
        description: "Recipes on the shelf",
        sql: "SELECT COUNT(*) FROM recipes",
        params: &[],
        shape: Shape::Scalar(ScalarDefault::Int(0)),
    },
    ReportSpec {
        name: "meals.active_plan",
        store: Store::MealPlanning,
        description: "The plan in play, active ahead of draft",
        sql: "\
SELECT id, week_start, status
FROM meal_plans
WHERE status IN ('active', 'draft')
ORDER BY CASE status WHEN 'active' THEN 1 WHEN 'draft' THEN 2 END
LIMIT 1",
        params: &[],
        shape: Shape::Row,
    },
    ReportSpec {
        name: "meals.this_week",
        store: Store::MealPlanning,
        description: "Every slot of the plan in play, Monday breakfast first",
        sql: "\
SELECT pm.day_of_week,
       CASE pm.day_of_week
           WHEN 1 THEN 'Monday' WHEN 2 THEN 'Tuesday'
           WHEN 3 THEN 'Wednesday' WHEN 4 THEN 'Thursday'
           WHEN 5 THEN 'Friday' WHEN 6 THEN 'Saturday'
           WHEN 7 THEN 'Sunday'
       END AS day_name,
       pm.meal_type,
       COALESCE(r.name, pm.freetext_meal) AS meal_name,
       pm.notes
FROM planned_meals pm
LEFT JOIN recipes r ON pm.recipe_id = r.id
WHERE pm.plan_id = (SELECT id FROM meal_plans
                    WHERE status IN ('active', 'draft')
                    ORDER BY CASE status WHEN 'active' THEN 1 WHEN 'draft' THEN 2 END
                    LIMIT 1)
ORDER BY pm.day_of_week,
    CASE pm.meal_type
        WHEN 'breakfast' THEN 1 WHEN 'lunch' THEN 2
        WHEN 'dinner' THEN 3 WHEN 'snack' THEN 4
    END",
        params: &[],
        shape: Shape::Rows,
    },
    ReportSpec {
        name: "meals.todays_dinner",
        store: Store::MealPlanning,
        description: "Tonight's dinner slot from the plan in play",
        sql: "\
SELECT COALESCE(r.name, pm.freetext_meal) AS meal_name,
       r.prep_time_min, pm.notes
FROM planned_meals pm
LEFT JOIN recipes r ON pm.recipe_id = r.id
WHERE pm.plan_id = (SELECT id FROM meal_plans
                    WHERE status IN ('active', 'draft')
                    ORDER BY CASE status WHEN 'active' THEN 1 WHEN 'draft' THEN 2 END
                    LIMIT 1)
  AND pm.meal_type = 'dinner'
  AND pm.day_of_week = CASE CAST(strftime('%w', 'now') AS INTEGER)
      WHEN 0 THEN 7 ELSE CAST(strftime('%w', 'now') AS INTEGER) END
LIMIT 1",
        params: &[],
        shape: Shape::Row,
    },
    ReportSpec {
        name: "meals.preference_count",
        store: Store::MealPlanning,
        description: "Active dietary preferences",
        sql: "SELECT COUNT(*) FROM preferences WHERE active = 1",
        params: &[],
        shape: Shape::Scalar(ScalarDefault::Int(0)),
    },
    ReportSpec {
        name: "meals.top_recipes",
        store: Store::MealPlanning,
        description: "Best-rated recipes, repeat favorites breaking ties",
        sql: "\
SELECT name, meal_type, rating, times_made, prep_time_min
FROM recipes
ORDER BY COALESCE(rating, 0) DESC, times_made DESC
LIMIT ?1",
        params: &[ParamSpec {
            name: "limit",
            kind: ParamKind::Int,
            default: Some("10"),
        }],
        shape: Shape::Rows,
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
        deck.seed_schema(Store::MealPlanning).seed(
            Store::MealPlanning,
            "INSERT INTO recipes (id, name, meal_type, rating, times_made, prep_time_min) VALUES
             (1, 'Lentil curry', 'dinner', 5, 12, 40),
             (2, 'Pancakes', 'breakfast', 5, 30, 20),
             (3, 'Toast', 'breakfast', NULL, 99, 5);
             INSERT INTO meal_plans (id, week_start, status) VALUES
             (1, '2026-08-17', 'active'),
             (2, '2026-08-24', 'draft'),
             (3, '2026-08-10', 'completed');
             INSERT INTO planned_meals (plan_id, recipe_id, day_of_week, meal_type, freetext_meal, notes) VALUES
             (1, 2, 1, 'breakfast', NULL, NULL),
             (1, NULL, 1, 'lunch', 'Leftovers', 'use up the rice'),
             (1, 1, 2, 'dinner', NULL, 'double batch'),
             (2, NULL, 1, 'dinner', 'Draft-only dish', NULL);
             INSERT INTO preferences (description, active) VALUES
             ('no cilantro', 1), ('low sodium', 1), ('keto', 0);",
        );
        deck
    }

    #[test]
    fn active_plan_outranks_a_newer_draft() {
        let deck = seeded_deck();
        let spec = find_report("meals.active_plan").unwrap();
        let ReportOutput::Row(row) = run(&deck.reader(), spec, &BTreeMap::new()).unwrap()
        else {
            panic!("expected row");
        };
        assert_eq!(row.get("id"), Some(&Value::Integer(1)));
        assert_eq!(row.get("status"), Some(&Value::Text("active".into())));
    }

    #[test]
    fn draft_plan_steps_in_when_nothing_is_active() {
        let deck = TestDeck::new();
        deck.seed_schema(Store::MealPlanning).seed(
            Store::MealPlanning,
            "INSERT INTO meal_plans (id, week_start, status) VALUES (7, '2026-08-24', 'draft');",
        );
        let spec = find_report("meals.active_plan").unwrap();
        let ReportOutput::Row(row) = run(&deck.reader(), spec, &BTreeMap::new()).unwrap()
        else {
            panic!("expected row");
        };
        assert_eq!(row.get("id"), Some(&Value::Integer(7)));
    }

    #[test]
    fn this_week_walks_days_then_meal_slots() {
        let deck = seeded_deck();
        let spec = find_report("meals.this_week").unwrap();
        let ReportOutput::Rows(rows) = run(&deck.reader(), spec, &BTreeMap::new()).unwrap()
        else {
            panic!("expected rows");
        };

        // only plan 1's slots, never the draft's
        let names: Vec<&str> = rows
            .iter()
            .filter_map(|r| r.get("meal_name").and_then(Value::as_str))
            .collect();
        assert_eq!(names, vec!["Pancakes", "Leftovers", "Lentil curry"]);
        assert_eq!(
            rows[0].get("day_name"),
            Some(&Value::Text("Monday".into()))
        );
        assert_eq!(
            rows[2].get("day_name"),
            Some(&Value::Text("Tuesday".into()))
        );
    }

    #[test]
    fn todays_dinner_lands_on_the_iso_weekday() {
        let deck = TestDeck::new();
        deck.seed_schema(Store::MealPlanning).seed(
            Store::MealPlanning,
            &format!(
                "INSERT INTO recipes (id, name, meal_type, rating, times_made, prep_time_min) VALUES
                 (1, 'Lentil curry', 'dinner', 5, 12, 40);
                 INSERT INTO meal_plans (id, week_start, status) VALUES (1, '2026-08-24', 'active');
                 INSERT INTO planned_meals (plan_id, recipe_id, day_of_week, meal_type, freetext_meal, notes) VALUES
                 (1, 1, {today}, 'dinner', NULL, 'tonight'),
                 (1, NULL, {today}, 'lunch', 'Sandwiches', NULL);",
                today = fixtures::iso_weekday_today(),
            ),
        );

        let spec = find_report("meals.todays_dinner").unwrap();
        let ReportOutput::Row(row) = run(&deck.reader(), spec, &BTreeMap::new()).unwrap()
        else {
            panic!("expected row");
        };
        assert_eq!(
            row.get("meal_name"),
            Some(&Value::Text("Lentil curry".into()))
        );
        assert_eq!(row.get("prep_time_min"), Some(&Value::Integer(40)));
    }

    #[test]
    fn completed_plans_leave_the_week_empty() {
        let deck = TestDeck::new();
        deck.seed_schema(Store::MealPlanning).seed(
            Store::MealPlanning,
            "INSERT INTO meal_plans (id, week_start, status) VALUES (1, '2026-08-10', 'completed');
             INSERT INTO planned_meals (plan_id, recipe_id, day_of_week, meal_type, freetext_meal) VALUES
             (1, NULL, 1, 'dinner', 'Old dish');",
        );

        let reader = deck.reader();
        let week = find_report("meals.this_week").unwrap();
        let ReportOutput::Rows(rows) = run(&reader, week, &BTreeMap::new()).unwrap() else {
            panic!("expected rows");
        };
        assert!(rows.is_empty());

        let dinner = find_report("meals.todays_dinner").unwrap();
        let ReportOutput::Row(row) = run(&reader, dinner, &BTreeMap::new()).unwrap() else {
            panic!("expected row");
        };
        assert!(row.is_empty());
    }

    #[test]
    fn top_recipes_rank_rating_then_repeats() {
        let deck = seeded_deck();
        let spec = find_report("meals.top_recipes").unwrap();
        let ReportOutput::Rows(rows) = run(&deck.reader(), spec, &BTreeMap::new()).unwrap()
        else {
            panic!("expected rows");
        };

        let names: Vec<&str> = rows
            .iter()
            .filter_map(|r| r.get("name").and_then(Value::as_str))
            .collect();
        // unrated Toast sorts last no matter how often it's made
        assert_eq!(names, vec!["Pancakes", "Lentil curry", "Toast"]);
    }

    #[test]
    fn preference_count_skips_inactive_rows() {
        let deck = seeded_deck();
        let spec = find_report("meals.preference_count").unwrap();
        let out = run(&deck.reader(), spec, &BTreeMap::new()).unwrap();
        assert_eq!(out, ReportOutput::Scalar(Value::Integer(2)));
    }
}
