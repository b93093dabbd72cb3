//! Relationship pipeline over the CRM mirror store.

use opsdeck_store::Store;

use crate::spec::{ReportSpec, ScalarDefault, Shape};

pub const REPORTS: &[ReportSpec] = &[
    ReportSpec {
        name: "crm.contact_count",
        store: Store::Crm,
        description: "Total contacts",
        sql: "SELECT COUNT(*) FROM contacts",
        params: &[],
        shape: Shape::Scalar(ScalarDefault::Int(0)),
    },
    ReportSpec {
        name: "crm.company_count",
        store: Store::Crm,
        description: "Total companies",
        sql: "SELECT COUNT(*) FROM companies",
        params: &[],
        shape: Shape::Scalar(ScalarDefault::Int(0)),
    },
    ReportSpec {
        name: "crm.deal_count",
        store: Store::Crm,
        description: "Total deals",
        sql: "SELECT COUNT(*) FROM deals",
        params: &[],
        shape: Shape::Scalar(ScalarDefault::Int(0)),
    },
    ReportSpec {
        name: "crm.high_value_count",
        store: Store::Crm,
        description: "Contacts scoring 70 or better",
        sql: "SELECT COUNT(*) FROM relationship_scores WHERE total_score >= 70",
        params: &[],
        shape: Shape::Scalar(ScalarDefault::Int(0)),
    },
    ReportSpec {
        name: "crm.stale_count",
        store: Store::Crm,
        description: "Valuable relationships going quiet",
        sql: "\
SELECT COUNT(*) FROM relationship_scores
WHERE (total_score >= 70 AND days_since_contact >= 14)
   OR (total_score >= 50 AND days_since_contact >= 30)",
        params: &[],
        shape: Shape::Scalar(ScalarDefault::Int(0)),
    },
    ReportSpec {
        name: "crm.pipeline_value",
        store: Store::Crm,
        description: "Open deal value, closed stages excluded",
        sql: "\
SELECT COALESCE(SUM(amount), 0) FROM deals
WHERE deal_stage NOT IN ('closedwon', 'closedlost')",
        params: &[],
        shape: Shape::Scalar(ScalarDefault::Float(0.0)),
    },
    ReportSpec {
        name: "crm.pending_draft_count",
        store: Store::Crm,
        description: "Follow-up drafts waiting for review",
        sql: "SELECT COUNT(*) FROM follow_up_drafts WHERE draft_status = 'pending'",
        params: &[],
        shape: Shape::Scalar(ScalarDefault::Int(0)),
    },
    ReportSpec {
        name: "crm.contacts",
        store: Store::Crm,
        description: "Contacts with their relationship scores, best first",
        sql: "\
SELECT c.firstname, c.lastname, c.company_name, c.job_title, c.email,
       COALESCE(rs.total_score, 0) AS total_score,
       COALESCE(rs.engagement, 0) AS engagement,
       COALESCE(rs.strategic_fit, 0) AS strategic_fit,
       COALESCE(rs.opportunity_potential, 0) AS opportunity_potential,
       COALESCE(rs.network_value, 0) AS network_value,
       rs.days_since_contact,
       rs.nudge_status
FROM contacts c
LEFT JOIN relationship_scores rs ON c.id = rs.contact_id
ORDER BY COALESCE(rs.total_score, 0) DESC",
        params: &[],
        shape: Shape::Rows,
    },
    ReportSpec {
        name: "crm.companies",
        store: Store::Crm,
        description: "Companies with contact counts and research notes",
        sql: "\
SELECT co.name, co.industry, co.num_employees, co.domain,
       co.research_summary, co.research_date,
       (SELECT COUNT(*) FROM contacts c WHERE c.company_name = co.name) AS contact_count
FROM companies co
ORDER BY co.name",
        params: &[],
        shape: Shape::Rows,
    },
    ReportSpec {
        name: "crm.deals",
        store: Store::Crm,
        description: "Deals joined with their contact and company",
        sql: "\
SELECT d.deal_name, d.deal_stage, d.amount, d.close_date, d.deal_type,
       c.firstname || ' ' || c.lastname AS contact_name,
       co.name AS company_name
FROM deals d
LEFT JOIN contacts c ON d.contact_id = c.id
LEFT JOIN companies co ON d.company_id = co.id
ORDER BY d.deal_stage, d.close_date",
        params: &[],
        shape: Shape::Rows,
    },
    ReportSpec {
        name: "crm.pending_drafts",
        store: Store::Crm,
        description: "Pending follow-up drafts with their contact",
        sql: "\
SELECT fd.draft_subject, fd.draft_status, fd.context_summary, fd.created_at,
       c.firstname || ' ' || c.lastname AS contact_name
FROM follow_up_drafts fd
JOIN contacts c ON fd.contact_id = c.id
WHERE fd.draft_status = 'pending'
ORDER BY fd.created_at DESC",
        params: &[],
        shape: Shape::Rows,
    },
    ReportSpec {
        name: "crm.last_sync",
        store: Store::Crm,
        description: "Most recent upstream sync attempt",
        sql: "\
SELECT sync_type, records_fetched, records_created, records_updated,
       status, error_message, started_at, completed_at
FROM sync_log
ORDER BY started_at DESC
LIMIT 1",
        params: &[],
        shape: Shape::Row,
    },
    ReportSpec {
        name: "crm.score_distribution",
        store: Store::Crm,
        description: "Contact count per score bracket",
        sql: "\
SELECT
    CASE
        WHEN rs.total_score >= 70 THEN '70+'
        WHEN rs.total_score >= 50 THEN '50-69'
        WHEN rs.total_score >= 25 THEN '25-49'
        ELSE '<25'
    END AS bracket,
    COUNT(*) AS count
FROM relationship_scores rs
GROUP BY bracket
ORDER BY rs.total_score DESC",
        params: &[],
        shape: Shape::Rows,
    },
    ReportSpec {
        name: "crm.summary",
        store: Store::Crm,
        description: "Headline numbers for the overview page",
        sql: "\
SELECT
    (SELECT COUNT(*) FROM contacts) AS contacts,
    (SELECT COUNT(*) FROM relationship_scores WHERE total_score >= 70) AS high_value,
    (SELECT COUNT(*) FROM relationship_scores
     WHERE (total_score >= 70 AND days_since_contact >= 14)
        OR (total_score >= 50 AND days_since_contact >= 30)) AS stale,
    (SELECT COALESCE(SUM(amount), 0) FROM deals
     WHERE deal_stage NOT IN ('closedwon', 'closedlost')) AS pipeline_value",
        params: &[],
        shape: Shape::Row,
    },
];
