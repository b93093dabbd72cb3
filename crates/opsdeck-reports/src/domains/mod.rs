//! Per-domain report tables.
//!
//! Each module contributes one const table of `ReportSpec` declarations;
//! execution is uniform and lives in `spec::run`. The SQL in these tables is
//! the only place producer schemas are spelled out.

pub mod briefings;
pub mod chores;
pub mod content;
pub mod costs;
pub mod crm;
pub mod cron;
pub mod jobs;
pub mod knowledge;
pub mod meals;
pub mod projects;
pub mod twitter;
pub mod youtube;
