//! Central report registry.
//!
//! Domain modules each contribute a const table; the registry flattens them
//! once and answers lookups by name. Names are `domain.operation`, which is
//! what the serving layer exposes.

use once_cell::sync::Lazy;
use serde::Serialize;

use crate::domains;
use crate::spec::{ReportSpec, Shape};

static REGISTRY: Lazy<Vec<&'static ReportSpec>> = Lazy::new(|| {
    let sets: [&'static [ReportSpec]; 12] = [
        domains::briefings::REPORTS,
        domains::chores::REPORTS,
        domains::content::REPORTS,
        domains::costs::REPORTS,
        domains::crm::REPORTS,
        domains::cron::REPORTS,
        domains::jobs::REPORTS,
        domains::knowledge::REPORTS,
        domains::meals::REPORTS,
        domains::projects::REPORTS,
        domains::twitter::REPORTS,
        domains::youtube::REPORTS,
    ];
    sets.into_iter().flatten().collect()
});

/// Every registered report, in domain order.
pub fn all_reports() -> &'static [&'static ReportSpec] {
    &REGISTRY
}

/// Look up one report by its `domain.operation` name.
pub fn find_report(name: &str) -> Option<&'static ReportSpec> {
    REGISTRY.iter().copied().find(|spec| spec.name == name)
}

pub fn report_names() -> Vec<&'static str> {
    REGISTRY.iter().map(|spec| spec.name).collect()
}

/// Listing entry for the report index endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct ReportDescriptor {
    pub name: &'static str,
    pub store: &'static str,
    pub description: &'static str,
    pub shape: &'static str,
    pub params: Vec<ParamDescriptor>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ParamDescriptor {
    pub name: &'static str,
    pub kind: &'static str,
    pub required: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<&'static str>,
}

pub fn describe(spec: &ReportSpec) -> ReportDescriptor {
    ReportDescriptor {
        name: spec.name,
        store: spec.store.name(),
        description: spec.description,
        shape: match spec.shape {
            Shape::Rows => "rows",
            Shape::Row => "row",
            Shape::Scalar(_) => "scalar",
        },
        params: spec
            .params
            .iter()
            .map(|p| ParamDescriptor {
                name: p.name,
                kind: p.kind.name(),
                required: p.default.is_none(),
                default: p.default,
            })
            .collect(),
    }
}
