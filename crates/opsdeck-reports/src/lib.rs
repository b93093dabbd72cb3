//! Read-only projections over the producer stores.
//!
//! Every dashboard readout is either a registered [`spec::ReportSpec`] run
//! through the uniform executor, or one of the typed compositions in
//! [`overview`]. Nothing in this crate writes.

pub mod domains;
pub mod error;
pub mod overview;
pub mod registry;
pub mod spec;

pub use error::{Error, Result};
pub use overview::{OverviewSnapshot, overview};
pub use registry::{
    ParamDescriptor, ReportDescriptor, all_reports, describe, find_report, report_names,
};
pub use spec::{ParamKind, ParamSpec, ReportOutput, ReportSpec, ScalarDefault, Shape, run};
