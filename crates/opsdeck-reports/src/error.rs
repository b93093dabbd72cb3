use std::fmt;

/// Result type for opsdeck-reports operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur when resolving and running reports
#[derive(Debug)]
pub enum Error {
    /// Underlying store read failed (present store, bad query or schema drift)
    Store(opsdeck_store::Error),

    /// No report registered under the requested name
    UnknownReport(String),

    /// A declared parameter has no value and no default
    MissingParam {
        report: &'static str,
        param: &'static str,
    },

    /// A supplied value does not parse as the parameter's kind
    InvalidParam {
        report: &'static str,
        param: &'static str,
        value: String,
    },

    /// A supplied argument name is not declared by the report
    UnknownParam { report: &'static str, param: String },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Store(err) => write!(f, "{}", err),
            Error::UnknownReport(name) => write!(f, "Unknown report: {}", name),
            Error::MissingParam { report, param } => {
                write!(f, "Report {} requires parameter '{}'", report, param)
            }
            Error::InvalidParam {
                report,
                param,
                value,
            } => write!(
                f,
                "Report {} parameter '{}' rejects value '{}'",
                report, param, value
            ),
            Error::UnknownParam { report, param } => {
                write!(f, "Report {} has no parameter '{}'", report, param)
            }
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Store(err) => Some(err),
            _ => None,
        }
    }
}

impl From<opsdeck_store::Error> for Error {
    fn from(err: opsdeck_store::Error) -> Self {
        Error::Store(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_report_and_parameter() {
        let err = Error::MissingParam {
            report: "cron.job_runs",
            param: "job_name",
        };
        assert_eq!(
            err.to_string(),
            "Report cron.job_runs requires parameter 'job_name'"
        );

        let err = Error::InvalidParam {
            report: "jobs.all",
            param: "limit",
            value: "soon".to_string(),
        };
        assert!(err.to_string().contains("'limit'"));
        assert!(err.to_string().contains("'soon'"));
    }
}
