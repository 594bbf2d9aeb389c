use serde::{Deserialize, Serialize};

use brokerdesk_core::ServiceError;

// ---------------------------------------------------------------------------
// Job — the stored document, maps 1:1 to the wire projection
// ---------------------------------------------------------------------------

/// A job record, keyed by its business job number.
///
/// `jobNo` doubles as the store key: writes are upserts, so there is
/// exactly one document per job number at all times.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Job {
    /// Business job number — logical primary key.
    pub job_no: String,

    /// Aggregate quantity across the job.
    #[serde(default)]
    pub overall: f64,

    #[serde(default)]
    pub commodity: String,

    #[serde(default)]
    pub location: String,

    #[serde(default)]
    pub origin: String,
}

// ---------------------------------------------------------------------------
// API request types
// ---------------------------------------------------------------------------

/// Body for `POST /jobs` — upsert a job by `jobNo`.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpsertJobRequest {
    #[serde(default)]
    pub job_no: Option<String>,

    /// Accepts a JSON number or a numeric string; absent means 0.
    #[serde(default)]
    pub overall: Option<serde_json::Value>,

    #[serde(default)]
    pub commodity: Option<String>,

    #[serde(default)]
    pub location: Option<String>,

    #[serde(default)]
    pub origin: Option<String>,
}

impl UpsertJobRequest {
    /// Validate the request and convert it into a full job document.
    ///
    /// `jobNo` must be present and non-empty. `overall` is coerced to f64;
    /// a value that is neither a number nor a numeric string is rejected
    /// rather than silently zeroed.
    pub fn into_job(self) -> Result<Job, ServiceError> {
        let job_no = match self.job_no {
            Some(s) if !s.is_empty() => s,
            _ => return Err(ServiceError::Validation("jobNo required".into())),
        };

        let overall = match self.overall {
            None => 0.0,
            Some(v) => coerce_number(&v).ok_or_else(|| {
                ServiceError::Validation(format!("overall is not numeric: {v}"))
            })?,
        };

        Ok(Job {
            job_no,
            overall,
            commodity: self.commodity.unwrap_or_default(),
            location: self.location.unwrap_or_default(),
            origin: self.origin.unwrap_or_default(),
        })
    }
}

/// Parse a JSON number or numeric string as f64.
fn coerce_number(v: &serde_json::Value) -> Option<f64> {
    match v {
        serde_json::Value::Number(n) => n.as_f64(),
        serde_json::Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn job_json_shape() {
        let job = Job {
            job_no: "J1".into(),
            overall: 100.0,
            commodity: "wheat".into(),
            location: "".into(),
            origin: "".into(),
        };
        let json = serde_json::to_value(&job).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "jobNo": "J1",
                "overall": 100.0,
                "commodity": "wheat",
                "location": "",
                "origin": "",
            })
        );
    }

    #[test]
    fn job_defaults_on_deserialize() {
        let job: Job = serde_json::from_str(r#"{"jobNo":"J2"}"#).unwrap();
        assert_eq!(job.job_no, "J2");
        assert_eq!(job.overall, 0.0);
        assert_eq!(job.commodity, "");
    }

    #[test]
    fn upsert_requires_job_no() {
        let req: UpsertJobRequest = serde_json::from_str(r#"{"overall":5}"#).unwrap();
        assert!(matches!(req.into_job(), Err(ServiceError::Validation(_))));

        let req: UpsertJobRequest = serde_json::from_str(r#"{"jobNo":""}"#).unwrap();
        assert!(matches!(req.into_job(), Err(ServiceError::Validation(_))));
    }

    #[test]
    fn overall_coercion() {
        let req: UpsertJobRequest =
            serde_json::from_str(r#"{"jobNo":"J1","overall":12.5}"#).unwrap();
        assert_eq!(req.into_job().unwrap().overall, 12.5);

        let req: UpsertJobRequest =
            serde_json::from_str(r#"{"jobNo":"J1","overall":"42"}"#).unwrap();
        assert_eq!(req.into_job().unwrap().overall, 42.0);

        let req: UpsertJobRequest = serde_json::from_str(r#"{"jobNo":"J1"}"#).unwrap();
        assert_eq!(req.into_job().unwrap().overall, 0.0);

        let req: UpsertJobRequest =
            serde_json::from_str(r#"{"jobNo":"J1","overall":"lots"}"#).unwrap();
        assert!(matches!(req.into_job(), Err(ServiceError::Validation(_))));

        let req: UpsertJobRequest =
            serde_json::from_str(r#"{"jobNo":"J1","overall":[1]}"#).unwrap();
        assert!(matches!(req.into_job(), Err(ServiceError::Validation(_))));
    }

    #[test]
    fn optional_fields_default_empty() {
        let req: UpsertJobRequest =
            serde_json::from_str(r#"{"jobNo":"J1","commodity":"maize"}"#).unwrap();
        let job = req.into_job().unwrap();
        assert_eq!(job.commodity, "maize");
        assert_eq!(job.location, "");
        assert_eq!(job.origin, "");
    }
}
