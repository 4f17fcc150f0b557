//! Reading a serialized report back in.
//!
//! Every field gets an explicit default; a present field with the wrong
//! shape is an error naming that field.

use fence_core::errors::ReportError;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use super::types::{Classification, Confidence, Decision, Report};

pub fn parse_report(raw: &str) -> Result<Report, ReportError> {
    let value: Value = serde_json::from_str(raw).map_err(|e| ReportError::InvalidJson {
        message: e.to_string(),
    })?;
    let object = value.as_object().ok_or(ReportError::NotAnObject)?;

    let decision = match nested(object, "decision")? {
        Some(d) => Decision {
            level: field(d, "level", "decision.level")?,
            reason: field(d, "reason", "decision.reason")?,
        },
        None => Decision::default(),
    };
    let classification = match nested(object, "classification")? {
        Some(c) => Classification {
            primary_cause: field(c, "primaryCause", "classification.primaryCause")?,
        },
        None => Classification::default(),
    };
    let confidence = match nested(object, "confidence")? {
        Some(c) => Confidence {
            coverage_ratio: field(c, "coverageRatio", "confidence.coverageRatio")?,
        },
        None => Confidence::default(),
    };

    Ok(Report {
        status: field(object, "status", "status")?,
        decision,
        classification,
        minimal_cut: field(object, "minimalCut", "minimalCut")?,
        confidence,
    })
}

fn field<T>(object: &Map<String, Value>, key: &str, name: &str) -> Result<T, ReportError>
where
    T: DeserializeOwned + Default,
{
    match object.get(key) {
        None | Some(Value::Null) => Ok(T::default()),
        Some(value) => serde_json::from_value(value.clone()).map_err(|e| ReportError::InvalidField {
            field: name.to_string(),
            message: e.to_string(),
        }),
    }
}

fn nested<'v>(
    object: &'v Map<String, Value>,
    key: &str,
) -> Result<Option<&'v Map<String, Value>>, ReportError> {
    match object.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Object(inner)) => Ok(Some(inner)),
        Some(_) => Err(ReportError::InvalidField {
            field: key.to_string(),
            message: "expected an object".to_string(),
        }),
    }
}
