//! Run-configuration validation with a scoped-diagnostic fallback.
//!
//! A failed validation against the full connection-schema union produces an
//! error spanning every alternative shape, which is useless to an operator.
//! The fallback narrows validation to the one concrete schema named by the
//! document's own type tag and reports exactly which field of exactly which
//! schema failed.

use super::{RunConfig, classify, locate};
use crate::error::{HarvestError, Result};

/// Path of the discriminator read on the fallback path.
const TYPE_TAG_POINTER: &str = "/source/serviceConnection/config/type";

/// Validates a raw run-configuration document.
///
/// 1. Attempt full validation against the discriminated union spanning all
///    registered source types; success returns the typed config.
/// 2. On failure, read `source.serviceConnection.config.type` — a document
///    without it is unrecoverable ([`HarvestError::MissingField`]).
/// 3. Classify the tag and locate its registered schema.
/// 4. Re-validate only the connection block against the narrowed schema.
///
/// The fallback is diagnostic-only and always returns an error: a scoped
/// [`HarvestError::ConfigValidation`] when the narrowed schema rejects the
/// block, or a configuration error pointing outside the connection block
/// when the narrowed schema accepts it.
///
/// Resolution is a pure function of its input; repeated calls on the same
/// document yield the same outcome.
pub fn resolve(raw: &serde_json::Value) -> Result<RunConfig> {
    let full_error = match serde_json::from_value::<RunConfig>(raw.clone()) {
        Ok(config) => return Ok(config),
        Err(e) => e,
    };

    let source_type = raw
        .pointer(TYPE_TAG_POINTER)
        .and_then(serde_json::Value::as_str)
        .ok_or_else(|| HarvestError::missing_field("source.serviceConnection.config.type"))?
        .to_string();

    tracing::error!(
        "Error parsing the run configuration for {} ingestion",
        source_type
    );

    let category = classify(&source_type)?;
    let entry = locate(&source_type, category)?;

    let block = raw
        .pointer("/source/serviceConnection/config")
        .cloned()
        .unwrap_or(serde_json::Value::Null);

    match entry.parse_connection(block) {
        Err(scoped) => Err(HarvestError::ConfigValidation {
            source_type,
            source: scoped,
        }),
        Ok(_) => Err(HarvestError::configuration(format!(
            "Run configuration for {} is invalid outside the connection block: {}",
            source_type, full_error
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConnectionSpec;

    fn valid_doc() -> serde_json::Value {
        serde_json::json!({
            "source": {
                "type": "Snowflake",
                "serviceName": "snow_prod",
                "serviceConnection": {
                    "config": {
                        "type": "Snowflake",
                        "account": "xy12345",
                        "username": "svc",
                        "password": "pw",
                        "warehouse": "WH"
                    }
                }
            }
        })
    }

    #[test]
    fn test_valid_document_resolves() {
        let config = resolve(&valid_doc()).unwrap();
        assert_eq!(config.source.service_name, "snow_prod");
        assert!(matches!(
            config.source.service_connection.config,
            ConnectionSpec::Snowflake(_)
        ));
    }

    #[test]
    fn test_missing_type_tag() {
        let mut doc = valid_doc();
        doc["source"]["serviceConnection"]["config"]
            .as_object_mut()
            .unwrap()
            .remove("type");

        match resolve(&doc) {
            Err(HarvestError::MissingField { path }) => {
                assert_eq!(path, "source.serviceConnection.config.type");
            }
            other => panic!("expected MissingField, got {:?}", other),
        }
    }

    #[test]
    fn test_unknown_tag_on_fallback() {
        let mut doc = valid_doc();
        doc["source"]["serviceConnection"]["config"]["type"] = "Netezza".into();

        assert!(matches!(
            resolve(&doc),
            Err(HarvestError::UnknownSourceType { .. })
        ));
    }

    #[test]
    fn test_scoped_diagnostic_names_concrete_type() {
        let mut doc = valid_doc();
        // Break a Snowflake-specific field so the union parse fails and the
        // narrowed parse fails the same way.
        doc["source"]["serviceConnection"]["config"]
            .as_object_mut()
            .unwrap()
            .remove("warehouse");

        match resolve(&doc) {
            Err(HarvestError::ConfigValidation {
                source_type,
                source,
            }) => {
                assert_eq!(source_type, "Snowflake");
                assert!(source.to_string().contains("warehouse"));
            }
            other => panic!("expected ConfigValidation, got {:?}", other),
        }
    }

    #[test]
    fn test_failure_outside_connection_block() {
        let mut doc = valid_doc();
        // Connection block is fine; the document fails because serviceName
        // is missing.
        doc["source"].as_object_mut().unwrap().remove("serviceName");

        match resolve(&doc) {
            Err(HarvestError::Configuration { message }) => {
                assert!(message.contains("Snowflake"));
                assert!(message.contains("outside the connection block"));
            }
            other => panic!("expected Configuration, got {:?}", other),
        }
    }

    #[test]
    fn test_resolution_is_idempotent() {
        let doc = valid_doc();
        let first = resolve(&doc).unwrap();
        let second = resolve(&doc).unwrap();
        assert_eq!(first.source.service_name, second.source.service_name);

        let mut bad = valid_doc();
        bad["source"]["serviceConnection"]["config"]
            .as_object_mut()
            .unwrap()
            .remove("warehouse");
        let e1 = resolve(&bad).unwrap_err();
        let e2 = resolve(&bad).unwrap_err();
        assert_eq!(
            std::mem::discriminant(&e1),
            std::mem::discriminant(&e2)
        );
    }
}
