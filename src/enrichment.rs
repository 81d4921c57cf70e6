//! Built-in payload hooks used by the interactive walkthrough.
//!
//! Two variants are provided: a filter which vetoes payloads outside an
//! allowed severity set, and an enricher which stamps every payload with the
//! affected user, default custom metadata and a framework tag.

use std::collections::HashMap;

use serde::Serialize;

use crate::events::{Decision, PayloadHook};
use crate::models::Item;
use crate::types::{Body, Level, Person};
use crate::Error;

/// Vetoes every payload whose severity is not in the allowed set.
pub struct LevelFilter {
    allowed: Vec<Level>,
}

impl LevelFilter {
    pub fn new(allowed: Vec<Level>) -> Self {
        LevelFilter { allowed }
    }

    /// The variant the walkthrough demonstrates: only `error` payloads
    /// survive.
    pub fn errors_only() -> Self {
        LevelFilter::new(vec![Level::Error])
    }
}

impl PayloadHook for LevelFilter {
    fn process(&self, item: Item) -> Result<Decision, Error> {
        match item.data.level {
            Some(level) if self.allowed.contains(&level) => Ok(Decision::Proceed(item)),
            level => {
                debug!("Discarding a {:?} payload: not in the allowed severity set.", level);
                Ok(Decision::Drop)
            }
        }
    }
}

/// A typed metadata block serialized into every payload, demonstrating that
/// structured values survive the trip into the open payload area.
#[derive(Debug, Clone, Serialize)]
struct ServiceMetadata {
    service: String,
    limits: HashMap<String, i64>,
}

impl Default for ServiceMetadata {
    fn default() -> Self {
        let mut limits = HashMap::new();
        limits.insert("reports_per_minute".to_string(), 60);
        limits.insert("queue_depth".to_string(), 128);

        ServiceMetadata {
            service: crate::NAME.to_string(),
            limits,
        }
    }
}

/// Enriches every outgoing payload with application context and always
/// proceeds with transmission.
///
/// The enricher sets the affected user, merges default custom keys under any
/// the caller already supplied, stamps the framework tag and attaches a
/// structured metadata block through the open payload area.
pub struct ContextEnricher {
    person: Person,
    metadata: ServiceMetadata,
}

impl ContextEnricher {
    pub fn new(person: Person) -> Self {
        ContextEnricher {
            person,
            metadata: ServiceMetadata::default(),
        }
    }
}

impl Default for ContextEnricher {
    fn default() -> Self {
        let mut person = Person {
            id: "1234".to_string(),
            ..Default::default()
        };
        person
            .extra
            .insert("tenant".to_string(), serde_json::json!("tenant_name"));

        ContextEnricher::new(person)
    }
}

impl PayloadHook for ContextEnricher {
    fn process(&self, mut item: Item) -> Result<Decision, Error> {
        if let Body::Trace(trace) = &item.data.body {
            debug!(
                "Enriching an exception payload: {}: {}",
                trace.exception.class,
                trace.exception.message.as_deref().unwrap_or_default()
            );
        }

        // The affected user; `id` is required, anything else is optional.
        item.data.person = Some(self.person.clone());

        // Default custom keys never clobber what the caller supplied.
        let custom = item.data.custom.get_or_insert_with(HashMap::new);
        for (key, value) in default_custom() {
            custom.entry(key).or_insert(value);
        }

        item.data.framework = Some(format!("{} {}", crate::NAME, crate::VERSION));

        item.data.extra.insert(
            "service_metadata".to_string(),
            serde_json::to_value(&self.metadata).map_err(|e| {
                crate::errors::system_with_internal(
                    "We could not serialize the service metadata for an outgoing payload.",
                    "Make sure the metadata only contains serializable values and try again.",
                    e,
                )
            })?,
        );

        item.data.extra.insert(
            "deployment".to_string(),
            serde_json::json!({
                "region": "eu-west-1",
                "replicas": [1, 2, 3],
                "canary": {
                    "enabled": true,
                },
            }),
        );

        Ok(Decision::Proceed(item))
    }
}

/// Metadata attached to every payload unless the caller already set the key:
/// a fresh trace identifier and the flags active for this run.
fn default_custom() -> HashMap<String, serde_json::Value> {
    let mut custom = HashMap::new();
    custom.insert(
        "trace_id".to_string(),
        serde_json::json!(uuid::Uuid::new_v4().simple().to_string()),
    );
    custom.insert(
        "feature_flags".to_string(),
        serde_json::json!(["payload-hooks", "interactive-demo"]),
    );

    custom
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Data, Message, Trace};

    fn item_at(level: Level) -> Item {
        Item {
            data: Data {
                level: Some(level),
                body: Body::Message(Message {
                    body: "a test message".to_string(),
                    extra: HashMap::new(),
                }),
                ..Default::default()
            },
        }
    }

    #[test]
    fn filter_drops_severities_outside_the_allowed_set() {
        let filter = LevelFilter::errors_only();

        assert!(matches!(
            filter.process(item_at(Level::Info)),
            Ok(Decision::Drop)
        ));
        assert!(matches!(
            filter.process(item_at(Level::Debug)),
            Ok(Decision::Drop)
        ));
        assert!(matches!(
            filter.process(item_at(Level::Error)),
            Ok(Decision::Proceed(_))
        ));
    }

    #[test]
    fn filter_drops_payloads_without_a_level() {
        let filter = LevelFilter::errors_only();
        let mut item = item_at(Level::Error);
        item.data.level = None;

        assert!(matches!(filter.process(item), Ok(Decision::Drop)));
    }

    #[test]
    fn filter_honours_a_custom_allowed_set() {
        let filter = LevelFilter::new(vec![Level::Warning, Level::Error]);

        assert!(matches!(
            filter.process(item_at(Level::Warning)),
            Ok(Decision::Proceed(_))
        ));
        assert!(matches!(
            filter.process(item_at(Level::Info)),
            Ok(Decision::Drop)
        ));
    }

    #[test]
    fn enricher_sets_person_and_framework() {
        let enricher = ContextEnricher::default();

        let item = match enricher.process(item_at(Level::Error)) {
            Ok(Decision::Proceed(item)) => item,
            _ => panic!("the enricher should always proceed"),
        };

        let person = item.data.person.expect("a person should be attached");
        assert_eq!(person.id, "1234");
        assert_eq!(person.extra["tenant"], serde_json::json!("tenant_name"));

        assert_eq!(
            item.data.framework,
            Some(format!("{} {}", crate::NAME, crate::VERSION))
        );
        assert!(item.data.extra.contains_key("service_metadata"));
        assert!(item.data.extra["deployment"]["canary"]["enabled"].as_bool().unwrap());
    }

    #[test]
    fn enricher_does_not_clobber_caller_custom_keys() {
        let enricher = ContextEnricher::default();

        let mut item = item_at(Level::Error);
        let mut custom = HashMap::new();
        custom.insert("trace_id".to_string(), serde_json::json!("caller_trace"));
        custom.insert("order_id".to_string(), serde_json::json!("ORD-1"));
        item.data.custom = Some(custom);

        let item = match enricher.process(item) {
            Ok(Decision::Proceed(item)) => item,
            _ => panic!("the enricher should always proceed"),
        };

        let custom = item.data.custom.expect("custom data should be present");
        assert_eq!(custom["trace_id"], serde_json::json!("caller_trace"));
        assert_eq!(custom["order_id"], serde_json::json!("ORD-1"));
        assert!(custom.contains_key("feature_flags"));
    }

    #[test]
    fn enricher_mutations_are_independent_across_payloads() {
        let enricher = ContextEnricher::default();

        let first = match enricher.process(item_at(Level::Error)) {
            Ok(Decision::Proceed(item)) => item,
            _ => panic!("the enricher should always proceed"),
        };
        let second = match enricher.process(item_at(Level::Critical)) {
            Ok(Decision::Proceed(item)) => item,
            _ => panic!("the enricher should always proceed"),
        };

        assert_eq!(first.data.level, Some(Level::Error));
        assert_eq!(second.data.level, Some(Level::Critical));

        let first_custom = first.data.custom.expect("custom data should be present");
        let second_custom = second.data.custom.expect("custom data should be present");
        assert_ne!(first_custom["trace_id"], second_custom["trace_id"]);
    }

    #[test]
    fn enricher_logs_exception_payloads_without_altering_the_trace() {
        let enricher = ContextEnricher::default();

        let mut item = item_at(Level::Error);
        item.data.body = Body::Trace(Trace {
            frames: Vec::new(),
            exception: crate::types::Exception {
                class: "ExampleError".to_string(),
                message: Some("something broke".to_string()),
                description: None,
            },
        });
        let original_body = item.data.body.clone();

        let item = match enricher.process(item) {
            Ok(Decision::Proceed(item)) => item,
            _ => panic!("the enricher should always proceed"),
        };

        assert_eq!(item.data.body, original_body);
    }
}
