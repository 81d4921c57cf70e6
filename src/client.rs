use std::sync::Arc;

use crate::events::run_hooks;
use crate::*;

pub struct Client<T: Transport> {
    transport: T,
    config: Arc<Configuration>,
    hooks: Vec<Box<dyn PayloadHook>>,
}

impl<T: Transport> Client<T> {
    /// Creates a new `Client` instance with the provided configuration.
    ///
    /// This method allows you to construct a custom client using your
    /// chosen transport and a specific configuration. It may then be
    /// used to send errors to Rollbar instead of the default client.
    pub fn new(transport: T, config: Configuration) -> Self {
        Client {
            transport,
            config: Arc::new(config),
            hooks: Vec::new(),
        }
    }

    /// Adds a payload hook which runs for every payload reported through
    /// this client, in registration order, before the payload is queued for
    /// transmission.
    pub fn with_hook<H>(mut self, hook: H) -> Self
    where
        H: PayloadHook + 'static,
    {
        self.hooks.push(Box::new(hook));
        self
    }

    /// Reports a new event to Rollbar using this client.
    ///
    /// This method is the equivalent of the `rollbar_demo::report` method, but
    /// uses the custom client to send the request instead of the default one.
    /// This allows you to use a custom transport, a custom configuration, or
    /// a separate hook chain for different portions of your application.
    ///
    /// # Example
    /// ```rust
    /// use rollbar_demo::*;
    ///
    /// let client = Client::with_default_transport(Configuration::default()).unwrap();
    /// client.report(rollbar_format!(message = "This is a test"));
    /// ```
    pub fn report(&self, data: crate::types::Data) {
        let payload: models::Item = (data, self.config.as_ref()).into();

        if let Some(level) = payload.data.level {
            if level < self.config.log_level {
                return;
            }
        }

        match run_hooks(&self.hooks, payload) {
            Some(payload) => self.transport.send(TransportEvent {
                config: &self.config,
                payload,
            }),
            None => debug!("A payload hook discarded the payload."),
        }
    }
}

impl Client<HttpTransport> {
    pub fn with_default_transport(config: Configuration) -> Result<Self, Error> {
        Ok(Client::new(
            HttpTransport::new(&TransportConfig::default())?,
            config,
        ))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use super::*;
    use crate::models::Item;
    use crate::types::{Body, Data, Level, Message};

    #[derive(Debug, Clone, Default)]
    struct CapturingTransport {
        items: Arc<Mutex<Vec<Item>>>,
    }

    impl Transport for CapturingTransport {
        fn new(_config: &TransportConfig) -> Result<Self, Error> {
            Ok(CapturingTransport::default())
        }

        fn send(&self, event: TransportEvent) {
            self.items.lock().unwrap().push(event.payload);
        }
    }

    fn message_at(level: Level) -> Data {
        Data {
            body: Body::Message(Message {
                body: "a test message".to_string(),
                extra: Default::default(),
            }),
            level: Some(level),
            ..Default::default()
        }
    }

    #[test]
    fn hooks_can_veto_payloads() {
        let items = Arc::new(Mutex::new(Vec::new()));
        let client = Client::new(
            CapturingTransport {
                items: items.clone(),
            },
            Configuration::default(),
        )
        .with_hook(LevelFilter::errors_only());

        client.report(message_at(Level::Info));
        client.report(message_at(Level::Error));

        let sent = items.lock().unwrap();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].data.level, Some(Level::Error));
    }

    #[test]
    fn hooks_mutations_reach_the_transport() {
        let items = Arc::new(Mutex::new(Vec::new()));
        let client = Client::new(
            CapturingTransport {
                items: items.clone(),
            },
            Configuration::default(),
        )
        .with_hook(ContextEnricher::default());

        client.report(message_at(Level::Error));

        let sent = items.lock().unwrap();
        assert_eq!(sent.len(), 1);
        assert!(sent[0].data.person.is_some());
        assert!(sent[0].data.extra.contains_key("service_metadata"));
    }

    #[test_log::test]
    fn failing_hooks_do_not_lose_the_payload() {
        let items = Arc::new(Mutex::new(Vec::new()));
        let client = Client::new(
            CapturingTransport {
                items: items.clone(),
            },
            Configuration::default(),
        )
        .with_hook(|_: Item| -> Result<Decision, Error> {
            Err(crate::errors::user(
                "This hook always fails.",
                "There is nothing to do about it.",
            ))
        });

        client.report(message_at(Level::Error));
        assert_eq!(items.lock().unwrap().len(), 1);
    }

    #[test]
    fn low_severity_payloads_are_gated_by_the_configuration() {
        let items = Arc::new(Mutex::new(Vec::new()));
        let client = Client::new(
            CapturingTransport {
                items: items.clone(),
            },
            Configuration {
                log_level: Level::Error,
                ..Default::default()
            },
        );

        client.report(message_at(Level::Info));
        assert!(items.lock().unwrap().is_empty());
    }
}
