#[macro_use] extern crate log;
extern crate serde;

mod client;
mod configuration;
mod enrichment;
mod errors;
mod events;
pub mod helpers;
mod macros;
pub mod models;
mod settings;
mod transport;
pub mod types;

use std::{sync::RwLock, collections::HashMap};

pub use client::Client;
pub use configuration::Configuration;
pub use enrichment::{ContextEnricher, LevelFilter};
pub use errors::Error;
pub use events::{add_payload_hook, Decision, PayloadHook};
pub use settings::{AppEnvironment, RollbarSettings, Settings, UNKNOWN_VERSION};
pub use transport::*;
pub use types::{Level, Person};

/// The name of the rollbar-demo crate that is being used.
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// The version of the rollbar-demo crate that is being used.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

lazy_static::lazy_static! {
    pub(crate) static ref CONFIG: RwLock<Configuration> = RwLock::new(Configuration::default());
    pub(crate) static ref TRANSPORT: HttpTransport = HttpTransport::new(&TransportConfig::default()).unwrap();
}

/// Configures the process-wide client in one call: the access token, the
/// environment events are attributed to, and the code version they are
/// tagged with.
pub fn init<S1: Into<String>, S2: Into<String>, S3: Into<String>>(
    access_token: S1,
    environment: S2,
    code_version: S3,
) {
    let mut config = CONFIG.write().unwrap();
    config.access_token = Some(access_token.into());
    config.environment = Some(environment.into());
    config.code_version = Some(code_version.into());
}

pub fn set_token<S: Into<String>>(token: S) {
    CONFIG.write().unwrap().access_token = Some(token.into());
}

pub fn set_environment<S: Into<String>>(environment: S) {
    CONFIG.write().unwrap().environment = Some(environment.into());
}

pub fn set_code_version<S: Into<String>>(code_version: S) {
    CONFIG.write().unwrap().code_version = Some(code_version.into());
}

pub fn set_log_level(level: types::Level) {
    CONFIG.write().unwrap().log_level = level;
}

pub fn set_platform<S: Into<String>>(platform: S) {
    CONFIG.write().unwrap().platform = Some(platform.into());
}

pub fn set_framework<S: Into<String>>(framework: S) {
    CONFIG.write().unwrap().framework = Some(framework.into());
}

pub fn set_context<S: Into<String>>(context: S) {
    CONFIG.write().unwrap().context = Some(context.into());
}

pub fn set_custom<S: Into<String>>(key: S, value: serde_json::Value) {
    let mut config = CONFIG.write().unwrap();

    match config.custom {
        Some(ref mut custom) => {
            custom.insert(key.into(), value);
        },
        None => {
            config.custom = Some(HashMap::new());
            config.custom.as_mut().unwrap().insert(key.into(), value);
        }
    }
}

/// Reports an event to Rollbar using the process-wide client.
///
/// The payload is assembled from the provided data and the active
/// configuration, gated on the configured minimum level, passed through the
/// registered payload hooks, and then queued for transmission.
pub fn report(data: types::Data) {
    let config = CONFIG.read().unwrap();

    let cfg: &Configuration = &config;

    let payload: models::Item = (data, cfg).into();

    if let Some(level) = payload.data.level {
        if level < config.log_level {
            return;
        }
    }

    match events::process(payload) {
        Some(payload) => TRANSPORT.send(TransportEvent {
            config: &config,
            payload,
        }),
        None => debug!("A payload hook discarded the payload."),
    }
}

/// Reports a log-style message at the provided severity, with optional
/// extra data attached to the message body.
pub fn report_message<S: Into<String>>(
    message: S,
    level: types::Level,
    extra: HashMap<String, serde_json::Value>,
) {
    report(types::Data {
        body: types::Body::Message(types::Message {
            body: message.into(),
            extra,
        }),
        level: Some(level),
        notifier: Some(types::Notifier {
            name: Some(NAME.into()),
            version: Some(VERSION.into()),
        }),
        uuid: Some(helpers::new_uuid()),
        ..Default::default()
    });
}

/// Reports a caught error as an exception trace, capturing the current
/// backtrace alongside the error's class, message and source. Extra data is
/// attached as custom payload keys.
pub fn report_error<E: std::error::Error>(err: &E, extra: HashMap<String, serde_json::Value>) {
    report(types::Data {
        body: types::Body::Trace(types::Trace {
            exception: helpers::get_exception(err),
            frames: helpers::get_backtrace_frames(),
        }),
        level: Some(types::Level::Error),
        custom: if extra.is_empty() { None } else { Some(extra) },
        notifier: Some(types::Notifier {
            name: Some(NAME.into()),
            version: Some(VERSION.into()),
        }),
        uuid: Some(helpers::new_uuid()),
        ..Default::default()
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_global_config() {
        set_token("test_token");
        assert_eq!(CONFIG.read().unwrap().access_token, Some("test_token".to_string()));

        init("init_token", "testing", "abc123");

        let config = CONFIG.read().unwrap();
        assert_eq!(config.access_token, Some("init_token".to_string()));
        assert_eq!(config.environment, Some("testing".to_string()));
        assert_eq!(config.code_version, Some("abc123".to_string()));
    }
}
