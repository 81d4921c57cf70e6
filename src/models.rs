use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::{types, Configuration};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Item {
    pub data: types::Data,
}

/// Builds an outgoing item from report data and the active configuration.
/// Fields the caller set explicitly always win; the configuration only fills
/// the gaps.
impl From<(types::Data, &Configuration)> for Item {
    fn from((mut data, config): (types::Data, &Configuration)) -> Self {
        if data.environment.is_none() {
            data.environment = config.environment.clone();
        }

        if data.code_version.is_none() {
            data.code_version = config.code_version.clone();
        }

        if data.platform.is_none() {
            data.platform = config.platform.clone();
        }

        if data.framework.is_none() {
            data.framework = config.framework.clone();
        }

        if data.context.is_none() {
            data.context = config.context.clone();
        }

        if data.language.is_none() {
            data.language = Some("rust".to_string());
        }

        if data.notifier.is_none() {
            data.notifier = Some(types::Notifier {
                name: Some(crate::NAME.to_string()),
                version: Some(crate::VERSION.to_string()),
            });
        }

        if data.uuid.is_none() {
            data.uuid = Some(crate::helpers::new_uuid());
        }

        if data.timestamp.is_none() {
            data.timestamp = Some(unix_timestamp());
        }

        if let Some(defaults) = config.custom.as_ref() {
            let custom = data.custom.get_or_insert_with(HashMap::new);
            for (key, value) in defaults {
                custom.entry(key.clone()).or_insert_with(|| value.clone());
            }
        }

        Item { data }
    }
}

fn unix_timestamp() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|elapsed| elapsed.as_secs())
        .unwrap_or_default()
}
