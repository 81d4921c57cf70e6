use std::collections::HashMap;

use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct Configuration {
    pub access_token: Option<String>,
    pub environment: Option<String>,
    pub code_version: Option<String>,
    pub log_level: crate::types::Level,
    pub platform: Option<String>,
    pub framework: Option<String>,
    pub context: Option<String>,
    pub custom: Option<HashMap<String, serde_json::Value>>,
}

impl Default for Configuration {
    fn default() -> Self {
        Configuration {
            access_token: None,
            environment: None,
            code_version: None,
            platform: Some(std::env::consts::OS.to_string()),
            framework: None,
            context: None,
            custom: None,
            log_level: crate::types::Level::Debug,
        }
    }
}
