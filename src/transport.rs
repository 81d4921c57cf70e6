use std::sync::mpsc::{channel, Receiver, Sender};
use std::sync::Mutex;
use std::thread::JoinHandle;
use std::time::Duration;

use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};

use crate::errors::*;
use crate::models::Item;
use crate::{Configuration, Error};

#[derive(Debug, Clone)]
pub struct TransportConfig {
    pub endpoint: String,
    pub timeout: Duration,
    pub proxy: Option<String>,
}

impl Default for TransportConfig {
    fn default() -> Self {
        TransportConfig {
            endpoint: "https://api.rollbar.com/api/1/item/".to_string(),
            timeout: Duration::from_millis(10000),
            proxy: None,
        }
    }
}

pub trait Transport: Send + Sync + Sized {
    fn new(config: &TransportConfig) -> Result<Self, Error>;
    fn send(&self, event: TransportEvent);
}

pub struct TransportEvent<'a> {
    pub config: &'a Configuration,
    pub payload: Item,
}

/// An item queued for delivery together with the token it is sent under.
struct Job {
    access_token: String,
    payload: Item,
}

/// Ships payloads from a background worker thread so that reporting never
/// blocks the caller. Dropping the transport flushes the queue and joins the
/// worker, so short-lived processes do not lose payloads queued just before
/// exit.
#[derive(Debug)]
pub struct HttpTransport {
    queue: Mutex<Sender<Option<Job>>>,
    worker: Option<JoinHandle<()>>,
}

impl Transport for HttpTransport {
    fn new(config: &TransportConfig) -> Result<Self, Error> {
        let mut client = Client::builder()
            .gzip(true)
            .timeout(config.timeout)
            .user_agent(concat!("rollbar-demo v", env!("CARGO_PKG_VERSION")));

        if let Some(proxy) = &config.proxy {
            client = client.proxy(reqwest::Proxy::all(proxy).map_err(|e| user_with_internal(
                "We could not configure Rollbar to use the proxy you provided.",
                "Make sure that you have specified a valid proxy URL in your configuration and try again.",
                e
            ))?);
        }

        let client = client.build().map_err(|e| user_with_internal(
            "We could not configure Rollbar based on the configuration you have provided.",
            "Make sure that you have specified a valid configuration and try again.",
            e
        ))?;

        let endpoint = config.endpoint.clone();

        let (tx, rx): (Sender<Option<Job>>, Receiver<Option<Job>>) = channel();
        let worker = std::thread::spawn(move || {
            while let Some(job) = rx.recv().unwrap_or(None) {
                deliver(&client, &endpoint, job);
            }
        });

        Ok(Self {
            queue: Mutex::new(tx),
            worker: Some(worker),
        })
    }

    fn send(&self, event: TransportEvent) {
        let access_token = match event.config.access_token.clone() {
            Some(token) => token,
            None => {
                debug!("No access token is configured, skipping the payload.");
                return;
            }
        };

        let job = Job {
            access_token,
            payload: event.payload,
        };

        self.queue.lock().map(|queue| queue.send(Some(job))).ok();
    }
}

fn deliver(client: &Client, endpoint: &str, job: Job) {
    let mut req = client.post(endpoint).json(&job.payload);

    if let Ok(mut access_token) = reqwest::header::HeaderValue::from_str(&job.access_token) {
        access_token.set_sensitive(true);
        req = req.header("X-Rollbar-Access-Token", access_token);
    }

    match req.send() {
        Ok(resp) => debug!(
            "Successfully sent payload to Rollbar: {}",
            resp.json()
                .ok()
                .and_then(|r: ItemResponse| serde_json::to_string_pretty(&r).ok())
                .unwrap_or_default()
        ),
        Err(e) => error!("We could not send the payload to Rollbar: {}", e),
    };
}

impl Drop for HttpTransport {
    fn drop(&mut self) {
        self.queue.lock().map(|queue| queue.send(None)).ok();
        if let Some(worker) = self.worker.take() {
            worker.join().ok();
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct ItemResponse {
    err: u8,
    result: Option<ItemResult>,
    message: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct ItemResult {
    id: Option<String>,
    uuid: Option<String>,
}
