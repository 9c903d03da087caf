//! Live data source polling the LibreLinkUp API.
//!
//! Spawns a background task that fetches a fresh snapshot on a fixed
//! interval and hands it to the TUI over a channel. Each tick is an
//! independent fetch: a slow request delays the next tick rather than
//! stacking a second fetch on top of it, and a failed tick leaves the
//! previous snapshot on screen.

use std::path::Path;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::Deserialize;
use tokio::sync::mpsc;
use tokio::time::MissedTickBehavior;

use glucowatch_adapters::librelinkup::LibreLinkUpClient;
use glucowatch_types::SeriesSnapshot;

use super::DataSource;

/// Settings for the live LibreLinkUp connection, read from a config file.
///
/// ```toml
/// [api]
/// base_url = "https://api-la.libreview.io"
/// email = "follower@example.com"
/// password = "secret"
/// patient_id = "46c16886-c96e-e911-813f-02d09c370615"
///
/// [poll]
/// interval_secs = 60
/// ```
#[derive(Debug, Deserialize)]
pub struct LiveSettings {
    pub api: ApiSettings,
    #[serde(default)]
    pub poll: PollSettings,
}

/// Vendor API connection settings.
#[derive(Debug, Deserialize)]
pub struct ApiSettings {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    pub email: String,
    pub password: String,
    pub patient_id: String,
}

/// Polling settings.
#[derive(Debug, Deserialize)]
pub struct PollSettings {
    #[serde(default = "default_interval_secs")]
    pub interval_secs: u64,
}

impl Default for PollSettings {
    fn default() -> Self {
        Self {
            interval_secs: default_interval_secs(),
        }
    }
}

fn default_base_url() -> String {
    "https://api-la.libreview.io".to_string()
}

fn default_interval_secs() -> u64 {
    60
}

impl LiveSettings {
    /// Load settings from a config file.
    pub fn load(path: &Path) -> Result<Self> {
        let settings = config::Config::builder()
            .add_source(config::File::from(path))
            .build()
            .with_context(|| format!("failed to read config file {}", path.display()))?;

        settings
            .try_deserialize()
            .context("invalid live connection settings")
    }

    /// Build the API client these settings describe.
    pub fn client(&self) -> LibreLinkUpClient {
        LibreLinkUpClient::builder()
            .base_url(&self.api.base_url)
            .credentials(&self.api.email, &self.api.password)
            .patient_id(&self.api.patient_id)
            .build()
    }

    /// The polling interval these settings describe.
    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.poll.interval_secs)
    }
}

/// A data source that polls the LibreLinkUp API in a background task.
///
/// Must be spawned from within a tokio runtime. The task fetches a snapshot
/// per tick and forwards it over an mpsc channel; fetch errors land in a
/// shared error slot that [`DataSource::error`] reads.
#[derive(Debug)]
pub struct LiveSource {
    receiver: mpsc::Receiver<SeriesSnapshot>,
    description: String,
    last_error: Arc<Mutex<Option<String>>>,
}

impl LiveSource {
    /// Spawn the polling task for the given client and interval.
    pub fn spawn(client: LibreLinkUpClient, interval: Duration, description: &str) -> Self {
        let (tx, rx) = mpsc::channel(16);
        let last_error = Arc::new(Mutex::new(None));
        let error_handle = last_error.clone();

        tokio::spawn(async move {
            let mut client = client;
            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                ticker.tick().await;

                match client.collect().await {
                    Ok(snapshot) => {
                        tracing::debug!(samples = snapshot.len(), "fetched snapshot");
                        *error_handle.lock().unwrap() = None;
                        if tx.send(snapshot).await.is_err() {
                            // Receiver dropped, viewer is gone
                            break;
                        }
                    }
                    Err(e) => {
                        tracing::warn!(error = %e, "fetch failed");
                        *error_handle.lock().unwrap() = Some(e.to_string());
                    }
                }
            }
        });

        Self {
            receiver: rx,
            description: format!("live: {}", description),
            last_error,
        }
    }

    /// Spawn from loaded settings.
    pub fn from_settings(settings: &LiveSettings) -> Self {
        Self::spawn(
            settings.client(),
            settings.interval(),
            &settings.api.base_url,
        )
    }
}

impl DataSource for LiveSource {
    fn poll(&mut self) -> Option<SeriesSnapshot> {
        match self.receiver.try_recv() {
            Ok(snapshot) => Some(snapshot),
            Err(mpsc::error::TryRecvError::Empty) => None,
            Err(mpsc::error::TryRecvError::Disconnected) => {
                *self.last_error.lock().unwrap() = Some("Fetch task stopped".to_string());
                None
            }
        }
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn error(&self) -> Option<String> {
        self.last_error.lock().unwrap().clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_settings_load() {
        let mut file = NamedTempFile::with_suffix(".toml").unwrap();
        writeln!(
            file,
            r#"
[api]
email = "follower@example.com"
password = "secret"
patient_id = "abc-123"

[poll]
interval_secs = 120
"#
        )
        .unwrap();

        let settings = LiveSettings::load(file.path()).unwrap();
        assert_eq!(settings.api.base_url, "https://api-la.libreview.io");
        assert_eq!(settings.api.email, "follower@example.com");
        assert_eq!(settings.api.patient_id, "abc-123");
        assert_eq!(settings.interval(), Duration::from_secs(120));
    }

    #[test]
    fn test_settings_poll_defaults() {
        let mut file = NamedTempFile::with_suffix(".toml").unwrap();
        writeln!(
            file,
            r#"
[api]
email = "follower@example.com"
password = "secret"
patient_id = "abc-123"
"#
        )
        .unwrap();

        let settings = LiveSettings::load(file.path()).unwrap();
        assert_eq!(settings.interval(), Duration::from_secs(60));
    }

    #[test]
    fn test_settings_missing_credentials() {
        let mut file = NamedTempFile::with_suffix(".toml").unwrap();
        writeln!(file, "[api]\nemail = \"only@example.com\"").unwrap();

        assert!(LiveSettings::load(file.path()).is_err());
    }
}
