//! LibreLinkUp adapter using the follower sharing API.
//!
//! This adapter fetches readings from the LibreLinkUp cloud, the sharing
//! backend for Freestyle Libre sensors. A follower account logs in with
//! email and password, receives a bearer token, and reads one patient
//! connection's graph.
//!
//! ## Data Fetched
//!
//! - **Historical graph**: Roughly the last twelve hours of readings
//! - **Current measurement**: The most recent reading, newer than the graph
//!
//! The two are combined into a [`SeriesSnapshot`] with the current
//! measurement appended after the historical samples.
//!
//! ## Example
//!
//! ```rust,no_run
//! use glucowatch_adapters::librelinkup::LibreLinkUpClient;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut client = LibreLinkUpClient::builder()
//!         .base_url("https://api-la.libreview.io")
//!         .credentials("follower@example.com", "secret")
//!         .patient_id("46c16886-c96e-e911-813f-02d09c370615")
//!         .build();
//!
//!     let snapshot = client.collect().await?;
//!     if let Some(current) = &snapshot.current {
//!         println!("Current: {} mg/dL at {}", current.value, current.timestamp);
//!     }
//!
//!     Ok(())
//! }
//! ```

use std::time::Duration;

use reqwest::Client;
use serde::Deserialize;

use glucowatch_types::{Sample, SeriesSnapshot};

use crate::AdapterError;

/// Product identification headers the sharing API requires on every request.
const PRODUCT: &str = "llu.android";
const VERSION: &str = "4.9.0";

/// LibreLinkUp client for one patient connection.
#[derive(Debug, Clone)]
pub struct LibreLinkUpClient {
    client: Client,
    base_url: String,
    email: String,
    password: String,
    patient_id: String,
    token: Option<String>,
}

impl LibreLinkUpClient {
    /// Create a new builder for configuring the client.
    pub fn builder() -> LibreLinkUpClientBuilder {
        LibreLinkUpClientBuilder::default()
    }

    /// Fetch a snapshot, logging in first if no token is cached.
    ///
    /// On an authentication failure with a cached token (the ticket expired),
    /// logs in again once and retries the fetch.
    pub async fn collect(&mut self) -> Result<SeriesSnapshot, AdapterError> {
        let had_token = self.token.is_some();
        let token = match &self.token {
            Some(token) => token.clone(),
            None => {
                let token = self.login().await?;
                self.token = Some(token.clone());
                token
            }
        };

        match self.fetch_graph(&token).await {
            Err(AdapterError::Auth(_)) if had_token => {
                let token = self.login().await?;
                self.token = Some(token.clone());
                self.fetch_graph(&token).await
            }
            other => other,
        }
    }

    /// Authenticate and return a bearer token.
    pub async fn login(&self) -> Result<String, AdapterError> {
        let url = format!("{}/llu/auth/login", self.base_url);

        let response = self
            .client
            .post(&url)
            .header("product", PRODUCT)
            .header("version", VERSION)
            .json(&serde_json::json!({
                "email": self.email,
                "password": self.password,
            }))
            .send()
            .await?;

        if response.status() == reqwest::StatusCode::UNAUTHORIZED {
            return Err(AdapterError::Auth("Invalid credentials".to_string()));
        }

        if !response.status().is_success() {
            return Err(AdapterError::Http(format!(
                "API returned status {}",
                response.status()
            )));
        }

        let login: LoginResponse = response
            .json()
            .await
            .map_err(|e| AdapterError::Parse(e.to_string()))?;

        // The sharing API signals bad credentials with status 2 in the body.
        match login.status {
            0 => {}
            2 => return Err(AdapterError::Auth("Invalid credentials".to_string())),
            status => return Err(AdapterError::Api(status)),
        }

        login
            .data
            .map(|data| data.auth_ticket.token)
            .ok_or_else(|| AdapterError::Parse("login response without auth ticket".to_string()))
    }

    /// Fetch the patient's graph and current measurement with a bearer token.
    pub async fn fetch_graph(&self, token: &str) -> Result<SeriesSnapshot, AdapterError> {
        let url = format!(
            "{}/llu/connections/{}/graph",
            self.base_url, self.patient_id
        );

        let response = self
            .client
            .get(&url)
            .header("product", PRODUCT)
            .header("version", VERSION)
            .bearer_auth(token)
            .send()
            .await?;

        if response.status() == reqwest::StatusCode::UNAUTHORIZED {
            return Err(AdapterError::Auth("Token rejected".to_string()));
        }

        if !response.status().is_success() {
            return Err(AdapterError::Http(format!(
                "API returned status {}",
                response.status()
            )));
        }

        let graph: GraphResponse = response
            .json()
            .await
            .map_err(|e| AdapterError::Parse(e.to_string()))?;

        if graph.status != 0 {
            return Err(AdapterError::Api(graph.status));
        }

        let data = graph
            .data
            .ok_or_else(|| AdapterError::Parse("graph response without data".to_string()))?;

        Ok(graph_to_snapshot(data))
    }

    /// Forget the cached bearer token, forcing a login on the next collect.
    pub fn clear_token(&mut self) {
        self.token = None;
    }
}

/// Convert a graph payload into the neutral snapshot format: historical
/// samples in API order, current measurement carried separately.
fn graph_to_snapshot(data: GraphData) -> SeriesSnapshot {
    let history: Vec<Sample> = data
        .graph_data
        .into_iter()
        .map(|m| Sample::new(m.timestamp, m.value))
        .collect();

    let current = data
        .connection
        .glucose_measurement
        .map(|m| Sample::new(m.timestamp, m.value));

    SeriesSnapshot::from_parts(history, current)
}

/// Builder for LibreLinkUpClient.
#[derive(Debug, Default)]
pub struct LibreLinkUpClientBuilder {
    base_url: Option<String>,
    email: Option<String>,
    password: Option<String>,
    patient_id: Option<String>,
    timeout: Option<Duration>,
}

impl LibreLinkUpClientBuilder {
    /// Set the API base URL (e.g., "https://api-la.libreview.io" for the
    /// Latin America region).
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Set the follower account email and password.
    pub fn credentials(mut self, email: impl Into<String>, password: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self.password = Some(password.into());
        self
    }

    /// Set the patient connection id to read.
    pub fn patient_id(mut self, patient_id: impl Into<String>) -> Self {
        self.patient_id = Some(patient_id.into());
        self
    }

    /// Set the request timeout (default: 10 seconds).
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Build the client.
    pub fn build(self) -> LibreLinkUpClient {
        let timeout = self.timeout.unwrap_or(Duration::from_secs(10));

        let client = Client::builder()
            .timeout(timeout)
            .build()
            .expect("Failed to build HTTP client");

        LibreLinkUpClient {
            client,
            base_url: self
                .base_url
                .unwrap_or_else(|| "https://api-la.libreview.io".to_string()),
            email: self.email.unwrap_or_default(),
            password: self.password.unwrap_or_default(),
            patient_id: self.patient_id.unwrap_or_default(),
            token: None,
        }
    }
}

/// Login response from the sharing API.
#[derive(Debug, Deserialize)]
struct LoginResponse {
    #[serde(default)]
    status: u32,
    data: Option<LoginData>,
}

#[derive(Debug, Deserialize)]
struct LoginData {
    #[serde(rename = "authTicket")]
    auth_ticket: AuthTicket,
}

#[derive(Debug, Deserialize)]
struct AuthTicket {
    token: String,
    #[serde(default)]
    #[allow(dead_code)]
    expires: Option<u64>,
}

/// Graph response for one patient connection.
#[derive(Debug, Deserialize)]
struct GraphResponse {
    #[serde(default)]
    status: u32,
    data: Option<GraphData>,
}

#[derive(Debug, Deserialize)]
struct GraphData {
    connection: ConnectionInfo,
    #[serde(rename = "graphData", default)]
    graph_data: Vec<MeasurementInfo>,
}

#[derive(Debug, Deserialize)]
struct ConnectionInfo {
    #[serde(rename = "glucoseMeasurement")]
    glucose_measurement: Option<MeasurementInfo>,
}

/// A single measurement as the vendor reports it.
#[derive(Debug, Deserialize)]
struct MeasurementInfo {
    #[serde(rename = "Timestamp")]
    timestamp: String,
    #[serde(rename = "Value")]
    value: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_defaults() {
        let client = LibreLinkUpClient::builder().build();
        assert_eq!(client.base_url, "https://api-la.libreview.io");
        assert_eq!(client.email, "");
        assert_eq!(client.patient_id, "");
        assert!(client.token.is_none());
    }

    #[test]
    fn test_builder_custom() {
        let client = LibreLinkUpClient::builder()
            .base_url("https://api-eu.libreview.io")
            .credentials("follower@example.com", "secret")
            .patient_id("abc-123")
            .build();

        assert_eq!(client.base_url, "https://api-eu.libreview.io");
        assert_eq!(client.email, "follower@example.com");
        assert_eq!(client.password, "secret");
        assert_eq!(client.patient_id, "abc-123");
    }

    #[test]
    fn test_parse_login_response() {
        let json = r#"{
            "status": 0,
            "data": {
                "authTicket": {
                    "token": "token-value",
                    "expires": 1752708456
                }
            }
        }"#;

        let login: LoginResponse = serde_json::from_str(json).unwrap();
        assert_eq!(login.status, 0);
        assert_eq!(login.data.unwrap().auth_ticket.token, "token-value");
    }

    #[test]
    fn test_parse_graph_response() {
        let json = r#"{
            "status": 0,
            "data": {
                "connection": {
                    "glucoseMeasurement": {
                        "Timestamp": "1/15/2025 9:05:00 AM",
                        "Value": 142
                    }
                },
                "graphData": [
                    { "Timestamp": "1/15/2025 8:50:00 AM", "Value": 130 },
                    { "Timestamp": "1/15/2025 8:55:00 AM", "Value": 135 }
                ]
            }
        }"#;

        let graph: GraphResponse = serde_json::from_str(json).unwrap();
        let data = graph.data.unwrap();
        assert_eq!(data.graph_data.len(), 2);

        let snapshot = graph_to_snapshot(data);
        assert_eq!(snapshot.history.len(), 2);
        assert_eq!(snapshot.history[0].value, 130.0);
        assert_eq!(
            snapshot.current,
            Some(Sample::new("1/15/2025 9:05:00 AM", 142.0))
        );

        // Current measurement lands after the history in series order.
        let series = snapshot.into_series();
        assert_eq!(series.last().unwrap().value, 142.0);
    }

    #[test]
    fn test_parse_graph_without_current() {
        let json = r#"{
            "status": 0,
            "data": {
                "connection": { "glucoseMeasurement": null },
                "graphData": []
            }
        }"#;

        let graph: GraphResponse = serde_json::from_str(json).unwrap();
        let snapshot = graph_to_snapshot(graph.data.unwrap());
        assert!(snapshot.is_empty());
    }
}
