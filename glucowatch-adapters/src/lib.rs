//! # glucowatch-adapters
//!
//! Pre-built adapters for fetching glucose readings from vendor monitoring
//! APIs.
//!
//! This crate provides ready-to-use clients that authenticate against a
//! vendor cloud, pull the latest sensor graph, and convert it to the
//! glucowatch snapshot format.
//!
//! ## Supported Vendors
//!
//! - **LibreLinkUp** - The sharing API behind Freestyle Libre sensors.
//!   Logs in with follower credentials and reads the historical graph plus
//!   the current measurement for one patient connection.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use glucowatch_adapters::librelinkup::LibreLinkUpClient;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut client = LibreLinkUpClient::builder()
//!         .credentials("follower@example.com", "secret")
//!         .patient_id("46c16886-c96e-e911-813f-02d09c370615")
//!         .build();
//!
//!     // Fetch a snapshot (logs in on first use)
//!     let snapshot = client.collect().await?;
//!
//!     println!("Fetched {} samples", snapshot.len());
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod librelinkup;

pub use error::AdapterError;

// Re-export types for convenience
pub use glucowatch_types::{Sample, SeriesSnapshot};
