//! jobboard-client: resilient loading of job-board resources
//!
//! Talks to the local `/api` proxy, normalizes the backend's inconsistent
//! response shapes, retries with capped exponential backoff, and falls back
//! to a remote origin when the proxy keeps failing.
//!
//! # Examples
//!
//! ## Collections
//!
//! ```no_run
//! use jobboard_client::{ClientConfig, JobBoardClient};
//! use serde_json::{json, Value};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = JobBoardClient::new(&ClientConfig::from_env())?;
//!
//! let params = json!({"page": 2, "search": "rust"}).as_object().cloned().unwrap_or_default();
//! let jobs = client.jobs().load::<Value>(&params).await;
//! if jobs.success {
//!     println!("{} of {} jobs", jobs.data.len(), jobs.total);
//! } else {
//!     eprintln!("failed: {}", jobs.error.unwrap_or_default());
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Single items
//!
//! ```no_run
//! use jobboard_client::{ClientConfig, JobBoardClient};
//! use serde_json::Value;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = JobBoardClient::new(&ClientConfig::from_env())?;
//!
//! let news = client.news().load_item::<Value>("65f1c0", None).await;
//! match news.data {
//!     Some(item) => println!("{item}"),
//!     None => eprintln!("{}", news.error.unwrap_or_default()),
//! }
//! # Ok(())
//! # }
//! ```

pub mod auth;
pub mod backend;
pub mod client;
pub mod config;
pub mod error;
pub mod factory;
pub mod item;
pub mod loader;
pub mod normalize;
pub mod options;
pub mod query;
pub mod retry;
pub mod transport;

pub use auth::{AuthContext, StaticToken};
pub use backend::{Backend, Origin, RequestPolicy};
pub use client::JobBoardClient;
pub use config::ClientConfig;
pub use error::{ClientError, Result};
pub use factory::{ResourceLoader, create_data_loader};
pub use item::ItemLoader;
pub use loader::DataLoader;
pub use normalize::normalize;
pub use options::{ItemOptions, LoaderOptions};
pub use transport::{HttpTransport, RawResponse, Transport};
