//! Entry point bundling configuration, transport and loaders

use std::sync::Arc;

use jobboard_api::{Params, Resource};

use crate::backend::Backend;
use crate::config::ClientConfig;
use crate::error::Result;
use crate::factory::{ResourceLoader, create_data_loader};
use crate::item::ItemLoader;
use crate::loader::DataLoader;
use crate::transport::Transport;

/// Client for the job-board backend
#[derive(Debug, Clone)]
pub struct JobBoardClient {
    backend: Backend,
}

impl JobBoardClient {
    /// Create a client from configuration
    ///
    /// # Errors
    /// Returns an error if either configured origin is invalid.
    pub fn new(config: &ClientConfig) -> Result<Self> {
        Ok(Self {
            backend: Backend::from_config(config)?,
        })
    }

    /// Create a client over a custom transport
    ///
    /// # Errors
    /// Returns an error if either configured origin is invalid.
    pub fn with_transport(transport: Arc<dyn Transport>, config: &ClientConfig) -> Result<Self> {
        Ok(Self {
            backend: Backend::with_transport(transport, config)?,
        })
    }

    #[must_use]
    pub fn backend(&self) -> &Backend {
        &self.backend
    }

    #[must_use]
    pub fn data_loader(&self) -> DataLoader {
        DataLoader::new(self.backend.clone())
    }

    #[must_use]
    pub fn item_loader(&self) -> ItemLoader {
        ItemLoader::new(self.backend.clone())
    }

    /// Loader for an arbitrary endpoint
    #[must_use]
    pub fn loader(&self, endpoint: impl Into<String>, default_params: Params) -> ResourceLoader {
        create_data_loader(&self.backend, endpoint, default_params)
    }

    /// Loader for a known resource with its preset params
    #[must_use]
    pub fn resource(&self, resource: Resource) -> ResourceLoader {
        self.loader(resource.endpoint(), resource.default_params())
    }

    #[must_use]
    pub fn jobs(&self) -> ResourceLoader {
        self.resource(Resource::Jobs)
    }

    #[must_use]
    pub fn new_jobs(&self) -> ResourceLoader {
        self.resource(Resource::NewJobs)
    }

    #[must_use]
    pub fn hirings(&self) -> ResourceLoader {
        self.resource(Resource::Hirings)
    }

    #[must_use]
    pub fn news(&self) -> ResourceLoader {
        self.resource(Resource::News)
    }

    #[must_use]
    pub fn applications(&self) -> ResourceLoader {
        self.resource(Resource::Applications)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let client = JobBoardClient::new(&ClientConfig::default());
        assert!(client.is_ok());
    }

    #[test]
    fn test_invalid_origin() {
        let config = ClientConfig {
            remote_origin: "not a url".into(),
            ..ClientConfig::default()
        };
        assert!(JobBoardClient::new(&config).is_err());
    }

    #[test]
    fn test_resource_presets() {
        let client = JobBoardClient::new(&ClientConfig::default()).unwrap();
        let news = client.news();
        assert_eq!(news.endpoint(), "news");
        assert_eq!(news.default_params(), &Resource::News.default_params());
    }

    #[test]
    fn test_configured_policy_flows_into_options() {
        let config = ClientConfig {
            timeout_ms: 1500,
            retries: 1,
            ..ClientConfig::default()
        };
        let client = JobBoardClient::new(&config).unwrap();
        let options = client.jobs().options(&Params::new());
        assert_eq!(options.retries, 1);
        assert_eq!(options.timeout.as_millis(), 1500);
        assert_eq!(options.endpoint, "jobs");
    }
}
