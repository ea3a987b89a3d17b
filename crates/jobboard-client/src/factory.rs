//! Loaders bound to one endpoint and its default parameters

use serde::de::DeserializeOwned;

use jobboard_api::{ItemResult, LoaderResult, Params, merge_params};

use crate::backend::Backend;
use crate::item::ItemLoader;
use crate::loader::DataLoader;
use crate::options::{ItemOptions, LoaderOptions};

/// Create a loader for `endpoint` with preset query parameters
///
/// # Example
/// ```no_run
/// # use jobboard_client::{Backend, ClientConfig, create_data_loader};
/// # use serde_json::{json, Value};
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let backend = Backend::from_config(&ClientConfig::default())?;
/// let defaults = json!({"status": "active"}).as_object().cloned().unwrap_or_default();
/// let jobs = create_data_loader(&backend, "jobs", defaults);
///
/// let page = json!({"page": 2}).as_object().cloned().unwrap_or_default();
/// let result = jobs.load::<Value>(&page).await;
/// println!("{} jobs", result.total);
/// # Ok(())
/// # }
/// ```
#[must_use]
pub fn create_data_loader(
    backend: &Backend,
    endpoint: impl Into<String>,
    default_params: Params,
) -> ResourceLoader {
    ResourceLoader {
        endpoint: endpoint.into(),
        default_params,
        data: DataLoader::new(backend.clone()),
        items: ItemLoader::new(backend.clone()),
    }
}

/// Collection and item loading for a single endpoint
#[derive(Debug, Clone)]
pub struct ResourceLoader {
    endpoint: String,
    default_params: Params,
    data: DataLoader,
    items: ItemLoader,
}

impl ResourceLoader {
    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    #[must_use]
    pub fn default_params(&self) -> &Params {
        &self.default_params
    }

    /// Options for a load with `params` merged over the defaults
    #[must_use]
    pub fn options(&self, params: &Params) -> LoaderOptions {
        LoaderOptions::new(self.endpoint.clone())
            .params(merge_params(&self.default_params, params))
            .policy(self.data.backend().policy())
    }

    /// Load the collection; call-time params win over the defaults
    pub async fn load<T: DeserializeOwned>(&self, params: &Params) -> LoaderResult<T> {
        self.data.load(&self.options(params)).await
    }

    /// Load one item; `None` uses the backend's timeout and retry budget
    pub async fn load_item<T: DeserializeOwned>(
        &self,
        id: &str,
        options: Option<ItemOptions>,
    ) -> ItemResult<T> {
        let options = options.unwrap_or_else(|| self.data.backend().policy().into());
        self.items.load_item(&self.endpoint, id, &options).await
    }
}
