//! Command handlers.
//!
//! Each submodule is a thin adapter: it binds terminal arguments to the
//! stores and clients from `sadok-storefront` / `sadok-admin` and prints the
//! results. No business logic lives here.

pub mod admin;
pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod compare;
pub mod wishlist;

use std::sync::Arc;

use sadok_admin::AdminClient;
use sadok_core::JsonFileStore;
use sadok_storefront::backend::BackendClient;
use sadok_storefront::config::StorefrontConfig;
use sadok_storefront::notify::Notifier;
use sadok_storefront::nova_poshta::NovaPoshtaClient;

/// Shared handles for all command handlers.
pub struct Context {
    pub config: StorefrontConfig,
    pub backend: BackendClient,
    pub nova_poshta: NovaPoshtaClient,
    pub storage: JsonFileStore,
    pub notifier: Arc<dyn Notifier>,
}

impl Context {
    /// Build everything from environment configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration is missing or a client fails to
    /// build.
    pub fn from_env() -> Result<Self, Box<dyn std::error::Error>> {
        let config = StorefrontConfig::from_env()?;
        let backend = BackendClient::new(&config)?;
        let nova_poshta = NovaPoshtaClient::new(&config)?;
        let storage = JsonFileStore::new(&config.state_dir);

        Ok(Self {
            config,
            backend,
            nova_poshta,
            storage,
            notifier: Arc::new(PrintNotifier),
        })
    }

    /// Admin client bound to the same backend and state directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to build.
    pub fn admin(&self) -> Result<AdminClient<JsonFileStore>, Box<dyn std::error::Error>> {
        Ok(AdminClient::new(
            self.config.api_base_url.clone(),
            self.config.http_timeout,
            self.storage.clone(),
        )?)
    }
}

/// Notifier that prints store notices to the terminal, the CLI stand-in for
/// the storefront's toasts.
struct PrintNotifier;

#[allow(clippy::print_stdout)]
impl Notifier for PrintNotifier {
    fn success(&self, message: &str) {
        println!("✓ {message}");
    }

    fn error(&self, message: &str) {
        println!("✗ {message}");
    }

    fn warning(&self, message: &str) {
        println!("! {message}");
    }

    fn info(&self, message: &str) {
        println!("· {message}");
    }
}
