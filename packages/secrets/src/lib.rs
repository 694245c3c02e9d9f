// ABOUTME: gwsctl secret storage library
// ABOUTME: Token entity, SecretStore contract, and keyring / in-memory backends

pub mod error;
pub mod keychain;
pub mod memory;
pub mod record;
pub mod store;
pub mod token;

use gwsctl_config::StoreBackend;
use std::sync::Arc;
use tracing::debug;

// Re-export main types
pub use error::{SecretsError, SecretsResult};
pub use keychain::KeyringStore;
pub use memory::MemoryStore;
pub use record::{token_key, TOKEN_KEY_PREFIX};
pub use store::SecretStore;
pub use token::Token;

/// Build the store selected for this process
pub fn open_store(backend: StoreBackend, service_name: &str) -> Arc<dyn SecretStore> {
    debug!(backend = %backend, service = service_name, "Opening secret store");
    match backend {
        StoreBackend::Keyring => Arc::new(KeyringStore::new(service_name)),
        StoreBackend::Memory => Arc::new(MemoryStore::new()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_store_selects_backend() {
        assert_eq!(
            open_store(StoreBackend::Memory, "gwsctl").backend(),
            StoreBackend::Memory
        );
        assert_eq!(
            open_store(StoreBackend::Keyring, "gwsctl").backend(),
            StoreBackend::Keyring
        );
    }
}
