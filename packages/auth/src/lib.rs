// ABOUTME: gwsctl authentication library
// ABOUTME: Client credential import, token lifecycle operations and the destructive-action confirmation gate

pub mod confirm;
pub mod credentials;
pub mod error;
pub mod files;
pub mod manager;
pub mod services;
pub mod token_file;
pub mod types;

// Re-export main types
pub use confirm::{ConfirmFlags, ConfirmInput, ConfirmationGate, TerminalInput};
pub use credentials::{load_client_credentials, save_client_credentials, ClientCredentials};
pub use error::{AuthError, AuthResult};
pub use manager::{normalize_account, TokenManager};
pub use services::{parse_services, Service};
pub use types::{AccountSummary, AddToken, Outcome, OutcomeKind};
