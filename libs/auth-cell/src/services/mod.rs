pub mod account;
pub mod admin;
pub mod credentials;

pub use account::AccountService;
pub use admin::AdminAuthenticator;
pub use credentials::{Argon2Credentials, CredentialVerifier};
