pub mod auth;
pub mod client;
pub mod resources;
pub mod websites;

pub use auth::{interactive_login, AuthContext, AuthError, Credentials, Subscription};
pub use client::{ArmClient, RemoteError};
pub use resources::Region;

pub(crate) const MANAGEMENT_BASE: &str = "https://management.azure.com";
pub(crate) const USER_AGENT: &str = concat!("azpub/", env!("CARGO_PKG_VERSION"));
