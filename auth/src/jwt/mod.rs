pub mod claims;
pub mod config;
pub mod errors;
pub mod signer;

pub use claims::SessionClaims;
pub use config::TokenConfig;
pub use errors::JwtError;
pub use signer::TokenSigner;
