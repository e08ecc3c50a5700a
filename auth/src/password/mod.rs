pub mod argon2;
pub mod config;
pub mod errors;

pub use argon2::PasswordHasher;
pub use config::HashingConfig;
pub use errors::PasswordError;
