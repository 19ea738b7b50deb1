pub mod argon2;
pub mod errors;
pub mod record;

pub use argon2::PasswordHasher;
pub use errors::PasswordError;
pub use record::PasswordRecord;
