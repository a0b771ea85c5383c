pub mod claims;
pub mod errors;
pub mod handler;

pub use claims::TokenPayload;
pub use errors::DecodeError;
pub use errors::JwtError;
pub use handler::TokenService;
