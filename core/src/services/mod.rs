//! Business services containing domain logic and use cases.

pub mod token;

// Re-export commonly used types
pub use token::{
    bearer_header_value, extract_bearer_token, Clock, ManualClock, SystemClock, TokenService,
    TokenServiceConfig, TOKEN_ALGORITHM,
};
