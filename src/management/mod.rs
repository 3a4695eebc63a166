mod auth;

pub use auth::AuthContext;
pub use auth::TokenManager;
