pub mod logger;
pub mod username;
