pub mod engagement;
pub mod preflight;
pub mod response;
