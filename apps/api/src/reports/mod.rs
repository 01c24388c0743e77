pub mod handlers;
pub mod markdown;
pub mod pdf;
pub mod store;
