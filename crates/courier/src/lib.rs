pub mod codec;
pub mod dispatch;
pub mod errors;
pub mod models;
pub mod relay;
pub mod store;
