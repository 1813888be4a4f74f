pub mod agent;
pub mod attachment;
pub mod message;

pub use agent::Agent;
pub use attachment::Attachment;
pub use message::{Message, Sender};
