//! Application services, independent of the HTTP and GraphQL surfaces.

pub mod errors;
pub mod services;
pub mod traits;

/// Known values of a message's `role` column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageRole {
    System,
    User,
    Assistant,
}

impl MessageRole {
    /// Roles shown to the user when reading a chat back.
    pub const DIALOGUE: [MessageRole; 2] = [MessageRole::User, MessageRole::Assistant];

    pub fn as_str(&self) -> &'static str {
        match self {
            MessageRole::System => "system",
            MessageRole::User => "user",
            MessageRole::Assistant => "assistant",
        }
    }
}
