//! External collaborators.

pub mod completion;
pub mod openrouter;

pub use completion::{CompletionError, CompletionService, UnavailableCompletionService};
pub use openrouter::OpenRouterClient;
