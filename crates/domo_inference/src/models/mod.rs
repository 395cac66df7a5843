pub mod openrouter;

pub use openrouter::OpenRouterModel;
