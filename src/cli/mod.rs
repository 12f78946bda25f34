pub mod args;
pub mod handlers;
pub mod profile;
pub mod prompt;
