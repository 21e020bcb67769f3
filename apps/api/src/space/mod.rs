pub mod handlers;
pub mod prompts;
pub mod repo;
pub mod rounds;
pub mod summarize;
