pub mod handlers;
pub mod ledger;
pub mod orchestrator;
pub mod prompts;
