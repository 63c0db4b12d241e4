// Keyword research is delegated to an external automation workflow.

pub mod dispatcher;
pub mod handlers;
