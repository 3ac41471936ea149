pub mod fetch;
pub mod retry;
