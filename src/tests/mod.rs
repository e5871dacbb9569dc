pub mod common;

mod concurrent_miss;
mod token_failure;
