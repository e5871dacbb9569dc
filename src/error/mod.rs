pub mod error_result;
