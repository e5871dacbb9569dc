pub mod bodies;
pub mod reader;
