pub mod client;
pub mod labels;
