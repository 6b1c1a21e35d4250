pub mod distributions;
pub mod persona;
pub mod report;
