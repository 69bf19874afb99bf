pub mod generator;

pub use generator::ExcelGenerator;
