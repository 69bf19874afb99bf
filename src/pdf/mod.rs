pub mod generator;

pub use generator::PdfGenerator;
