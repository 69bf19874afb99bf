pub mod company;

pub use company::CompanyClient;
