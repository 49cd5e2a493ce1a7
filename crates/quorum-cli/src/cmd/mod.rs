pub mod audit;
pub mod authority;
pub mod benford;
