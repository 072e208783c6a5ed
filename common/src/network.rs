pub mod address;
pub mod interface;
