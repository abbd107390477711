pub mod analysis;
pub mod info;
pub mod nutrition;
