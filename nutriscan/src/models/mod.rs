mod analysis;
mod food;
mod image;
mod nutrition;

pub use analysis::*;
pub use food::*;
pub use image::*;
pub use nutrition::*;
