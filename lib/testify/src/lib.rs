pub mod random;
pub mod temp;

pub use temp::{temp_dir, temp_file};
