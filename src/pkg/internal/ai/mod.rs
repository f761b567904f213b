pub mod analysis;
pub mod generate;
pub mod index;
pub mod read;
