pub mod models;
pub mod protocol;
pub mod tilesets;
