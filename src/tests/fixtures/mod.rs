pub mod app;
pub mod clock;
pub mod directory;
pub mod records;
