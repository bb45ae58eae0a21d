pub mod log;
pub mod page;
pub mod system;
