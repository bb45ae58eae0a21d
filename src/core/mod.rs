pub mod persistence;
pub mod state;
