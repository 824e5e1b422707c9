pub mod assist;
pub mod core;
pub mod gui;
pub mod persistence;
