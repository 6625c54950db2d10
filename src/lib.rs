pub mod action;
pub mod console;
pub mod engine;
