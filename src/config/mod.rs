pub mod keys;
pub mod settings;
