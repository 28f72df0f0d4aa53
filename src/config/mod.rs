pub mod inputs;
pub mod settings;
