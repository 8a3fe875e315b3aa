pub mod args;
pub mod intent;
pub mod validation;
