mod inputs;
pub mod scan;
pub mod validate;
