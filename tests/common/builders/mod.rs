pub mod host;
pub mod source;
