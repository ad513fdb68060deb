pub mod chunk;
pub mod classify;
pub mod extract;
pub mod validate;
