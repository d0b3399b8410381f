pub mod dates;
pub mod handlers;
pub mod mapping;
#[cfg(test)]
pub mod memory;
pub mod store;
pub mod validation;
