pub mod credential;
pub mod store;
