pub mod common;

mod upstream_generator;
