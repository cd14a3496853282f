pub mod cascade;
pub mod deployment;
