//! Trait definitions for RMAPI operations.
//!
//! Each record type implements the traits it supports; the RMAPI path and
//! verb details live in the implementations.

mod create;
mod delete;
mod get;
mod list;
mod update;

pub use create::Create;
pub use delete::Delete;
pub use get::Get;
pub use list::{List, DEFAULT_PAGE_SIZE};
pub use update::Update;
