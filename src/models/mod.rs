//! RMAPI model types.

mod common;
mod package;
mod resource;
mod root;
mod title;
mod vendor;

pub use common::*;
pub use package::*;
pub use resource::*;
pub use root::*;
pub use title::*;
pub use vendor::*;
