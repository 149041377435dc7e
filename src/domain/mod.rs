mod project;
mod result;
mod tool;

pub use project::*;
pub use result::*;
pub use tool::*;
