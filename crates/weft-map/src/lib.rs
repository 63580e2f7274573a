//! Template map handling: color keys, image sampling, and the pixel/world
//! coordinate mapping used to drive a merge.
#![forbid(unsafe_code)]

mod color;
mod offset;
mod template;

pub use color::{ColorKey, ColorParseError};
pub use offset::MapOffset;
pub use template::{TemplateError, TemplateMap};
