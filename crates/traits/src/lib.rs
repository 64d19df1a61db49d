pub mod resource;

pub use resource::{FontSource, InMemoryFontSource, ResourceError, SharedResourceData};
