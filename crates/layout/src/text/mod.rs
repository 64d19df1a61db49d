mod wrapper;

pub use wrapper::TextLayoutEngine;
