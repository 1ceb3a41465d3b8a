pub mod pointer;
pub mod viewport;

pub use pointer::wire_taps;
pub use viewport::wire_resize;
