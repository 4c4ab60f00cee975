pub mod map;

pub use map::{ColorScheme, LoadedMap, load_map};
