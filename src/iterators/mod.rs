pub mod line;

pub use line::{Crossing, GridTraversal, in_cell_range};
