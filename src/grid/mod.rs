pub mod types;
pub mod cell_utils;
pub mod layout;

pub use types::ShiftRegion;
pub use cell_utils::column_to_index;
pub use layout::GridLayout;
