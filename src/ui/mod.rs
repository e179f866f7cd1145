// UI and formatting module

pub mod formatters;
pub mod prompts;

// Re-export commonly used items for cleaner imports
pub use formatters::{format_metadata, format_summary, format_variant_row, print_snapshot};
pub use prompts::{bold, dimmed, success, warn};
