mod filter;
mod view;

pub use filter::{categories, retain_selection};
pub use view::GlossaryView;
