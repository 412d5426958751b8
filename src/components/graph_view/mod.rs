pub mod dataset;
mod view;

pub use view::GraphView;
