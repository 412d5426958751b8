pub mod force_graph;
pub mod glossary;
pub mod graph_view;
pub mod modal;
pub mod nav;
