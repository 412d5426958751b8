mod detail_dialog;
mod dialog;
mod form;
mod term_dialog;

pub use detail_dialog::DetailDialog;
pub use dialog::{DialogEvent, DialogState};
pub use form::{EditorMode, TermForm};
pub use term_dialog::TermDialog;
