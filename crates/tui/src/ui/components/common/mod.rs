mod confirmation_modal;

pub mod text_input;

pub use confirmation_modal::{ConfirmationModal, ConfirmationModalState};
pub use text_input::TextInputState;
