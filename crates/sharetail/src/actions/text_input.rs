//! Text input actions - shared across screens with text input capability

/// Generic text input actions
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TextInputAction {
    /// Character typed into input field
    Char(char),
    /// Backspace pressed - remove last character
    Backspace,
    /// Clear entire line (Ctrl+U)
    ClearLine,
    /// Escape pressed - cancel input
    Escape,
    /// Enter pressed - confirm
    Confirm,
}
