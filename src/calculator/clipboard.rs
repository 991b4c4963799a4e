//! Clipboard functionality for copying the calculator display.

use arboard::Clipboard;

/// Copy text to the system clipboard.
///
/// Returns `Ok(())` on success, or an error message on failure.
pub fn copy_to_clipboard(text: &str) -> Result<(), String> {
    let mut clipboard =
        Clipboard::new().map_err(|e| format!("Failed to access clipboard: {}", e))?;

    clipboard
        .set_text(text.to_string())
        .map_err(|e| format!("Failed to copy to clipboard: {}", e))
}

/// Text to put on the clipboard for a display value.
///
/// Partial entries are normalized (`"12."` becomes `"12"`); text that does
/// not hold a number, such as a solver answer, is copied as shown.
pub fn clipboard_text(display: &str) -> String {
    let value = super::parse_number(display);
    if value.is_nan() {
        display.trim().to_string()
    } else {
        super::format_number(value)
    }
}
