use tracing::error;

/// Returns the client-facing message when a folder name is present but empty.
/// An absent name (not being set) is valid.
pub fn folder_validation_error(name: Option<&str>) -> Option<&'static str> {
    match name {
        Some("") => {
            error!("Empty folder name given");
            Some("Folder name can't be empty")
        }
        _ => None,
    }
}

/// Note counterpart of [`folder_validation_error`], covering both free-text fields.
pub fn note_validation_error(name: Option<&str>, content: Option<&str>) -> Option<&'static str> {
    if name == Some("") {
        error!("Empty note name given");
        return Some("Note name can't be empty");
    }
    if content == Some("") {
        error!("Empty note content given");
        return Some("Note content can't be empty");
    }
    None
}
