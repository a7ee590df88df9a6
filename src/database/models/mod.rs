pub mod folder;
pub mod note;

pub use folder::{Folder, FolderPatch, NewFolder};
pub use note::{NewNote, Note, NotePatch};
