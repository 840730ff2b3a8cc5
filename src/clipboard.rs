//! Copying panel text to the system clipboard.

/// Destination for copied panel text.
pub trait Clipboard {
    /// Replace the clipboard contents with `text`.
    ///
    /// # Errors
    ///
    /// Returns an error if no clipboard is available or it refused the text.
    fn copy(&mut self, text: &str) -> Result<(), arboard::Error>;
}

/// The desktop clipboard, opened on first use.
///
/// On X11 the copied text is served by this process, so the handle is kept for the whole
/// session rather than dropped after each copy.
#[derive(Default)]
pub struct SystemClipboard {
    inner: Option<arboard::Clipboard>,
}

impl Clipboard for SystemClipboard {
    fn copy(&mut self, text: &str) -> Result<(), arboard::Error> {
        let clipboard = match self.inner.take() {
            Some(clipboard) => clipboard,
            None => arboard::Clipboard::new()?,
        };
        self.inner.insert(clipboard).set_text(text)
    }
}
