use anyhow::Context;

pub trait ClipboardWriter {
    fn write(&mut self, text: &str) -> anyhow::Result<()>;
}

/// System clipboard. On X11 and Wayland the text is only served while the
/// handle lives, so one handle is opened on first use and kept.
#[derive(Default)]
pub struct SystemClipboard {
    handle: Option<arboard::Clipboard>,
}

impl ClipboardWriter for SystemClipboard {
    fn write(&mut self, text: &str) -> anyhow::Result<()> {
        let mut clipboard = match self.handle.take() {
            Some(clipboard) => clipboard,
            None => arboard::Clipboard::new().context("clipboard unavailable")?,
        };
        let result = clipboard
            .set_text(text.to_string())
            .context("clipboard rejected text");
        self.handle = Some(clipboard);
        result
    }
}
