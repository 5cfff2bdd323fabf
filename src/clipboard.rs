use core::fmt;

use arboard::Clipboard;

#[derive(Debug, Clone)]
pub struct ClipboardError
{
    pub why: String
}

impl fmt::Display for ClipboardError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.why)
    }
}

/// Clipboard text, whitespace only text counts as empty
pub fn read_clipboard() -> Result<String, ClipboardError>
{
    let mut clipboard = match Clipboard::new()
    {
        Ok(c) => c,
        Err(e) => return Err(ClipboardError { why: format!("could not open the clipboard, {}", e) })
    };

    let text = match clipboard.get_text()
    {
        Ok(t) => t,
        Err(e) => return Err(ClipboardError { why: format!("could not read the clipboard, {}", e) })
    };

    if text.trim().is_empty()
    {
        return Err(ClipboardError { why: "the clipboard is empty".to_string() })
    }

    Ok(text)
}
