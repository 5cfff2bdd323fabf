use regex::Regex;

use crate::util::blank_control_characters;

/// Patterns tried in order, the first capture group is the item id
pub const ID_PATTERNS: [&str; 5] =
[
    r"[?&]id=([a-zA-Z0-9_-]+)",
    r"/folders/([a-zA-Z0-9_-]+)",
    r"/file/d/([a-zA-Z0-9_-]+)/view",
    r"/u/\d+/folders/([a-zA-Z0-9_-]+)",
    r"/u/\d+/file/d/([a-zA-Z0-9_-]+)/view"
];

/// Extract a Drive item id from a pasted url
///
/// # Example
/// ```rust
/// use drivelock::drive::url::resolve_item_id;
///
/// assert_eq!(resolve_item_id("https://drive.google.com/drive/folders/1aB_c-D"), Some("1aB_c-D".to_string()));
/// assert_eq!(resolve_item_id("https://drive.google.com/open?id=XyZ"), Some("XyZ".to_string()));
/// assert_eq!(resolve_item_id("not a url"), None);
/// ```
pub fn resolve_item_id(url: &str) -> Option<String>
{
    // a line break or tab ends the id, lines are never joined
    let url = blank_control_characters(url.trim());

    for pattern in ID_PATTERNS
    {
        let re = match Regex::new(pattern)
        {
            Ok(re) => re,
            Err(e) =>
            {
                crate::debug(format!("Bad id pattern {}, {}", pattern, e), Some("URL"));
                continue
            }
        };

        if let Some(caps) = re.captures(&url)
        {
            if let Some(id) = caps.get(1)
            {
                crate::debug(format!("{} matched {}", url, pattern), Some("URL"));
                return Some(id.as_str().to_string())
            }
        }
    }

    None
}
