// Symbol class names typed into the header entry.
use crate::error::Error;

/// Strip the entry text down to a usable label: no whitespace anywhere.
pub fn normalize(raw: &str) -> Result<String, Error> {
    let label: String = raw.split_whitespace().collect();
    if label.is_empty() {
        return Err(Error::EmptyLabel);
    }
    Ok(label)
}
