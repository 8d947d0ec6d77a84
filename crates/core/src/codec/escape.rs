//! String escaping for written documents.
//!
//! Exactly two characters are escaped: `\` becomes `\\` and `"` becomes `\"`.
//! Control characters are written verbatim. Existing documents depend on this form,
//! so it must not be widened to full JSON escaping.

use std::borrow::Cow;

pub fn escape(s: &str) -> Cow<'_, str> {
    if !s.contains(['\\', '"']) {
        return Cow::Borrowed(s);
    }
    Cow::Owned(s.replace('\\', "\\\\").replace('"', "\\\""))
}
