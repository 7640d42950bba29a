//! Presentation helpers for the HTML fragments both APIs embed in titles
//! and comment bodies.

/// Decode the HTML entities upstream is known to emit.
pub(crate) fn decode_entities(text: &str) -> String {
    text.replace("&gt;", ">")
        .replace("&lt;", "<")
        .replace("&amp;", "&")
        .replace("&quot;", "\"")
        .replace("&#x27;", "'")
        .replace("&#x2F;", "/")
        .replace("&#39;", "'")
}

/// Strip the paragraph wrappers around comment/story bodies and decode
/// entities. Inner emphasis markup from highlighting is left alone.
pub(crate) fn decode_fragment(text: &str) -> String {
    let without_paragraphs = text.replace("<p>", "\n").replace("</p>", "");
    decode_entities(without_paragraphs.trim())
}
