//! Escaping of user-supplied text at response time.
//!
//! Stored rows keep exactly what the client sent; only the serialized output is escaped,
//! so markup such as `<script>` reaches the browser as inert text.

use html_escape::encode_text;

/// Escapes `<` and `>` so the text can be embedded in HTML without forming tags.
///
/// A bare `&` cannot open markup, so it is passed through: `Tom & Jerry` comes back as sent.
pub fn sanitize(text: &str) -> String {
    if !text.contains('&') {
        return encode_text(text).into_owned();
    }
    text.split('&').map(encode_text).collect::<Vec<_>>().join("&")
}
