//! Percent-encoding for resource names interpolated into REST paths.
//!
//! Macro names, data model names and credential entity names all end up as
//! path segments. Without encoding, a `/` would nest the path and a `?` or
//! `#` would cut it short.
//!
//! # Example
//!
//! ```
//! use cim_client::endpoints::url_encoding::encode_path_segment;
//!
//! assert_eq!(encode_path_segment("cam_queue:my key:"), "cam_queue:my%20key:");
//! ```

use percent_encoding::{AsciiSet, CONTROLS, percent_encode};

/// Characters that must be percent-encoded in URL path segments.
///
/// RFC 3986 section 3.3 plus characters with special meaning in Splunk paths.
/// `:` is left alone because credential entities are `realm:name:`.
pub const PATH_SEGMENT_ENCODE_SET: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'<')
    .add(b'>')
    .add(b'`')
    .add(b'{')
    .add(b'}')
    .add(b'|')
    .add(b'\\')
    .add(b'^')
    .add(b'~')
    .add(b'%')
    .add(b'/')
    .add(b'?')
    .add(b'#')
    .add(b'+')
    .add(b',')
    .add(b';')
    .add(b'[')
    .add(b']');

/// Percent-encode a string for safe use as a URL path segment.
pub fn encode_path_segment(segment: &str) -> String {
    percent_encode(segment.as_bytes(), PATH_SEGMENT_ENCODE_SET).to_string()
}
