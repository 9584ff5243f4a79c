//! Percent-encoding for secret-store names placed in URL paths.
//!
//! A store name is interpolated as a single path segment, so characters
//! that would split the path, start a query, or be decoded twice are encoded.
//!
//! # Example
//!
//! ```
//! use confstrap_client::endpoints::url_encoding::encode_path_segment;
//!
//! assert_eq!(encode_path_segment("team/secrets"), "team%2Fsecrets");
//! ```

use percent_encoding::{AsciiSet, CONTROLS, percent_encode};

/// Characters encoded in a URL path segment.
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

/// Percent-encode a string for use as one URL path segment.
pub fn encode_path_segment(segment: &str) -> String {
    percent_encode(segment.as_bytes(), PATH_SEGMENT_ENCODE_SET).to_string()
}
