//! Body decoding: declared charset first, byte sniffing when it is missing.

use chardetng::EncodingDetector;
use encoding_rs::{Encoding, WINDOWS_1252};

/// Value of the `charset=` parameter of a `Content-Type` header.
pub fn charset_param(content_type: &str) -> Option<&str> {
    content_type.split(';').skip(1).find_map(|param| {
        let (name, value) = param.split_once('=')?;
        if name.trim().eq_ignore_ascii_case("charset") {
            Some(value.trim().trim_matches('"'))
        } else {
            None
        }
    })
}

/// Decodes `bytes` to text.
///
/// An unknown, absent or ISO-8859-1 charset counts as the generic fallback
/// and the encoding is guessed from the bytes instead.
pub fn decode_body(bytes: &[u8], content_type: Option<&str>) -> String {
    let declared = content_type
        .and_then(charset_param)
        .and_then(|label| Encoding::for_label(label.as_bytes()));
    let encoding = match declared {
        Some(enc) if enc != WINDOWS_1252 => enc,
        _ => {
            let mut detector = EncodingDetector::new();
            detector.feed(bytes, true);
            let guess = detector.guess(None, true);
            tracing::debug!("charset unspecified, detected {}", guess.name());
            guess
        }
    };
    let (text, _, _) = encoding.decode(bytes);
    text.into_owned()
}
