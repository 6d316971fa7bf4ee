//! Parse raw response header lines into per-response hops.

/// One HTTP response seen while curl followed redirects.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Hop {
    pub status: u32,
    pub headers: Vec<(String, String)>,
}

impl Hop {
    /// First value of header `name`, matched case-insensitively.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    pub fn content_length(&self) -> Option<u64> {
        self.header("content-length")?.parse::<u64>().ok()
    }

    /// Complete length from `Content-Range: bytes 1-5/12345`, if known.
    pub fn content_range_total(&self) -> Option<u64> {
        let value = self.header("content-range")?;
        let (_, total) = value.rsplit_once('/')?;
        total.trim().parse::<u64>().ok()
    }
}

/// Split collected header lines into hops.
///
/// Every `HTTP/x status` line starts a new hop; interim 1xx responses are
/// dropped once the real response arrives.
pub(crate) fn parse_hops(lines: &[String]) -> Vec<Hop> {
    let mut hops: Vec<Hop> = Vec::new();

    for line in lines {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if line.starts_with("HTTP/") {
            let status = line
                .split_whitespace()
                .nth(1)
                .and_then(|s| s.parse::<u32>().ok())
                .unwrap_or(0);
            if hops.last().is_some_and(|h| (100..200).contains(&h.status)) {
                hops.pop();
            }
            hops.push(Hop {
                status,
                headers: Vec::new(),
            });
            continue;
        }
        if let (Some(hop), Some((name, value))) = (hops.last_mut(), line.split_once(':')) {
            hop.headers
                .push((name.trim().to_string(), value.trim().to_string()));
        }
    }

    hops
}
