//! Zone and record-path helpers.
//!
//! Names handled here are lowercase and fully qualified (`"example.org."`);
//! the root zone is `"."`.

/// First segment of every record key.
pub const KEY_ROOT: &str = "kubezone";

/// Lowercase `name` and make it fully qualified.
pub fn normalize(name: &str) -> String {
    let trimmed = name.trim().trim_end_matches('.');
    if trimmed.is_empty() {
        return ".".to_string();
    }
    format!("{}.", trimmed.to_ascii_lowercase())
}

/// Labels of a normalized name, leftmost first. The root has none.
pub fn labels(name: &str) -> Vec<&str> {
    name.split('.').filter(|l| !l.is_empty()).collect()
}

/// Join labels and a zone into a fully qualified name.
pub fn join(parts: &[&str], zone: &str) -> String {
    let mut name = String::new();
    for part in parts.iter().filter(|p| !p.is_empty()) {
        name.push_str(part.trim_end_matches('.'));
        name.push('.');
    }
    if zone != "." {
        name.push_str(zone);
    }
    if name.is_empty() {
        name.push('.');
    }
    name
}

/// Whether `name` equals `zone` or sits below it.
pub fn is_subdomain(name: &str, zone: &str) -> bool {
    if zone == "." {
        return true;
    }
    name == zone || name.ends_with(&format!(".{}", zone))
}

/// Remove `zone` from the end of `name`, returning the relative part without
/// a trailing dot. `None` when `name` is not inside `zone`.
pub fn trim_zone(name: &str, zone: &str) -> Option<String> {
    if !is_subdomain(name, zone) {
        return None;
    }
    if zone == "." {
        return Some(name.trim_end_matches('.').to_string());
    }
    let relative = &name[..name.len() - zone.len()];
    Some(relative.trim_end_matches('.').to_string())
}

/// Key prefix for records of `zone`: `/kubezone` followed by the zone labels
/// in reverse order.
pub fn zone_path(zone: &str) -> String {
    let mut path = format!("/{}", KEY_ROOT);
    for label in labels(zone).iter().rev() {
        path.push('/');
        path.push_str(label);
    }
    path
}

/// Owner name of a record key: the key segments after the root, reversed.
pub fn key_to_domain(key: &str) -> String {
    let segments: Vec<&str> = key
        .split('/')
        .filter(|s| !s.is_empty())
        .skip(1)
        .collect();
    let reversed: Vec<&str> = segments.into_iter().rev().collect();
    join(&reversed, ".")
}

/// Drop the `count` leftmost labels of `name`. Stripping every label (or
/// more) leaves the name untouched.
pub fn strip_labels(name: &str, count: usize) -> String {
    let parts = labels(name);
    if count == 0 || count >= parts.len() {
        return name.to_string();
    }
    join(&parts[count..], ".")
}

/// The zones a resolver instance is authoritative for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Zones {
    zones: Vec<String>,
}

impl Zones {
    pub fn new<I, S>(zones: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            zones: zones.into_iter().map(|z| normalize(z.as_ref())).collect(),
        }
    }

    /// Most specific served zone containing `name`.
    pub fn matches(&self, name: &str) -> Option<&str> {
        let name = normalize(name);
        self.zones
            .iter()
            .filter(|zone| is_subdomain(&name, zone))
            .max_by_key(|zone| zone.len())
            .map(String::as_str)
    }
}

/// Syntactic check for a DNS name: non-empty labels of at most 63 octets made
/// of letters, digits, `-` and `_`, at most 253 octets overall.
pub fn is_valid_name(name: &str) -> bool {
    let name = name.trim_end_matches('.');
    if name.is_empty() {
        return true;
    }
    if name.len() > 253 {
        return false;
    }
    name.split('.').all(|label| {
        !label.is_empty()
            && label.len() <= 63
            && label
                .bytes()
                .all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_')
    })
}
