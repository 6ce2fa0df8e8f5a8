//! Domain-name helpers shared by the rule builder and the rewriter.

/// Maximum length of a name on the wire, root label included (RFC 1035 §2.3.4).
pub const MAX_NAME_WIRE_LENGTH: usize = 255;

/// Maximum length of a name in presentation form.
pub const MAX_NAME_TEXT_LENGTH: usize = 255;

pub const MAX_LABEL_LENGTH: usize = 63;

pub fn has_closing_dot(name: &str) -> bool {
    name.ends_with('.')
}

/// Append the root label if missing.
pub fn fqdn(name: &str) -> String {
    if has_closing_dot(name) {
        name.to_string()
    } else {
        format!("{}.", name)
    }
}

/// Canonical form used for every name the rewriter writes back:
/// lower case, fully qualified.
pub fn normalize_name(name: &str) -> String {
    fqdn(&name.to_lowercase())
}

/// Name grammar check applied to every rewritten name.
///
/// Accepts presentation-format names with `\X` and `\DDD` escapes. Rejects
/// empty names, empty inner labels, labels over 63 octets and names over 255
/// octets on the wire or in text.
pub fn is_valid_name(name: &str) -> bool {
    if name.is_empty() || name.len() > MAX_NAME_TEXT_LENGTH {
        return false;
    }
    if name == "." {
        return true;
    }

    let bytes = name.as_bytes();
    let mut wire_len = 1; // root label
    let mut label_len = 0usize;
    let mut i = 0;

    while i < bytes.len() {
        match bytes[i] {
            b'\\' => {
                let rest = &bytes[i + 1..];
                if rest.len() >= 3 && rest[..3].iter().all(u8::is_ascii_digit) {
                    let value = (rest[0] - b'0') as u16 * 100
                        + (rest[1] - b'0') as u16 * 10
                        + (rest[2] - b'0') as u16;
                    if value > 255 {
                        return false;
                    }
                    i += 4;
                } else if !rest.is_empty() {
                    i += 2;
                } else {
                    return false;
                }
                label_len += 1;
            }
            b'.' => {
                if label_len == 0 {
                    return false;
                }
                wire_len += label_len + 1;
                label_len = 0;
                i += 1;
            }
            _ => {
                label_len += 1;
                i += 1;
            }
        }
        if label_len > MAX_LABEL_LENGTH {
            return false;
        }
    }

    if label_len > 0 {
        wire_len += label_len + 1;
    }

    wire_len <= MAX_NAME_WIRE_LENGTH
}
