//! Pattern segments and typed-parameter validators
//!
//! A pattern segment is either a literal or a parameter of the form
//! `<name>` / `<name:type>`. Each parameter type owns a validator that
//! decides whether a raw path segment can bind to it; validators run in
//! ascending rank order during matching, so the rank doubles as the match
//! priority.

/// Parameter type tag.
///
/// The discriminant is the specificity rank: lower ranks are tried first
/// when several parameter edges leave the same node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum ParamType {
    /// Optional sign followed by decimal digits
    Int = 0,
    /// Base64URL-encoded UUID: 22 chars unpadded or 24 chars ending `==`
    Base64Id = 1,
    /// Any non-empty segment
    String = 2,
    /// Canonical 36-character hyphenated UUID
    Uuid = 3,
    /// Optional sign, digits, at most one dot, at least one digit
    Float = 4,
    /// Any segment, including the empty one
    Generic = 255,
}

impl ParamType {
    /// Map a pattern type tag to its parameter type. Unknown tags collapse
    /// to [`ParamType::Generic`].
    pub(crate) fn from_tag(tag: &str) -> Self {
        match tag {
            "int" => ParamType::Int,
            "base64id" => ParamType::Base64Id,
            "string" => ParamType::String,
            "uuid" => ParamType::Uuid,
            "float" => ParamType::Float,
            _ => ParamType::Generic,
        }
    }

    /// Ordering key used to keep a node's parameter edges sorted.
    pub(crate) fn rank(self) -> u8 {
        self as u8
    }

    /// Whether a raw path segment satisfies this type.
    pub(crate) fn matches(self, value: &str) -> bool {
        match self {
            ParamType::Int => validate_int(value),
            ParamType::Base64Id => validate_base64id(value),
            ParamType::String => !value.is_empty(),
            ParamType::Uuid => validate_uuid(value),
            ParamType::Float => validate_float(value),
            ParamType::Generic => true,
        }
    }
}

fn strip_sign(value: &str) -> &str {
    match value.as_bytes().first() {
        Some(b'+') | Some(b'-') => &value[1..],
        _ => value,
    }
}

fn validate_int(value: &str) -> bool {
    let digits = strip_sign(value);
    !digits.is_empty() && digits.bytes().all(|byte| byte.is_ascii_digit())
}

fn validate_float(value: &str) -> bool {
    let rest = strip_sign(value);
    if rest.is_empty() {
        return false;
    }

    let mut has_digit = false;
    let mut has_dot = false;
    for byte in rest.bytes() {
        if byte.is_ascii_digit() {
            has_digit = true;
        } else if byte == b'.' && !has_dot {
            has_dot = true;
        } else {
            return false;
        }
    }
    has_digit
}

fn validate_uuid(value: &str) -> bool {
    let bytes = value.as_bytes();
    if bytes.len() != 36 {
        return false;
    }
    bytes.iter().enumerate().all(|(index, &byte)| match index {
        8 | 13 | 18 | 23 => byte == b'-',
        _ => byte.is_ascii_hexdigit(),
    })
}

fn validate_base64id(value: &str) -> bool {
    let bytes = value.as_bytes();
    let payload = match bytes.len() {
        22 => bytes,
        24 => {
            if bytes[22] != b'=' || bytes[23] != b'=' {
                return false;
            }
            &bytes[..22]
        }
        _ => return false,
    };
    payload
        .iter()
        .all(|&byte| byte.is_ascii_alphanumeric() || byte == b'-' || byte == b'_')
}

/// One parsed pattern segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Segment<'a> {
    Literal(&'a str),
    Param { name: &'a str, ty: ParamType },
}

/// Parse a pattern segment: `<name>` and `<name:type>` are parameters,
/// anything else is a literal.
pub(crate) fn parse_segment(segment: &str) -> Segment<'_> {
    let Some(inner) = segment
        .strip_prefix('<')
        .and_then(|rest| rest.strip_suffix('>'))
    else {
        return Segment::Literal(segment);
    };

    match inner.split_once(':') {
        Some((name, tag)) => Segment::Param {
            name,
            ty: ParamType::from_tag(tag),
        },
        None => Segment::Param {
            name: inner,
            ty: ParamType::Generic,
        },
    }
}

/// Normalize and split a path or pattern into segments.
///
/// One trailing slash is dropped (except on the bare root), one leading
/// slash is dropped, and the empty remainder is the root (zero segments).
/// Interior empty segments are preserved; only GENERIC accepts them.
pub(crate) fn split_path(path: &str) -> Vec<&str> {
    let mut path = path;
    if path.len() > 1 {
        if let Some(stripped) = path.strip_suffix('/') {
            path = stripped;
        }
    }
    if let Some(stripped) = path.strip_prefix('/') {
        path = stripped;
    }
    if path.is_empty() {
        return Vec::new();
    }
    path.split('/').collect()
}
