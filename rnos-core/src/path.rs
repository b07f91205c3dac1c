//! Property paths.
//!
//! A [`Path`] names a registered service followed by the properties to walk
//! on it. It always holds at least the service id.
//!
//! Paths can be built from segment lists or parsed from the familiar
//! accessor notation:
//!
//! ```rust,ignore
//! let path: Path = "math.ops[0].run".parse()?;
//! assert_eq!(path.segments(), ["math", "ops", "0", "run"]);
//!
//! // Quoted brackets allow keys containing separators.
//! let path = Path::parse(r#"config["log.level"]"#)?;
//! ```

use crate::error::PathError;
use std::{
    fmt::{self, Write},
    str::FromStr,
};

/// A non-empty sequence of property segments.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Path {
    segments: Vec<String>,
}

impl Path {
    /// Build a path from raw segments.
    ///
    /// Segments are taken verbatim; only an empty sequence is rejected.
    pub fn new<I, S>(segments: I) -> Result<Self, PathError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let segments: Vec<String> = segments.into_iter().map(Into::into).collect();
        if segments.is_empty() {
            return Err(PathError::Empty);
        }
        Ok(Self { segments })
    }

    /// A path naming just the service registered under `id`.
    pub fn from_id(id: impl Into<String>) -> Self {
        Self {
            segments: vec![id.into()],
        }
    }

    /// Parse dotted and bracketed accessor notation.
    pub fn parse(input: &str) -> Result<Self, PathError> {
        if input.is_empty() {
            return Err(PathError::Empty);
        }

        let mut segments = Vec::new();
        let mut rest = input;
        let mut offset = 0;
        let mut after_dot = false;

        loop {
            if rest.starts_with('[') {
                if after_dot {
                    return Err(PathError::EmptySegment { position: offset });
                }
                let (segment, consumed) = parse_bracket(rest, offset)?;
                segments.push(segment);
                rest = &rest[consumed..];
                offset += consumed;
                if !rest.is_empty() && !rest.starts_with(['.', '[']) {
                    return Err(PathError::Unexpected { position: offset });
                }
            } else {
                let end = rest.find(['.', '[']).unwrap_or(rest.len());
                if end == 0 {
                    return Err(PathError::EmptySegment { position: offset });
                }
                segments.push(rest[..end].to_string());
                rest = &rest[end..];
                offset += end;
            }

            if rest.is_empty() {
                break;
            }
            after_dot = false;
            if let Some(stripped) = rest.strip_prefix('.') {
                rest = stripped;
                offset += 1;
                after_dot = true;
                if rest.is_empty() {
                    return Err(PathError::EmptySegment { position: offset });
                }
            }
        }

        Ok(Self { segments })
    }

    /// The registry id: the first segment.
    pub fn root(&self) -> &str {
        &self.segments[0]
    }

    /// The property segments after the registry id.
    pub fn properties(&self) -> &[String] {
        &self.segments[1..]
    }

    /// All segments, id included.
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// A new path with `segment` appended.
    pub fn child(&self, segment: impl Into<String>) -> Self {
        let mut segments = self.segments.clone();
        segments.push(segment.into());
        Self { segments }
    }

    /// Prefix `properties` with this path.
    pub fn join<I, S>(&self, properties: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut segments = self.segments.clone();
        segments.extend(properties.into_iter().map(Into::into));
        Self { segments }
    }
}

// `[` + content + `]`, or `["` + content + `"]` with either quote style.
// Inside quotes, a backslash escapes the next character.
fn parse_bracket(rest: &str, offset: usize) -> Result<(String, usize), PathError> {
    let inner = &rest[1..];
    let unclosed = PathError::Unclosed { position: offset };

    if let Some(quote) = inner.chars().next().filter(|c| *c == '"' || *c == '\'') {
        let mut segment = String::new();
        let mut chars = inner[1..].char_indices();
        while let Some((i, c)) = chars.next() {
            match c {
                '\\' => match chars.next() {
                    Some((_, escaped @ ('"' | '\'' | '\\'))) => segment.push(escaped),
                    Some((_, other)) => {
                        segment.push('\\');
                        segment.push(other);
                    }
                    None => return Err(unclosed),
                },
                // `[` and the opening quote precede the body.
                c if c == quote => {
                    return if rest[i + 3..].starts_with(']') {
                        Ok((segment, i + 4))
                    } else {
                        Err(unclosed)
                    };
                }
                c => segment.push(c),
            }
        }
        return Err(unclosed);
    }

    let close = inner.find(']').ok_or(unclosed)?;
    if close == 0 {
        return Err(PathError::EmptySegment { position: offset + 1 });
    }
    Ok((inner[..close].to_string(), close + 2))
}

fn is_identifier(segment: &str) -> bool {
    let mut chars = segment.chars();
    chars
        .next()
        .is_some_and(|c| c.is_alphabetic() || c == '_' || c == '$')
        && chars.all(|c| c.is_alphanumeric() || c == '_' || c == '$')
}

fn is_index(segment: &str) -> bool {
    !segment.is_empty() && segment.bytes().all(|b| b.is_ascii_digit())
}

fn write_quoted(f: &mut fmt::Formatter<'_>, segment: &str) -> fmt::Result {
    f.write_str("[\"")?;
    for c in segment.chars() {
        if matches!(c, '"' | '\\') {
            f.write_char('\\')?;
        }
        f.write_char(c)?;
    }
    f.write_str("\"]")
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let root = self.root();
        if is_identifier(root) || is_index(root) {
            f.write_str(root)?;
        } else {
            write_quoted(f, root)?;
        }
        for segment in self.properties() {
            if is_identifier(segment) {
                write!(f, ".{segment}")?;
            } else if is_index(segment) {
                write!(f, "[{segment}]")?;
            } else {
                write_quoted(f, segment)?;
            }
        }
        Ok(())
    }
}

impl FromStr for Path {
    type Err = PathError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Path::parse(s)
    }
}

impl TryFrom<&str> for Path {
    type Error = PathError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        Path::parse(s)
    }
}

impl TryFrom<Vec<String>> for Path {
    type Error = PathError;

    fn try_from(segments: Vec<String>) -> Result<Self, Self::Error> {
        Path::new(segments)
    }
}

impl TryFrom<&[&str]> for Path {
    type Error = PathError;

    fn try_from(segments: &[&str]) -> Result<Self, Self::Error> {
        Path::new(segments.iter().copied())
    }
}

impl<const N: usize> TryFrom<[&str; N]> for Path {
    type Error = PathError;

    fn try_from(segments: [&str; N]) -> Result<Self, Self::Error> {
        Path::new(segments)
    }
}

/// Conversion into a [`Path`] at API boundaries.
///
/// Strings are parsed as accessor notation; segment lists are taken
/// verbatim.
pub trait IntoPath {
    /// Perform the conversion.
    fn into_path(self) -> Result<Path, PathError>;
}

impl IntoPath for Path {
    fn into_path(self) -> Result<Path, PathError> {
        Ok(self)
    }
}

impl IntoPath for &Path {
    fn into_path(self) -> Result<Path, PathError> {
        Ok(self.clone())
    }
}

impl IntoPath for &str {
    fn into_path(self) -> Result<Path, PathError> {
        Path::parse(self)
    }
}

impl IntoPath for &String {
    fn into_path(self) -> Result<Path, PathError> {
        Path::parse(self)
    }
}

impl IntoPath for Vec<String> {
    fn into_path(self) -> Result<Path, PathError> {
        Path::new(self)
    }
}

impl IntoPath for Vec<&str> {
    fn into_path(self) -> Result<Path, PathError> {
        Path::new(self)
    }
}

impl IntoPath for &[&str] {
    fn into_path(self) -> Result<Path, PathError> {
        Path::new(self.iter().copied())
    }
}

impl IntoPath for &[String] {
    fn into_path(self) -> Result<Path, PathError> {
        Path::new(self.iter().cloned())
    }
}

impl<const N: usize> IntoPath for [&str; N] {
    fn into_path(self) -> Result<Path, PathError> {
        Path::new(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_rejects_empty() {
        assert_eq!(Path::new(Vec::<String>::new()), Err(PathError::Empty));
        assert_eq!(Path::try_from([] as [&str; 0]), Err(PathError::Empty));
    }

    #[test]
    fn test_new_keeps_segments_verbatim() {
        let path = Path::new(["svc", "a.b", ""]).unwrap();
        assert_eq!(path.root(), "svc");
        assert_eq!(path.properties(), ["a.b", ""]);
    }

    #[test]
    fn test_parse_dots_and_brackets() {
        let path = Path::parse("math.ops[0].run").unwrap();
        assert_eq!(path.segments(), ["math", "ops", "0", "run"]);

        let path = Path::parse(r#"config["log.level"]"#).unwrap();
        assert_eq!(path.segments(), ["config", "log.level"]);

        let path = Path::parse("['my svc'].start").unwrap();
        assert_eq!(path.segments(), ["my svc", "start"]);

        let path = Path::parse("grid[1][2]").unwrap();
        assert_eq!(path.segments(), ["grid", "1", "2"]);
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(Path::parse(""), Err(PathError::Empty));
        assert_eq!(
            Path::parse("a..b"),
            Err(PathError::EmptySegment { position: 2 })
        );
        assert_eq!(
            Path::parse("a."),
            Err(PathError::EmptySegment { position: 2 })
        );
        assert_eq!(
            Path::parse(".a"),
            Err(PathError::EmptySegment { position: 0 })
        );
        assert_eq!(
            Path::parse("a.[0]"),
            Err(PathError::EmptySegment { position: 2 })
        );
        assert_eq!(
            Path::parse("a[]"),
            Err(PathError::EmptySegment { position: 2 })
        );
        assert_eq!(Path::parse("a[0"), Err(PathError::Unclosed { position: 1 }));
        assert_eq!(
            Path::parse(r#"a["b]"#),
            Err(PathError::Unclosed { position: 1 })
        );
    }

    #[test]
    fn test_display() {
        let path = Path::new(["math", "ops", "0", "log.level"]).unwrap();
        assert_eq!(path.to_string(), r#"math.ops[0]["log.level"]"#);
        assert_eq!(Path::parse(&path.to_string()).unwrap(), path);
    }

    #[test]
    fn test_text_after_bracket_is_rejected() {
        assert_eq!(Path::parse("a[0]b"), Err(PathError::Unexpected { position: 4 }));
        assert_eq!(
            Path::parse(r#"a["x"]y.z"#),
            Err(PathError::Unexpected { position: 6 })
        );
        assert_eq!(Path::parse("a[0].b").unwrap().segments(), ["a", "0", "b"]);
        assert_eq!(Path::parse("a[0][1]").unwrap().segments(), ["a", "0", "1"]);
    }

    #[test]
    fn test_quoted_escapes() {
        let path = Path::parse(r#"svc['it\'s']["say \"hi\""]"#).unwrap();
        assert_eq!(path.segments(), ["svc", "it's", "say \"hi\""]);

        let path = Path::parse(r#"svc["C:\\temp"]"#).unwrap();
        assert_eq!(path.properties(), ["C:\\temp"]);

        assert_eq!(
            Path::parse(r#"svc["trailing\"#),
            Err(PathError::Unclosed { position: 3 })
        );
    }

    #[test]
    fn test_display_round_trips_awkward_keys() {
        let path = Path::new(["my svc", "say \"hi\"", "C:\\temp", "it's", "a]b"]).unwrap();
        let rendered = path.to_string();
        assert_eq!(rendered, r#"["my svc"]["say \"hi\""]["C:\\temp"]["it's"]["a]b"]"#);
        assert_eq!(Path::parse(&rendered).unwrap(), path);

        let path = Path::new(["svc", "line\nbreak", "\\\""]).unwrap();
        assert_eq!(Path::parse(&path.to_string()).unwrap(), path);
    }

    #[test]
    fn test_into_path() {
        assert_eq!(
            "a.b".into_path().unwrap(),
            ["a", "b"].into_path().unwrap()
        );
        // Segment lists are not parsed.
        assert_eq!(["a.b"].into_path().unwrap().segments(), ["a.b"]);
        assert_eq!(Path::from_id("svc").segments(), ["svc"]);
    }

    #[test]
    fn test_join() {
        let base = Path::parse("svc").unwrap();
        assert_eq!(base.child("run").to_string(), "svc.run");
        assert_eq!(base.join(["a", "b"]).segments(), ["svc", "a", "b"]);
    }
}
