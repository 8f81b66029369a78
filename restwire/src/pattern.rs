//! Path templates with named single-segment captures.
//!
//! A template like `/dogs/:id/name` compiles into a sequence of segments:
//! literals match their text exactly, `:name` segments capture exactly one
//! path segment under that name. There is no wildcard or cross-segment
//! capture; a pattern and a path match only when they have the same number
//! of segments.

use restwire_core::Params;

/// One compiled segment of a path template.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    /// Matches its text exactly.
    Literal(String),
    /// Captures any single segment under the given parameter name.
    Param(String),
}

/// A compiled path template.
///
/// # Example
///
/// ```rust
/// use restwire::PathPattern;
///
/// let pattern = PathPattern::parse("/apple/:id");
/// let params = pattern.matches("/apple/3444").unwrap();
/// assert_eq!(params.get("id"), Some("3444"));
/// assert!(pattern.matches("/apple").is_none());
/// ```
#[derive(Debug, Clone)]
pub struct PathPattern {
    template: String,
    segments: Vec<Segment>,
}

impl PathPattern {
    /// Compile a template. Segments starting with `:` become named
    /// captures; everything else is literal text.
    pub fn parse(template: &str) -> Self {
        let segments = split(template)
            .map(|segment| match segment.strip_prefix(':') {
                Some(name) => Segment::Param(name.to_string()),
                None => Segment::Literal(segment.to_string()),
            })
            .collect();
        Self {
            template: template.to_string(),
            segments,
        }
    }

    /// The template text this pattern was compiled from.
    pub fn template(&self) -> &str {
        &self.template
    }

    /// Match a path against this pattern, yielding the captured parameters.
    ///
    /// Leading, trailing, and doubled slashes are normalized away on both
    /// sides, so `/dogs/23/` matches the template `/dogs/:id`.
    pub fn matches(&self, path: &str) -> Option<Params> {
        let parts: Vec<&str> = split(path).collect();
        if parts.len() != self.segments.len() {
            return None;
        }

        let mut params = Params::new();
        for (segment, part) in self.segments.iter().zip(parts) {
            match segment {
                Segment::Literal(literal) => {
                    if literal != part {
                        return None;
                    }
                }
                Segment::Param(name) => params.insert(name.clone(), part),
            }
        }
        Some(params)
    }
}

fn split(path: &str) -> impl Iterator<Item = &str> {
    path.split('/').filter(|segment| !segment.is_empty())
}
