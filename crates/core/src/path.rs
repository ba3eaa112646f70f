//! Locations inside a JSON tree.

use std::collections::VecDeque;
use std::fmt;

/// One step into a JSON tree: an object member or an array element.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PathSegment {
    Key(String),
    Index(usize),
}

impl From<&str> for PathSegment {
    fn from(key: &str) -> Self {
        PathSegment::Key(key.to_string())
    }
}

impl From<String> for PathSegment {
    fn from(key: String) -> Self {
        PathSegment::Key(key)
    }
}

impl From<&String> for PathSegment {
    fn from(key: &String) -> Self {
        PathSegment::Key(key.clone())
    }
}

impl From<usize> for PathSegment {
    fn from(index: usize) -> Self {
        PathSegment::Index(index)
    }
}

impl PathSegment {
    // Keys that would read as more than one segment are shown bracketed.
    fn is_bracketed(&self) -> bool {
        match self {
            PathSegment::Key(key) => key.is_empty() || key.contains(['.', '[', ']', '"']),
            PathSegment::Index(_) => true,
        }
    }
}

impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathSegment::Key(key) if self.is_bracketed() => write!(f, "[{:?}]", key),
            PathSegment::Key(key) => f.write_str(key),
            PathSegment::Index(index) => write!(f, "[{}]", index),
        }
    }
}

/// An ordered sequence of segments from the root of a tree.
///
/// Displays as `a.b[2].c`, with awkward keys bracketed (`a["x.y"]`);
/// [`Path::to_pointer`] gives the RFC 6901 form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Path {
    segments: VecDeque<PathSegment>,
}

impl Path {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, segment: impl Into<PathSegment>) {
        self.segments.push_back(segment.into());
    }

    pub(crate) fn push_front(&mut self, segment: PathSegment) {
        self.segments.push_front(segment);
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &PathSegment> + ExactSizeIterator {
        self.segments.iter()
    }

    /// The first `len` segments.
    pub fn prefix(&self, len: usize) -> Path {
        self.segments.iter().take(len).cloned().collect()
    }

    /// Render as a JSON Pointer (`""` for the root, `/a/0/b~1c` otherwise).
    pub fn to_pointer(&self) -> String {
        let mut out = String::new();
        for segment in &self.segments {
            out.push('/');
            match segment {
                PathSegment::Key(key) => out.push_str(&escape_pointer_component(key)),
                PathSegment::Index(index) => out.push_str(&index.to_string()),
            }
        }
        out
    }
}

fn escape_pointer_component(component: &str) -> String {
    if !component.contains('/') && !component.contains('~') {
        return component.to_string();
    }
    component.replace('~', "~0").replace('/', "~1")
}

impl FromIterator<PathSegment> for Path {
    fn from_iter<I: IntoIterator<Item = PathSegment>>(iter: I) -> Self {
        Path {
            segments: iter.into_iter().collect(),
        }
    }
}

impl From<&str> for Path {
    fn from(key: &str) -> Self {
        std::iter::once(PathSegment::from(key)).collect()
    }
}

impl From<usize> for Path {
    fn from(index: usize) -> Self {
        std::iter::once(PathSegment::Index(index)).collect()
    }
}

impl From<Vec<PathSegment>> for Path {
    fn from(segments: Vec<PathSegment>) -> Self {
        segments.into_iter().collect()
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.segments.iter().enumerate() {
            if i > 0 && !segment.is_bracketed() {
                f.write_str(".")?;
            }
            write!(f, "{}", segment)?;
        }
        Ok(())
    }
}

/// Build a [`Path`] from keys and indices: `path!["items", 0, "id"]`.
#[macro_export]
macro_rules! path {
    () => {
        $crate::Path::new()
    };
    ($($segment:expr),+ $(,)?) => {
        <$crate::Path as ::std::iter::FromIterator<$crate::PathSegment>>::from_iter([
            $($crate::PathSegment::from($segment)),+
        ])
    };
}
