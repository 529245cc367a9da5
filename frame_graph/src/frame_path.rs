use crate::frame_error::FrameError;

/// The reserved path separator. Frame names must not contain it.
pub const SEPARATOR: char = '/';

/// A parsed frame path: an ordered sequence of frame names, either absolute
/// (rooted at the graph root) or relative (anchored at a caller-supplied
/// starting frame).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FramePath {
    absolute: bool,
    segments: Vec<String>,
}

impl FramePath {
    /// Parses a path string. A leading separator makes the path absolute; the
    /// bare root path `"/"` is the absolute path with no segments. Every
    /// segment between separators must be a non-empty frame name.
    pub fn parse(path: &str) -> Result<Self, FrameError> {
        if path.is_empty() {
            return Err(FrameError::InvalidPath("empty path".to_string()));
        }
        let absolute = path.starts_with(SEPARATOR);
        let rest = if absolute { &path[1..] } else { path };

        let mut segments = Vec::new();
        if !rest.is_empty() {
            for segment in rest.split(SEPARATOR) {
                if segment.is_empty() {
                    return Err(FrameError::InvalidPath(format!(
                        "empty segment in '{path}'"
                    )));
                }
                segments.push(segment.to_string());
            }
        }
        Ok(FramePath { absolute, segments })
    }

    pub fn is_absolute(&self) -> bool {
        self.absolute
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }
}

/// A frame name is valid if it is non-empty and contains no separator.
pub(crate) fn is_valid_name(name: &str) -> bool {
    !name.is_empty() && !name.contains(SEPARATOR)
}
