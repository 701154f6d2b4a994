use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};
use thiserror::Error as ThisError;

///
/// TypePathError
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
#[remain::sorted]
pub enum TypePathError {
    #[error("type path is empty")]
    Empty,

    #[error("type path '{0}' contains an empty segment")]
    EmptySegment(String),
}

///
/// TypePath
///
/// Globally-unique identity of a declared type: the ordered segments of its
/// fully-qualified name. Two entities may share a simple name but never a
/// TypePath. Displayed `::`-separated; parsing also accepts `.`-separated
/// input since host option values use that form.
///

#[derive(Clone, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub struct TypePath {
    segments: Vec<String>,
}

impl TypePath {
    pub fn parse(path: &str) -> Result<Self, TypePathError> {
        if path.is_empty() {
            return Err(TypePathError::Empty);
        }

        let segments: Vec<String> = path
            .split("::")
            .flat_map(|part| part.split('.'))
            .map(ToString::to_string)
            .collect();

        if segments.iter().any(String::is_empty) {
            return Err(TypePathError::EmptySegment(path.to_string()));
        }

        Ok(Self { segments })
    }

    pub fn from_segments<I, S>(segments: I) -> Result<Self, TypePathError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let segments: Vec<String> = segments.into_iter().map(Into::into).collect();
        if segments.is_empty() {
            return Err(TypePathError::Empty);
        }
        if segments.iter().any(String::is_empty) {
            return Err(TypePathError::EmptySegment(segments.join("::")));
        }

        Ok(Self { segments })
    }

    #[must_use]
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Last segment; the display name used in generated member names.
    #[must_use]
    pub fn simple_name(&self) -> &str {
        self.segments
            .last()
            .expect("a type path always has at least one segment")
    }

    /// Everything before the simple name, if any.
    #[must_use]
    pub fn qualifier(&self) -> Option<Self> {
        match self.segments.split_last() {
            Some((_, rest)) if !rest.is_empty() => Some(Self {
                segments: rest.to_vec(),
            }),
            _ => None,
        }
    }

    /// This path extended by one segment.
    #[must_use]
    pub fn join(&self, segment: &str) -> Self {
        let mut segments = self.segments.clone();
        segments.push(segment.to_string());

        Self { segments }
    }
}

impl fmt::Display for TypePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.segments.join("::"))
    }
}

impl FromStr for TypePath {
    type Err = TypePathError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

///
/// ScopeKey
///
/// Grouping key of the registry. `Unscoped` sorts first so unscoped
/// artifacts are always produced ahead of scoped ones.
///

#[derive(Clone, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub enum ScopeKey {
    Unscoped,
    Scoped(TypePath),
}

impl ScopeKey {
    #[must_use]
    pub const fn is_scoped(&self) -> bool {
        matches!(self, Self::Scoped(_))
    }

    /// Simple name of the scope type, if any.
    #[must_use]
    pub fn simple_name(&self) -> Option<&str> {
        match self {
            Self::Unscoped => None,
            Self::Scoped(path) => Some(path.simple_name()),
        }
    }
}

impl fmt::Display for ScopeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unscoped => f.write_str("unscoped"),
            Self::Scoped(path) => path.fmt(f),
        }
    }
}

///
/// DependencyParam
///
/// One constructor parameter of an entity, satisfied by the container.
/// Order is positional and significant.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct DependencyParam {
    pub name: String,
    pub ty: TypePath,
}

impl DependencyParam {
    pub fn new(name: impl Into<String>, ty: TypePath) -> Self {
        Self {
            name: name.into(),
            ty,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_splits_on_both_separators() {
        let a = TypePath::parse("test::Vm").unwrap();
        let b = TypePath::parse("test.Vm").unwrap();

        assert_eq!(a, b);
        assert_eq!(a.to_string(), "test::Vm");
        assert_eq!(a.simple_name(), "Vm");
        assert_eq!(a.qualifier().unwrap().to_string(), "test");
    }

    #[test]
    fn parse_rejects_empty_input() {
        assert_eq!(TypePath::parse(""), Err(TypePathError::Empty));
        assert!(matches!(
            TypePath::parse("test::"),
            Err(TypePathError::EmptySegment(_))
        ));
    }

    #[test]
    fn bare_name_has_no_qualifier() {
        let path = TypePath::parse("Factory").unwrap();

        assert_eq!(path.simple_name(), "Factory");
        assert!(path.qualifier().is_none());
    }

    #[test]
    fn unscoped_sorts_before_any_scope() {
        let scoped = ScopeKey::Scoped(TypePath::parse("a::A").unwrap());

        assert!(ScopeKey::Unscoped < scoped);
    }
}
