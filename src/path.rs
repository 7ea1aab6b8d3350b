//! Property trails recovered from decode error chains.
//!
//! The object decoder never tracks paths while decoding; it only wraps the
//! failing property's error with its own `Entity.property` context. This module
//! reads those segments back off a finished chain as a [`DecodePath`].

use std::fmt::{self, Display};

/// One `Entity.property` step in a decode trail.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PathSegment {
    /// Name of the entity being decoded (e.g. `User`).
    pub entity: String,
    /// Property of that entity whose decoding failed (e.g. `email`).
    pub property: String,
}

impl PathSegment {
    pub fn new(entity: impl Into<String>, property: impl Into<String>) -> Self {
        Self {
            entity: entity.into(),
            property: property.into(),
        }
    }
}

impl Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.entity, self.property)
    }
}

/// The ordered trail of segments from the outermost entity to the innermost.
///
/// # Example
///
/// ```rust
/// use assayer::{DecodePath, PathSegment};
///
/// let path = DecodePath::root()
///     .push(PathSegment::new("Order", "customer"))
///     .push(PathSegment::new("Customer", "email"));
///
/// assert_eq!(path.to_string(), "Order.customer > Customer.email");
/// assert_eq!(path.property_path(), "customer.email");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct DecodePath {
    segments: Vec<PathSegment>,
}

impl DecodePath {
    /// Creates an empty trail.
    pub fn root() -> Self {
        Self::default()
    }

    /// Returns a new trail with `segment` appended.
    pub fn push(&self, segment: PathSegment) -> Self {
        let mut segments = self.segments.clone();
        segments.push(segment);
        Self { segments }
    }

    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn segments(&self) -> impl Iterator<Item = &PathSegment> {
        self.segments.iter()
    }

    /// The innermost segment, where the root cause was raised.
    pub fn last(&self) -> Option<&PathSegment> {
        self.segments.last()
    }

    /// Property names only, dotted (`customer.address.city`).
    pub fn property_path(&self) -> String {
        self.segments
            .iter()
            .map(|segment| segment.property.as_str())
            .collect::<Vec<_>>()
            .join(".")
    }
}

impl Display for DecodePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.segments.iter().enumerate() {
            if i > 0 {
                write!(f, " > ")?;
            }
            write!(f, "{}", segment)?;
        }
        Ok(())
    }
}
