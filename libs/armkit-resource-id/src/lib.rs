//! Hierarchical resource identifiers.
//!
//! A resource id is a slash-delimited path made of a root scope followed by an
//! optional typed tail:
//!
//! ```text
//! /planes/radius/local/resourceGroups/rg1/providers/Applications.Core/containers/frontend
//! \______________ root scope ____________/           \____ resource type ____/ \_ name _/
//! ```
//!
//! Both UCP ids (`/planes/{type}/{name}/...`) and Azure ids (`/subscriptions/{id}/...`)
//! are accepted. A typed tail whose last segment has no name is a resource collection,
//! which is what list requests address.
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

const PLANES_SEGMENT: &str = "planes";
const PROVIDERS_SEGMENT: &str = "providers";
const SEPARATOR: char = '/';

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ResourceIdError {
    #[error("resource id is empty")]
    Empty,

    #[error("resource id '{0}' must start with '/'")]
    MissingLeadingSlash(String),

    #[error("resource id '{0}' contains an empty segment")]
    EmptySegment(String),

    #[error("resource id '{0}' has a scope type without a name")]
    UnbalancedScope(String),

    #[error("resource id '{0}' is missing a provider namespace after 'providers'")]
    MissingNamespace(String),

    #[error("resource id '{0}' is missing a resource type after the provider namespace")]
    MissingResourceType(String),

    #[error("resource id '{0}' has a nested type segment without a parent name")]
    IncompleteTypeSegment(String),
}

/// One `{type}/{name}` pair of the root scope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScopeSegment {
    pub scope_type: String,
    pub name: String,
}

/// One `{type}[/{name}]` pair of the typed tail. Only the last pair may lack a name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeSegment {
    pub type_name: String,
    pub name: Option<String>,
}

/// Parsed, immutable resource identifier.
///
/// Equality and hashing are case-insensitive, matching how ARM compares ids.
#[derive(Debug, Clone)]
pub struct ResourceId {
    id: String,
    ucp: bool,
    scopes: Vec<ScopeSegment>,
    namespace: Option<String>,
    types: Vec<TypeSegment>,
}

impl ResourceId {
    /// Parse a resource id.
    ///
    /// A trailing `/` is tolerated and dropped from the canonical form.
    ///
    /// # Errors
    /// Returns a [`ResourceIdError`] describing the first malformed part of the path.
    pub fn parse(raw: &str) -> Result<Self, ResourceIdError> {
        if raw.is_empty() {
            return Err(ResourceIdError::Empty);
        }
        let Some(body) = raw.strip_prefix(SEPARATOR) else {
            return Err(ResourceIdError::MissingLeadingSlash(raw.to_owned()));
        };
        let body = body.strip_suffix(SEPARATOR).unwrap_or(body);
        if body.is_empty() {
            return Err(ResourceIdError::Empty);
        }

        let segments: Vec<&str> = body.split(SEPARATOR).collect();
        if segments.iter().any(|s| s.is_empty()) {
            return Err(ResourceIdError::EmptySegment(raw.to_owned()));
        }

        let ucp = segments[0].eq_ignore_ascii_case(PLANES_SEGMENT);
        let scope_start = usize::from(ucp);
        let providers_at = segments
            .iter()
            .position(|s| s.eq_ignore_ascii_case(PROVIDERS_SEGMENT));
        let scope_end = providers_at.unwrap_or(segments.len());

        let scope_parts = &segments[scope_start..scope_end];
        if scope_parts.len() % 2 != 0 {
            return Err(ResourceIdError::UnbalancedScope(raw.to_owned()));
        }
        let scopes = scope_parts
            .chunks_exact(2)
            .map(|pair| ScopeSegment {
                scope_type: pair[0].to_owned(),
                name: pair[1].to_owned(),
            })
            .collect();

        let (namespace, types) = match providers_at {
            None => (None, Vec::new()),
            Some(at) => {
                let rest = &segments[at + 1..];
                let Some((namespace, tail)) = rest.split_first() else {
                    return Err(ResourceIdError::MissingNamespace(raw.to_owned()));
                };
                if tail.is_empty() {
                    return Err(ResourceIdError::MissingResourceType(raw.to_owned()));
                }
                (Some((*namespace).to_owned()), parse_types(raw, tail)?)
            }
        };

        let mut id = String::with_capacity(body.len() + 1);
        id.push(SEPARATOR);
        id.push_str(body);

        Ok(Self {
            id,
            ucp,
            scopes,
            namespace,
            types,
        })
    }

    /// Canonical string form.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.id
    }

    /// Whether the id is rooted at `/planes`.
    #[must_use]
    pub fn is_ucp(&self) -> bool {
        self.ucp
    }

    /// The root scope: everything before `/providers`, e.g. `/planes/radius/local/resourceGroups/rg1`.
    #[must_use]
    pub fn root_scope(&self) -> String {
        let mut out = String::new();
        if self.ucp {
            out.push(SEPARATOR);
            out.push_str(PLANES_SEGMENT);
        }
        for segment in &self.scopes {
            out.push(SEPARATOR);
            out.push_str(&segment.scope_type);
            out.push(SEPARATOR);
            out.push_str(&segment.name);
        }
        if out.is_empty() {
            out.push(SEPARATOR);
        }
        out
    }

    /// The fully-qualified resource type, e.g. `Applications.Core/containers`.
    ///
    /// Scope ids have an empty type.
    #[must_use]
    pub fn resource_type(&self) -> String {
        let Some(namespace) = &self.namespace else {
            return String::new();
        };
        let mut out = namespace.clone();
        for segment in &self.types {
            out.push(SEPARATOR);
            out.push_str(&segment.type_name);
        }
        out
    }

    /// The resource name. Nested names are joined with `/`; collections have none.
    #[must_use]
    pub fn name(&self) -> Option<String> {
        if self.is_resource_collection() || self.types.is_empty() {
            return None;
        }
        let names: Vec<&str> = self
            .types
            .iter()
            .filter_map(|t| t.name.as_deref())
            .collect();
        Some(names.join("/"))
    }

    /// The provider namespace, e.g. `Applications.Core`.
    #[must_use]
    pub fn provider_namespace(&self) -> Option<&str> {
        self.namespace.as_deref()
    }

    /// The plane of a UCP id, e.g. `radius/local`.
    #[must_use]
    pub fn plane_namespace(&self) -> Option<String> {
        if !self.ucp {
            return None;
        }
        self.scopes
            .first()
            .map(|s| format!("{}/{}", s.scope_type, s.name))
    }

    #[must_use]
    pub fn scope_segments(&self) -> &[ScopeSegment] {
        &self.scopes
    }

    #[must_use]
    pub fn type_segments(&self) -> &[TypeSegment] {
        &self.types
    }

    /// Find the name of a scope segment by its type, case-insensitively.
    #[must_use]
    pub fn find_scope(&self, scope_type: &str) -> Option<&str> {
        self.scopes
            .iter()
            .find(|s| s.scope_type.eq_ignore_ascii_case(scope_type))
            .map(|s| s.name.as_str())
    }

    /// True when the id names a scope only (no `/providers/...` tail).
    #[must_use]
    pub fn is_scope(&self) -> bool {
        self.namespace.is_none()
    }

    /// True when the last type segment has no name.
    #[must_use]
    pub fn is_resource_collection(&self) -> bool {
        self.types.last().is_some_and(|t| t.name.is_none())
    }

    /// True when the root scope equals `scope` or is a descendant of it.
    #[must_use]
    pub fn is_within_scope(&self, scope: &str) -> bool {
        scope_contains(scope, &self.root_scope())
    }

    /// The collection id this resource belongs to.
    #[must_use]
    pub fn collection(&self) -> Option<Self> {
        let namespace = self.namespace.clone()?;
        let mut types = self.types.clone();
        let last = types.last_mut()?;
        last.name = None;
        let mut id = self.root_scope();
        id.push(SEPARATOR);
        id.push_str(PROVIDERS_SEGMENT);
        id.push(SEPARATOR);
        id.push_str(&namespace);
        for t in &types {
            id.push(SEPARATOR);
            id.push_str(&t.type_name);
            if let Some(name) = &t.name {
                id.push(SEPARATOR);
                id.push_str(name);
            }
        }
        Some(Self {
            id,
            ucp: self.ucp,
            scopes: self.scopes.clone(),
            namespace: Some(namespace),
            types,
        })
    }
}

/// Case-insensitive "is `candidate` the same scope as, or nested under, `scope`".
#[must_use]
pub fn scope_contains(scope: &str, candidate: &str) -> bool {
    let scope = scope.trim_end_matches(SEPARATOR).to_ascii_lowercase();
    let candidate = candidate.trim_end_matches(SEPARATOR).to_ascii_lowercase();
    if scope.is_empty() {
        return true;
    }
    candidate == scope
        || candidate
            .strip_prefix(&scope)
            .is_some_and(|rest| rest.starts_with(SEPARATOR))
}

fn parse_types(raw: &str, tail: &[&str]) -> Result<Vec<TypeSegment>, ResourceIdError> {
    let mut types = Vec::with_capacity(tail.len().div_ceil(2));
    let mut chunks = tail.chunks(2).peekable();
    while let Some(pair) = chunks.next() {
        let name = pair.get(1).map(|n| (*n).to_owned());
        if name.is_none() && chunks.peek().is_some() {
            return Err(ResourceIdError::IncompleteTypeSegment(raw.to_owned()));
        }
        types.push(TypeSegment {
            type_name: pair[0].to_owned(),
            name,
        });
    }
    Ok(types)
}

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.id)
    }
}

impl FromStr for ResourceId {
    type Err = ResourceIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl PartialEq for ResourceId {
    fn eq(&self, other: &Self) -> bool {
        self.id.eq_ignore_ascii_case(&other.id)
    }
}

impl Eq for ResourceId {}

impl Hash for ResourceId {
    fn hash<H: Hasher>(&self, state: &mut H) {
        for b in self.id.bytes() {
            state.write_u8(b.to_ascii_lowercase());
        }
    }
}

impl PartialOrd for ResourceId {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ResourceId {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.id
            .bytes()
            .map(|b| b.to_ascii_lowercase())
            .cmp(other.id.bytes().map(|b| b.to_ascii_lowercase()))
    }
}

impl Serialize for ResourceId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.id)
    }
}

impl<'de> Deserialize<'de> for ResourceId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::parse(&raw).map_err(serde::de::Error::custom)
    }
}
