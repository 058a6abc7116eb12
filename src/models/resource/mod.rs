// Resource module
// Professionals and rooms that an appointment can occupy

use std::fmt;

use serde::{Deserialize, Serialize};

/// Opaque resource identifier, unique across professionals and rooms
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResourceId(pub String);

impl ResourceId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ResourceId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceKind {
    Professional,
    Room,
}

/// A bookable resource shown as a lane in the resource view
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resource {
    pub id: ResourceId,
    pub kind: ResourceKind,
    #[serde(default)]
    pub name: String,
}

impl Resource {
    pub fn professional(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: ResourceId::new(id),
            kind: ResourceKind::Professional,
            name: name.into(),
        }
    }

    pub fn room(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: ResourceId::new(id),
            kind: ResourceKind::Room,
            name: name.into(),
        }
    }
}

/// Resource references carried by an event.
///
/// Either, both, or neither reference may be set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceRefs {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub professional: Option<ResourceId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub room: Option<ResourceId>,
}

impl ResourceRefs {
    pub fn none() -> Self {
        Self::default()
    }

    /// Get the reference held for the given resource kind
    pub fn get(&self, kind: ResourceKind) -> Option<&ResourceId> {
        match kind {
            ResourceKind::Professional => self.professional.as_ref(),
            ResourceKind::Room => self.room.as_ref(),
        }
    }

    /// Replace the reference for the given kind, returning the updated refs
    pub fn with(mut self, kind: ResourceKind, id: ResourceId) -> Self {
        match kind {
            ResourceKind::Professional => self.professional = Some(id),
            ResourceKind::Room => self.room = Some(id),
        }
        self
    }

    /// True when either the professional or the room reference equals `id`
    pub fn references(&self, id: &ResourceId) -> bool {
        self.professional.as_ref() == Some(id) || self.room.as_ref() == Some(id)
    }

    /// True when the reference of the resource's own kind points at it
    pub fn matches(&self, resource: &Resource) -> bool {
        self.get(resource.kind) == Some(&resource.id)
    }

    /// Resource kinds on which both sides hold the same reference
    pub fn shared_with(&self, other: &ResourceRefs) -> Vec<ResourceKind> {
        [ResourceKind::Professional, ResourceKind::Room]
            .into_iter()
            .filter(|kind| match (self.get(*kind), other.get(*kind)) {
                (Some(a), Some(b)) => a == b,
                _ => false,
            })
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.professional.is_none() && self.room.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn refs(professional: Option<&str>, room: Option<&str>) -> ResourceRefs {
        ResourceRefs {
            professional: professional.map(ResourceId::from),
            room: room.map(ResourceId::from),
        }
    }

    #[test]
    fn test_shared_professional() {
        let a = refs(Some("dr-ana"), Some("room-1"));
        let b = refs(Some("dr-ana"), Some("room-2"));
        assert_eq!(a.shared_with(&b), vec![ResourceKind::Professional]);
    }

    #[test]
    fn test_shared_both() {
        let a = refs(Some("dr-ana"), Some("room-1"));
        assert_eq!(
            a.shared_with(&a.clone()),
            vec![ResourceKind::Professional, ResourceKind::Room]
        );
    }

    #[test]
    fn test_missing_refs_never_shared() {
        let a = refs(None, Some("room-1"));
        let b = refs(None, None);
        assert!(a.shared_with(&b).is_empty());
        assert!(b.shared_with(&b).is_empty());
    }

    #[test]
    fn test_matches_uses_kind() {
        // A room id in the professional slot does not match the room lane
        let event_refs = refs(Some("room-1"), None);
        let room = Resource::room("room-1", "Room 1");
        assert!(!event_refs.matches(&room));
        assert!(event_refs.references(&room.id));
    }

    #[test]
    fn test_with_replaces_reference() {
        let updated = refs(Some("dr-ana"), None).with(ResourceKind::Professional, "dr-bo".into());
        assert_eq!(updated.professional, Some(ResourceId::from("dr-bo")));
        assert!(updated.room.is_none());
    }
}
