use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// The audio-relevant view of a map location
///
/// Location records are owned by the UI and carry many more fields; only the
/// hierarchy and audio binding are typed here. Unknown fields are kept in
/// `extra` so a load/save cycle does not drop them.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationNode {
    pub id: String,

    #[serde(default)]
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_location_id: Option<String>,

    /// Play alongside the parent's audio instead of replacing it
    #[serde(default)]
    pub mix_with_parent: bool,

    /// Track path (`/audio/<name>`) played on entering this location
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background_audio: Option<String>,

    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl LocationNode {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }

    pub fn with_parent(mut self, parent_id: impl Into<String>, mix_with_parent: bool) -> Self {
        self.parent_location_id = Some(parent_id.into());
        self.mix_with_parent = mix_with_parent;
        self
    }

    pub fn with_audio(mut self, track_id: impl Into<String>) -> Self {
        self.background_audio = Some(track_id.into());
        self
    }
}

/// Read-only location hierarchy used for mix decisions
#[derive(Debug, Clone, Default)]
pub struct LocationTree {
    nodes: HashMap<String, LocationNode>,
}

impl LocationTree {
    pub fn new(locations: impl IntoIterator<Item = LocationNode>) -> Self {
        Self {
            nodes: locations
                .into_iter()
                .map(|node| (node.id.clone(), node))
                .collect(),
        }
    }

    pub fn get(&self, id: &str) -> Option<&LocationNode> {
        self.nodes.get(id)
    }

    /// Parent id, if the location exists and has one
    pub fn parent_of(&self, id: &str) -> Option<&str> {
        self.nodes
            .get(id)
            .and_then(|node| node.parent_location_id.as_deref())
    }

    /// Direct children of a location
    pub fn children_of<'a>(&'a self, id: &'a str) -> impl Iterator<Item = &'a LocationNode> + 'a {
        self.nodes
            .values()
            .filter(move |node| node.parent_location_id.as_deref() == Some(id))
    }

    /// Whether entering `id` should blend with its parent's audio
    pub fn mixes_with_parent(&self, id: &str) -> bool {
        self.nodes
            .get(id)
            .is_some_and(|node| node.mix_with_parent && node.parent_location_id.is_some())
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_tree() -> LocationTree {
        LocationTree::new([
            LocationNode::new("city").with_audio("/audio/city.mp3"),
            LocationNode::new("tavern")
                .with_parent("city", true)
                .with_audio("/audio/tavern.mp3"),
            LocationNode::new("sewers").with_parent("city", false),
        ])
    }

    #[test]
    fn hierarchy_queries() {
        let tree = sample_tree();
        assert_eq!(tree.len(), 3);
        assert_eq!(tree.parent_of("tavern"), Some("city"));
        assert_eq!(tree.parent_of("city"), None);
        assert_eq!(tree.parent_of("missing"), None);
        assert!(tree.mixes_with_parent("tavern"));
        assert!(!tree.mixes_with_parent("sewers"));
        assert!(!tree.mixes_with_parent("city"));

        let mut children: Vec<_> = tree.children_of("city").map(|n| n.id.as_str()).collect();
        children.sort_unstable();
        assert_eq!(children, vec!["sewers", "tavern"]);
    }

    #[test]
    fn unknown_fields_survive_round_trip() {
        let json = r#"{"id":"keep","name":"Keep","mixWithParent":false,"description":"Old stones","x":12.5}"#;
        let node: LocationNode = serde_json::from_str(json).unwrap();
        assert_eq!(node.extra["description"], "Old stones");

        let back = serde_json::to_value(&node).unwrap();
        assert_eq!(back["x"], 12.5);
        assert_eq!(back["name"], "Keep");
    }

    #[test]
    fn missing_optional_fields_default() {
        let node: LocationNode = serde_json::from_str(r#"{"id":"a"}"#).unwrap();
        assert!(!node.mix_with_parent);
        assert!(node.parent_location_id.is_none());
        assert!(node.background_audio.is_none());
    }
}
