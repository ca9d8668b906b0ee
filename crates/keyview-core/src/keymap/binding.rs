//! Keymap layers and per-key bindings as a device reports them.
//!
//! Binding `i` on a layer belongs to key `i` of the physical layout, so the
//! same index that hit-testing returns is used to look a binding up.

use serde::{Deserialize, Serialize};

use super::usage::Usage;

/// One key's behaviour assignment.  Behaviour IDs are opaque here.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Binding {
    #[serde(default)]
    pub behavior_id: i32,
    #[serde(default)]
    pub param1: u32,
    #[serde(default)]
    pub param2: u32,
}

impl Binding {
    /// Interprets `param1` as a packed HID usage.
    pub fn usage(&self) -> Usage {
        Usage::decode(self.param1)
    }

    /// Keycap label derived from `param1`, or `None` if it is not a known usage.
    pub fn label(&self) -> Option<String> {
        self.usage().label()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Layer {
    #[serde(default)]
    pub id: u32,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub bindings: Vec<Binding>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Keymap {
    #[serde(default)]
    pub layers: Vec<Layer>,
}

impl Keymap {
    /// Binding for `key_index` on layer `layer_index`, if both exist.
    pub fn binding(&self, layer_index: usize, key_index: usize) -> Option<&Binding> {
        self.layers.get(layer_index)?.bindings.get(key_index)
    }

    /// Keycap label for `key_index` on layer `layer_index`.
    pub fn key_label(&self, layer_index: usize, key_index: usize) -> Option<String> {
        self.binding(layer_index, key_index)?.label()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keymap() -> Keymap {
        Keymap {
            layers: vec![
                Layer {
                    id: 0,
                    name: "Base".to_string(),
                    bindings: vec![
                        Binding { behavior_id: 1, param1: 0x0007_0004, param2: 0 },
                        Binding { behavior_id: 1, param1: 0x0007_0028, param2: 0 },
                        Binding { behavior_id: 9, param1: 0, param2: 0 },
                    ],
                },
                Layer {
                    id: 1,
                    name: "Fn".to_string(),
                    bindings: vec![Binding { behavior_id: 1, param1: 0x000C_00E9, param2: 0 }],
                },
            ],
        }
    }

    #[test]
    fn test_binding_lookup_by_layer_and_key() {
        let km = keymap();
        assert_eq!(km.binding(0, 1).map(|b| b.param1), Some(0x0007_0028));
        assert_eq!(km.binding(1, 1), None);
        assert_eq!(km.binding(5, 0), None);
    }

    #[test]
    fn test_key_label_resolves_usage() {
        let km = keymap();
        assert_eq!(km.key_label(0, 0).as_deref(), Some("A"));
        assert_eq!(km.key_label(1, 0).as_deref(), Some("Vol+"));
    }

    #[test]
    fn test_key_label_none_for_non_usage_binding() {
        assert_eq!(keymap().key_label(0, 2), None);
    }

    #[test]
    fn test_keymap_deserializes_camel_case_json() {
        let json = r#"{"layers": [{"id": 0, "name": "Base", "bindings": [{"behaviorId": 3, "param1": 458756}]}]}"#;
        let km: Keymap = serde_json::from_str(json).unwrap();
        let binding = km.binding(0, 0).unwrap();
        assert_eq!(binding.behavior_id, 3);
        assert_eq!(binding.param2, 0);
        assert_eq!(binding.label().as_deref(), Some("A"));
    }
}
