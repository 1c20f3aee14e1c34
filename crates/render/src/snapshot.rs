use indexmap::IndexMap;
use serde::Serialize;

use crate::portrayal::Portrayal;

/// Layered portrayal collection for one simulation step.
///
/// Maps layer number to the portrayals on that layer, in the order they
/// were collected (row-major grid traversal, then cell lookup order).
/// Layer keys appear in first-seen order — an artifact of traversal, not a
/// guarantee. Consumers must sort layer keys numerically before drawing;
/// [`GridSnapshot::layers_sorted`] does that.
///
/// A snapshot is a transient value: created fresh by every render call and
/// never retained by the renderer.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct GridSnapshot {
    layers: IndexMap<u32, Vec<Portrayal>>,
}

impl GridSnapshot {
    /// Create an empty snapshot with no layer keys.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a portrayal to its declared layer, creating the layer entry
    /// on first use.
    pub(crate) fn push(&mut self, portrayal: Portrayal) {
        self.layers.entry(portrayal.layer).or_default().push(portrayal);
    }

    /// Portrayals on `layer`, in collection order.
    pub fn layer(&self, layer: u32) -> Option<&[Portrayal]> {
        self.layers.get(&layer).map(Vec::as_slice)
    }

    /// Layers in first-seen order.
    pub fn layers(&self) -> impl Iterator<Item = (u32, &[Portrayal])> {
        self.layers.iter().map(|(k, v)| (*k, v.as_slice()))
    }

    /// Layer keys sorted numerically, the order a client should draw in.
    pub fn layers_sorted(&self) -> Vec<u32> {
        let mut keys: Vec<u32> = self.layers.keys().copied().collect();
        keys.sort_unstable();
        keys
    }

    /// Number of distinct layers.
    pub fn layer_count(&self) -> usize {
        self.layers.len()
    }

    /// Total number of portrayals across all layers.
    pub fn len(&self) -> usize {
        self.layers.values().map(Vec::len).sum()
    }

    /// Whether the snapshot holds no portrayals.
    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::portrayal::PortrayalSpec;

    fn portrayal(x: u32, y: u32, layer: u32) -> Portrayal {
        Portrayal::from_spec(PortrayalSpec::circle(0.5, "Red", true).layer(layer), x, y, layer)
    }

    #[test]
    fn empty_snapshot_has_no_layers() {
        let snap = GridSnapshot::new();
        assert!(snap.is_empty());
        assert_eq!(snap.layer_count(), 0);
        assert_eq!(snap.len(), 0);
        assert!(snap.layer(0).is_none());
    }

    #[test]
    fn push_groups_by_layer() {
        let mut snap = GridSnapshot::new();
        snap.push(portrayal(0, 0, 1));
        snap.push(portrayal(1, 0, 0));
        snap.push(portrayal(2, 0, 1));

        assert_eq!(snap.layer_count(), 2);
        assert_eq!(snap.len(), 3);
        assert_eq!(snap.layer(1).unwrap().len(), 2);
        assert_eq!(snap.layer(0).unwrap().len(), 1);
    }

    #[test]
    fn layer_keys_in_first_seen_order() {
        let mut snap = GridSnapshot::new();
        snap.push(portrayal(0, 0, 5));
        snap.push(portrayal(1, 0, 0));
        snap.push(portrayal(2, 0, 3));

        let first_seen: Vec<u32> = snap.layers().map(|(k, _)| k).collect();
        assert_eq!(first_seen, vec![5, 0, 3]);
        assert_eq!(snap.layers_sorted(), vec![0, 3, 5]);
    }

    #[test]
    fn within_layer_order_is_collection_order() {
        let mut snap = GridSnapshot::new();
        snap.push(portrayal(1, 0, 0));
        snap.push(portrayal(0, 1, 0));

        let layer = snap.layer(0).unwrap();
        assert_eq!((layer[0].x, layer[0].y), (1, 0));
        assert_eq!((layer[1].x, layer[1].y), (0, 1));
    }

    #[test]
    fn serializes_keyed_by_layer() {
        let mut snap = GridSnapshot::new();
        snap.push(portrayal(0, 0, 2));

        let value = serde_json::to_value(&snap).unwrap();
        let layer = value.get("2").expect("layer key present");
        assert_eq!(layer.as_array().unwrap().len(), 1);
    }
}
