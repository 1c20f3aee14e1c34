use serde::Serialize;
use serde_json::Value;

/// Geometry of a portrayal. Sizes are fractions of one cell, so a circle
/// with `r = 1.0` or a rect with `w = 1.0, h = 1.0` fills its cell.
///
/// Serializes into the flat wire form: a `shape` tag of `"circle"` or
/// `"rect"` plus the matching size fields (`r`, or `w` and `h`).
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "shape", rename_all = "lowercase")]
pub enum Shape {
    Circle { r: f64 },
    Rect { w: f64, h: f64 },
}

/// A draw instruction as authored by an entity portrayal function, before
/// the renderer stamps cell coordinates onto it.
///
/// `layer` is optional here because supplying it is part of the authoring
/// contract: the renderer fails the whole frame when it is absent rather
/// than inventing a default draw order. `extra` is an open extension map;
/// unknown keys pass through to the wire unchanged.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PortrayalSpec {
    #[serde(flatten)]
    pub shape: Shape,
    pub color: String,
    pub filled: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub layer: Option<u32>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

impl PortrayalSpec {
    /// A circle portrayal with radius `r` (fraction of cell size).
    pub fn circle(r: f64, color: impl Into<String>, filled: bool) -> Self {
        Self {
            shape: Shape::Circle { r },
            color: color.into(),
            filled,
            layer: None,
            extra: serde_json::Map::new(),
        }
    }

    /// A rect portrayal with width `w` and height `h` (fractions of cell
    /// dimensions).
    pub fn rect(w: f64, h: f64, color: impl Into<String>, filled: bool) -> Self {
        Self {
            shape: Shape::Rect { w, h },
            color: color.into(),
            filled,
            layer: None,
            extra: serde_json::Map::new(),
        }
    }

    /// Assign the draw-order layer. Higher layers draw on top of lower ones.
    pub fn layer(mut self, layer: u32) -> Self {
        self.layer = Some(layer);
        self
    }

    /// Attach a renderer-defined extension field, forwarded to the wire
    /// as-is.
    pub fn with(mut self, key: impl Into<String>, value: Value) -> Self {
        self.extra.insert(key.into(), value);
        self
    }
}

/// A finished draw instruction for one entity at one grid cell.
///
/// Field names are the wire contract (`x`, `y`, `shape`, `r`, `w`, `h`,
/// `color`, `filled`, `layer`); clients match on them exactly. Extension
/// fields flatten into the same object.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Portrayal {
    pub x: u32,
    pub y: u32,
    #[serde(flatten)]
    pub shape: Shape,
    pub color: String,
    pub filled: bool,
    pub layer: u32,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

/// Keys owned by the renderer. Matching extension-map entries are dropped
/// when a spec is completed, so the typed fields always win on the wire.
const RENDERER_OWNED_KEYS: [&str; 3] = ["x", "y", "layer"];

impl Portrayal {
    /// Complete an authored spec into a drawable portrayal at cell
    /// `(x, y)` on `layer`.
    pub(crate) fn from_spec(mut spec: PortrayalSpec, x: u32, y: u32, layer: u32) -> Self {
        for key in RENDERER_OWNED_KEYS {
            spec.extra.remove(key);
        }
        Self {
            x,
            y,
            shape: spec.shape,
            color: spec.color,
            filled: spec.filled,
            layer,
            extra: spec.extra,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn circle_wire_form() {
        let p = Portrayal::from_spec(PortrayalSpec::circle(0.5, "Red", true).layer(2), 3, 1, 2);
        assert_eq!(
            serde_json::to_value(&p).unwrap(),
            json!({
                "x": 3,
                "y": 1,
                "shape": "circle",
                "r": 0.5,
                "color": "Red",
                "filled": true,
                "layer": 2
            })
        );
    }

    #[test]
    fn rect_wire_form() {
        let p = Portrayal::from_spec(
            PortrayalSpec::rect(1.0, 1.0, "#000000", true).layer(0),
            0,
            0,
            0,
        );
        assert_eq!(
            serde_json::to_value(&p).unwrap(),
            json!({
                "x": 0,
                "y": 0,
                "shape": "rect",
                "w": 1.0,
                "h": 1.0,
                "color": "#000000",
                "filled": true,
                "layer": 0
            })
        );
    }

    #[test]
    fn extension_fields_pass_through() {
        let spec = PortrayalSpec::circle(0.8, "Blue", false)
            .layer(1)
            .with("text", json!("42"))
            .with("text_color", json!("white"));
        let p = Portrayal::from_spec(spec, 0, 0, 1);

        let value = serde_json::to_value(&p).unwrap();
        assert_eq!(value["text"], json!("42"));
        assert_eq!(value["text_color"], json!("white"));
    }

    #[test]
    fn renderer_owned_keys_are_dropped_from_extras() {
        // A portrayal function that smuggles coordinates through the
        // extension map does not get to override the visited cell.
        let spec = PortrayalSpec::circle(0.5, "Red", true)
            .layer(0)
            .with("x", json!(99))
            .with("y", json!(99))
            .with("layer", json!(99));
        let p = Portrayal::from_spec(spec, 4, 7, 0);

        assert!(p.extra.is_empty());
        let value = serde_json::to_value(&p).unwrap();
        assert_eq!(value["x"], json!(4));
        assert_eq!(value["y"], json!(7));
        assert_eq!(value["layer"], json!(0));
    }

    #[test]
    fn spec_without_layer_serializes_without_key() {
        let spec = PortrayalSpec::rect(0.5, 0.5, "Blue", false);
        let value = serde_json::to_value(&spec).unwrap();
        assert!(value.get("layer").is_none());
    }
}
