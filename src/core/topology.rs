//! TopoJSON decoding
//!
//! Decodes the shared-arc topology into plain polygon rings (`features`) and
//! into the interior border lines between neighbouring shapes (`interior_mesh`).
//! Quantized, delta-encoded arcs are expanded once at parse time.

use std::collections::HashMap;

use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, warn};

use super::error::LoadError;
use super::loader::normalize_id;

/// Longitude / latitude pair
pub type LonLat = [f64; 2];
/// Closed ring, first point repeated at the end
pub type Ring = Vec<LonLat>;
/// Exterior ring followed by holes
pub type Polygon = Vec<Ring>;

#[derive(Clone, Debug, Deserialize)]
struct Transform {
    scale: [f64; 2],
    translate: [f64; 2],
}

#[derive(Clone, Debug, Deserialize)]
struct TopoGeometry {
    #[serde(rename = "type")]
    kind: Option<String>,
    #[serde(default)]
    id: Option<Value>,
    #[serde(default)]
    properties: Option<serde_json::Map<String, Value>>,
    #[serde(default)]
    arcs: Value,
    #[serde(default)]
    geometries: Vec<TopoGeometry>,
}

#[derive(Clone, Debug, Deserialize)]
struct RawTopology {
    #[serde(default)]
    transform: Option<Transform>,
    arcs: Vec<Vec<Vec<f64>>>,
    objects: HashMap<String, TopoGeometry>,
}

/// One named shape with its polygons in geographic coordinates
#[derive(Clone, Debug, PartialEq)]
pub struct GeoFeature {
    pub id: String,
    pub name: String,
    pub polygons: Vec<Polygon>,
}

/// Parsed topology with arcs already in absolute coordinates
#[derive(Clone, Debug)]
pub struct Topology {
    arcs: Vec<Vec<LonLat>>,
    objects: HashMap<String, TopoGeometry>,
}

impl Topology {
    pub fn from_json_str(text: &str) -> Result<Self, LoadError> {
        if text.trim().is_empty() {
            return Err(LoadError::Empty);
        }
        let raw: RawTopology = serde_json::from_str(text)?;
        let arcs = raw
            .arcs
            .iter()
            .map(|arc| decode_arc(arc, raw.transform.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;
        debug!(arcs = arcs.len(), objects = raw.objects.len(), "Topology parsed");
        Ok(Self {
            arcs,
            objects: raw.objects,
        })
    }

    pub fn has_object(&self, name: &str) -> bool {
        self.objects.contains_key(name)
    }

    /// Every polygonal geometry of `object` as a feature. Ids are stringified
    /// and numeric ids padded to `id_width`. Non-polygon geometries are skipped.
    pub fn features(&self, object: &str, id_width: usize) -> Result<Vec<GeoFeature>, LoadError> {
        let root = self
            .objects
            .get(object)
            .ok_or_else(|| LoadError::MissingObject(object.to_string()))?;

        let mut out = Vec::new();
        for geom in flatten(root) {
            let polygons = self.polygons(geom)?;
            if polygons.is_empty() {
                continue;
            }
            let id = geom
                .id
                .as_ref()
                .map(|v| normalize_id(&value_to_string(v), id_width))
                .unwrap_or_default();
            let name = geom
                .properties
                .as_ref()
                .and_then(|p| p.get("name"))
                .and_then(Value::as_str)
                .map(str::to_string)
                .unwrap_or_else(|| id.clone());
            out.push(GeoFeature { id, name, polygons });
        }
        debug!(object, features = out.len(), "Decoded features");
        Ok(out)
    }

    /// Arcs shared by two different geometries of `object`, as polylines.
    /// Arcs on the outer edge (used by one geometry only) are left out.
    pub fn interior_mesh(&self, object: &str) -> Result<Vec<Vec<LonLat>>, LoadError> {
        let root = self
            .objects
            .get(object)
            .ok_or_else(|| LoadError::MissingObject(object.to_string()))?;

        // arc index -> (first geometry, last geometry) referencing it
        let mut owners: HashMap<usize, (usize, usize)> = HashMap::new();
        for (gi, geom) in flatten(root).into_iter().enumerate() {
            for polygon in polygon_arc_refs(geom)? {
                for ring in polygon {
                    for &r in &ring {
                        let idx = arc_index(r);
                        owners
                            .entry(idx)
                            .and_modify(|(_, last)| *last = gi)
                            .or_insert((gi, gi));
                    }
                }
            }
        }

        let mut shared: Vec<usize> = owners
            .into_iter()
            .filter(|(_, (first, last))| first != last)
            .map(|(idx, _)| idx)
            .collect();
        shared.sort_unstable();

        let mut lines = Vec::with_capacity(shared.len());
        for idx in shared {
            let arc = self
                .arcs
                .get(idx)
                .ok_or_else(|| LoadError::InvalidTopology(format!("arc {} out of range", idx)))?;
            lines.push(arc.clone());
        }
        debug!(object, lines = lines.len(), "Built interior mesh");
        Ok(lines)
    }

    fn polygons(&self, geom: &TopoGeometry) -> Result<Vec<Polygon>, LoadError> {
        polygon_arc_refs(geom)?
            .into_iter()
            .map(|rings| {
                rings
                    .iter()
                    .map(|refs| self.ring(refs))
                    .collect::<Result<Polygon, _>>()
            })
            .collect()
    }

    /// Stitch arcs into one ring; consecutive arcs share their joining point
    fn ring(&self, refs: &[i64]) -> Result<Ring, LoadError> {
        let mut points: Ring = Vec::new();
        for &r in refs {
            let idx = arc_index(r);
            let arc = self
                .arcs
                .get(idx)
                .ok_or_else(|| LoadError::InvalidTopology(format!("arc {} out of range", idx)))?;
            if !points.is_empty() {
                points.pop();
            }
            if r < 0 {
                points.extend(arc.iter().rev().copied());
            } else {
                points.extend(arc.iter().copied());
            }
        }
        if let Some(&first) = points.first() {
            while points.len() < 4 {
                points.push(first);
            }
        }
        Ok(points)
    }
}

/// `~i` encodes arc `i` traversed backwards
#[inline]
fn arc_index(r: i64) -> usize {
    if r < 0 {
        (!r) as usize
    } else {
        r as usize
    }
}

fn decode_arc(arc: &[Vec<f64>], transform: Option<&Transform>) -> Result<Vec<LonLat>, LoadError> {
    let mut out = Vec::with_capacity(arc.len());
    let (mut x, mut y) = (0.0, 0.0);
    for pos in arc {
        let (&px, &py) = match (pos.first(), pos.get(1)) {
            (Some(px), Some(py)) => (px, py),
            _ => return Err(LoadError::InvalidTopology("arc position needs two coordinates".into())),
        };
        match transform {
            Some(t) => {
                x += px;
                y += py;
                out.push([x * t.scale[0] + t.translate[0], y * t.scale[1] + t.translate[1]]);
            }
            None => out.push([px, py]),
        }
    }
    Ok(out)
}

/// Leaf geometries of an object, collections expanded depth-first
fn flatten(geom: &TopoGeometry) -> Vec<&TopoGeometry> {
    if geom.kind.as_deref() == Some("GeometryCollection") {
        geom.geometries.iter().flat_map(flatten).collect()
    } else {
        vec![geom]
    }
}

/// Arc references of a polygonal geometry as `polygon -> ring -> arcs`
fn polygon_arc_refs(geom: &TopoGeometry) -> Result<Vec<Vec<Vec<i64>>>, LoadError> {
    match geom.kind.as_deref() {
        Some("Polygon") => Ok(vec![serde_json::from_value(geom.arcs.clone())?]),
        Some("MultiPolygon") => Ok(serde_json::from_value(geom.arcs.clone())?),
        Some(other) => {
            if other != "GeometryCollection" {
                warn!(kind = other, "Skipping non-polygon geometry");
            }
            Ok(Vec::new())
        }
        None => Ok(Vec::new()),
    }
}

fn value_to_string(v: &Value) -> String {
    match v {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// Two unit squares side by side sharing the edge x = 1
    pub(crate) const TWO_SQUARES: &str = r#"{
        "type": "Topology",
        "transform": { "scale": [1, 1], "translate": [0, 0] },
        "arcs": [
            [[1, 0], [0, 1]],
            [[1, 1], [-1, 0], [0, -1], [1, 0]],
            [[1, 0], [1, 0], [0, 1], [-1, 0]]
        ],
        "objects": {
            "counties": {
                "type": "GeometryCollection",
                "geometries": [
                    { "type": "Polygon", "id": "01001", "properties": { "name": "Left" }, "arcs": [[0, 1]] },
                    { "type": "Polygon", "id": 1003, "properties": { "name": "Right" }, "arcs": [[2, -1]] }
                ]
            },
            "states": {
                "type": "GeometryCollection",
                "geometries": [
                    { "type": "MultiPolygon", "id": "01", "arcs": [[[0, 1]], [[2, -1]]] }
                ]
            }
        }
    }"#;

    /// The same two squares placed in Nebraska / Kansas, half a degree each
    pub(crate) const US_SQUARES: &str = r#"{
        "type": "Topology",
        "transform": { "scale": [0.5, 0.5], "translate": [-100, 40] },
        "arcs": [
            [[1, 0], [0, 1]],
            [[1, 1], [-1, 0], [0, -1], [1, 0]],
            [[1, 0], [1, 0], [0, 1], [-1, 0]]
        ],
        "objects": {
            "counties": {
                "type": "GeometryCollection",
                "geometries": [
                    { "type": "Polygon", "id": "01001", "properties": { "name": "Left" }, "arcs": [[0, 1]] },
                    { "type": "Polygon", "id": "01003", "properties": { "name": "Right" }, "arcs": [[2, -1]] }
                ]
            },
            "states": {
                "type": "GeometryCollection",
                "geometries": [
                    { "type": "Polygon", "id": "01", "arcs": [[0, 1]] },
                    { "type": "Polygon", "id": "02", "arcs": [[2, -1]] }
                ]
            }
        }
    }"#;

    #[test]
    fn test_features_decode_quantized_arcs() {
        let topo = Topology::from_json_str(TWO_SQUARES).unwrap();
        let features = topo.features("counties", 5).unwrap();
        assert_eq!(features.len(), 2);

        assert_eq!(features[0].id, "01001");
        assert_eq!(features[0].name, "Left");
        assert_eq!(
            features[0].polygons[0][0],
            vec![[1.0, 0.0], [1.0, 1.0], [0.0, 1.0], [0.0, 0.0], [1.0, 0.0]]
        );

        // numeric id, reversed shared arc
        assert_eq!(features[1].id, "01003");
        assert_eq!(
            features[1].polygons[0][0],
            vec![[1.0, 0.0], [2.0, 0.0], [2.0, 1.0], [1.0, 1.0], [1.0, 0.0]]
        );
    }

    #[test]
    fn test_multipolygon_and_missing_name() {
        let topo = Topology::from_json_str(TWO_SQUARES).unwrap();
        let states = topo.features("states", 2).unwrap();
        assert_eq!(states.len(), 1);
        assert_eq!(states[0].polygons.len(), 2);
        assert_eq!(states[0].name, "01");
    }

    #[test]
    fn test_interior_mesh_keeps_only_shared_arcs() {
        let topo = Topology::from_json_str(TWO_SQUARES).unwrap();
        let mesh = topo.interior_mesh("counties").unwrap();
        assert_eq!(mesh, vec![vec![[1.0, 0.0], [1.0, 1.0]]]);
        // one state: nothing is shared
        assert!(topo.interior_mesh("states").unwrap().is_empty());
    }

    #[test]
    fn test_transform_scales_and_translates() {
        let topo = Topology::from_json_str(US_SQUARES).unwrap();
        let f = topo.features("counties", 5).unwrap();
        assert_eq!(f[0].polygons[0][0][2], [-100.0, 40.5]);
        assert_eq!(f[1].polygons[0][0][1], [-99.0, 40.0]);
        assert_eq!(topo.interior_mesh("states").unwrap().len(), 1);
    }

    #[test]
    fn test_missing_object_and_bad_arc() {
        let topo = Topology::from_json_str(TWO_SQUARES).unwrap();
        assert!(matches!(
            topo.features("nation", 5),
            Err(LoadError::MissingObject(name)) if name == "nation"
        ));

        let bad = r#"{"arcs": [[[0, 0], [1, 1]]], "objects": {
            "c": {"type": "Polygon", "id": "x", "arcs": [[3]]}
        }}"#;
        let topo = Topology::from_json_str(bad).unwrap();
        assert!(matches!(topo.features("c", 5), Err(LoadError::InvalidTopology(_))));
    }

    #[test]
    fn test_untransformed_arcs_are_absolute() {
        let text = r#"{"arcs": [[[-90.5, 40.0], [-90.0, 40.0], [-90.0, 40.5], [-90.5, 40.0]]],
            "objects": {"c": {"type": "Polygon", "id": 7, "arcs": [[0]]}}}"#;
        let topo = Topology::from_json_str(text).unwrap();
        let f = topo.features("c", 5).unwrap();
        assert_eq!(f[0].id, "00007");
        assert_eq!(f[0].polygons[0][0][1], [-90.0, 40.0]);
    }

    #[test]
    fn test_empty_input_is_error() {
        assert!(matches!(Topology::from_json_str(""), Err(LoadError::Empty)));
        assert!(matches!(Topology::from_json_str("{"), Err(LoadError::Json(_))));
    }
}
