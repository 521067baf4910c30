// crates/ecoglobe-core/src/model/geometry.rs

//! Country shapes from a TopoJSON topology or a GeoJSON collection.
//!
//! Only what the pipeline needs is kept: the display name, the id and the
//! decoded lon/lat rings (so a renderer or the focus logic can use them).

use crate::error::{GlobeError, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

/// `[lon, lat]` in degrees.
pub type Position = [f64; 2];
/// Closed ring of positions.
pub type Ring = Vec<Position>;
/// Exterior ring followed by holes.
pub type Polygon = Vec<Ring>;

/// A country boundary with its display name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GeometryFeature {
    pub id: Option<String>,
    /// `properties.name` of the source feature.
    pub name: Option<String>,
    /// Geometry type as declared by the source (`Polygon`, `MultiPolygon`, ...).
    pub geometry_type: Option<String>,
    pub polygons: Vec<Polygon>,
}

impl GeometryFeature {
    /// A named feature without geometry.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Default::default()
        }
    }

    /// Spherical mean of the exterior-ring vertices, as `[lon, lat]`.
    ///
    /// `None` when the feature has no vertices or the vertices cancel out.
    pub fn centroid(&self) -> Option<Position> {
        let (mut x, mut y, mut z, mut n) = (0.0_f64, 0.0_f64, 0.0_f64, 0usize);
        for ring in self.polygons.iter().filter_map(|p| p.first()) {
            // The closing vertex repeats the first one.
            let open = match (ring.first(), ring.last()) {
                (Some(a), Some(b)) if ring.len() > 1 && a == b => &ring[..ring.len() - 1],
                _ => &ring[..],
            };
            for [lon, lat] in open {
                let (lambda, phi) = (lon.to_radians(), lat.to_radians());
                x += phi.cos() * lambda.cos();
                y += phi.cos() * lambda.sin();
                z += phi.sin();
                n += 1;
            }
        }
        if n == 0 {
            return None;
        }
        let (x, y, z) = (x / n as f64, y / n as f64, z / n as f64);
        let norm = (x * x + y * y + z * z).sqrt();
        if norm < 1e-9 {
            return None;
        }
        let lon = y.atan2(x).to_degrees();
        let lat = z.atan2(x.hypot(y)).to_degrees();
        Some([lon, lat])
    }
}

/// Parses a topology (features of `objects.<object_name>`) or a GeoJSON
/// `FeatureCollection` / `Feature`.
pub fn parse_geometry(text: &str, object_name: &str) -> Result<Vec<GeometryFeature>> {
    let doc: Value = serde_json::from_str(text)?;
    match doc.get("type").and_then(Value::as_str) {
        Some("Topology") => {
            let topo: Topology = serde_json::from_value(doc)?;
            topo.features(object_name)
        }
        Some("FeatureCollection") => {
            let fc: GeoFeatureCollection = serde_json::from_value(doc)?;
            fc.features.into_iter().map(GeoFeature::into_feature).collect()
        }
        Some("Feature") => {
            let f: GeoFeature = serde_json::from_value(doc)?;
            Ok(vec![f.into_feature()?])
        }
        other => Err(GlobeError::InvalidData(format!(
            "unsupported geometry document type: {other:?}"
        ))),
    }
}

// ---------------------------------------------------------------------------
// TopoJSON
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct Topology {
    objects: HashMap<String, TopoObject>,
    #[serde(default)]
    arcs: Vec<Vec<Vec<f64>>>,
    transform: Option<Transform>,
}

#[derive(Debug, Clone, Copy, Deserialize)]
struct Transform {
    scale: [f64; 2],
    translate: [f64; 2],
}

#[derive(Debug, Deserialize)]
struct TopoObject {
    #[serde(rename = "type")]
    kind: Option<String>,
    id: Option<Value>,
    properties: Option<HashMap<String, Value>>,
    arcs: Option<Value>,
    #[serde(default)]
    geometries: Vec<TopoObject>,
}

impl Topology {
    fn features(self, object_name: &str) -> Result<Vec<GeometryFeature>> {
        let Topology {
            mut objects,
            arcs,
            transform,
        } = self;
        let object = objects.remove(object_name).ok_or_else(|| {
            GlobeError::InvalidData(format!("topology has no object named {object_name:?}"))
        })?;
        let arcs = decode_arcs(&arcs, transform);

        let geometries = if object.kind.as_deref() == Some("GeometryCollection") {
            object.geometries
        } else {
            vec![object]
        };
        geometries
            .into_iter()
            .map(|g| g.into_feature(&arcs))
            .collect()
    }
}

impl TopoObject {
    fn into_feature(self, arcs: &[Vec<Position>]) -> Result<GeometryFeature> {
        let polygons = match (self.kind.as_deref(), self.arcs) {
            (Some("Polygon"), Some(a)) => {
                let rings: Vec<Vec<i64>> = serde_json::from_value(a)?;
                vec![stitch_polygon(&rings, arcs)?]
            }
            (Some("MultiPolygon"), Some(a)) => {
                let polys: Vec<Vec<Vec<i64>>> = serde_json::from_value(a)?;
                polys
                    .iter()
                    .map(|rings| stitch_polygon(rings, arcs))
                    .collect::<Result<_>>()?
            }
            _ => Vec::new(),
        };
        Ok(GeometryFeature {
            id: self.id.as_ref().and_then(id_string),
            name: self.properties.as_ref().and_then(name_property),
            geometry_type: self.kind,
            polygons,
        })
    }
}

/// Absolute positions of every arc (delta-decoded when quantized).
fn decode_arcs(arcs: &[Vec<Vec<f64>>], transform: Option<Transform>) -> Vec<Vec<Position>> {
    arcs.iter()
        .map(|arc| match transform {
            Some(t) => {
                let (mut x, mut y) = (0.0, 0.0);
                arc.iter()
                    .filter(|p| p.len() >= 2)
                    .map(|p| {
                        x += p[0];
                        y += p[1];
                        [x * t.scale[0] + t.translate[0], y * t.scale[1] + t.translate[1]]
                    })
                    .collect()
            }
            None => arc
                .iter()
                .filter(|p| p.len() >= 2)
                .map(|p| [p[0], p[1]])
                .collect(),
        })
        .collect()
}

fn stitch_polygon(rings: &[Vec<i64>], arcs: &[Vec<Position>]) -> Result<Polygon> {
    rings.iter().map(|ring| stitch_ring(ring, arcs)).collect()
}

/// Concatenates arcs into a ring; `~i` (negative) walks arc `i` backwards.
/// Consecutive arcs share an endpoint, which is kept once.
fn stitch_ring(indices: &[i64], arcs: &[Vec<Position>]) -> Result<Ring> {
    let mut ring: Ring = Vec::new();
    for &i in indices {
        let (idx, reversed) = if i >= 0 { (i as usize, false) } else { (!i as usize, true) };
        let arc = arcs
            .get(idx)
            .ok_or_else(|| GlobeError::InvalidData(format!("arc index {i} out of range")))?;
        ring.pop();
        if reversed {
            ring.extend(arc.iter().rev().copied());
        } else {
            ring.extend(arc.iter().copied());
        }
    }
    Ok(ring)
}

// ---------------------------------------------------------------------------
// GeoJSON
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct GeoFeatureCollection {
    #[serde(default)]
    features: Vec<GeoFeature>,
}

#[derive(Debug, Deserialize)]
struct GeoFeature {
    id: Option<Value>,
    properties: Option<HashMap<String, Value>>,
    geometry: Option<GeoGeometry>,
}

#[derive(Debug, Deserialize)]
struct GeoGeometry {
    #[serde(rename = "type")]
    kind: String,
    coordinates: Option<Value>,
}

impl GeoFeature {
    fn into_feature(self) -> Result<GeometryFeature> {
        let (geometry_type, polygons) = match self.geometry {
            Some(g) => {
                let polygons = match (g.kind.as_str(), g.coordinates) {
                    ("Polygon", Some(c)) => {
                        let rings: Vec<Vec<Vec<f64>>> = serde_json::from_value(c)?;
                        vec![to_polygon(rings)]
                    }
                    ("MultiPolygon", Some(c)) => {
                        let polys: Vec<Vec<Vec<Vec<f64>>>> = serde_json::from_value(c)?;
                        polys.into_iter().map(to_polygon).collect()
                    }
                    _ => Vec::new(),
                };
                (Some(g.kind), polygons)
            }
            None => (None, Vec::new()),
        };
        Ok(GeometryFeature {
            id: self.id.as_ref().and_then(id_string),
            name: self.properties.as_ref().and_then(name_property),
            geometry_type,
            polygons,
        })
    }
}

fn to_polygon(rings: Vec<Vec<Vec<f64>>>) -> Polygon {
    rings
        .into_iter()
        .map(|ring| {
            ring.into_iter()
                .filter(|p| p.len() >= 2)
                .map(|p| [p[0], p[1]])
                .collect()
        })
        .collect()
}

fn id_string(v: &Value) -> Option<String> {
    match v {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn name_property(props: &HashMap<String, Value>) -> Option<String> {
    props.get("name").and_then(Value::as_str).map(str::to_owned)
}
