use crate::osmsimp::{multipolygon, simplify::MIN_RING_COORDS};
use geo_types::{Coordinate, Geometry, LineString, MultiLineString, MultiPolygon, Point, Polygon};
use geojson::{Feature, FeatureCollection};
use serde::Deserialize;
use serde_json::json;
use std::collections::{BTreeMap, HashMap, HashSet};

pub type Tags = BTreeMap<String, String>;

#[derive(Debug, Deserialize)]
pub struct OsmData {
    #[serde(default)]
    pub elements: Vec<Element>,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Element {
    Node(Node),
    Way(Way),
    Relation(Relation),
    #[serde(other)]
    Other,
}

#[derive(Debug, Deserialize)]
pub struct Node {
    pub id: i64,
    pub lat: Option<f64>,
    pub lon: Option<f64>,
    #[serde(default)]
    pub tags: Tags,
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct LatLon {
    pub lat: f64,
    pub lon: f64,
}

#[derive(Debug, Deserialize)]
pub struct Way {
    pub id: i64,
    #[serde(default)]
    pub nodes: Vec<i64>,
    pub geometry: Option<Vec<Option<LatLon>>>,
    #[serde(default)]
    pub tags: Tags,
}

#[derive(Debug, Deserialize)]
pub struct Member {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(rename = "ref")]
    pub id: i64,
    #[serde(default)]
    pub role: String,
    pub geometry: Option<Vec<Option<LatLon>>>,
}

#[derive(Debug, Deserialize)]
pub struct Relation {
    pub id: i64,
    #[serde(default)]
    pub members: Vec<Member>,
    #[serde(default)]
    pub tags: Tags,
}

const AREA_KEYS: &[&str] = &[
    "building",
    "building:part",
    "landuse",
    "amenity",
    "leisure",
    "natural",
    "place",
    "shop",
    "tourism",
    "man_made",
    "historic",
    "military",
    "aeroway",
    "boundary",
    "water",
    "area:highway",
];
const LINEAR_NATURAL: &[&str] = &["coastline", "cliff", "ridge", "arete", "tree_row"];
const AREA_WATERWAYS: &[&str] = &["riverbank", "dock", "boatyard", "dam"];

/// Whether a closed way with these tags describes an area rather than a loop.
pub fn is_area(tags: &Tags) -> bool {
    match tags.get("area").map(String::as_str) {
        Some("no") => return false,
        Some("yes") => return true,
        _ => {}
    }
    if let Some(natural) = tags.get("natural") {
        if LINEAR_NATURAL.contains(&natural.as_str()) {
            return false;
        }
    }
    if let Some(waterway) = tags.get("waterway") {
        if AREA_WATERWAYS.contains(&waterway.as_str()) {
            return true;
        }
    }
    AREA_KEYS.iter().any(|k| tags.contains_key(*k))
}

fn coord(ll: &LatLon) -> Coordinate<f64> {
    Coordinate {
        x: ll.lon,
        y: ll.lat,
    }
}

fn inline_coords(geometry: &[Option<LatLon>]) -> Vec<Coordinate<f64>> {
    geometry.iter().flatten().map(coord).collect()
}

fn feature(kind: &str, id: i64, tags: &Tags, geom: &Geometry<f64>) -> Feature {
    let props = json!({ "type": kind, "id": id, "tags": tags });
    Feature {
        bbox: None,
        geometry: Some(geojson::Geometry::new(geojson::Value::from(geom))),
        id: None,
        properties: props.as_object().cloned(),
        foreign_members: None,
    }
}

struct Index<'a> {
    nodes: HashMap<i64, Coordinate<f64>>,
    ways: HashMap<i64, &'a Way>,
}

impl<'a> Index<'a> {
    fn new(elements: &'a [Element]) -> Index<'a> {
        let mut nodes = HashMap::new();
        let mut ways = HashMap::new();
        for e in elements {
            match e {
                Element::Node(n) => {
                    if let (Some(lat), Some(lon)) = (n.lat, n.lon) {
                        nodes.insert(n.id, Coordinate { x: lon, y: lat });
                    }
                }
                Element::Way(w) => {
                    ways.insert(w.id, w);
                }
                _ => {}
            }
        }
        Index { nodes, ways }
    }

    fn way_coords(&self, way: &Way) -> Vec<Coordinate<f64>> {
        match way.geometry {
            Some(ref g) => inline_coords(g),
            None => way
                .nodes
                .iter()
                .filter_map(|id| {
                    let c = self.nodes.get(id).copied();
                    if c.is_none() {
                        log::debug!("Way {}: missing node {}", way.id, id);
                    }
                    c
                })
                .collect(),
        }
    }

    fn member_coords(&self, m: &Member) -> Option<Vec<Coordinate<f64>>> {
        match (&m.geometry, self.ways.get(&m.id)) {
            (Some(g), _) => Some(inline_coords(g)),
            (None, Some(w)) => Some(self.way_coords(w)),
            (None, None) => None,
        }
    }
}

fn way_geometry(coords: Vec<Coordinate<f64>>, tags: &Tags) -> Geometry<f64> {
    let closed = coords.len() >= MIN_RING_COORDS && coords.first() == coords.last();
    if closed && is_area(tags) {
        Geometry::Polygon(Polygon::new(LineString(coords), vec![]))
    } else {
        Geometry::LineString(LineString(coords))
    }
}

fn relation_geometry(rel: &Relation, index: &Index) -> Option<Geometry<f64>> {
    let mut outers = Vec::new();
    let mut inners = Vec::new();
    let mut lines = Vec::new();
    for m in rel.members.iter().filter(|m| m.kind == "way") {
        match index.member_coords(m) {
            Some(coords) if coords.len() >= 2 => match m.role.as_str() {
                "inner" => inners.push(coords),
                "outer" | "" => outers.push(coords),
                _ => lines.push(coords),
            },
            _ => log::debug!("Relation {}: way member {} has no geometry", rel.id, m.id),
        }
    }

    match rel.tags.get("type").map(String::as_str) {
        Some("multipolygon") | Some("boundary") => {
            let mut polys = multipolygon::build_polygons(rel.id, outers, inners);
            match polys.len() {
                0 => None,
                1 => polys.pop().map(Geometry::Polygon),
                _ => Some(Geometry::MultiPolygon(MultiPolygon(polys))),
            }
        }
        _ => {
            let members: Vec<LineString<f64>> = outers
                .into_iter()
                .chain(inners)
                .chain(lines)
                .map(LineString)
                .collect();
            if members.is_empty() {
                None
            } else {
                Some(Geometry::MultiLineString(MultiLineString(members)))
            }
        }
    }
}

pub fn to_feature_collection(data: &OsmData) -> FeatureCollection {
    let index = Index::new(&data.elements);

    let mut used_nodes = HashSet::new();
    let mut used_ways = HashSet::new();
    for e in &data.elements {
        match e {
            Element::Way(w) => used_nodes.extend(w.nodes.iter().copied()),
            Element::Relation(r) => used_ways.extend(
                r.members
                    .iter()
                    .filter(|m| m.kind == "way")
                    .map(|m| m.id),
            ),
            _ => {}
        }
    }

    let mut features = Vec::new();
    for e in &data.elements {
        match e {
            Element::Node(n) => {
                if !n.tags.is_empty() || !used_nodes.contains(&n.id) {
                    if let (Some(lat), Some(lon)) = (n.lat, n.lon) {
                        let geom = Geometry::Point(Point::new(lon, lat));
                        features.push(feature("node", n.id, &n.tags, &geom));
                    }
                }
            }
            Element::Way(w) => {
                if w.tags.is_empty() && used_ways.contains(&w.id) {
                    continue;
                }
                let coords = index.way_coords(w);
                if coords.len() < 2 {
                    log::warn!("Way {}: only {} coordinates, skipping", w.id, coords.len());
                    continue;
                }
                features.push(feature("way", w.id, &w.tags, &way_geometry(coords, &w.tags)));
            }
            Element::Relation(r) => match relation_geometry(r, &index) {
                Some(geom) => features.push(feature("relation", r.id, &r.tags, &geom)),
                None => log::warn!("Relation {}: no usable geometry, skipping", r.id),
            },
            Element::Other => {}
        }
    }
    log::info!(
        "Converted {} of {} OSM elements",
        features.len(),
        data.elements.len()
    );

    FeatureCollection {
        bbox: None,
        features,
        foreign_members: None,
    }
}
