use geo::algorithm::coords_iter::CoordsIter;
use geo::algorithm::simplify::Simplify;
use geo_types::{Geometry, LineString, MultiLineString, MultiPolygon, Polygon};

/// Smallest ring that still closes around three distinct vertices.
pub const MIN_RING_COORDS: usize = 4;

/// Simplifies one open or closed coordinate sequence. Implementations are
/// expected to keep the first and last coordinate.
pub trait SimplifyCoords {
    fn simplify_coords(&self, coords: &LineString<f64>, tolerance: f64) -> LineString<f64>;
}

/// Ramer–Douglas–Peucker, via `geo`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Rdp;

impl SimplifyCoords for Rdp {
    fn simplify_coords(&self, coords: &LineString<f64>, tolerance: f64) -> LineString<f64> {
        coords.simplify(&tolerance)
    }
}

impl<F> SimplifyCoords for F
where
    F: Fn(&LineString<f64>, f64) -> LineString<f64>,
{
    fn simplify_coords(&self, coords: &LineString<f64>, tolerance: f64) -> LineString<f64> {
        self(coords, tolerance)
    }
}

pub fn simplify(geom: Geometry<f64>, tolerance: f64) -> Geometry<f64> {
    simplify_with(geom, tolerance, &Rdp)
}

pub fn simplify_with<S>(geom: Geometry<f64>, tolerance: f64, coords: &S) -> Geometry<f64>
where
    S: SimplifyCoords + ?Sized,
{
    // e.g. LINESTRING EMPTY
    if geom.coords_count() == 0 {
        return geom;
    }
    match geom {
        Geometry::LineString(line) => {
            Geometry::LineString(coords.simplify_coords(&line, tolerance))
        }
        // A collapsed exterior keeps the whole polygon as it was.
        Geometry::Polygon(poly) => match simplify_polygon(&poly, tolerance, coords) {
            Some(simplified) => Geometry::Polygon(simplified),
            None => Geometry::Polygon(poly),
        },
        Geometry::MultiLineString(lines) => Geometry::MultiLineString(MultiLineString(
            lines
                .0
                .iter()
                .map(|line| coords.simplify_coords(line, tolerance))
                .collect(),
        )),
        // Unlike a lone polygon, a collapsed member is dropped.
        Geometry::MultiPolygon(polys) => Geometry::MultiPolygon(MultiPolygon(
            polys
                .0
                .iter()
                .filter_map(|poly| simplify_polygon(poly, tolerance, coords))
                .collect(),
        )),
        other => other,
    }
}

/// `None` when the simplified exterior is no longer a ring. Interior rings
/// that degenerate are removed.
fn simplify_polygon<S>(poly: &Polygon<f64>, tolerance: f64, coords: &S) -> Option<Polygon<f64>>
where
    S: SimplifyCoords + ?Sized,
{
    let exterior = coords.simplify_coords(poly.exterior(), tolerance);
    if exterior.0.len() < MIN_RING_COORDS {
        return None;
    }
    let interiors = poly
        .interiors()
        .iter()
        .map(|ring| coords.simplify_coords(ring, tolerance))
        .filter(|ring| ring.0.len() >= MIN_RING_COORDS)
        .collect();
    Some(Polygon::new(exterior, interiors))
}
