use crate::osmsimp::simplify::MIN_RING_COORDS;
use geo::algorithm::contains::Contains;
use geo_types::{Coordinate, LineString, Point, Polygon};

type Coords = Vec<Coordinate<f64>>;

fn is_closed(pts: &[Coordinate<f64>]) -> bool {
    pts.len() >= MIN_RING_COORDS && pts.first() == pts.last()
}

/// Joins way segments end to end into closed rings. Chains which can't be
/// closed are dropped.
pub fn assemble_rings(rel_id: i64, mut segments: Vec<Coords>) -> Vec<LineString<f64>> {
    let mut rings = Vec::new();
    segments.retain(|pts| {
        if is_closed(pts) {
            rings.push(LineString(pts.clone()));
            false
        } else {
            pts.len() >= 2
        }
    });

    while let Some(mut chain) = segments.pop() {
        let mut reversed = false;
        while !is_closed(&chain) {
            let glue_pt = chain[chain.len() - 1];
            if let Some(idx) = segments
                .iter()
                .position(|pts| pts[0] == glue_pt || pts[pts.len() - 1] == glue_pt)
            {
                let mut append = segments.remove(idx);
                if append[0] != glue_pt {
                    append.reverse();
                }
                chain.pop();
                chain.extend(append);
            } else if reversed {
                break;
            } else {
                reversed = true;
                chain.reverse();
            }
        }

        if is_closed(&chain) {
            rings.push(LineString(chain));
        } else {
            log::warn!(
                "Relation {}: dropping unclosed chain of {} coordinates",
                rel_id,
                chain.len()
            );
        }
    }
    rings
}

/// Every outer ring becomes a polygon; holes go to the first polygon that
/// contains their first coordinate.
pub fn build_polygons(rel_id: i64, outers: Vec<Coords>, inners: Vec<Coords>) -> Vec<Polygon<f64>> {
    let shells: Vec<Polygon<f64>> = assemble_rings(rel_id, outers)
        .into_iter()
        .map(|ring| Polygon::new(ring, vec![]))
        .collect();
    let mut holes: Vec<Vec<LineString<f64>>> = vec![Vec::new(); shells.len()];

    for hole in assemble_rings(rel_id, inners) {
        let first = Point(hole.0[0]);
        match shells.iter().position(|shell| shell.contains(&first)) {
            Some(idx) => holes[idx].push(hole),
            None => log::warn!("Relation {}: inner ring outside every outer ring", rel_id),
        }
    }

    shells
        .into_iter()
        .zip(holes)
        .map(|(shell, holes)| {
            let (exterior, _) = shell.into_inner();
            Polygon::new(exterior, holes)
        })
        .collect()
}
