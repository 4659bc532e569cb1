use crate::osmsimp::{
    error::Error,
    par,
    simplify::{self, Rdp, SimplifyCoords},
};
use geo::algorithm::coords_iter::CoordsIter;
use geo_types::Geometry;
use geojson::{Feature, FeatureCollection, GeoJson};
use std::convert::TryInto;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SimplifyStats {
    pub features: usize,
    pub coords_before: usize,
    pub coords_after: usize,
}

impl SimplifyStats {
    fn add(self, other: SimplifyStats) -> SimplifyStats {
        SimplifyStats {
            features: self.features + other.features,
            coords_before: self.coords_before + other.coords_before,
            coords_after: self.coords_after + other.coords_after,
        }
    }
}

pub fn simplify_document(gj: GeoJson, tolerance: f64) -> Result<(GeoJson, SimplifyStats), Error> {
    simplify_document_with(gj, tolerance, &Rdp)
}

pub fn simplify_document_with<S>(
    gj: GeoJson,
    tolerance: f64,
    coords: &S,
) -> Result<(GeoJson, SimplifyStats), Error>
where
    S: SimplifyCoords + Sync + ?Sized,
{
    match gj {
        GeoJson::Geometry(g) => {
            let (g, stats) = simplify_gj_geometry(g, tolerance, coords)?;
            Ok((GeoJson::Geometry(g), stats))
        }
        GeoJson::Feature(f) => {
            let (f, stats) = simplify_feature(f, tolerance, coords)?;
            Ok((GeoJson::Feature(f), stats))
        }
        GeoJson::FeatureCollection(fc) => {
            let results = par::map_ordered(fc.features, |f| simplify_feature(f, tolerance, coords));
            let mut features = Vec::with_capacity(results.len());
            let mut stats = SimplifyStats::default();
            for res in results {
                let (f, s) = res?;
                features.push(f);
                stats = stats.add(s);
            }
            let fc = FeatureCollection {
                bbox: None,
                features,
                foreign_members: fc.foreign_members,
            };
            Ok((GeoJson::FeatureCollection(fc), stats))
        }
    }
}

fn simplify_feature<S>(
    feature: Feature,
    tolerance: f64,
    coords: &S,
) -> Result<(Feature, SimplifyStats), Error>
where
    S: SimplifyCoords + ?Sized,
{
    let (geometry, stats) = match feature.geometry {
        Some(g) => {
            let (g, stats) = simplify_gj_geometry(g, tolerance, coords)?;
            (Some(g), stats)
        }
        None => (
            None,
            SimplifyStats {
                features: 1,
                ..SimplifyStats::default()
            },
        ),
    };
    let feature = Feature {
        bbox: None,
        geometry,
        id: feature.id,
        properties: feature.properties,
        foreign_members: feature.foreign_members,
    };
    Ok((feature, stats))
}

fn simplify_gj_geometry<S>(
    gj_geom: geojson::Geometry,
    tolerance: f64,
    coords: &S,
) -> Result<(geojson::Geometry, SimplifyStats), Error>
where
    S: SimplifyCoords + ?Sized,
{
    let geom: Geometry<f64> = gj_geom.value.try_into()?;
    let coords_before = geom.coords_count();
    let simplified = simplify::simplify_with(geom, tolerance, coords);
    let stats = SimplifyStats {
        features: 1,
        coords_before,
        coords_after: simplified.coords_count(),
    };
    let mut out = geojson::Geometry::new(geojson::Value::from(&simplified));
    out.foreign_members = gj_geom.foreign_members;
    Ok((out, stats))
}
