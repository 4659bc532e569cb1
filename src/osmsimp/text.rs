pub const MAIN_ABOUT: &str = "osmsimp - fetch, convert and simplify OpenStreetMap data";

pub const MAIN_AFTER_HELP: &str = r#"
Run without a subcommand to get the interactive menu.

A typical session:

$ echo 'way[building](52.22,21.00,52.23,21.01);out geom;' | osmsimp query buildings
$ osmsimp convert buildings.json
$ osmsimp simplify 0.00001 --input buildings.geojson
  -> buildings_simplified.geojson
"#;

pub const QUERY_AFTER_HELP: &str = r#"
The query is read from --query, or else from STDIN.

If the query does not set an output format, [out:json]; is prepended.
Other output formats (xml, csv) are rejected since the result has to be
converted to GeoJSON later.
"#;

pub const SIMPLIFY_AFTER_HELP: &str = r#"
Reduces vertices of LineString, Polygon, MultiLineString and
MultiPolygon geometries using Ramer-Douglas-Peucker. Tolerance is in
the units of the coordinates (degrees for OSM data).

Polygon rings which shrink below 4 points are removed. If the exterior
ring of a Polygon collapses, the Polygon is kept unsimplified; a
collapsed member of a MultiPolygon is dropped.

With --input the result is written next to the input file as
<name>_simplified.geojson. Without it, GeoJSON is read from STDIN and
written to STDOUT.
"#;

pub const MENU: &str = "1. Display all json/geojson files in the current directory
2. Choose a file
3. Run an Overpass query (make a json file)
4. Convert JSON --> GeoJSON
5. Simplify GeoJSON
6. Exit";
