pub mod commands;
pub mod config;
pub mod document;
pub mod error;
pub mod files;
pub mod menu;
pub mod multipolygon;
pub mod osm;
pub mod overpass;
pub mod par;
pub mod simplify;
pub mod text;

#[cfg(test)]
mod test_server;
