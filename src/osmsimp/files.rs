use crate::osmsimp::error::Error;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

pub const JSON_EXT: &str = ".json";
pub const GEOJSON_EXT: &str = ".geojson";
const SIMPLIFIED_SUFFIX: &str = "_simplified";

/// Indents used when writing results back to disk.
pub const INDENT_2: &[u8] = b"  ";
pub const INDENT_4: &[u8] = b"    ";

pub fn is_json(name: &str) -> bool {
    name.ends_with(JSON_EXT)
}

pub fn is_geojson(name: &str) -> bool {
    name.ends_with(GEOJSON_EXT)
}

pub fn list_data_files(dir: &Path) -> Result<Vec<String>, Error> {
    let mut names = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        if !entry.file_type()?.is_file() {
            continue;
        }
        if let Some(name) = entry.file_name().to_str() {
            if is_json(name) || is_geojson(name) {
                names.push(name.to_string());
            }
        }
    }
    names.sort();
    Ok(names)
}

pub fn ensure_exists(path: &Path) -> Result<(), Error> {
    if path.exists() {
        Ok(())
    } else {
        Err(Error::FileNotFound(path.to_path_buf()))
    }
}

fn with_new_suffix(path: &Path, old: &str, new: &str) -> PathBuf {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let stem = name.strip_suffix(old).unwrap_or(name.as_str());
    path.with_file_name(format!("{}{}", stem, new))
}

/// `area.json` -> `area.geojson`
pub fn geojson_output_path(input: &Path) -> PathBuf {
    with_new_suffix(input, JSON_EXT, GEOJSON_EXT)
}

/// `area.geojson` -> `area_simplified.geojson`
pub fn simplified_output_path(input: &Path) -> PathBuf {
    with_new_suffix(input, GEOJSON_EXT, &format!("{}{}", SIMPLIFIED_SUFFIX, GEOJSON_EXT))
}

/// Where a query result named by the user is written; `.json` is only added once.
pub fn query_output_path(dir: &Path, name: &str) -> PathBuf {
    let name = name.trim();
    if is_json(name) {
        dir.join(name)
    } else {
        dir.join(format!("{}{}", name, JSON_EXT))
    }
}

pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, Error> {
    ensure_exists(path)?;
    let reader = BufReader::new(File::open(path)?);
    Ok(serde_json::from_reader(reader)?)
}

pub fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T, indent: &[u8]) -> Result<(), Error> {
    let mut writer = BufWriter::new(File::create(path)?);
    let mut ser = Serializer::with_formatter(&mut writer, PrettyFormatter::with_indent(indent));
    value.serialize(&mut ser)?;
    writer.write_all(b"\n")?;
    writer.flush()?;
    log::info!("Wrote {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};
    use std::path::Path;

    #[test]
    fn derives_output_names() {
        assert_eq!(
            Path::new("data/area.geojson"),
            geojson_output_path(Path::new("data/area.json"))
        );
        assert_eq!(
            Path::new("area_simplified.geojson"),
            simplified_output_path(Path::new("area.geojson"))
        );
        // only the suffix is replaced
        assert_eq!(
            Path::new("my.json.backup.geojson"),
            geojson_output_path(Path::new("my.json.backup.json"))
        );
        assert_eq!(Path::new("out/q.json"), query_output_path(Path::new("out"), "q"));
        assert_eq!(Path::new("out/q.json"), query_output_path(Path::new("out"), "q.json\n"));
    }

    #[test]
    fn recognizes_extensions() {
        assert!(is_json("a.json"));
        assert!(!is_json("a.geojson"));
        assert!(is_geojson("a.geojson"));
        assert!(!is_geojson("a.json"));
    }

    #[test]
    fn lists_only_json_files_sorted() {
        let dir = tempfile::tempdir().unwrap();
        for name in &["b.geojson", "a.json", "notes.txt", "c.json.bak"] {
            fs::write(dir.path().join(name), "{}").unwrap();
        }
        fs::create_dir(dir.path().join("d.json")).unwrap();
        assert_eq!(
            vec!["a.json".to_string(), "b.geojson".to_string()],
            list_data_files(dir.path()).unwrap()
        );
    }

    #[test]
    fn writes_with_requested_indent() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.json");
        write_json(&path, &json!({"a": [1]}), INDENT_4).unwrap();
        assert_eq!(
            "{\n    \"a\": [\n        1\n    ]\n}\n",
            fs::read_to_string(&path).unwrap()
        );
        let back: Value = read_json(&path).unwrap();
        assert_eq!(json!({"a": [1]}), back);
    }

    #[test]
    fn missing_files_are_reported() {
        let dir = tempfile::tempdir().unwrap();
        match read_json::<Value>(&dir.path().join("nope.json")) {
            Err(Error::FileNotFound(p)) => assert!(p.ends_with("nope.json")),
            other => panic!("Expected FileNotFound, got {:?}", other),
        }
    }
}
