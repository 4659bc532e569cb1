use crate::osmsimp::{
    commands::{convert, query, simplify},
    config::{self, Config},
    error::Error,
    files, text,
};
use std::io::{BufRead, Write};

enum Choice {
    ListFiles,
    ChooseFile,
    Query,
    Convert,
    Simplify,
    Exit,
    Invalid,
}

fn parse_choice(line: &str) -> Choice {
    match line.trim().parse::<u32>() {
        Ok(1) => Choice::ListFiles,
        Ok(2) => Choice::ChooseFile,
        Ok(3) => Choice::Query,
        Ok(4) => Choice::Convert,
        Ok(5) => Choice::Simplify,
        Ok(6) => Choice::Exit,
        _ => Choice::Invalid,
    }
}

struct Menu<'a, R, W> {
    config: &'a Config,
    input: R,
    output: W,
    chosen: Option<String>,
}

impl<'a, R: BufRead, W: Write> Menu<'a, R, W> {
    /// `None` once input runs out.
    fn prompt(&mut self, msg: &str) -> Result<Option<String>, Error> {
        write!(self.output, "{}", msg)?;
        self.output.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(&['\r', '\n'][..]).to_string()))
    }

    fn show(&mut self) -> Result<(), Error> {
        let chosen = self.chosen.as_deref().unwrap_or("None");
        writeln!(self.output, "Chosen file: {}", chosen)?;
        writeln!(self.output, "{}", text::MENU)?;
        Ok(())
    }

    fn list_files(&mut self) -> Result<(), Error> {
        for name in files::list_data_files(&self.config.workdir)? {
            writeln!(self.output, "{}", name)?;
        }
        Ok(())
    }

    fn choose_file(&mut self) -> Result<Option<()>, Error> {
        let name = match self.prompt("Enter the name of the file: ")? {
            Some(n) => n.trim().to_string(),
            None => return Ok(None),
        };
        if !name.is_empty() && self.config.workdir.join(&name).exists() {
            self.chosen = Some(name);
        } else {
            writeln!(self.output, "File not found")?;
            self.chosen = None;
        }
        Ok(Some(()))
    }

    fn query(&mut self) -> Result<Option<()>, Error> {
        let ql = match self.prompt("Paste your Overpass query: ")? {
            Some(q) => q,
            None => return Ok(None),
        };
        let name = match self.prompt("Enter the name of the file: ")? {
            Some(n) => n,
            None => return Ok(None),
        };
        let output = query::output_path(self.config, &name);
        query::run_to_file(self.config, &ql, &output)?;
        writeln!(self.output, "Query results saved to {}", output.display())?;
        Ok(Some(()))
    }

    fn convert(&mut self) -> Result<(), Error> {
        match self.chosen.clone() {
            Some(ref name) if files::is_json(name) => {
                let input = self.config.workdir.join(name);
                let output = files::geojson_output_path(&input);
                let count = convert::convert_file(&input, &output)?;
                writeln!(self.output, "Wrote {} features to {}", count, output.display())?;
            }
            _ => writeln!(self.output, "Please choose a valid JSON file first.")?,
        }
        Ok(())
    }

    fn simplify(&mut self) -> Result<Option<()>, Error> {
        let name = match self.chosen.clone() {
            Some(name) if files::is_geojson(&name) => name,
            _ => {
                writeln!(self.output, "Please choose a valid GeoJSON file first.")?;
                return Ok(Some(()));
            }
        };
        let tolerance = match self.prompt("Enter desired tolerance: ")? {
            Some(raw) => config::parse_tolerance(&raw)?,
            None => return Ok(None),
        };
        let input = self.config.workdir.join(&name);
        let output = files::simplified_output_path(&input);
        let stats = simplify::simplify_file(&input, &output, tolerance)?;
        writeln!(
            self.output,
            "Simplified {} features ({} -> {} coordinates) into {}",
            stats.features,
            stats.coords_before,
            stats.coords_after,
            output.display()
        )?;
        Ok(Some(()))
    }

    /// Runs one menu round. `Ok(false)` means the session is over.
    fn step(&mut self) -> Result<bool, Error> {
        self.show()?;
        let line = match self.prompt("Enter your choice: ")? {
            Some(l) => l,
            None => return Ok(false),
        };
        let res = match parse_choice(&line) {
            Choice::ListFiles => self.list_files().map(Some),
            Choice::ChooseFile => self.choose_file(),
            Choice::Query => self.query(),
            Choice::Convert => self.convert().map(Some),
            Choice::Simplify => self.simplify(),
            Choice::Exit => return Ok(false),
            Choice::Invalid => {
                writeln!(self.output, "Invalid choice")?;
                self.prompt("Press Enter to continue...").map(|l| l.map(|_| ()))
            }
        };
        match res {
            Ok(Some(())) => Ok(true),
            Ok(None) => Ok(false),
            Err(e) => {
                log::debug!("Menu action failed: {:?}", e);
                writeln!(self.output, "Error: {:?}", e)?;
                Ok(true)
            }
        }
    }
}

pub fn run<R: BufRead, W: Write>(config: &Config, input: &mut R, output: &mut W) -> Result<(), Error> {
    let mut menu = Menu {
        config,
        input,
        output,
        chosen: None,
    };
    while menu.step()? {}
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::run;
    use crate::osmsimp::{config::Config, test_server::OneShot};
    use serde_json::Value;
    use std::fs;
    use std::path::Path;

    fn session(dir: &Path, script: &str) -> String {
        let config = Config {
            workdir: dir.to_path_buf(),
            ..Config::default()
        };
        session_with(&config, script)
    }

    fn session_with(config: &Config, script: &str) -> String {
        let mut input = script.as_bytes();
        let mut output = Vec::new();
        run(config, &mut input, &mut output).unwrap();
        String::from_utf8(output).unwrap()
    }

    const OSM: &str = r#"{"elements":[
        {"type":"node","id":1,"lat":0.0,"lon":0.0},
        {"type":"node","id":2,"lat":0.001,"lon":1.0},
        {"type":"node","id":3,"lat":0.0,"lon":2.0},
        {"type":"way","id":10,"nodes":[1,2,3],"tags":{"highway":"track"}}
    ]}"#;

    #[test]
    fn exits_on_choice_six_and_on_end_of_input() {
        let dir = tempfile::tempdir().unwrap();
        let out = session(dir.path(), "6\n1\n");
        assert!(out.starts_with("Chosen file: None\n1. Display all"));
        assert_eq!(1, out.matches("Enter your choice: ").count());

        let out = session(dir.path(), "");
        assert_eq!(1, out.matches("Enter your choice: ").count());
    }

    #[test]
    fn lists_data_files() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("a.json"), "{}").unwrap();
        fs::write(dir.path().join("b.txt"), "").unwrap();
        let out = session(dir.path(), "1\n6\n");
        assert!(out.contains("Enter your choice: a.json\n"));
        assert!(!out.contains("b.txt"));
    }

    #[test]
    fn rejects_missing_and_mistyped_files() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("area.json"), OSM).unwrap();
        let out = session(dir.path(), "2\nnope.json\n4\n2\narea.json\n5\n6\n");
        assert!(out.contains("File not found"));
        assert!(out.contains("Please choose a valid JSON file first."));
        assert!(out.contains("Chosen file: area.json"));
        assert!(out.contains("Please choose a valid GeoJSON file first."));
    }

    #[test]
    fn invalid_choice_waits_for_enter() {
        let dir = tempfile::tempdir().unwrap();
        let out = session(dir.path(), "pizza\n\n6\n");
        assert!(out.contains("Invalid choice\nPress Enter to continue..."));
        assert_eq!(2, out.matches("Enter your choice: ").count());
    }

    #[test]
    fn converts_and_simplifies_the_chosen_file() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("area.json"), OSM).unwrap();
        let out = session(
            dir.path(),
            "2\narea.json\n4\n2\narea.geojson\n5\n0.01\n6\n",
        );
        assert!(out.contains("Wrote 1 features to"));
        assert!(out.contains("Chosen file: area.geojson"));

        let converted = fs::read_to_string(dir.path().join("area.geojson")).unwrap();
        assert!(converted.contains("\n    \"features\": ["));

        let simplified: Value = serde_json::from_str(
            &fs::read_to_string(dir.path().join("area_simplified.geojson")).unwrap(),
        )
        .unwrap();
        assert_eq!(
            serde_json::json!([[0.0, 0.0], [2.0, 0.0]]),
            simplified["features"][0]["geometry"]["coordinates"]
        );
        assert_eq!(
            serde_json::json!("track"),
            simplified["features"][0]["properties"]["tags"]["highway"]
        );
    }

    #[test]
    fn reports_bad_tolerance_and_keeps_going() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("lines.geojson"),
            r#"{"type":"FeatureCollection","features":[]}"#,
        )
        .unwrap();
        let out = session(dir.path(), "2\nlines.geojson\n5\n-3\n6\n");
        assert!(out.contains("Error: InvalidTolerance"));
        assert!(!dir.path().join("lines_simplified.geojson").exists());
    }

    #[test]
    fn saves_overpass_results_to_named_file() {
        let dir = tempfile::tempdir().unwrap();
        let server = OneShot::start(200, r#"{"elements":[{"type":"node","id":1,"lat":1.5,"lon":2.5}]}"#);
        let mut config = Config {
            workdir: dir.path().to_path_buf(),
            ..Config::default()
        };
        config.overpass.url = server.url.clone();

        let out = session_with(&config, "3\nnode(1);out;\nnodes\n6\n");
        assert!(out.contains("Query results saved to"));
        assert!(server.request().contains("data=%5Bout%3Ajson%5D%3Bnode%281%29%3Bout%3B"));

        let saved: Value =
            serde_json::from_str(&fs::read_to_string(dir.path().join("nodes.json")).unwrap()).unwrap();
        assert_eq!(serde_json::json!(2.5), saved["elements"][0]["lon"]);
    }

    #[test]
    fn reports_overpass_errors_and_keeps_going() {
        let dir = tempfile::tempdir().unwrap();
        let server = OneShot::start(400, "line 1: parse error");
        let mut config = Config {
            workdir: dir.path().to_path_buf(),
            ..Config::default()
        };
        config.overpass.url = server.url.clone();

        let out = session_with(&config, "3\nnode(;\nbroken\n6\n");
        server.request();
        assert!(out.contains("Error: OverpassStatus(400)"));
        assert_eq!(2, out.matches("Enter your choice: ").count());
        assert!(!dir.path().join("broken.json").exists());
    }
}
