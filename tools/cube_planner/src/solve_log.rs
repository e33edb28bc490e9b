use anyhow::{Context, Result};
use chrono::{DateTime, Local};
use cube_logic::{Bgr, CubeRead};
use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

/// One tab separated line: timestamp, winning method, cube string, solver reply and the
/// scanned colors in scan order as a JSON list of `[b, g, r]`, so the read can be replayed.
pub fn format_entry(at: DateTime<Local>, read: &CubeRead, colors: &[Bgr]) -> Result<String> {
    let rows: Vec<[u8; 3]> = colors.iter().map(|c| [c.b, c.g, c.r]).collect();
    let colors = serde_json::to_string(&rows)?;
    let cube = read
        .cube_string
        .as_ref()
        .map(|c| c.to_string())
        .unwrap_or_default();
    Ok(format!(
        "{}\t{}\t{}\t{}\t{}",
        at.format("%Y%m%d_%H%M%S"),
        read.method,
        cube,
        read.reply,
        colors
    ))
}

/// Appends to the log, writing the header first when the file is new.
pub fn append(path: &Path, read: &CubeRead, colors: &[Bgr]) -> Result<()> {
    let entry = format_entry(Local::now(), read, colors)?;
    let is_new = !path.exists();
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("opening solve log {}", path.display()))?;
    if is_new {
        writeln!(file, "Date\tColorAnalysisWinner\tCubeStatus\tSolution\tScanColors")?;
    }
    writeln!(file, "{}", entry)
        .with_context(|| format!("writing solve log {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use cube_logic::{DetectMethod, SolverReply};

    #[test]
    fn entry_columns() {
        let at = Local.with_ymd_and_hms(2024, 3, 9, 14, 5, 7).unwrap();
        let read = CubeRead {
            method: DetectMethod::Hue,
            classification: None,
            cube_string: Some(
                "UUUUUUUUURRRRRRRRRFFFFFFFFFDDDDDDDDDLLLLLLLLLBBBBBBBBB"
                    .parse()
                    .unwrap(),
            ),
            reply: SolverReply::parse("R1 U2 (2f)"),
        };
        let colors: Vec<Bgr> = (0..54u8).map(|i| Bgr::new(i, 255 - i, i / 2)).collect();
        let line = format_entry(at, &read, &colors).unwrap();
        let cols: Vec<&str> = line.split('\t').collect();
        assert_eq!(cols[0], "20240309_140507");
        assert_eq!(cols[1], "HSV");
        assert_eq!(cols[2].len(), 54);
        assert_eq!(cols[3], "2 moves  R1 U2");
        assert_eq!(cols.len(), 5);
        let rows: Vec<[u8; 3]> = serde_json::from_str(cols[4]).unwrap();
        let replayed: Vec<Bgr> = rows.into_iter().map(Bgr::from).collect();
        assert_eq!(replayed, colors);
    }

    #[test]
    fn append_writes_header_once() {
        let path = std::env::temp_dir().join(format!("cube_planner_solves_{}.tsv", std::process::id()));
        let _ = std::fs::remove_file(&path);
        let read = CubeRead {
            method: DetectMethod::Distance,
            classification: None,
            cube_string: None,
            reply: SolverReply::Error("Error: Some facelets are undefined".into()),
        };
        let colors = vec![Bgr::new(1, 2, 3); 54];
        append(&path, &read, &colors).unwrap();
        append(&path, &read, &colors).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].ends_with("\tScanColors"));
        for line in &lines[1..] {
            let cols: Vec<&str> = line.split('\t').collect();
            assert_eq!(cols.len(), 5);
            assert_eq!(cols[2], "");
            let rows: Vec<[u8; 3]> = serde_json::from_str(cols[4]).unwrap();
            assert_eq!(rows, vec![[1, 2, 3]; 54]);
        }

        std::fs::remove_file(&path).unwrap();
    }
}
