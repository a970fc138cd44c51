//! Two-column `x,y` datasets read from and written to CSV files.

use anyhow::{bail, Context, Result};
use std::io::Write;
use std::path::Path;

/// Paired samples.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Dataset {
    pub x: Vec<f64>,
    pub y: Vec<f64>,
}

impl Dataset {
    pub fn len(&self) -> usize {
        self.x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }
}

fn parse_field(field: &str) -> Option<f64> {
    let field = field.trim().trim_matches('"');
    field
        .parse::<f64>()
        .ok()
        .or_else(|| lib_engio::normalize(field).ok().map(|v| v.value))
}

fn starts_number(token: &str) -> bool {
    token
        .chars()
        .next()
        .is_some_and(|c| c.is_ascii_digit() || matches!(c, '-' | '+' | '.'))
}

/// Split a row into its x and y fields.
///
/// `;` takes precedence over `,` so that decimal commas survive, and both
/// take precedence over whitespace. In whitespace-separated rows the y field
/// extends over following tokens that do not start a number (`10 mV`).
fn split_row(line: &str) -> Option<(String, String)> {
    for sep in [';', ','] {
        if line.contains(sep) {
            let mut fields = line.split(sep);
            return fields
                .next()
                .zip(fields.next())
                .map(|(x, y)| (x.to_string(), y.to_string()));
        }
    }

    let mut tokens = line.split_whitespace();
    let x = tokens.next()?;
    let mut y = tokens.next()?.to_string();
    for token in tokens.take_while(|t| !starts_number(t)) {
        y.push(' ');
        y.push_str(token);
    }
    Some((x.to_string(), y))
}

/// Parse CSV text into a dataset.
///
/// The first two columns are used. Blank lines and lines starting with `#`
/// are skipped, and a first line that does not parse as numbers is taken
/// as a header. Fields may use engineering notation (`1.5k`, `20 mV`).
pub fn parse_xy(content: &str) -> Result<Dataset> {
    let mut data = Dataset::default();
    let mut seen_first = false;

    for (lineno, line) in content.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let parsed = split_row(line).and_then(|(x, y)| parse_field(&x).zip(parse_field(&y)));
        match parsed {
            Some((x, y)) => {
                data.x.push(x);
                data.y.push(y);
            }
            None if !seen_first => tracing::debug!("Treating line {} as header: {}", lineno + 1, line),
            None => bail!("Line {}: expected two numeric columns, got {:?}", lineno + 1, line),
        }
        seen_first = true;
    }

    if data.is_empty() {
        bail!("No data rows found");
    }
    Ok(data)
}

/// Read a dataset from a CSV file.
pub fn read_xy_csv(path: &Path) -> Result<Dataset> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read dataset: {:?}", path))?;
    let data = parse_xy(&content).with_context(|| format!("Invalid dataset: {:?}", path))?;
    tracing::info!("Read {} samples from {:?}", data.len(), path);
    Ok(data)
}

/// Write `x,y` columns with a header line.
pub fn write_xy_csv(path: &Path, x: &[f64], y: &[f64]) -> Result<()> {
    let mut writer = std::io::BufWriter::new(
        std::fs::File::create(path).with_context(|| format!("Failed to create {:?}", path))?,
    );
    writeln!(writer, "x,y")?;
    for (xi, yi) in x.iter().zip(y) {
        writeln!(writer, "{},{}", xi, yi)?;
    }
    writer.flush()?;
    tracing::info!("Wrote {} samples to {:?}", x.len(), path);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_with_header_and_comments() {
        let data = parse_xy("# capture\ntime,value\n0,1.5\n1,2\n\n2,2.5\n").unwrap();
        assert_eq!(data.x, vec![0.0, 1.0, 2.0]);
        assert_eq!(data.y, vec![1.5, 2.0, 2.5]);
    }

    #[test]
    fn test_parse_separators_and_notation() {
        let data = parse_xy("1;1k\n2;2.2k\n").unwrap();
        assert_eq!(data.y, vec![1000.0, 2200.0]);

        let data = parse_xy("0 10m\n1 20m\n").unwrap();
        assert_eq!(data.x, vec![0.0, 1.0]);
        assert!((data.y[1] - 0.02).abs() < 1e-15);
    }

    #[test]
    fn test_parse_units_after_whitespace() {
        let data = parse_xy("0 10 mV\n1 20 mV\n").unwrap();
        assert_eq!(data.x, vec![0.0, 1.0]);
        assert!((data.y[0] - 0.01).abs() < 1e-15);
        assert!((data.y[1] - 0.02).abs() < 1e-15);

        // Extra numeric columns are still ignored
        let data = parse_xy("0 1 2\n1 3 4\n").unwrap();
        assert_eq!(data.y, vec![1.0, 3.0]);
    }

    #[test]
    fn test_parse_semicolon_with_decimal_comma() {
        let data = parse_xy("0;1,5k\n1;2,5k\n").unwrap();
        assert_eq!(data.x, vec![0.0, 1.0]);
        assert_eq!(data.y, vec![1500.0, 2500.0]);
    }

    #[test]
    fn test_parse_errors() {
        assert!(parse_xy("").is_err());
        assert!(parse_xy("x,y\n").is_err());
        assert!(parse_xy("0,1\nfoo,bar\n").is_err());
        assert!(parse_xy("0,1\n5\n").is_err());
    }

    #[test]
    fn test_roundtrip_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.csv");
        write_xy_csv(&path, &[0.0, 0.5], &[1.0, -2.0]).unwrap();
        let data = read_xy_csv(&path).unwrap();
        assert_eq!(data.x, vec![0.0, 0.5]);
        assert_eq!(data.y, vec![1.0, -2.0]);
    }
}
