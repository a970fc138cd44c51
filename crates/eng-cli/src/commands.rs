//! Command implementations. Each command returns a [`Table`] for output.

use crate::config::CrystalConfig;
use crate::dataset::Dataset;
use crate::output::Table;
use anyhow::{Context, Result};
use lib_dsp::polyfit::{optimum_polyfit, PolyfitOptions};
use lib_dsp::unstair::{unstair, UnstairMethod};
use lib_electronics::crystal;
use lib_engio::{auto_format, EngineerIo, NumericInput};
use lib_types::{Farads, Seconds};
use serde_json::json;

/// Parse each value and report its number in base units and its unit.
pub fn parse_values(io: &EngineerIo, values: &[String]) -> Result<Table> {
    let mut table = Table::new(vec!["input", "value", "unit"]);
    for input in values {
        let parsed = io
            .normalize(input)
            .with_context(|| format!("Cannot parse {input:?}"))?;
        table.push(vec![json!(input), json!(parsed.value), json!(parsed.unit)]);
    }
    Ok(table)
}

/// Format a value in engineering notation.
///
/// `unit` overrides the unit given in the input, if any.
pub fn format_value(io: &EngineerIo, input: &str, unit: Option<&str>) -> Result<Table> {
    let parsed = io
        .normalize(input)
        .with_context(|| format!("Cannot parse {input:?}"))?;
    let unit = unit.unwrap_or(&parsed.unit);
    let formatted = io.format_value(parsed.value, unit)?;
    let mut table = Table::new(vec!["input", "formatted"]);
    table.push(vec![json!(input), json!(formatted)]);
    Ok(table)
}

fn farads_row(table: &mut Table, name: &str, value: Farads) -> Result<()> {
    table.push(vec![json!(name), json!(value.0), json!(auto_format(value)?)]);
    Ok(())
}

fn capacitance(name: &str, value: &str) -> Result<Farads> {
    Ok(Farads(
        value
            .to_numeric()
            .with_context(|| format!("Invalid {name}: {value:?}"))?,
    ))
}

/// Load capacitor value for a crystal with load capacitance `cload`.
pub fn crystal_load_caps(cload: &str, parasitics: &CrystalConfig) -> Result<Table> {
    let cpin = capacitance("pin capacitance", &parasitics.pin_capacitance)?;
    let cstray = capacitance("stray capacitance", &parasitics.stray_capacitance)?;
    let cext = crystal::load_capacitors(cload, cpin, cstray)?;

    let mut table = Table::new(vec!["quantity", "value", "formatted"]);
    farads_row(&mut table, "cload", capacitance("load capacitance", cload)?)?;
    farads_row(&mut table, "cpin", cpin)?;
    farads_row(&mut table, "cstray", cstray)?;
    farads_row(&mut table, "load_capacitor", cext)?;
    Ok(table)
}

/// Load capacitance the crystal sees with `cext` on each pin.
pub fn crystal_actual_load(cext: &str, parasitics: &CrystalConfig) -> Result<Table> {
    let cpin = capacitance("pin capacitance", &parasitics.pin_capacitance)?;
    let cstray = capacitance("stray capacitance", &parasitics.stray_capacitance)?;
    let cload = crystal::actual_load_capacitance(cext, cpin, cstray)?;

    let mut table = Table::new(vec!["quantity", "value", "formatted"]);
    farads_row(&mut table, "cext", capacitance("external capacitance", cext)?)?;
    farads_row(&mut table, "cpin", cpin)?;
    farads_row(&mut table, "cstray", cstray)?;
    farads_row(&mut table, "actual_load", cload)?;
    Ok(table)
}

/// Timespan in seconds. Accepts `day`, `year` or engineering notation (`3600 s`, `1k`).
pub fn parse_timespan(input: &str) -> Result<Seconds> {
    match input.trim().to_ascii_lowercase().as_str() {
        "day" | "1 day" => Ok(Seconds::DAY),
        "year" | "1 year" => Ok(Seconds::YEAR),
        _ => Ok(Seconds(
            input
                .to_numeric()
                .with_context(|| format!("Invalid timespan: {input:?}"))?,
        )),
    }
}

/// Clock drift over a timespan for a ppm frequency deviation.
pub fn crystal_deviation(ppm: &str, timespan: &str) -> Result<Table> {
    let span = parse_timespan(timespan)?;
    let drift = crystal::deviation_in_time(ppm, span)?;
    let per_day = crystal::deviation_per_day(ppm)?;
    let per_year = crystal::deviation_per_year(ppm)?;

    let mut table = Table::new(vec!["quantity", "value", "formatted"]);
    for (name, value) in [
        ("timespan", span),
        ("drift", drift),
        ("drift_per_day", per_day),
        ("drift_per_year", per_year),
    ] {
        table.push(vec![json!(name), json!(value.0), json!(auto_format(value)?)]);
    }
    Ok(table)
}

/// Remove stairs from a dataset.
pub fn unstair_dataset(data: &Dataset, method: UnstairMethod, tolerance: f64) -> Result<Dataset> {
    let (x, y) = unstair(&data.x, &data.y, method, tolerance)?;
    tracing::info!(
        "unstair ({}): {} of {} samples kept",
        method,
        x.len(),
        data.len()
    );
    Ok(Dataset { x, y })
}

/// `x,y` rows of a dataset.
pub fn dataset_table(data: &Dataset) -> Table {
    let mut table = Table::new(vec!["x", "y"]);
    for (x, y) in data.x.iter().zip(&data.y) {
        table.push(vec![json!(x), json!(y)]);
    }
    table
}

/// Best polynomial fit of a dataset, one row per raw coefficient.
pub fn polyfit_dataset(data: &Dataset, options: &PolyfitOptions) -> Result<Table> {
    let fit = optimum_polyfit(&data.x, &data.y, options)?;
    tracing::info!("Best fit: degree {} with max residual {:e}", fit.degree, fit.score);

    let mut table = Table::new(vec!["degree", "score", "power", "coefficient"]);
    for (power, coefficient) in fit.poly.coefficients().into_iter().enumerate() {
        table.push(vec![
            json!(fit.degree),
            json!(fit.score),
            json!(power),
            json!(coefficient),
        ]);
    }
    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    #[test]
    fn test_parse_values() {
        let io = EngineerIo::default();
        let table = parse_values(&io, &["1.5kΩ".to_string(), "20 ppm".to_string()]).unwrap();
        assert_eq!(table.rows.len(), 2);
        assert_eq!(table.rows[0][1], json!(1500.0));
        assert_eq!(table.rows[0][2], json!("Ω"));
        assert_eq!(table.rows[1][2], json!("ppm"));
        assert!(parse_values(&io, &["1.2.3".to_string()]).is_err());
    }

    #[test]
    fn test_format_value_unit_override() {
        let io = EngineerIo::default();
        let table = format_value(&io, "0.000005", Some("F")).unwrap();
        assert_eq!(table.rows[0][1], json!("5.00 µF"));
        let table = format_value(&io, "1234 Hz", None).unwrap();
        assert_eq!(table.rows[0][1], json!("1.23 kHz"));
    }

    #[test]
    fn test_crystal_load_caps() {
        let table = crystal_load_caps("10 pF", &CrystalConfig::default()).unwrap();
        let last = &table.rows[3];
        assert_eq!(last[0], json!("load_capacitor"));
        // 2 * (10 pF - 2 pF) - 3 pF
        let value = last[1].as_f64().unwrap();
        assert!((value - 13e-12).abs() < 1e-24);
        assert_eq!(last[2], json!("13.0 pF"));
    }

    #[test]
    fn test_crystal_load_caps_too_small() {
        assert!(crystal_load_caps("1 pF", &CrystalConfig::default()).is_err());
    }

    #[test]
    fn test_crystal_actual_load() {
        let table = crystal_actual_load("13 pF", &CrystalConfig::default()).unwrap();
        let value = table.rows[3][1].as_f64().unwrap();
        assert!((value - 10e-12).abs() < 1e-24);
    }

    #[test]
    fn test_crystal_deviation() {
        let table = crystal_deviation("20 ppm", "day").unwrap();
        let drift = table.rows[1][1].as_f64().unwrap();
        assert!((drift - 1.728).abs() < 1e-9);
        assert_eq!(table.rows[2][1], table.rows[1][1]);
        assert!(parse_timespan("soon").is_err());
        assert_eq!(parse_timespan("3.6k").unwrap(), Seconds(3600.0));
        assert_eq!(parse_timespan("1M").unwrap(), Seconds(1e6));
    }

    #[test]
    fn test_unstair_and_polyfit() {
        let data = Dataset {
            x: (0..6).map(f64::from).collect(),
            y: vec![0.0, 0.0, 1.0, 1.0, 1.0, 2.0],
        };
        let reduced = unstair_dataset(&data, UnstairMethod::Left, 1e-9).unwrap();
        assert_eq!(reduced.x, vec![0.0, 2.0, 5.0]);
        assert_eq!(dataset_table(&reduced).rows.len(), 3);

        let line = Dataset {
            x: (0..10).map(f64::from).collect(),
            y: (0..10).map(|i| 2.0 * i as f64 + 1.0).collect(),
        };
        let opts = PolyfitOptions {
            min_degree: 1,
            max_degree: 1,
        };
        let table = polyfit_dataset(&line, &opts).unwrap();
        assert_eq!(table.rows.len(), 2);
        assert_eq!(table.rows[0][0], json!(1));
        let slope = table.rows[1][3].as_f64().unwrap();
        assert!((slope - 2.0).abs() < 1e-9);
        assert!(matches!(table.rows[0][1], Value::Number(_)));
    }
}
