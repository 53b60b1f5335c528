use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

use log::info;

use super::continent::ContinentTable;
use super::error::DatasetError;
use super::model::{CsvRow, HappinessDataset};

/// Columns every combined happiness CSV must carry.
pub const REQUIRED_COLUMNS: [&str; 9] = [
    "Country",
    "Year",
    "Happiness Rank",
    "Happiness Score",
    "GDP per capita",
    "Life expectancy",
    "Freedom",
    "Trust",
    "Generosity",
];

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load the combined happiness CSV and classify every row by continent.
///
/// Rows whose country is not in `continents` are dropped.
pub fn load_file(
    path: &Path,
    continents: &ContinentTable,
) -> Result<HappinessDataset, DatasetError> {
    let file = File::open(path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => DatasetError::NotFound {
            path: path.to_path_buf(),
        },
        _ => DatasetError::Io {
            path: path.to_path_buf(),
            source: e,
        },
    })?;

    let rows = read_rows(file)?;
    info!("Read {} rows from {}", rows.len(), path.display());

    Ok(continents.classify_rows(rows))
}

// ---------------------------------------------------------------------------
// CSV parsing
// ---------------------------------------------------------------------------

/// Parse CSV rows, checking the header row against [`REQUIRED_COLUMNS`]
/// first. Extra columns are ignored.
pub fn read_rows<R: Read>(input: R) -> Result<Vec<CsvRow>, DatasetError> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(input);

    let headers = reader
        .headers()
        .map_err(|source| DatasetError::Row { row: 0, source })?
        .clone();
    let missing: Vec<String> = REQUIRED_COLUMNS
        .iter()
        .filter(|col| !headers.iter().any(|h| h == **col))
        .map(|col| col.to_string())
        .collect();
    if !missing.is_empty() {
        return Err(DatasetError::MissingColumns(missing));
    }

    reader
        .deserialize::<CsvRow>()
        .enumerate()
        .map(|(i, result)| {
            result.map_err(|source| DatasetError::Row { row: i + 1, source })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::{Continent, Metric};
    use tempfile::TempDir;

    const HEADER: &str = "Country,Year,Happiness Rank,Happiness Score,\
                          GDP per capita,Life expectancy,Freedom,Trust,Generosity";

    fn table() -> ContinentTable {
        ContinentTable::from_lists(vec![
            (Continent::Europe, vec!["Finland", "Denmark"]),
            (Continent::Africa, vec!["Togo"]),
        ])
    }

    fn write_csv(dir: &TempDir, body: &str) -> std::path::PathBuf {
        let path = dir.path().join("world_happiness_combined.csv");
        std::fs::write(&path, body).unwrap();
        path
    }

    #[test]
    fn test_missing_file_is_not_found() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nope.csv");
        let err = load_file(&path, &table()).unwrap_err();
        assert!(matches!(err, DatasetError::NotFound { .. }));
        assert!(err.to_string().contains("nope.csv"));
    }

    #[test]
    fn test_load_classifies_rows_in_file_order() {
        let dir = TempDir::new().unwrap();
        let body = format!(
            "{HEADER}\n\
             Denmark,2015,3,7.527,1.32548,0.87464,0.64938,0.48357,0.34139\n\
             Narnia,2015,50,5.0,1.0,0.5,0.5,0.1,0.1\n\
             Togo,2015,158,2.839,0.20868,0.28443,0.36453,0.10731,0.16681\n\
             Finland,2019,1,7.769,1.34,0.986,0.596,0.393,0.153\n"
        );
        let path = write_csv(&dir, &body);

        let ds = load_file(&path, &table()).unwrap();
        assert_eq!(ds.len(), 3);
        assert_eq!(ds.dropped_rows, 1);
        assert_eq!(ds.records[0].country, "Denmark");
        assert_eq!(ds.records[1].continent, Continent::Africa);
        assert_eq!(ds.records[2].year, 2019);
        assert_eq!(Metric::Trust.value(&ds.records[2]), 0.393);
    }

    #[test]
    fn test_missing_columns_are_all_reported() {
        let body = "Country,Year,Happiness Rank,Happiness Score,GDP per capita,Freedom\n\
                    Finland,2019,1,7.7,1.3,0.5\n";
        let err = read_rows(body.as_bytes()).unwrap_err();
        match err {
            DatasetError::MissingColumns(cols) => {
                assert_eq!(cols, vec!["Life expectancy", "Trust", "Generosity"]);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_extra_columns_are_ignored() {
        let body =
            format!("Region,{HEADER}\nWestern Europe,Finland,2019,1,7.7,1.3,0.9,0.5,0.4,0.1\n");
        let rows = read_rows(body.as_bytes()).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].country, "Finland");
        assert_eq!(rows[0].generosity, 0.1);
    }

    #[test]
    fn test_non_numeric_value_reports_row() {
        let body = format!(
            "{HEADER}\n\
             Finland,2019,1,7.7,1.3,0.9,0.5,0.4,0.1\n\
             Denmark,2019,2,high,1.3,0.9,0.5,0.4,0.1\n"
        );
        let err = read_rows(body.as_bytes()).unwrap_err();
        assert!(matches!(err, DatasetError::Row { row: 2, .. }));
    }

    #[test]
    fn test_blank_metric_cell_reads_as_nan() {
        let body = format!(
            "{HEADER}\n\
             Finland,2018,1,7.632,1.305,0.874,0.681,0.393,0.202\n\
             United Arab Emirates,2018,20,6.774,2.096,0.670,0.284,,0.186\n"
        );
        let rows = read_rows(body.as_bytes()).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1].country, "United Arab Emirates");
        assert!(rows[1].trust.is_nan());
        assert_eq!(rows[1].freedom, 0.284);
        assert_eq!(rows[1].generosity, 0.186);
        assert_eq!(rows[0].trust, 0.393);
    }

    #[test]
    fn test_blank_cell_survives_classification() {
        let dir = TempDir::new().unwrap();
        let body = format!(
            "{HEADER}\n\
             Denmark,2018,3,7.555,1.351,0.868,0.683,,0.284\n\
             Togo,2018,139,3.999,0.259,0.253,0.364,0.110,\n"
        );
        let path = write_csv(&dir, &body);

        let ds = load_file(&path, &table()).unwrap();
        assert_eq!(ds.len(), 2);
        assert!(Metric::Trust.value(&ds.records[0]).is_nan());
        assert!(Metric::Generosity.value(&ds.records[1]).is_nan());
        assert_eq!(Metric::Trust.value(&ds.records[1]), 0.110);
    }
}
