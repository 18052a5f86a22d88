use super::error::CsvError;
use crate::core::Dataset;
use crate::core::attributes::Attribute;
use crate::splits::Partition;
use std::fs::{self, File};
use std::path::Path;

/// Reads a dataset from a CSV file with a header row.
///
/// A column becomes quantitative when every cell parses as `f64`, otherwise
/// qualitative. The last column is the class and is always qualitative.
/// The dataset is named after the file stem.
pub fn read_csv<P: AsRef<Path>>(path: P) -> Result<Dataset, CsvError> {
    let path = path.as_ref();
    let file = File::open(path)?;
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(file);

    let names: Vec<String> = rdr.headers()?.iter().map(str::to_string).collect();
    if names.is_empty() || (names.len() == 1 && names[0].is_empty()) {
        return Err(CsvError::EmptyFile);
    }
    let n_cols = names.len();

    let mut columns: Vec<Vec<String>> = vec![Vec::new(); n_cols];
    for (i, result) in rdr.records().enumerate() {
        let record = result?;
        if record.len() != n_cols {
            return Err(CsvError::InconsistentColumns {
                row: i + 2,
                actual: record.len(),
                expected: n_cols,
            });
        }
        for (column, field) in columns.iter_mut().zip(record.iter()) {
            column.push(field.to_string());
        }
    }

    let class_col = n_cols - 1;
    let attributes: Vec<Attribute> = names
        .into_iter()
        .zip(columns)
        .enumerate()
        .map(|(i, (name, cells))| {
            if i == class_col {
                return Attribute::qualitative(name, cells);
            }
            let parsed: Result<Vec<f64>, _> = cells.iter().map(|c| c.parse::<f64>()).collect();
            match parsed {
                Ok(values) => Attribute::quantitative(name, values),
                Err(_) => Attribute::qualitative(name, cells),
            }
        })
        .collect();

    let name = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "unnamed_relation".to_string());
    let dataset = Dataset::new(name, attributes)?;
    log::info!(
        "loaded '{}' from {}: {} cases, {} attributes",
        dataset.name(),
        path.display(),
        dataset.number_of_cases(),
        dataset.number_of_attributes()
    );
    Ok(dataset)
}

/// Writes `dataset` as CSV with a header row. Weights are not persisted.
pub fn write_csv<P: AsRef<Path>>(dataset: &Dataset, path: P) -> Result<(), CsvError> {
    if dataset.number_of_attributes() == 0 {
        return Err(CsvError::InsufficientColumns);
    }
    let mut wtr = csv::Writer::from_path(path.as_ref())?;
    wtr.write_record(dataset.attributes().iter().map(Attribute::name))?;
    for instance in dataset.instances() {
        wtr.write_record(instance.values().iter().map(ToString::to_string))?;
    }
    wtr.flush()?;
    Ok(())
}

/// Writes `train.csv` and `test.csv` into `dir`, creating it if needed.
pub fn write_partition<P: AsRef<Path>>(partition: &Partition, dir: P) -> Result<(), CsvError> {
    let dir = dir.as_ref();
    fs::create_dir_all(dir)?;
    write_csv(&partition.train, dir.join("train.csv"))?;
    write_csv(&partition.test, dir.join("test.csv"))?;
    log::info!("wrote partition to {}", dir.display());
    Ok(())
}

/// Reads back a partition written by [`write_partition`].
pub fn read_partition<P: AsRef<Path>>(dir: P) -> Result<Partition, CsvError> {
    let dir = dir.as_ref();
    let train = read_csv(dir.join("train.csv"))?;
    let test = read_csv(dir.join("test.csv"))?;
    Ok(Partition::new(train, test)?)
}
