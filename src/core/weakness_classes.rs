use crate::common::csv_utils;
use crate::errors::AppError;
use log::warn;
use std::collections::BTreeMap;
use std::path::Path;

pub const CWE_ID_COLUMN: &str = "CWEID";
pub const WEAKNESS_CLASS_COLUMN: &str = "Weakness Class";

/// CWE id -> every weakness class it was listed under, in file order.
pub type WeaknessClassMap = BTreeMap<String, Vec<String>>;

/// Reads the weakness class CSV. A CWE may belong to several classes; each
/// repeat is reported.
pub fn map_weakness_classes(file: &Path) -> Result<WeaknessClassMap, AppError> {
    let (header, records) = csv_utils::read_csv_with_header(file)?;
    let origin = file.display().to_string();
    let cwe_index = csv_utils::column_index(&header, CWE_ID_COLUMN, &origin)?;
    let class_index = csv_utils::column_index(&header, WEAKNESS_CLASS_COLUMN, &origin)?;

    let mut classes = WeaknessClassMap::new();
    for record in records {
        let cell = |index: usize| record.get(index).cloned().unwrap_or_default();
        let (cwe, weakness_class) = (cell(cwe_index), cell(class_index));

        let entry = classes.entry(cwe.clone()).or_default();
        if !entry.is_empty() {
            warn!("WARNING: CWE \"{}\" is assigned to more than 1 weakness class.", cwe);
        }
        entry.push(weakness_class);
    }
    Ok(classes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn groups_classes_per_cwe() {
        let tmp = tempdir().unwrap();
        let path = tmp.path().join("classes.csv");
        fs::write(
            &path,
            "CWEID,Weakness Class\nCWE121,Buffer Handling\nCWE78,Injection\nCWE121,Memory Access\n",
        )
        .unwrap();

        let classes = map_weakness_classes(&path).unwrap();
        assert_eq!(classes["CWE121"], vec!["Buffer Handling", "Memory Access"]);
        assert_eq!(classes["CWE78"], vec!["Injection"]);
        assert_eq!(classes.len(), 2);
    }

    #[test]
    fn missing_column_is_fatal() {
        let tmp = tempdir().unwrap();
        let path = tmp.path().join("classes.csv");
        fs::write(&path, "CWEID,Class\nCWE121,Buffer Handling\n").unwrap();
        let err = map_weakness_classes(&path).unwrap_err();
        assert!(matches!(err, AppError::MissingColumn { ref column, .. } if column == WEAKNESS_CLASS_COLUMN));
    }
}
