use log::info;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

/// Expands the given inputs into DICOM file paths
///
/// Directories are scanned (non-recursively); plain files are kept as given.
pub fn collect_inputs(inputs: &[PathBuf]) -> std::io::Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for input in inputs {
        if input.is_dir() {
            files.extend(collect_dicom_files(input)?);
        } else {
            files.push(input.clone());
        }
    }
    Ok(files)
}

/// Lists DICOM files in a directory
///
/// Accepts `.dcm`/`.dicom` extensions (any case) and extension-less files
/// carrying the DICOM preamble. The result is sorted by path.
pub fn collect_dicom_files(directory: &Path) -> std::io::Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for entry in std::fs::read_dir(directory)? {
        let entry = entry?;
        let path = entry.path();

        if path.is_file() {
            if let Some(ext) = path.extension() {
                if ext.eq_ignore_ascii_case("dcm") || ext.eq_ignore_ascii_case("dicom") {
                    files.push(path);
                }
            } else if is_dicom_file(&path) {
                info!("Found headerless DICOM file: {}", path.display());
                files.push(path);
            }
        }
    }

    files.sort();
    Ok(files)
}

/// True when the file carries the `DICM` magic after the 128-byte preamble
pub fn is_dicom_file(path: &Path) -> bool {
    let mut preamble = [0u8; 132];
    File::open(path)
        .and_then(|mut file| file.read_exact(&mut preamble))
        .map(|()| &preamble[128..] == b"DICM")
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    fn write_file(path: &Path, bytes: &[u8]) {
        File::create(path).unwrap().write_all(bytes).unwrap();
    }

    fn dicom_header() -> Vec<u8> {
        let mut bytes = vec![0u8; 128];
        bytes.extend_from_slice(b"DICM");
        bytes.extend_from_slice(b"additional data");
        bytes
    }

    #[test]
    fn test_is_dicom_file_with_valid_header() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("slice");
        write_file(&file_path, &dicom_header());
        assert!(is_dicom_file(&file_path));
    }

    #[test]
    fn test_is_dicom_file_rejects_others() {
        let temp_dir = TempDir::new().unwrap();

        let text = temp_dir.path().join("text");
        write_file(&text, b"This is not a DICOM file");
        assert!(!is_dicom_file(&text));

        let wrong_magic = temp_dir.path().join("wrong_magic");
        let mut bytes = vec![0u8; 128];
        bytes.extend_from_slice(b"NOTM");
        write_file(&wrong_magic, &bytes);
        assert!(!is_dicom_file(&wrong_magic));

        assert!(!is_dicom_file(&temp_dir.path().join("missing")));
    }

    #[test]
    fn test_collect_dicom_files() {
        let temp_dir = TempDir::new().unwrap();
        File::create(temp_dir.path().join("b.dcm")).unwrap();
        File::create(temp_dir.path().join("a.DCM")).unwrap();
        File::create(temp_dir.path().join("c.dicom")).unwrap();
        File::create(temp_dir.path().join("notes.txt")).unwrap();
        write_file(&temp_dir.path().join("headerless"), &dicom_header());
        write_file(&temp_dir.path().join("other"), b"not dicom");

        let files = collect_dicom_files(temp_dir.path()).unwrap();
        let names: Vec<_> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["a.DCM", "b.dcm", "c.dicom", "headerless"]);
    }

    #[test]
    fn test_collect_inputs_mixes_files_and_directories() {
        let temp_dir = TempDir::new().unwrap();
        let series = temp_dir.path().join("series");
        std::fs::create_dir(&series).unwrap();
        File::create(series.join("1.dcm")).unwrap();
        File::create(series.join("2.dcm")).unwrap();
        let single = temp_dir.path().join("extra.dcm");
        File::create(&single).unwrap();

        let files = collect_inputs(&[series.clone(), single.clone()]).unwrap();
        assert_eq!(files, vec![series.join("1.dcm"), series.join("2.dcm"), single]);
    }
}
