//! Puzzle input loading

use crate::error::InputError;
use std::borrow::Cow;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Explicit input given with `--input`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputSource {
    Stdin,
    File(PathBuf),
}

impl InputSource {
    /// `-` selects standard input, anything else is a file path.
    pub fn from_arg(path: PathBuf) -> Self {
        if path.as_os_str() == "-" {
            Self::Stdin
        } else {
            Self::File(path)
        }
    }

    pub fn read(&self) -> Result<String, InputError> {
        match self {
            Self::Stdin => io::read_to_string(io::stdin()).map_err(InputError::Stdin),
            Self::File(path) => read_file(path),
        }
    }
}

/// Directory of input files named `{year}_day{day:02}.txt`
pub struct InputStore {
    dir: PathBuf,
}

impl InputStore {
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    pub fn path(&self, year: u16, day: u8) -> PathBuf {
        self.dir.join(format!("{}_day{:02}.txt", year, day))
    }

    pub fn contains(&self, year: u16, day: u8) -> bool {
        self.path(year, day).is_file()
    }

    pub fn read(&self, year: u16, day: u8) -> Result<String, InputError> {
        read_file(&self.path(year, day))
    }
}

/// Where the executor gets each day's input from
pub enum Inputs {
    /// Text read up front from `--input`, used for the single selected day
    Preloaded(String),
    Directory(InputStore),
}

impl Inputs {
    pub fn get(&self, year: u16, day: u8) -> Result<Cow<'_, str>, InputError> {
        match self {
            Self::Preloaded(text) => Ok(Cow::Borrowed(text)),
            Self::Directory(store) => store.read(year, day).map(Cow::Owned),
        }
    }
}

fn read_file(path: &Path) -> Result<String, InputError> {
    fs::read_to_string(path).map_err(|source| match source.kind() {
        io::ErrorKind::NotFound => InputError::Missing {
            path: path.to_path_buf(),
        },
        _ => InputError::Read {
            path: path.to_path_buf(),
            source,
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_path_format() {
        let temp = TempDir::new().unwrap();
        let store = InputStore::new(temp.path().to_path_buf());

        assert_eq!(store.path(2023, 1), temp.path().join("2023_day01.txt"));
        assert_eq!(store.path(2023, 25), temp.path().join("2023_day25.txt"));
    }

    #[test]
    fn test_read_existing_and_missing() {
        let temp = TempDir::new().unwrap();
        let store = InputStore::new(temp.path().to_path_buf());

        assert!(!store.contains(2023, 10));
        assert!(matches!(
            store.read(2023, 10),
            Err(InputError::Missing { path }) if path == store.path(2023, 10)
        ));

        fs::write(store.path(2023, 10), ".S-7.\n").unwrap();
        assert!(store.contains(2023, 10));
        assert_eq!(store.read(2023, 10).unwrap(), ".S-7.\n");
    }

    #[test]
    fn test_directory_in_place_of_file() {
        let temp = TempDir::new().unwrap();
        let store = InputStore::new(temp.path().to_path_buf());
        fs::create_dir(store.path(2023, 14)).unwrap();

        assert!(!store.contains(2023, 14));
        assert!(matches!(store.read(2023, 14), Err(InputError::Read { .. })));
    }

    #[test]
    fn test_input_source_from_arg() {
        assert_eq!(InputSource::from_arg(PathBuf::from("-")), InputSource::Stdin);

        let temp = TempDir::new().unwrap();
        let file = temp.path().join("day18.txt");
        fs::write(&file, "R 6 (#70c710)\n").unwrap();
        let source = InputSource::from_arg(file.clone());
        assert_eq!(source, InputSource::File(file));
        assert_eq!(source.read().unwrap(), "R 6 (#70c710)\n");
    }

    #[test]
    fn test_preloaded_serves_any_day() {
        let inputs = Inputs::Preloaded("abc".to_string());
        assert_eq!(inputs.get(2023, 1).unwrap(), "abc");
        assert!(matches!(inputs.get(2023, 2).unwrap(), Cow::Borrowed(_)));
    }
}
