// AppInventory - platform/fs.rs
//
// Filesystem access for the input report.

use crate::util::error::InputError;
use std::io;
use std::path::Path;

/// Check that the report exists, is a regular file and is non-empty.
///
/// Returns the file size in bytes.
pub fn validate_input(path: &Path) -> Result<u64, InputError> {
    let metadata = match std::fs::metadata(path) {
        Ok(m) => m,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            return Err(InputError::NotFound {
                path: path.to_path_buf(),
            })
        }
        Err(e) => {
            return Err(InputError::Io {
                path: path.to_path_buf(),
                source: e,
            })
        }
    };

    if !metadata.is_file() {
        return Err(InputError::NotAFile {
            path: path.to_path_buf(),
        });
    }

    if metadata.len() == 0 {
        return Err(InputError::Empty {
            path: path.to_path_buf(),
        });
    }

    Ok(metadata.len())
}

/// Read the full content of a file as a string.
///
/// For files with invalid UTF-8, uses lossy conversion.
pub fn read_file_lossy(path: &Path) -> Result<String, InputError> {
    let bytes = std::fs::read(path).map_err(|e| InputError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}
