//! Expression files.
//!
//! Plain-text import and export of the buffer, and a flat-text dump of the
//! history. No dialogs, no formats beyond raw text.

use crate::model::error::InputError;
use crate::state::HistoryLog;
use std::fs;
use std::io;
use std::path::Path;
use tracing::info;

/// Read an expression from `path`.
///
/// One trailing line ending (`\n` or `\r\n`) is stripped; everything else
/// is kept verbatim.
///
/// # Errors
///
/// Returns `InputError::FileNotFound` if the file does not exist.
/// Returns `InputError::Io` for other I/O errors.
pub fn import_expression(path: impl AsRef<Path>) -> Result<String, InputError> {
    let path = path.as_ref();

    let contents = fs::read_to_string(path).map_err(|e| io_error(path, e))?;
    let text = contents
        .strip_suffix('\n')
        .map(|rest| rest.strip_suffix('\r').unwrap_or(rest))
        .unwrap_or(&contents);

    info!(path = %path.display(), chars = text.chars().count(), "imported expression");
    Ok(text.to_string())
}

/// Write `text` to `path` followed by a newline, replacing the file.
///
/// # Errors
///
/// Returns `InputError::FileNotFound` if the parent directory does not
/// exist. Returns `InputError::Io` for other I/O errors.
pub fn export_expression(path: impl AsRef<Path>, text: &str) -> Result<(), InputError> {
    let path = path.as_ref();

    fs::write(path, format!("{text}\n")).map_err(|e| io_error(path, e))?;

    info!(path = %path.display(), "exported expression");
    Ok(())
}

/// Write the history dump (`input = result` per line) to `path`.
///
/// # Errors
///
/// Same as [`export_expression`].
pub fn export_history(path: impl AsRef<Path>, log: &HistoryLog) -> Result<(), InputError> {
    let path = path.as_ref();

    fs::write(path, log.dump()).map_err(|e| io_error(path, e))?;

    info!(path = %path.display(), entries = log.len(), "exported history");
    Ok(())
}

fn io_error(path: &Path, e: io::Error) -> InputError {
    match e.kind() {
        io::ErrorKind::NotFound => InputError::FileNotFound {
            path: path.to_path_buf(),
        },
        _ => InputError::Io {
            path: path.to_path_buf(),
            message: e.to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;

    #[test]
    fn import_strips_one_trailing_newline() {
        let path = env::temp_dir().join("scical_import_newline.txt");
        fs::write(&path, "sin(30)+1\n\n").expect("write fixture");

        let text = import_expression(&path).expect("file exists");

        assert_eq!(text, "sin(30)+1\n");
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn import_strips_crlf() {
        let path = env::temp_dir().join("scical_import_crlf.txt");
        fs::write(&path, "2*pi\r\n").expect("write fixture");

        assert_eq!(import_expression(&path).expect("file exists"), "2*pi");
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn import_missing_file_is_file_not_found() {
        let path = Path::new("/nonexistent/scical/expr.txt");
        assert_eq!(
            import_expression(path),
            Err(InputError::FileNotFound {
                path: path.to_path_buf()
            })
        );
    }

    #[test]
    fn export_then_import_keeps_text() {
        let path = env::temp_dir().join("scical_export_expr.txt");

        export_expression(&path, "sqrt(2)/2").expect("writable temp dir");

        assert_eq!(fs::read_to_string(&path).expect("written"), "sqrt(2)/2\n");
        assert_eq!(import_expression(&path).expect("written"), "sqrt(2)/2");
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn export_into_missing_directory_fails() {
        let path = Path::new("/nonexistent/scical/out.txt");
        assert!(matches!(
            export_expression(path, "1"),
            Err(InputError::FileNotFound { .. })
        ));
    }

    #[test]
    fn export_history_writes_dump() {
        let path = env::temp_dir().join("scical_export_history.txt");
        let mut log = HistoryLog::new();
        log.append("2+2", "4");
        log.append("3*3", "9");

        export_history(&path, &log).expect("writable temp dir");

        assert_eq!(
            fs::read_to_string(&path).expect("written"),
            "2+2 = 4\n3*3 = 9\n"
        );
        let _ = fs::remove_file(&path);
    }
}
