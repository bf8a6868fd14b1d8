//! Path and policy checks run before any processing starts.

use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Container extensions the pipeline accepts, matched on the path suffix.
pub const SUPPORTED_EXTENSIONS: [&str; 3] = ["mp4", "mkv", "webm"];

/// Errors raised while validating user supplied paths.
#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("Path does not exist: {}", .0.display())]
    NotFound(PathBuf),

    #[error(
        "Unsupported file type '{}', expected one of: {}",
        .0.display(),
        SUPPORTED_EXTENSIONS.join(", ")
    )]
    UnsupportedType(PathBuf),

    #[error("Output path is not a directory: {}", .0.display())]
    NotADirectory(PathBuf),

    #[error(
        "Input '{}' and output '{}' overlap; neither may contain the other",
        .input.display(),
        .output.display()
    )]
    DirectoryConflict { input: PathBuf, output: PathBuf },

    #[error("Log file must have a .log extension: {}", .0.display())]
    NotALogFile(PathBuf),

    #[error("Failed to resolve {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Result type for validation.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Whether `path` has one of the supported container extensions.
pub fn has_supported_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| {
            SUPPORTED_EXTENSIONS
                .iter()
                .any(|allowed| allowed.eq_ignore_ascii_case(ext))
        })
        .unwrap_or(false)
}

/// Whether `path` is an existing file with a supported extension.
pub fn is_supported_file(path: &Path) -> bool {
    path.is_file() && has_supported_extension(path)
}

/// Validate the input path and return its canonical form.
///
/// Directories are accepted as-is; files must carry a supported extension.
pub fn validate_input(path: &Path) -> ValidationResult<PathBuf> {
    if !path.exists() {
        return Err(ValidationError::NotFound(path.to_path_buf()));
    }
    if path.is_file() && !has_supported_extension(path) {
        return Err(ValidationError::UnsupportedType(path.to_path_buf()));
    }
    canonical(path)
}

/// Validate the output directory against the input path.
///
/// Rejects an output that equals, contains, or sits inside the input, so a
/// directory scan can never pick up its own results.
pub fn validate_output(path: &Path, input_path: &Path) -> ValidationResult<PathBuf> {
    if !path.exists() {
        return Err(ValidationError::NotFound(path.to_path_buf()));
    }
    if !path.is_dir() {
        return Err(ValidationError::NotADirectory(path.to_path_buf()));
    }

    let output = canonical(path)?;
    let input = canonical(input_path)?;
    if is_conflicting(&input, &output) {
        return Err(ValidationError::DirectoryConflict { input, output });
    }
    Ok(output)
}

/// Validate that a log file path ends in `.log`.
pub fn validate_log_file(path: &Path) -> ValidationResult<PathBuf> {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("log") => Ok(path.to_path_buf()),
        _ => Err(ValidationError::NotALogFile(path.to_path_buf())),
    }
}

/// Component-wise containment in either direction.
fn is_conflicting(input: &Path, output: &Path) -> bool {
    input.starts_with(output) || output.starts_with(input)
}

fn canonical(path: &Path) -> ValidationResult<PathBuf> {
    path.canonicalize().map_err(|source| ValidationError::Io {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn missing_input_is_not_found() {
        let dir = tempdir().unwrap();
        let err = validate_input(&dir.path().join("nope.mp4")).unwrap_err();
        assert!(matches!(err, ValidationError::NotFound(_)));
    }

    #[test]
    fn unsupported_extension_is_rejected() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("clip.avi");
        fs::write(&file, b"").unwrap();

        let err = validate_input(&file).unwrap_err();
        assert!(matches!(err, ValidationError::UnsupportedType(_)));
    }

    #[test]
    fn supported_files_and_directories_pass() {
        let dir = tempdir().unwrap();
        for name in ["a.mp4", "b.mkv", "c.webm", "D.MKV"] {
            let file = dir.path().join(name);
            fs::write(&file, b"").unwrap();
            assert!(validate_input(&file).is_ok(), "{name}");
            assert!(is_supported_file(&file));
        }
        assert!(validate_input(dir.path()).is_ok());
        assert!(!is_supported_file(dir.path()));
    }

    #[test]
    fn output_must_exist_and_be_directory() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("in");
        fs::create_dir(&input).unwrap();

        let missing = validate_output(&dir.path().join("out"), &input).unwrap_err();
        assert!(matches!(missing, ValidationError::NotFound(_)));

        let file = dir.path().join("out.txt");
        fs::write(&file, b"").unwrap();
        let not_dir = validate_output(&file, &input).unwrap_err();
        assert!(matches!(not_dir, ValidationError::NotADirectory(_)));
    }

    #[test]
    fn overlapping_directories_conflict() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("in");
        let nested = input.join("out");
        fs::create_dir_all(&nested).unwrap();

        // equal
        assert!(matches!(
            validate_output(&input, &input),
            Err(ValidationError::DirectoryConflict { .. })
        ));
        // output nested under input
        assert!(matches!(
            validate_output(&nested, &input),
            Err(ValidationError::DirectoryConflict { .. })
        ));
        // output containing input
        assert!(matches!(
            validate_output(dir.path(), &input),
            Err(ValidationError::DirectoryConflict { .. })
        ));
    }

    #[test]
    fn single_file_inside_output_conflicts() {
        let dir = tempdir().unwrap();
        let video = dir.path().join("a.mp4");
        fs::write(&video, b"").unwrap();

        let err = validate_output(dir.path(), &video).unwrap_err();
        assert!(matches!(err, ValidationError::DirectoryConflict { .. }));
    }

    #[test]
    fn sibling_directories_are_fine() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("videos");
        let output = dir.path().join("videos_clean");
        fs::create_dir_all(&input).unwrap();
        fs::create_dir_all(&output).unwrap();

        assert!(validate_output(&output, &input).is_ok());
    }

    #[test]
    fn log_file_needs_log_suffix() {
        assert!(validate_log_file(Path::new("run.log")).is_ok());
        assert!(matches!(
            validate_log_file(Path::new("run.txt")),
            Err(ValidationError::NotALogFile(_))
        ));
    }
}
