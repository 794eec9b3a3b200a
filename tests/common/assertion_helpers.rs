//! Assertion helpers for testing

/// Assert that a directory exists
#[macro_export]
macro_rules! assert_dir_exists {
    ($path:expr) => {
        assert!(
            $path.is_dir(),
            "Directory should exist: {}",
            $path.display()
        );
    };
}

/// Assert that a path does not exist
#[macro_export]
macro_rules! assert_path_absent {
    ($path:expr) => {
        assert!(!$path.exists(), "Path should not exist: {}", $path.display());
    };
}

/// Assert that some captured line contains `needle`
#[macro_export]
macro_rules! assert_line_contains {
    ($lines:expr, $needle:expr) => {
        assert!(
            $lines.iter().any(|line| line.contains($needle)),
            "no line contains {:?} in {:#?}",
            $needle,
            $lines
        );
    };
}
