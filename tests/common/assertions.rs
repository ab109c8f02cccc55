//! CSV assertions

use std::path::Path;

/// Read `file` from `dir` and split it into lines
pub fn read_lines(dir: &Path, file: &str) -> Vec<String> {
    let path = dir.join(file);
    let content = std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("failed to read {}: {}", path.display(), e));
    content.lines().map(str::to_string).collect()
}

/// Assert that `file` holds exactly `expected` lines
pub fn assert_csv_lines(dir: &Path, file: &str, expected: &[&str]) {
    let lines = read_lines(dir, file);
    assert_eq!(lines, expected, "unexpected content in {file}");
}

/// Assert that every line in `file` has the same number of pipe-separated columns
pub fn assert_rectangular(dir: &Path, file: &str) {
    let lines = read_lines(dir, file);
    let Some(header) = lines.first() else {
        panic!("{file} is empty");
    };
    let columns = header.split('|').count();
    for (n, line) in lines.iter().enumerate() {
        assert_eq!(
            line.split('|').count(),
            columns,
            "{file} line {n} has a different column count: {line}"
        );
    }
}
