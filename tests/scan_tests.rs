//! End-to-end scan scenarios exercising the full pipeline and the
//! console report format.

use std::fs::File;
use std::io::Write;
use std::sync::Arc;

use tempfile::TempDir;

use dupescan::duplicates::{DuplicateFinder, FinderConfig};
use dupescan::output::ConsoleReport;
use dupescan::scanner::WalkerConfig;

fn write_file(dir: &TempDir, name: &str, content: &[u8]) {
    File::create(dir.path().join(name))
        .unwrap()
        .write_all(content)
        .unwrap();
}

/// Run a scan against a buffer and return (report text, group count).
fn scan_to_string(dir: &TempDir, config: FinderConfig) -> (String, usize) {
    let report = Arc::new(ConsoleReport::new(Vec::new()));
    let (groups, _summary) =
        dupescan::run_scan(dir.path(), config, Arc::clone(&report)).unwrap();
    let out = Arc::try_unwrap(report)
        .unwrap_or_else(|_| panic!("report still shared"))
        .into_inner();
    (String::from_utf8(out).unwrap(), groups.len())
}

#[test]
fn test_basic_scan_output() {
    // a.txt and b.txt duplicate; c.txt same length, different content;
    // d.bin below the default threshold.
    let dir = TempDir::new().unwrap();
    write_file(&dir, "a.txt", b"hello");
    write_file(&dir, "b.txt", b"hello");
    write_file(&dir, "c.txt", b"world");
    write_file(&dir, "d.bin", &[0u8]);

    let (text, group_count) = scan_to_string(&dir, FinderConfig::default());
    assert_eq!(group_count, 1);

    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines[0], dir.path().display().to_string());
    assert_eq!(lines[1], "Skipping files of 1 bytes and below");
    assert_eq!(lines[2], "Checking files of length 5 bytes");
    assert_eq!(lines[3], "The following files are duplicates:");
    assert_eq!(lines[4], format!(" - {}", dir.path().join("a.txt").display()));
    assert_eq!(lines[5], format!(" - {}", dir.path().join("b.txt").display()));
    assert_eq!(lines[6], "Done.");
    assert_eq!(lines.len(), 7);
}

#[test]
fn test_exclude_glob_suppresses_all_groups() {
    let dir = TempDir::new().unwrap();
    write_file(&dir, "a.txt", b"hello");
    write_file(&dir, "b.txt", b"hello");
    write_file(&dir, "c.txt", b"world");
    write_file(&dir, "d.bin", &[0u8]);

    let walker = WalkerConfig::default()
        .with_exclude(vec![glob::Pattern::new("*.txt").unwrap()]);
    let config = FinderConfig::default().with_walker_config(walker);

    let (text, group_count) = scan_to_string(&dir, config);
    assert_eq!(group_count, 0);
    assert!(!text.contains("duplicates"));
    assert!(text.ends_with("Done.\n"));
}

#[test]
fn test_excluded_files_never_reported_even_when_duplicated() {
    let dir = TempDir::new().unwrap();
    write_file(&dir, "keep1.dat", b"payload");
    write_file(&dir, "keep2.dat", b"payload");
    write_file(&dir, "drop.txt", b"payload");

    let walker = WalkerConfig::default()
        .with_exclude(vec![glob::Pattern::new("*.txt").unwrap()]);
    let finder = DuplicateFinder::new(FinderConfig::default().with_walker_config(walker));
    let (groups, _) = finder.find_duplicates(dir.path()).unwrap();

    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0].len(), 2);
    assert!(groups[0]
        .paths()
        .iter()
        .all(|p| p.extension().unwrap() == "dat"));
}

#[test]
fn test_empty_directory() {
    let dir = TempDir::new().unwrap();

    let (text, group_count) = scan_to_string(&dir, FinderConfig::default());
    assert_eq!(group_count, 0);

    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines[0], dir.path().display().to_string());
    assert_eq!(lines[1], "Skipping files of 1 bytes and below");
    assert_eq!(lines[2], "Done.");
    assert_eq!(lines.len(), 3);
}

#[test]
fn test_zero_threshold_omits_announcement() {
    let dir = TempDir::new().unwrap();

    let walker = WalkerConfig::default().with_skip_threshold(0);
    let config = FinderConfig::default().with_walker_config(walker);
    let (text, _) = scan_to_string(&dir, config);

    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines[1], "Done.");
}

#[test]
fn test_duplicates_found_across_subdirectories() {
    let dir = TempDir::new().unwrap();
    std::fs::create_dir_all(dir.path().join("x/deep")).unwrap();
    write_file(&dir, "top.dat", b"shared bytes");
    File::create(dir.path().join("x/deep/bottom.dat"))
        .unwrap()
        .write_all(b"shared bytes")
        .unwrap();

    let finder = DuplicateFinder::with_defaults();
    let (groups, _) = finder.find_duplicates(dir.path()).unwrap();

    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0].len(), 2);
}

#[test]
fn test_idempotent_runs() {
    let dir = TempDir::new().unwrap();
    write_file(&dir, "a.bin", b"one");
    write_file(&dir, "b.bin", b"one");
    write_file(&dir, "c.bin", b"twotwo");
    write_file(&dir, "d.bin", b"twotwo");
    write_file(&dir, "e.bin", b"unique bytes");

    let (first, _) = scan_to_string(&dir, FinderConfig::default());
    let (second, _) = scan_to_string(&dir, FinderConfig::default());

    assert_eq!(first, second);
}

#[test]
fn test_bucket_lines_appear_in_ascending_size_order() {
    let dir = TempDir::new().unwrap();
    write_file(&dir, "l1.bin", b"0123456789abcdef");
    write_file(&dir, "l2.bin", b"0123456789abcdef");
    write_file(&dir, "s1.bin", b"abc");
    write_file(&dir, "s2.bin", b"abc");

    let (text, _) = scan_to_string(&dir, FinderConfig::default());

    let small = text.find("Checking files of length 3 bytes").unwrap();
    let large = text.find("Checking files of length 16 bytes").unwrap();
    assert!(small < large);
}

#[test]
fn test_each_pair_reported_exactly_once() {
    let dir = TempDir::new().unwrap();
    write_file(&dir, "a.dat", b"identical");
    write_file(&dir, "b.dat", b"identical");

    let (text, _) = scan_to_string(&dir, FinderConfig::default());
    assert_eq!(text.matches("The following files are duplicates:").count(), 1);
    assert_eq!(
        text.matches(&format!(" - {}", dir.path().join("a.dat").display()))
            .count(),
        1
    );
}
