//! Tests for the real FileSystem implementation

use std::fs;

use tempfile::TempDir;

use course_catalog::infrastructure::traits::{FileSystem, RealFileSystem};

#[test]
fn given_existing_file_when_reading_then_returns_contents() {
    // Arrange
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("courses.csv");
    fs::write(&path, "CSCI100,Intro\n").unwrap();
    let fs = RealFileSystem;

    // Act
    let content = fs.read_to_string(&path).unwrap();

    // Assert
    assert_eq!(content, "CSCI100,Intro\n");
    assert!(fs.is_file(&path));
}

#[test]
fn given_directory_when_checking_then_not_a_file() {
    let temp = TempDir::new().unwrap();
    let fs = RealFileSystem;

    assert!(!fs.is_file(temp.path()));
}

#[test]
fn given_missing_path_when_reading_then_not_found() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("absent.csv");
    let fs = RealFileSystem;

    let err = fs.read_to_string(&path).unwrap_err();

    assert_eq!(err.kind(), std::io::ErrorKind::NotFound);
    assert!(!fs.is_file(&path));
}
