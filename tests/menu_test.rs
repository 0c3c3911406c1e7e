//! Scripted sessions against the interactive menu

use std::io::Cursor;
use std::path::Path;
use std::sync::Arc;

use rstest::rstest;
use tempfile::TempDir;

use course_catalog::application::services::CatalogService;
use course_catalog::cli::menu::Menu;
use course_catalog::domain::IdCase;
use course_catalog::infrastructure::traits::RealFileSystem;
use course_catalog::util::testing;

const COURSES_CSV: &str = "\
CSCI100,Introduction to Computer Science
CSCI200,Data Structures,CSCI100
MATH201,Discrete Mathematics
CSCI300,Introduction to Algorithms,CSCI200,MATH201
";

/// Run one session with `script` as stdin and return everything written.
fn run_session(data_file: &Path, script: &str) -> String {
    testing::init_test_setup();
    let mut catalog = CatalogService::new(Arc::new(RealFileSystem), IdCase::Upper);
    let mut out = Vec::new();
    {
        let mut menu = Menu::new(&mut catalog, data_file, Cursor::new(script), &mut out);
        menu.run().unwrap();
    }
    String::from_utf8(out).unwrap()
}

fn data_dir() -> (TempDir, std::path::PathBuf) {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("courses.csv");
    std::fs::write(&path, COURSES_CSV).unwrap();
    (temp, path)
}

#[test]
fn given_exit_choice_when_running_then_greets_and_says_goodbye() {
    let (_temp, path) = data_dir();

    let output = run_session(&path, "9\n");

    assert!(output.starts_with("Welcome to ABC University Course Finder Program"));
    assert!(output.contains("  1: Load Courses File."));
    assert!(output.contains("  9: Exit Program"));
    assert!(output.trim_end().ends_with("Thank you for using ABC University Course Finder Program."));
}

#[test]
fn given_end_of_input_when_running_then_exits_cleanly() {
    let (_temp, path) = data_dir();

    let output = run_session(&path, "");

    assert!(output.contains("Enter Choice: "));
    assert!(output.contains("Thank you for using ABC University Course Finder Program."));
}

#[rstest]
#[case("7\n9\n")]
#[case("hello\n9\n")]
#[case("\n9\n")]
fn given_unknown_choice_when_running_then_asks_again(#[case] script: &str) {
    let (_temp, path) = data_dir();

    let output = run_session(&path, script);

    assert!(output.contains("Please enter a valid menu option."));
    assert_eq!(output.matches("Enter Choice: ").count(), 2);
}

#[test]
fn given_load_then_list_when_running_then_prints_sorted_courses() {
    let (_temp, path) = data_dir();

    let output = run_session(&path, "1\n2\n9\n");

    assert!(output.contains("4 courses added to course list."));
    let list_start = output.find("------ Current Course List ------").unwrap();
    let listing = &output[list_start..];
    let first = listing.find("CSCI100, Introduction to Computer Science").unwrap();
    let second = listing.find("CSCI200, Data Structures").unwrap();
    let last = listing.find("MATH201, Discrete Mathematics").unwrap();
    assert!(first < second && second < last);
}

#[test]
fn given_missing_data_file_when_loading_then_reports_not_open() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("absent.csv");

    let output = run_session(&path, "1\n9\n");

    assert!(output.contains("absent.csv is not open"));
    assert!(!output.contains("courses added"));
}

#[test]
fn given_malformed_row_when_loading_then_reports_wrong_format() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("courses.csv");
    std::fs::write(&path, "CSCI100,Intro\nCSCI200\n").unwrap();

    let output = run_session(&path, "1\n9\n");

    assert!(output.contains("Wrong format (line 2): CSCI200"));
    assert!(output.contains("1 courses added to course list."));
}

#[test]
fn given_loaded_catalog_when_finding_then_prints_course_and_prerequisites() {
    let (_temp, path) = data_dir();

    let output = run_session(&path, "1\n3\ncsci300\n3\nCSCI999\n9\n");

    assert!(output.contains("CSCI300, Introduction to Algorithms"));
    assert!(output.contains("Prerequisites: CSCI200, MATH201"));
    assert!(output.contains("CSCI999 not found."));
}

#[test]
fn given_course_without_prerequisites_when_finding_then_prints_none() {
    let (_temp, path) = data_dir();

    let output = run_session(&path, "1\n3\nMATH201\n9\n");

    assert!(output.contains("MATH201, Discrete Mathematics"));
    assert!(output.contains("Prerequisites: None"));
}

#[test]
fn given_valid_add_when_running_then_course_is_findable() {
    let (_temp, path) = data_dir();

    let output = run_session(&path, "1\n4\nCompilers\ncsci410\ncsci300\n\n3\nCSCI410\n9\n");

    assert!(output.contains("CSCI410 successfully added."));
    assert!(output.contains("CSCI410, Compilers"));
    assert!(output.contains("Prerequisites: CSCI300"));
}

#[test]
fn given_unknown_prerequisite_when_adding_then_reports_and_skips_insert() {
    let (_temp, path) = data_dir();

    let output = run_session(&path, "1\n4\nCompilers\nCSCI410\nCSCI999\n\n3\nCSCI410\n9\n");

    assert!(output.contains("Error: Prerequisite ID does not exist: CSCI999"));
    assert!(output.contains("Please add the prerequisite as a course first before continuing"));
    assert!(output.contains("CSCI410 not found."));
}

#[test]
fn given_required_course_when_deleting_then_refused_with_dependents() {
    let (_temp, path) = data_dir();

    let output = run_session(&path, "1\n5\nCSCI200\n9\n");

    assert!(output.contains("Error: Can not delete CSCI200. It is a prerequisite to another course."));
    assert!(output.contains("Required by: CSCI300"));
}

#[test]
fn given_deletable_course_when_deleting_then_gone_from_list() {
    let (_temp, path) = data_dir();

    let output = run_session(&path, "1\n5\nCSCI300\n5\nCSCI999\n2\n9\n");

    assert!(output.contains("CSCI300 has been successfully deleted."));
    assert!(output.contains("Error: CSCI999 doesn't exist."));
    let listing = &output[output.rfind("------ Current Course List ------").unwrap()..];
    assert!(!listing.contains("CSCI300"));
    assert!(listing.contains("CSCI200, Data Structures"));
}

#[test]
fn given_tree_choice_when_running_then_prints_shape_or_empty_notice() {
    let (_temp, path) = data_dir();

    let empty = run_session(&path, "6\n9\n");
    assert!(empty.contains("Course list is empty."));

    let loaded = run_session(&path, "1\n6\n9\n");
    assert!(loaded.contains("4 course(s), height 4"));
    assert!(loaded.contains("CSCI100"));
}
