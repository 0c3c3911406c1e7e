//! Interactive advising menu
//!
//! Reads choices line by line from any `BufRead` and writes plain text to any
//! `Write`, so sessions can be scripted in tests. Reaching end of input ends
//! the session like choosing exit.

use std::io::{self, BufRead, Write};
use std::path::Path;

use tracing::{debug, instrument};

use crate::application::services::{AddCourse, CatalogService};
use crate::application::ApplicationError;
use crate::cli::output::prerequisites_line;
use crate::domain::DomainError;

const WELCOME: &str = "Welcome to ABC University Course Finder Program";
const FAREWELL: &str = "Thank you for using ABC University Course Finder Program.";

/// Menu entries keyed by the number the user types.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Choice {
    Load,
    PrintList,
    Find,
    Add,
    Delete,
    PrintTree,
    Exit,
}

impl Choice {
    const ALL: [Choice; 7] = [
        Choice::Load,
        Choice::PrintList,
        Choice::Find,
        Choice::Add,
        Choice::Delete,
        Choice::PrintTree,
        Choice::Exit,
    ];

    pub fn number(self) -> u8 {
        match self {
            Choice::Load => 1,
            Choice::PrintList => 2,
            Choice::Find => 3,
            Choice::Add => 4,
            Choice::Delete => 5,
            Choice::PrintTree => 6,
            Choice::Exit => 9,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Choice::Load => "Load Courses File.",
            Choice::PrintList => "Print Course List.",
            Choice::Find => "Find & Print Course.",
            Choice::Add => "Add Course.",
            Choice::Delete => "Delete Course by ID.",
            Choice::PrintTree => "Print Tree Structure.",
            Choice::Exit => "Exit Program",
        }
    }

    /// Parse a typed menu choice; anything unknown is `None`.
    pub fn parse(input: &str) -> Option<Self> {
        let number: u8 = input.trim().parse().ok()?;
        Self::ALL.into_iter().find(|choice| choice.number() == number)
    }
}

/// One interactive session over a catalog.
pub struct Menu<'a, R, W> {
    catalog: &'a mut CatalogService,
    data_file: &'a Path,
    input: R,
    out: W,
}

impl<'a, R: BufRead, W: Write> Menu<'a, R, W> {
    pub fn new(catalog: &'a mut CatalogService, data_file: &'a Path, input: R, out: W) -> Self {
        Self {
            catalog,
            data_file,
            input,
            out,
        }
    }

    /// Run until the user exits or input ends.
    #[instrument(skip(self))]
    pub fn run(&mut self) -> io::Result<()> {
        writeln!(self.out, "{WELCOME}")?;
        writeln!(self.out, "Please choose an option from the menu below.")?;
        writeln!(self.out)?;

        loop {
            self.print_menu()?;
            let Some(line) = self.prompt("Enter Choice: ")? else {
                break;
            };
            let choice = Choice::parse(&line);
            debug!("menu input {:?} -> {:?}", line, choice);

            match choice {
                Some(Choice::Load) => self.load()?,
                Some(Choice::PrintList) => self.print_list()?,
                Some(Choice::Find) => self.find()?,
                Some(Choice::Add) => self.add()?,
                Some(Choice::Delete) => self.delete()?,
                Some(Choice::PrintTree) => self.print_tree()?,
                Some(Choice::Exit) => break,
                None => {
                    writeln!(self.out)?;
                    writeln!(self.out, "Please enter a valid menu option.")?;
                    writeln!(self.out)?;
                }
            }
        }

        writeln!(self.out, "{FAREWELL}")?;
        self.out.flush()
    }

    fn print_menu(&mut self) -> io::Result<()> {
        writeln!(self.out, "Menu:")?;
        for choice in Choice::ALL {
            writeln!(self.out, "  {}: {}", choice.number(), choice.label())?;
        }
        writeln!(self.out)
    }

    /// Write `label`, then read one line without its line ending.
    fn prompt(&mut self, label: &str) -> io::Result<Option<String>> {
        write!(self.out, "{label}")?;
        self.out.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }

    fn load(&mut self) -> io::Result<()> {
        match self.catalog.load_file(self.data_file) {
            Ok(report) => {
                for rejected in &report.rejected {
                    writeln!(
                        self.out,
                        "Wrong format (line {}): {}",
                        rejected.line_number, rejected.line
                    )?;
                }
                writeln!(self.out)?;
                writeln!(self.out, "{} courses added to course list.", report.loaded)?;
                writeln!(self.out)
            }
            Err(e) => writeln!(self.out, "{} is not open: {e}", self.data_file.display()),
        }
    }

    fn print_list(&mut self) -> io::Result<()> {
        writeln!(self.out)?;
        writeln!(self.out, "------ Current Course List ------")?;
        writeln!(self.out)?;
        self.catalog.tree().display_in_order(&mut self.out)?;
        writeln!(self.out)
    }

    fn find(&mut self) -> io::Result<()> {
        let Some(input) = self.prompt("Enter course to find: ")? else {
            return Ok(());
        };
        let course = self.catalog.find(&input);

        writeln!(self.out)?;
        if course.is_sentinel() {
            writeln!(self.out, "{} not found.", self.catalog.normalize(&input))?;
        } else {
            writeln!(self.out, "{course}")?;
            writeln!(self.out, "{}", prerequisites_line(&course))?;
        }
        writeln!(self.out)
    }

    fn add(&mut self) -> io::Result<()> {
        let Some(name) = self.prompt("Enter course name: ")? else {
            return Ok(());
        };
        let Some(id) = self.prompt("Enter course ID: ")? else {
            return Ok(());
        };
        let Some(prereq1) = self.prompt("Enter prerequisite 1 ID or leave blank if none: ")? else {
            return Ok(());
        };
        let Some(prereq2) = self.prompt("Enter prerequisite 2 ID or leave blank if none: ")? else {
            return Ok(());
        };

        let request = AddCourse {
            id,
            name,
            prereq1: Some(prereq1),
            prereq2: Some(prereq2),
        };
        match self.catalog.add_course(request) {
            Ok(course) => writeln!(self.out, "{} successfully added.", course.id),
            Err(ApplicationError::UnresolvedPrerequisite { id }) => {
                writeln!(self.out, "Error: Prerequisite ID does not exist: {id}")?;
                writeln!(
                    self.out,
                    "Please add the prerequisite as a course first before continuing"
                )
            }
            Err(e) => writeln!(self.out, "Error: {e}"),
        }
    }

    fn delete(&mut self) -> io::Result<()> {
        let Some(input) = self.prompt("Enter course ID to remove: ")? else {
            return Ok(());
        };
        writeln!(self.out)?;

        match self.catalog.remove_course(&input) {
            Ok(course) => writeln!(self.out, "{} has been successfully deleted.", course.id),
            Err(ApplicationError::Domain(DomainError::CourseNotFound(id))) => {
                writeln!(self.out, "Error: {id} doesn't exist.")
            }
            Err(ApplicationError::Domain(DomainError::DependencyConflict { id, dependents })) => {
                writeln!(
                    self.out,
                    "Error: Can not delete {id}. It is a prerequisite to another course."
                )?;
                writeln!(self.out, "Required by: {}", dependents.join(", "))
            }
            Err(e) => writeln!(self.out, "Error: {e}"),
        }
    }

    fn print_tree(&mut self) -> io::Result<()> {
        let tree = self.catalog.tree();
        match tree.to_termtree() {
            Some(shape) => {
                writeln!(
                    self.out,
                    "{} course(s), height {}",
                    tree.len(),
                    tree.height()
                )?;
                write!(self.out, "{shape}")
            }
            None => writeln!(self.out, "Course list is empty."),
        }
    }
}
