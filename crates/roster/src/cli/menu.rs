//! The interactive numbered menu.
//!
//! Reads newline-terminated answers from any [`BufRead`] and writes prompts
//! and results to any [`Write`], so a session can be scripted in tests.
//! No failure here ends the session; each one becomes a message.

use std::io::{self, BufRead, Write};

use crate::error::Error;
use crate::service::Roster;

const EXIT_CHOICE: i64 = 6;

/// An interactive session over a roster.
#[derive(Debug)]
pub struct Menu<'a, R, W> {
    roster: &'a mut Roster,
    input: R,
    output: W,
    show_header: bool,
}

impl<'a, R: BufRead, W: Write> Menu<'a, R, W> {
    /// Create a session reading from `input` and writing to `output`.
    pub fn new(roster: &'a mut Roster, input: R, output: W) -> Self {
        Self {
            roster,
            input,
            output,
            show_header: true,
        }
    }

    /// Whether to print the banner above the options.
    #[must_use]
    pub fn show_header(mut self, show: bool) -> Self {
        self.show_header = show;
        self
    }

    /// Run until the user picks exit or input runs out.
    ///
    /// # Errors
    ///
    /// Returns an error only if reading input or writing output fails.
    pub fn run(&mut self) -> io::Result<()> {
        loop {
            self.print_options()?;
            let choice = match self.read_choice()? {
                Some(choice) => choice,
                None => EXIT_CHOICE,
            };

            match choice {
                1 => self.add_student()?,
                2 => self.edit_student()?,
                3 => self.remove_student()?,
                4 => self.search_student()?,
                5 => self.display_all()?,
                EXIT_CHOICE => {
                    writeln!(self.output, "Exiting... Goodbye!")?;
                    return Ok(());
                }
                _ => writeln!(self.output, "Invalid choice.")?,
            }
        }
    }

    fn print_options(&mut self) -> io::Result<()> {
        if self.show_header {
            writeln!(self.output, "\n=== Student Management System ===")?;
        }
        writeln!(self.output, "1. Add Student")?;
        writeln!(self.output, "2. Edit Student")?;
        writeln!(self.output, "3. Remove Student")?;
        writeln!(self.output, "4. Search Student")?;
        writeln!(self.output, "5. Display All Students")?;
        writeln!(self.output, "6. Exit")?;
        write!(self.output, "Enter your choice: ")?;
        self.output.flush()
    }

    /// Read lines until one holds a number. Blank lines are skipped.
    ///
    /// Returns `None` at end of input.
    fn read_choice(&mut self) -> io::Result<Option<i64>> {
        loop {
            let Some(line) = self.read_line()? else {
                return Ok(None);
            };
            if line.is_empty() {
                continue;
            }
            match line.parse() {
                Ok(choice) => return Ok(Some(choice)),
                Err(_) => {
                    write!(self.output, "Invalid input. Enter a number: ")?;
                    self.output.flush()?;
                }
            }
        }
    }

    /// Read one line. Bytes that are not valid UTF-8 become U+FFFD.
    fn read_line(&mut self) -> io::Result<Option<String>> {
        let mut buf = Vec::new();
        if self.input.read_until(b'\n', &mut buf)? == 0 {
            return Ok(None);
        }
        Ok(Some(String::from_utf8_lossy(&buf).trim().to_string()))
    }

    /// Print `label` and read one answer. End of input reads as empty.
    fn prompt(&mut self, label: &str) -> io::Result<String> {
        write!(self.output, "{label}")?;
        self.output.flush()?;
        Ok(self.read_line()?.unwrap_or_default())
    }

    fn add_student(&mut self) -> io::Result<()> {
        let name = self.prompt("Enter name: ")?;
        let roll = self.prompt("Enter roll number: ")?;
        let grade = self.prompt("Enter grade: ")?;

        match self.roster.add(&name, &roll, &grade) {
            Ok(()) => writeln!(self.output, "Student added successfully."),
            Err(Error::MissingField { .. }) => writeln!(self.output, "All fields are required."),
            Err(Error::DuplicateRollNumber { .. }) => writeln!(
                self.output,
                "Student with this roll number already exists."
            ),
            Err(e) => writeln!(self.output, "Error: {e}"),
        }
    }

    fn edit_student(&mut self) -> io::Result<()> {
        let roll = self.prompt("Enter roll number of student to edit: ")?;
        if self.roster.find(&roll).is_none() {
            return writeln!(self.output, "Student not found.");
        }

        let name = self.prompt("Enter new name: ")?;
        let grade = self.prompt("Enter new grade: ")?;

        match self.roster.edit(&roll, &name, &grade) {
            Ok(()) => writeln!(self.output, "Student details updated."),
            Err(Error::MissingField { .. }) => {
                writeln!(self.output, "Name and grade cannot be empty.")
            }
            Err(Error::NotFound { .. }) => writeln!(self.output, "Student not found."),
            Err(e) => writeln!(self.output, "Error: {e}"),
        }
    }

    fn remove_student(&mut self) -> io::Result<()> {
        let roll = self.prompt("Enter roll number to remove: ")?;

        match self.roster.remove(&roll) {
            Ok(_) => writeln!(self.output, "Student removed successfully."),
            Err(Error::NotFound { .. }) => writeln!(self.output, "Student not found."),
            Err(e) => writeln!(self.output, "Error: {e}"),
        }
    }

    fn search_student(&mut self) -> io::Result<()> {
        let roll = self.prompt("Enter roll number to search: ")?;

        match self.roster.find(&roll) {
            Some(student) => writeln!(self.output, "Student Found: {student}"),
            None => writeln!(self.output, "Student not found."),
        }
    }

    fn display_all(&mut self) -> io::Result<()> {
        let students = self.roster.students();
        if students.is_empty() {
            return writeln!(self.output, "No students found.");
        }

        writeln!(self.output, "\n--- Student List ---")?;
        for student in students {
            writeln!(self.output, "{student}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;
    use crate::storage::Storage;
    use crate::student::Student;

    fn create_test_roster() -> Roster {
        Roster::open(Storage::open_in_memory().expect("failed to create test storage"))
    }

    /// Run a scripted session and return everything it printed.
    fn run_session(roster: &mut Roster, script: &str) -> String {
        let mut output = Vec::new();
        Menu::new(roster, Cursor::new(script.as_bytes()), &mut output)
            .run()
            .expect("session failed");
        String::from_utf8(output).expect("output is not UTF-8")
    }

    #[test]
    fn test_exit_immediately() {
        let mut roster = create_test_roster();
        let out = run_session(&mut roster, "6\n");

        assert!(out.contains("=== Student Management System ==="));
        assert!(out.contains("Enter your choice: "));
        assert!(out.ends_with("Exiting... Goodbye!\n"));
    }

    #[test]
    fn test_end_of_input_exits() {
        let mut roster = create_test_roster();
        let out = run_session(&mut roster, "");
        assert!(out.ends_with("Exiting... Goodbye!\n"));
    }

    #[test]
    fn test_non_numeric_input_reprompts() {
        let mut roster = create_test_roster();
        let out = run_session(&mut roster, "abc\n\nfive\n6\n");

        assert_eq!(out.matches("Invalid input. Enter a number: ").count(), 2);
        assert!(out.ends_with("Exiting... Goodbye!\n"));
    }

    #[test]
    fn test_invalid_utf8_line_reprompts() {
        let mut roster = create_test_roster();
        let mut output = Vec::new();
        Menu::new(
            &mut roster,
            Cursor::new(&b"\xff\xfe\n1\nAlice\nR1\nA\n6\n"[..]),
            &mut output,
        )
        .run()
        .expect("session failed");

        let out = String::from_utf8(output).unwrap();
        assert_eq!(out.matches("Invalid input. Enter a number: ").count(), 1);
        assert!(out.contains("Student added successfully."));
        assert!(out.ends_with("Exiting... Goodbye!\n"));
        assert_eq!(roster.students(), &[Student::new("Alice", "R1", "A")]);
    }

    #[test]
    fn test_invalid_utf8_field_is_kept_lossily() {
        let mut roster = create_test_roster();
        let mut output = Vec::new();
        Menu::new(
            &mut roster,
            Cursor::new(&b"1\nAl\xffce\nR1\nA\n6\n"[..]),
            &mut output,
        )
        .run()
        .expect("session failed");

        assert_eq!(roster.students()[0].name(), "Al\u{FFFD}ce");
    }

    #[test]
    fn test_out_of_range_choice() {
        let mut roster = create_test_roster();
        let out = run_session(&mut roster, "9\n0\n6\n");

        assert_eq!(out.matches("Invalid choice.").count(), 2);
    }

    #[test]
    fn test_add_and_list() {
        let mut roster = create_test_roster();
        let out = run_session(&mut roster, "1\nAlice\nR1\nA\n5\n6\n");

        assert!(out.contains("Student added successfully."));
        assert!(out.contains("--- Student List ---"));
        assert!(out.contains("Name: Alice, Roll Number: R1, Grade: A"));
        assert_eq!(roster.students(), &[Student::new("Alice", "R1", "A")]);
    }

    #[test]
    fn test_add_duplicate_rejected() {
        let mut roster = create_test_roster();
        let out = run_session(&mut roster, "1\nAlice\nR1\nA\n1\nBob\nr1\nB\n6\n");

        assert!(out.contains("Student with this roll number already exists."));
        assert_eq!(roster.students().len(), 1);
    }

    #[test]
    fn test_add_missing_field() {
        let mut roster = create_test_roster();
        let out = run_session(&mut roster, "1\nAlice\n\nA\n6\n");

        assert!(out.contains("All fields are required."));
        assert!(roster.students().is_empty());
    }

    #[test]
    fn test_edit_student() {
        let mut roster = create_test_roster();
        roster.add("Alice", "R1", "A").unwrap();

        let out = run_session(&mut roster, "2\nr1\nAlicia\nB\n6\n");
        assert!(out.contains("Student details updated."));
        assert_eq!(roster.students(), &[Student::new("Alicia", "R1", "B")]);
    }

    #[test]
    fn test_edit_unknown_student_skips_prompts() {
        let mut roster = create_test_roster();
        let out = run_session(&mut roster, "2\nR9\n6\n");

        assert!(out.contains("Student not found."));
        assert!(!out.contains("Enter new name: "));
    }

    #[test]
    fn test_edit_empty_fields() {
        let mut roster = create_test_roster();
        roster.add("Alice", "R1", "A").unwrap();

        let out = run_session(&mut roster, "2\nR1\n\nB\n6\n");
        assert!(out.contains("Name and grade cannot be empty."));
        assert_eq!(roster.students(), &[Student::new("Alice", "R1", "A")]);
    }

    #[test]
    fn test_remove_and_search() {
        let mut roster = create_test_roster();
        roster.add("Alice", "R1", "A").unwrap();

        let out = run_session(&mut roster, "4\nr1\n3\nR1\n4\nR1\n3\nR1\n6\n");
        assert!(out.contains("Student Found: Name: Alice, Roll Number: R1, Grade: A"));
        assert!(out.contains("Student removed successfully."));
        assert_eq!(out.matches("Student not found.").count(), 2);
        assert!(roster.students().is_empty());
    }

    #[test]
    fn test_list_empty() {
        let mut roster = create_test_roster();
        let out = run_session(&mut roster, "5\n6\n");
        assert!(out.contains("No students found."));
    }

    #[test]
    fn test_hidden_header() {
        let mut roster = create_test_roster();
        let mut output = Vec::new();
        Menu::new(&mut roster, Cursor::new(&b"6\n"[..]), &mut output)
            .show_header(false)
            .run()
            .unwrap();

        let out = String::from_utf8(output).unwrap();
        assert!(!out.contains("==="));
        assert!(out.contains("1. Add Student"));
    }
}
