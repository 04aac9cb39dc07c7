//! The `rollbook shell` command: the numbered interactive menu.

use std::io::{self, BufRead, Write};

use anyhow::Result;

use rollbook_core::{RecordError, RecordStore};

use super::Settings;
use crate::input::{parse_choice, parse_positive, InputError, MenuChoice};

pub fn execute(settings: &Settings) -> Result<()> {
    let mut store = settings.open_store()?;
    let stdin = io::stdin();
    let stdout = io::stdout();
    Shell::new(stdin.lock(), stdout.lock()).run(&mut store)
}

enum Flow {
    Continue,
    Exit,
}

/// Menu loop over arbitrary line input and text output.
pub struct Shell<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Shell<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Run until the user confirms exit or input ends. Both paths save.
    pub fn run(&mut self, store: &mut RecordStore) -> Result<()> {
        loop {
            self.print_menu()?;
            let Some(line) = self.prompt("Choose (1-10): ")? else {
                return self.finish(store);
            };

            let choice = match parse_choice(&line) {
                Ok(choice) => choice,
                Err(InputError::OutOfRange { max }) => {
                    writeln!(self.output, "Choose between 1 and {max}.")?;
                    continue;
                }
                Err(_) => {
                    writeln!(self.output, "Enter a number 1-10.")?;
                    continue;
                }
            };

            let flow = match choice {
                MenuChoice::Add => self.add(store)?,
                MenuChoice::ShowAll => self.show_all(store)?,
                MenuChoice::FindByRoll => self.find_by_roll(store)?,
                MenuChoice::FindByName => self.find_by_name(store)?,
                MenuChoice::Update => self.update(store)?,
                MenuChoice::Delete => self.delete(store)?,
                MenuChoice::SortByRoll => {
                    let result = store.sort_by_roll();
                    self.report(result.map(|_| "Sorted by roll.".to_string()))?
                }
                MenuChoice::SortByName => {
                    let result = store.sort_by_name();
                    self.report(result.map(|_| "Sorted by name.".to_string()))?
                }
                MenuChoice::Count => {
                    writeln!(self.output, "Total students: {}", store.len())?;
                    Flow::Continue
                }
                MenuChoice::Exit => self.confirm_exit()?,
            };

            if let Flow::Exit = flow {
                return self.finish(store);
            }
        }
    }

    fn print_menu(&mut self) -> io::Result<()> {
        writeln!(self.output, "\n=== Student Records ===")?;
        for (idx, choice) in MenuChoice::ALL.iter().enumerate() {
            writeln!(self.output, "{}. {}", idx + 1, choice.label())?;
        }
        Ok(())
    }

    fn add(&mut self, store: &mut RecordStore) -> Result<Flow> {
        let Some(roll) = self.read_roll("Enter Roll: ")? else {
            return Ok(Flow::Exit);
        };
        let Some(name) = self.prompt("Enter Name: ")? else {
            return Ok(Flow::Exit);
        };
        let Some(grade) = self.prompt("Enter Grade (A+, A, B+, B, C+, C, D, F): ")? else {
            return Ok(Flow::Exit);
        };

        let result = store.add(roll, &name, &grade);
        self.report(result.map(|r| format!("Student added: {r}")))
    }

    fn show_all(&mut self, store: &RecordStore) -> Result<Flow> {
        if store.is_empty() {
            writeln!(self.output, "No students found.")?;
            return Ok(Flow::Continue);
        }
        writeln!(self.output, "\n--- All Students ({}) ---", store.len())?;
        for record in store.records() {
            writeln!(self.output, "{record}")?;
        }
        Ok(Flow::Continue)
    }

    fn find_by_roll(&mut self, store: &RecordStore) -> Result<Flow> {
        let Some(roll) = self.read_roll("Enter Roll to find: ")? else {
            return Ok(Flow::Exit);
        };
        let result = store.find_by_roll(roll).map(|found| match found {
            Some(record) => format!("Found: {record}"),
            None => "Not found.".to_string(),
        });
        self.report(result)
    }

    fn find_by_name(&mut self, store: &RecordStore) -> Result<Flow> {
        let Some(query) = self.prompt("Enter Name to search: ")? else {
            return Ok(Flow::Exit);
        };
        let result = store.find_by_name(&query).map(|matches| {
            let mut lines = vec![format!("\n--- Search results for \"{query}\" ---")];
            if matches.is_empty() {
                lines.push("No matching students.".to_string());
            }
            lines.extend(matches.iter().map(|r| r.to_string()));
            lines.join("\n")
        });
        self.report(result)
    }

    fn update(&mut self, store: &mut RecordStore) -> Result<Flow> {
        let Some(roll) = self.read_roll("Enter Roll to update: ")? else {
            return Ok(Flow::Exit);
        };
        let Some(name) = self.prompt("Enter New Name (leave blank to keep): ")? else {
            return Ok(Flow::Exit);
        };
        let Some(grade) = self.prompt("Enter New Grade (leave blank to keep): ")? else {
            return Ok(Flow::Exit);
        };

        let result = store
            .update(roll, Some(&name), Some(&grade))
            .map(|outcome| {
                let mut lines: Vec<String> = outcome
                    .rejected
                    .iter()
                    .map(|e| format!("Not updated: {e}"))
                    .collect();
                lines.push(format!("Record updated: {}", outcome.record));
                lines.join("\n")
            });
        self.report(result)
    }

    fn delete(&mut self, store: &mut RecordStore) -> Result<Flow> {
        let Some(roll) = self.read_roll("Enter Roll to delete: ")? else {
            return Ok(Flow::Exit);
        };
        let result = store.delete(roll);
        self.report(result.map(|_| "Student deleted.".to_string()))
    }

    fn confirm_exit(&mut self) -> Result<Flow> {
        match self.prompt("Exit? (yes/no): ")? {
            Some(answer) if !answer.trim().eq_ignore_ascii_case("yes") => Ok(Flow::Continue),
            _ => Ok(Flow::Exit),
        }
    }

    fn finish(&mut self, store: &RecordStore) -> Result<()> {
        match store.save() {
            Ok(()) => writeln!(self.output, "Saved and exiting. Bye!")?,
            Err(e) => writeln!(self.output, "Error: {e}\nExiting without a final save.")?,
        }
        Ok(())
    }

    /// Print the success message or the error. Store errors never end the
    /// session.
    fn report(&mut self, result: Result<String, RecordError>) -> Result<Flow> {
        match result {
            Ok(message) => writeln!(self.output, "{message}")?,
            Err(e) => writeln!(self.output, "Error: {e}")?,
        }
        Ok(Flow::Continue)
    }

    /// Prompt until a positive integer is entered. `None` on end of input.
    fn read_roll(&mut self, prompt: &str) -> io::Result<Option<i64>> {
        let mut prompt = prompt;
        loop {
            let Some(line) = self.prompt(prompt)? else {
                return Ok(None);
            };
            match parse_positive(&line) {
                Ok(roll) => return Ok(Some(roll)),
                Err(InputError::NotPositive) => prompt = "Enter positive number: ",
                Err(_) => prompt = "Invalid number. Try again: ",
            }
        }
    }

    /// Write `text`, then read one line without its terminator. `None` on
    /// end of input.
    fn prompt(&mut self, text: &str) -> io::Result<Option<String>> {
        write!(self.output, "{text}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        let trimmed = line.trim_end_matches(|c| c == '\n' || c == '\r').len();
        line.truncate(trimmed);
        Ok(Some(line))
    }
}
