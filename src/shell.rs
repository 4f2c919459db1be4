//! The interactive prompt of the binary.
//!
//! This is the presentation layer over the collection: it owns the loaded collection
//! and the current selection, and forwards every command to the core operations,
//! re-printing the table from the returned state. The commands mirror the actions of
//! the tool: scan, select, move up/down, bulk set, per-entry edit, export and import.
//!
//! Everything here is synchronous and single-threaded: one command at a time, file
//! reads and writes are whole-file and complete before the prompt comes back.

use std::io::{self, Write};
use std::path::Path;

use anyhow::{bail, Context, Error};
use itertools::Itertools;

use crate::collection::TestcaseCollection;
use crate::format::{apply_import, export_collection, matched_order, parse_import, ImportReport};
use crate::opt::Opt;
use crate::scan::scan_directory;
use crate::testcase::{Field, FIELDS};

/// How to decide whether the imported file order should be applied to the collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ReorderPolicy {
    /// Ask for confirmation at the prompt.
    Ask,
    /// Apply without asking (`--apply-order`).
    Always,
}

/// What the prompt loop should do after a command.
enum Outcome {
    Continue,
    Quit,
}

/// An interactive session: the collection currently loaded and the selected positions.
#[derive(Debug, Default)]
pub struct Session {
    /// The collection currently loaded.
    pub collection: TestcaseCollection,
    /// The currently selected positions, sorted and in range.
    pub selection: Vec<usize>,
}

/// Run the binary: initial scan/import/export according to the CLI arguments, then the
/// interactive prompt unless a one-shot `--export` was requested.
pub fn main_shell(opt: Opt) -> Result<(), Error> {
    let mut session = Session::default();
    if let Some(dir) = &opt.dir {
        session.scan(dir)?;
    }
    if let Some(path) = &opt.import {
        let policy = if opt.apply_order {
            ReorderPolicy::Always
        } else {
            ReorderPolicy::Ask
        };
        session.import(path, policy)?;
    }
    if let Some(path) = &opt.export {
        return session.export(path);
    }
    session.run()
}

impl Session {
    /// The prompt loop. Command failures are printed and the loop goes on; only I/O
    /// failures on the terminal itself end the session.
    pub fn run(&mut self) -> Result<(), Error> {
        println!("Type `help` for the available commands.");
        loop {
            print!("tcman> ");
            io::stdout().flush()?;
            let mut line = String::new();
            if io::stdin().read_line(&mut line)? == 0 {
                break;
            }
            match self.dispatch(line.trim()) {
                Ok(Outcome::Continue) => {}
                Ok(Outcome::Quit) => break,
                Err(e) => eprintln!("Error: {:#}", e),
            }
        }
        Ok(())
    }

    /// Execute a single command line.
    fn dispatch(&mut self, line: &str) -> Result<Outcome, Error> {
        let tokens = line.split_whitespace().collect_vec();
        let Some((&command, args)) = tokens.split_first() else {
            return Ok(Outcome::Continue);
        };
        trace!("Command {:?} with args {:?}", command, args);
        match command {
            "help" | "?" => print_help(),
            "scan" => {
                let [dir] = args else { bail!("Usage: scan DIR") };
                self.scan(Path::new(dir))?;
            }
            "list" | "ls" => self.print_table(),
            "select" => {
                if args.is_empty() {
                    println!("Selected: {}", format_selection(&self.selection));
                } else {
                    self.select(args)?;
                }
            }
            "up" => {
                self.selection = self.collection.move_up(&self.selection);
                self.print_table();
            }
            "down" => {
                self.selection = self.collection.move_down(&self.selection);
                self.print_table();
            }
            "set" => self.bulk_edit(args)?,
            "edit" => {
                let [index] = args else { bail!("Usage: edit INDEX") };
                let index = index
                    .parse()
                    .with_context(|| format!("Invalid index: {}", index))?;
                self.edit(index)?;
            }
            "export" => {
                let [path] = args else { bail!("Usage: export FILE") };
                self.export(Path::new(path))?;
            }
            "import" => {
                let [path] = args else { bail!("Usage: import FILE") };
                self.import(Path::new(path), ReorderPolicy::Ask)?;
            }
            "json" => {
                let json = serde_json::to_string_pretty(&self.collection)
                    .context("Non-serializable collection")?;
                println!("{}", json);
            }
            "quit" | "exit" | "q" => return Ok(Outcome::Quit),
            _ => bail!("Unknown command: {} (type `help`)", command),
        }
        Ok(Outcome::Continue)
    }

    /// Scan a directory, replacing the current collection and resetting the selection.
    fn scan(&mut self, dir: &Path) -> Result<(), Error> {
        self.collection = scan_directory(dir)?;
        self.selection.clear();
        println!(
            "Scanned {}: {} matching pairs",
            dir.display(),
            self.collection.len()
        );
        Ok(())
    }

    /// Replace the selection with the indices/ranges given on the command line.
    fn select(&mut self, args: &[&str]) -> Result<(), Error> {
        self.selection = match args {
            ["all"] => (0..self.collection.len()).collect(),
            ["none"] => Vec::new(),
            _ => parse_selection(args, self.collection.len())?,
        };
        println!("Selected: {}", format_selection(&self.selection));
        Ok(())
    }

    /// Bulk edit: apply `field=value` arguments to every selected entry. Fields not
    /// mentioned (or given an empty value) are left untouched.
    fn bulk_edit(&mut self, args: &[&str]) -> Result<(), Error> {
        if self.selection.is_empty() {
            bail!("Nothing selected: use `select` first");
        }
        let values = parse_field_values(args)?;
        self.collection
            .bulk_update_raw(&self.selection, values.iter().map(|(f, v)| (*f, *v)))?;
        println!("Updated {} entries", self.selection.len());
        Ok(())
    }

    /// Edit a single entry, prompting for each field prefilled with the current value.
    /// An empty answer keeps the shown value; every value must be an integer or the
    /// whole edit is rejected.
    fn edit(&mut self, index: usize) -> Result<(), Error> {
        let Some(entry) = self.collection.get(index) else {
            bail!("Index out of range: {}", index);
        };
        println!("Editing {} (empty answer keeps the shown value)", entry.name);
        let prefill = FIELDS.map(|field| (field, entry.get(field).to_string()));
        let mut values = Vec::new();
        for (field, current) in prefill {
            print!("  {} [{}]: ", field, current);
            io::stdout().flush()?;
            let mut answer = String::new();
            io::stdin().read_line(&mut answer)?;
            let answer = answer.trim();
            let value = if answer.is_empty() {
                current
            } else {
                answer.to_string()
            };
            values.push((field, value));
        }
        self.collection
            .edit_raw(index, values.iter().map(|(f, v)| (*f, v.as_str())))?;
        println!("Updated entry {}", index);
        Ok(())
    }

    /// Export the collection to a file in the exchange format.
    fn export(&self, path: &Path) -> Result<(), Error> {
        if self.collection.is_empty() {
            bail!("No testcases to export");
        }
        std::fs::write(path, export_collection(&self.collection))
            .with_context(|| format!("Failed to write {}", path.display()))?;
        println!(
            "Exported {} entries to {}",
            self.collection.len(),
            path.display()
        );
        Ok(())
    }

    /// Import a file in the exchange format and reconcile it against the collection.
    /// Reordering to the imported order is gated by `policy`.
    fn import(&mut self, path: &Path, policy: ReorderPolicy) -> Result<(), Error> {
        if self.collection.is_empty() {
            bail!("Nothing to import into: scan a directory first");
        }
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Cannot read {}", path.display()))?;
        let import = parse_import(&text);
        if import.order.is_empty() {
            bail!("No valid entries found in {}", path.display());
        }
        let matched = matched_order(&self.collection, &import);
        let report = apply_import(&mut self.collection, &import);
        print_report(&report);
        if !matched.is_empty() {
            let apply = match policy {
                ReorderPolicy::Always => true,
                ReorderPolicy::Ask => {
                    ask_confirm("Apply the imported order (unmatched entries stay last)?")?
                }
            };
            if apply {
                self.collection.reorder_by_names(&matched);
                self.selection.clear();
            }
        }
        Ok(())
    }

    /// Print the collection as a table, marking the selected entries.
    fn print_table(&self) {
        if self.collection.is_empty() {
            println!("(no testcases loaded)");
            return;
        }
        println!(
            "{:>3}  {:<24} {:>10} {:>12} {:>7} {:>10}",
            "#", "name", "timeLimit", "memoryLimit", "score", "subtaskId"
        );
        for (index, entry) in self.collection.iter().enumerate() {
            let marker = if self.selection.contains(&index) { '*' } else { ' ' };
            println!(
                "{:>3}{} {:<24} {:>10} {:>12} {:>7} {:>10}",
                index, marker, entry.name, entry.time_limit, entry.memory_limit, entry.score,
                entry.subtask_id
            );
        }
    }
}

/// Parse selection arguments: single indices (`3`) and inclusive ranges (`1-4`).
fn parse_selection(args: &[&str], len: usize) -> Result<Vec<usize>, Error> {
    let mut selection = Vec::new();
    for arg in args {
        if let Some((from, to)) = arg.split_once('-') {
            let from: usize = from
                .parse()
                .with_context(|| format!("Invalid range: {}", arg))?;
            let to: usize = to
                .parse()
                .with_context(|| format!("Invalid range: {}", arg))?;
            if from > to {
                bail!("Invalid range: {}", arg);
            }
            selection.extend(from..=to);
        } else {
            selection.push(
                arg.parse()
                    .with_context(|| format!("Invalid index: {}", arg))?,
            );
        }
    }
    if let Some(&out) = selection.iter().find(|&&index| index >= len) {
        bail!("Index out of range: {} (the list has {} entries)", out, len);
    }
    Ok(selection.into_iter().sorted().dedup().collect())
}

/// Parse `field=value` arguments into field/raw-value pairs.
fn parse_field_values<'a>(args: &[&'a str]) -> Result<Vec<(Field, &'a str)>, Error> {
    if args.is_empty() {
        bail!("Usage: set field=value [field=value ...]");
    }
    let mut values = Vec::new();
    for arg in args {
        let Some((field, value)) = arg.split_once('=') else {
            bail!("Expected field=value, got: {}", arg);
        };
        values.push((field.parse::<Field>()?, value));
    }
    Ok(values)
}

fn format_selection(selection: &[usize]) -> String {
    if selection.is_empty() {
        "(nothing)".into()
    } else {
        selection.iter().join(" ")
    }
}

/// Ask a yes/no question at the prompt. Anything but `y`/`yes` is a no.
fn ask_confirm(question: &str) -> Result<bool, Error> {
    print!("{} [y/N] ", question);
    io::stdout().flush()?;
    let mut answer = String::new();
    io::stdin().read_line(&mut answer)?;
    let answer = answer.trim().to_lowercase();
    Ok(answer == "y" || answer == "yes")
}

/// Print the summary of an import, truncating the invalid values to a few examples.
fn print_report(report: &ImportReport) {
    println!("Updated entries: {}", report.updated);
    if !report.missing.is_empty() {
        println!("Names not in the current list: {}", report.missing.len());
    }
    if !report.invalid.is_empty() {
        let examples = report
            .invalid
            .iter()
            .take(5)
            .map(|invalid| format!("{}.{}={:?}", invalid.name, invalid.field, invalid.value))
            .join(", ");
        println!(
            "Skipped invalid values: {} (e.g. {})",
            report.invalid.len(),
            examples
        );
    }
}

fn print_help() {
    println!(
        "\
Commands:
  scan DIR            scan DIR for .in/.ans pairs, replacing the current list
  list | ls           print the current list (selected entries marked with *)
  select N N-M ...    select positions (also `select all` / `select none`)
  up | down           move the selected entries one position up/down
  set field=value ... set fields of the selected entries (omitted fields keep
                      their value); fields: timeLimit memoryLimit score subtaskId
  edit N              edit all the fields of entry N, prefilled
  export FILE         write the list to FILE in the exchange format
  import FILE         update the list from FILE (matched by name), then
                      optionally reorder to the file order
  json                dump the list as JSON
  quit                exit"
    );
}
