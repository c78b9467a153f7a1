use std::io::{self, BufRead, Write};

use crate::application::{AppError, CountSource, InventoryLedger, RetryPolicy};
use crate::domain::{ParseQuantityError, parse_quantity};
use crate::io::ImportResult;

const MENU: &str = "\
Stock Control:
1. Add item
2. List items
3. Import stock from CSV file
4. Run stock balance
5. Export balance to Excel file
6. Exit";

/// Maximum number of row errors listed after an import.
const MAX_LISTED_ERRORS: usize = 10;

/// Numbered-menu front end over an [`InventoryLedger`].
///
/// Generic over its streams so it can run on the terminal or on in-memory
/// buffers. Operation failures are printed and the loop continues; only
/// failures of the streams themselves end the session with an error.
pub struct Shell<'a, R, W> {
    ledger: &'a mut InventoryLedger,
    input: R,
    output: W,
    policy: RetryPolicy,
}

impl<'a, R: BufRead, W: Write> Shell<'a, R, W> {
    pub fn new(ledger: &'a mut InventoryLedger, input: R, output: W) -> Self {
        Self {
            ledger,
            input,
            output,
            policy: RetryPolicy::default(),
        }
    }

    pub fn with_retry_policy(mut self, policy: RetryPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Run the menu loop until the user exits or input ends.
    pub fn run(&mut self) -> io::Result<()> {
        loop {
            writeln!(self.output)?;
            writeln!(self.output, "{}", MENU)?;
            let Some(choice) = prompt(&mut self.input, &mut self.output, "Choose an option: ")?
            else {
                writeln!(self.output)?;
                break;
            };

            match choice.trim() {
                "1" => self.add_item()?,
                "2" => writeln!(self.output, "{}", self.ledger.list_items())?,
                "3" => {
                    if let Some(path) = self.ask("Enter the CSV file path: ")? {
                        self.import_file(path.trim())?;
                    }
                }
                "4" => self.run_balance()?,
                "5" => {
                    if let Some(path) = self.ask("Enter the Excel file path for export: ")? {
                        self.export_file(path.trim())?;
                    }
                }
                "6" => {
                    writeln!(self.output, "Exiting...")?;
                    break;
                }
                other => {
                    log::debug!("Invalid menu choice: {:?}", other);
                    writeln!(self.output, "Invalid option. Try again.")?;
                }
            }
        }
        self.output.flush()
    }

    /// Import a CSV file and print the report.
    pub fn import_file(&mut self, path: &str) -> io::Result<()> {
        match self.ledger.import_from_csv(path) {
            Ok(result) => self.print_import_report(&result),
            Err(err) => self.report(&err),
        }
    }

    /// Export the balance and print the outcome.
    pub fn export_file(&mut self, path: &str) -> io::Result<()> {
        match self.ledger.export_balance(path) {
            Ok(summary) => writeln!(self.output, "{}", summary),
            Err(err) => self.report(&err),
        }
    }

    fn add_item(&mut self) -> io::Result<()> {
        let Some(name) = self.ask("Item name: ")? else {
            return Ok(());
        };
        let Some(quantity) = self.ask("Quantity: ")? else {
            return Ok(());
        };

        let quantity = match parse_quantity(&quantity) {
            Ok(quantity) => quantity,
            Err(err) => return writeln!(self.output, "Error: {}", err),
        };

        match self.ledger.add_item(name.trim(), quantity) {
            Ok(added) => writeln!(self.output, "{}", added),
            Err(err) => self.report(&err),
        }
    }

    fn run_balance(&mut self) -> io::Result<()> {
        let mut counts = TerminalCounts {
            input: &mut self.input,
            output: &mut self.output,
        };

        match self.ledger.run_reconciliation(&mut counts, self.policy) {
            Ok(rendered) => writeln!(self.output, "{}", rendered),
            Err(err) => self.report(&err),
        }
    }

    fn print_import_report(&mut self, result: &ImportResult) -> io::Result<()> {
        writeln!(self.output, "Stock imported successfully.")?;
        writeln!(self.output, "  Imported: {}", result.imported)?;
        writeln!(self.output, "  Errors:   {}", result.errors.len())?;

        if !result.errors.is_empty() {
            writeln!(self.output, "\nErrors:")?;
            for error in result.errors.iter().take(MAX_LISTED_ERRORS) {
                writeln!(self.output, "  {}", error)?;
            }
            if result.errors.len() > MAX_LISTED_ERRORS {
                writeln!(
                    self.output,
                    "  ... and {} more errors",
                    result.errors.len() - MAX_LISTED_ERRORS
                )?;
            }
        }
        Ok(())
    }

    fn report(&mut self, err: &AppError) -> io::Result<()> {
        if err.is_notice() {
            writeln!(self.output, "{}", err)
        } else {
            writeln!(self.output, "Error: {}", err)
        }
    }

    fn ask(&mut self, message: &str) -> io::Result<Option<String>> {
        prompt(&mut self.input, &mut self.output, message)
    }
}

/// Reads physical counts from the shell's own streams.
struct TerminalCounts<'s, R, W> {
    input: &'s mut R,
    output: &'s mut W,
}

impl<R: BufRead, W: Write> CountSource for TerminalCounts<'_, R, W> {
    fn next_count(&mut self, item: &str) -> io::Result<Option<String>> {
        prompt(
            &mut *self.input,
            &mut *self.output,
            &format!("Physical quantity of {}: ", item),
        )
    }

    fn rejected(&mut self, _item: &str, _error: &ParseQuantityError) -> io::Result<()> {
        writeln!(
            self.output,
            "Error: the quantity must be a number (integer or decimal)."
        )
    }
}

/// Print `message` and read one line. `None` means end of input.
///
/// Bytes that are not valid UTF-8 are replaced rather than rejected, so a
/// garbled line is handled like any other unrecognised answer.
fn prompt<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    message: &str,
) -> io::Result<Option<String>> {
    write!(output, "{}", message)?;
    output.flush()?;

    let mut line = Vec::new();
    if input.read_until(b'\n', &mut line)? == 0 {
        return Ok(None);
    }
    let line = String::from_utf8_lossy(&line);
    Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
}
