//! Coloured terminal output for workflow progress.

use colored::Colorize;

use gitsmart_sync::{Category, Reporter};

/// Prints each message to stdout, coloured by category. Step headers get a
/// blank line before them except for the first one.
#[derive(Debug, Default)]
pub struct TerminalReporter {
    steps_seen: usize,
}

impl Reporter for TerminalReporter {
    fn report(&mut self, category: Category, message: &str) {
        if category == Category::Step {
            if self.steps_seen > 0 {
                println!();
            }
            self.steps_seen += 1;
        }
        println!("{}", paint(category, message));
    }
}

fn paint(category: Category, message: &str) -> colored::ColoredString {
    match category {
        Category::Step => message.cyan().bold(),
        Category::Success => message.green(),
        Category::Error => message.red(),
        Category::Info => message.yellow(),
    }
}
