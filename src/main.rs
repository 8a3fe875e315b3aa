use std::process::exit;

use colored::Colorize;
use pokedex::app::{self, Outcome};

fn main() {
    match app::run_cli() {
        Ok(Outcome::Success) => {}
        Ok(Outcome::ViewFailed) => exit(1),
        Err(e) => {
            eprintln!("[{}] {}", "ERR".bold().red(), e);
            exit(2);
        }
    }
}
