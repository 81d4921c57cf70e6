use std::io::Write;

use crate::scenarios::Scenario;
use crate::util;

/// The main menu: displays the scenario list, reads the user's choice and
/// runs the selected demo until the user exits.
pub struct Menu {
    scenarios: Vec<Box<dyn Scenario>>,
}

#[derive(Debug, PartialEq)]
enum Choice {
    Exit,
    Scenario(usize),
    Invalid,
}

impl Menu {
    pub fn new(scenarios: Vec<Box<dyn Scenario>>) -> Self {
        Menu { scenarios }
    }

    fn display(&self) {
        println!("\nAvailable Demos:");
        println!("{}", "-".repeat(60));

        for (idx, scenario) in self.scenarios.iter().enumerate() {
            println!("{}. {} - {}", idx + 1, scenario.name(), scenario.description());
        }

        println!("0. Exit");
        println!("{}", "-".repeat(60));
    }

    pub fn run(&self) {
        loop {
            util::clear_screen();
            util::print_header();
            self.display();

            print!("\nSelect a demo (0-{}): ", self.scenarios.len());
            std::io::stdout().flush().ok();

            let line = match util::read_line() {
                Some(line) => line,
                // stdin is gone, leave the loop rather than spin.
                None => break,
            };

            match parse_choice(&line, self.scenarios.len()) {
                Choice::Exit => break,
                Choice::Scenario(index) => {
                    self.scenarios[index].run();
                }
                Choice::Invalid => {
                    println!("\nInvalid choice. Please select 0-{}.", self.scenarios.len());
                    util::wait_for_user();
                }
            }
        }

        println!("\nExiting demo. Check your Rollbar dashboard to see all the data!");
        println!("You can search, filter, and analyze all the errors sent.\n");
    }
}

fn parse_choice(input: &str, count: usize) -> Choice {
    match input.trim().parse::<usize>() {
        Ok(0) => Choice::Exit,
        Ok(n) if n <= count => Choice::Scenario(n - 1),
        _ => Choice::Invalid,
    }
}
