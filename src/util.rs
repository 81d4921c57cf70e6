use std::io::{BufRead, Write};

/// Clears the console screen.
pub fn clear_screen() {
    print!("\x1b[2J\x1b[H");
    std::io::stdout().flush().ok();
}

/// Prints the application header.
pub fn print_header() {
    println!("{}", "=".repeat(60));
    println!("ROLLBAR RUST SDK - INTERACTIVE DEMO");
    println!("{}", "=".repeat(60));
    println!();
}

/// Waits for the user to press Enter to continue.
pub fn wait_for_user() {
    print!("\nPress Enter to continue...");
    std::io::stdout().flush().ok();
    read_line();
}

/// Reads one line from stdin. `None` means stdin was closed.
pub fn read_line() -> Option<String> {
    let mut line = String::new();
    match std::io::stdin().lock().read_line(&mut line) {
        Ok(0) | Err(_) => None,
        Ok(_) => Some(line),
    }
}
