//! hotel-desk
//!
//! Line-oriented front desk: search rooms and record a reservation.
//! End of input at any prompt cancels the current action.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use hotel_reservation::{DeskConfig, FrontDesk, ReservationRequest};

#[derive(Parser)]
#[command(name = "hotel-desk")]
#[command(about = "Search hotel rooms and make a reservation", long_about = None)]
struct Cli {
    /// JSON file with `sink_path` and `rooms` (built-in rooms when omitted)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// File that receives reservation records (overrides the config)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Log at debug level unless RUST_LOG is set
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(io::stderr)
        .init();

    let mut config = match &cli.config {
        Some(path) => DeskConfig::from_file(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => DeskConfig::default(),
    };
    if let Some(output) = cli.output {
        config.sink_path = output;
    }
    config.validate().context("invalid configuration")?;

    let desk = FrontDesk::from_config(&config);
    let stdin = io::stdin();
    let stdout = io::stdout();
    run(&desk, stdin.lock(), stdout.lock())?;
    Ok(())
}

fn run(desk: &FrontDesk, mut input: impl BufRead, mut out: impl Write) -> io::Result<()> {
    loop {
        writeln!(out, "1) Search Rooms  2) Make Reservation  q) Quit")?;
        let Some(choice) = prompt(&mut input, &mut out, "> ")? else {
            return Ok(());
        };
        match choice.trim() {
            "1" => search_rooms(desk, &mut input, &mut out)?,
            "2" => make_reservation(desk, &mut input, &mut out)?,
            "q" | "Q" => return Ok(()),
            _ => writeln!(out, "Please choose 1, 2 or q.")?,
        }
    }
}

// Reads one line without its terminator, `None` at end of input
fn prompt(
    input: &mut impl BufRead,
    out: &mut impl Write,
    text: &str,
) -> io::Result<Option<String>> {
    write!(out, "{}", text)?;
    out.flush()?;
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    let trimmed_len = line.trim_end_matches(['\r', '\n']).len();
    line.truncate(trimmed_len);
    Ok(Some(line))
}

fn search_rooms(
    desk: &FrontDesk,
    input: &mut impl BufRead,
    out: &mut impl Write,
) -> io::Result<()> {
    let term = prompt(input, out, "Enter your room preferences: ")?;
    if let Some(message) = desk.search(term.as_deref()).message() {
        writeln!(out, "{}", message.trim_end())?;
    }
    Ok(())
}

fn make_reservation(
    desk: &FrontDesk,
    input: &mut impl BufRead,
    out: &mut impl Write,
) -> io::Result<()> {
    writeln!(out, "Select a room:")?;
    for (i, room) in desk.catalog().snapshot().iter().enumerate() {
        writeln!(out, "  {}) {}", i + 1, room)?;
    }
    let Some(selection) = prompt(input, out, "Room number: ")? else {
        return Ok(());
    };
    // Listed numbers start at 1
    let room_index = match selection.trim().parse::<usize>() {
        Ok(n) if n >= 1 => n - 1,
        _ => {
            writeln!(out, "Please enter one of the listed room numbers.")?;
            return Ok(());
        }
    };

    if let Err(e) = desk.select_room(Some(room_index)) {
        if let Some(message) = e.user_message() {
            writeln!(out, "{}", message)?;
        }
        return Ok(());
    }

    let request = ReservationRequest {
        room_index: Some(room_index),
        check_in: prompt(input, out, "Enter the check-in date (YYYY-MM-DD): ")?,
        check_out: prompt(input, out, "Enter the check-out date (YYYY-MM-DD): ")?,
        guest_name: prompt(input, out, "Enter the guest name: ")?,
    };
    match desk.reserve(request) {
        Ok(record) => writeln!(out, "{}", record)?,
        Err(e) => {
            if let Some(message) = e.user_message() {
                writeln!(out, "{}", message)?;
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use hotel_reservation::MemorySink;
    use std::sync::Arc;

    fn session(script: &str) -> (String, Arc<MemorySink>) {
        let sink = Arc::new(MemorySink::new());
        let desk = FrontDesk::new(DeskConfig::default().catalog(), sink.clone());
        let mut out = Vec::new();
        run(&desk, script.as_bytes(), &mut out).unwrap();
        (String::from_utf8(out).unwrap(), sink)
    }

    #[test]
    fn test_search_session() {
        let (out, _) = session("1\ndeluxe\n1\nattic\nq\n");
        assert!(out.contains("Search results:\nDeluxe Room ($150/night)\n"));
        assert!(out.contains("No rooms found matching the search term."));
    }

    #[test]
    fn test_reservation_session() {
        let (out, sink) = session("2\n1\n2025-01-05\n2025-01-07\nAlice\n2\n1\n");
        assert!(out.contains("Guest Name: Alice\nTotal Cost: $200"));
        assert!(out.contains("Room is not available. Please choose another room."));
        assert_eq!(sink.len(), 1);
    }

    #[test]
    fn test_end_of_input_cancels_reservation() {
        let (out, sink) = session("2\n2\n2025-01-05\n");
        assert!(!out.contains("Reservation Details:"));
        assert!(sink.is_empty());
    }

    #[test]
    fn test_invalid_input_messages() {
        let (out, sink) = session("2\nzero\n2\n4\n2\n2\n2025-01-07\n2025-01-05\nBob\nq\n");
        assert!(out.contains("Please enter one of the listed room numbers."));
        assert!(out.contains("out of range"));
        assert!(out.contains(
            "Invalid date range. Check-out date must be after the check-in date."
        ));
        assert!(sink.is_empty());
    }
}
