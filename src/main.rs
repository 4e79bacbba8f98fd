use std::env;
use std::fs;
use std::io::{self, BufRead, Write};
use std::process;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

use juniorcode_interpreter::{CancelHandle, Session, SessionEvent};

const POLL_INTERVAL_MS: u64 = 50;

fn main() {
    let args: Vec<String> = env::args().collect();

    if args.len() > 2 {
        eprintln!("Usage: {} [script-file]", args[0]);
        process::exit(1);
    }

    let running = Arc::new(AtomicBool::new(true));
    let cancel_slot: Arc<Mutex<Option<CancelHandle>>> = Arc::new(Mutex::new(None));

    let r = running.clone();
    let slot = cancel_slot.clone();
    ctrlc::set_handler(move || {
        r.store(false, Ordering::SeqCst);
        if let Ok(handle) = slot.lock() {
            if let Some(handle) = handle.as_ref() {
                handle.cancel();
            }
        }
        eprintln!("\n[INFO] Ctrl+C received. Stopping the program...");
    })
    .expect("Error setting Ctrl-C handler");

    let lines = spawn_stdin_reader();

    let interactive = args.len() < 2;
    let source = if interactive {
        match read_program_from_console(&lines, &running) {
            Some(source) => source,
            None => {
                println!("Bye bye!");
                return;
            }
        }
    } else {
        read_program_from_file(&args[1])
    };

    let session = Session::run(source);
    if let Ok(mut handle) = cancel_slot.lock() {
        *handle = Some(session.cancel_handle());
    }

    if interactive {
        println!();
        println!("Output:");
    }

    loop {
        if !running.load(Ordering::SeqCst) {
            println!("Bye bye!");
            break;
        }

        match session.poll_event(Duration::from_millis(POLL_INTERVAL_MS)) {
            Ok(SessionEvent::Output(text)) => println!("{}", text),
            Ok(SessionEvent::InputRequest(prompt)) => {
                print!("{} ", prompt);
                let _ = io::stdout().flush();
                match next_line(&lines, &running) {
                    Some(answer) => session.reply(&answer),
                    None => session.cancel(),
                }
            }
            Ok(SessionEvent::Finished(Ok(()))) => break,
            Ok(SessionEvent::Finished(Err(err))) => {
                if !running.load(Ordering::SeqCst) {
                    println!("Bye bye!");
                    break;
                }
                eprintln!("Error: {}", err);
                process::exit(1);
            }
            Err(RecvTimeoutError::Timeout) => {}
            // The worker is gone without a Finished event.
            Err(RecvTimeoutError::Disconnected) => process::exit(1),
        }
    }
}

fn read_program_from_file(filename: &str) -> String {
    fs::read_to_string(filename).unwrap_or_else(|err| {
        eprintln!("Could not read '{}': {}", filename, err);
        process::exit(1);
    })
}

fn read_program_from_console(lines: &Receiver<String>, running: &AtomicBool) -> Option<String> {
    println!("Welcome to JuniorCode!");
    println!("Type your code below (type 'END' on a new line to finish):");

    let mut code_lines = Vec::new();
    loop {
        print!("> ");
        let _ = io::stdout().flush();
        match next_line(lines, running) {
            Some(line) => {
                if line.trim().eq_ignore_ascii_case("end") {
                    break;
                }
                code_lines.push(line);
            }
            // None means Ctrl+C or end of stdin; Ctrl+C abandons the program.
            None => {
                if !running.load(Ordering::SeqCst) {
                    return None;
                }
                break;
            }
        }
    }
    Some(code_lines.join("\n"))
}

fn spawn_stdin_reader() -> Receiver<String> {
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        let stdin = io::stdin();
        for line in stdin.lock().lines() {
            match line {
                Ok(line) => {
                    if tx.send(line).is_err() {
                        break;
                    }
                }
                Err(_) => break,
            }
        }
    });
    rx
}

fn next_line(lines: &Receiver<String>, running: &AtomicBool) -> Option<String> {
    loop {
        if !running.load(Ordering::SeqCst) {
            return None;
        }
        match lines.recv_timeout(Duration::from_millis(POLL_INTERVAL_MS)) {
            Ok(line) => return Some(line),
            Err(RecvTimeoutError::Timeout) => {}
            Err(RecvTimeoutError::Disconnected) => return None,
        }
    }
}
