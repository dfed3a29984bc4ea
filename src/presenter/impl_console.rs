use crate::presenter::interface::{describe, CaptureResult, Presenter};
use std::error::Error;
use std::io::BufRead;
use std::sync::mpsc;

/// Terminal front end: Enter captures, EOF quits.
pub struct PresenterConsole {
    status: String,
}

impl PresenterConsole {
    pub fn new() -> Self {
        Self {
            status: String::new(),
        }
    }

    fn render_box(text: &str) {
        let width = text.chars().count();
        println!("┌{}┐", "─".repeat(width + 2));
        println!("│ {} │", text);
        println!("└{}┘", "─".repeat(width + 2));
    }
}

impl Presenter for PresenterConsole {
    fn init(&mut self) -> Result<(), Box<dyn Error + Send + Sync>> {
        println!("Press Enter to capture a sign, Ctrl-D to quit.");
        Ok(())
    }

    fn show_status(&mut self, status: &str) -> Result<(), Box<dyn Error + Send + Sync>> {
        if self.status != status {
            self.status = status.to_string();
            println!("{}", status);
        }
        Ok(())
    }

    fn show_result(&mut self, result: &CaptureResult) -> Result<(), Box<dyn Error + Send + Sync>> {
        Self::render_box(&describe(result));
        Ok(())
    }

    fn triggers(&mut self) -> mpsc::Receiver<()> {
        let (tx, rx) = mpsc::channel();
        std::thread::spawn(move || {
            for line in std::io::stdin().lock().lines() {
                if line.is_err() || tx.send(()).is_err() {
                    break;
                }
            }
        });
        rx
    }
}
