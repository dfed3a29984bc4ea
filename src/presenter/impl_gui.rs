use crate::presenter::interface::{describe, CaptureResult, Presenter};
use eframe::egui;
use std::error::Error;
use std::sync::{mpsc, Arc, Mutex, PoisonError};
use std::time::Duration;

#[derive(Default)]
struct Screen {
    status: String,
    last_result: Option<String>,
}

/// The window half of the GUI presenter. Must run on the main thread.
pub struct CaptureWindow {
    screen: Arc<Mutex<Screen>>,
    trigger_sender: mpsc::Sender<()>,
}

impl CaptureWindow {
    pub fn run(self) -> Result<(), Box<dyn Error + Send + Sync>> {
        let options = eframe::NativeOptions {
            viewport: egui::ViewportBuilder::default()
                .with_inner_size([400.0, 220.0])
                .with_resizable(false),
            ..Default::default()
        };

        eframe::run_native("Sign Capture", options, Box::new(|_cc| Box::new(self)))
            .map_err(|e| e.to_string())?;
        Ok(())
    }
}

impl eframe::App for CaptureWindow {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let (status, last_result) = {
            let screen = self.screen.lock().unwrap_or_else(PoisonError::into_inner);
            (screen.status.clone(), screen.last_result.clone())
        };

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.add_space(12.0);
                ui.label(egui::RichText::new(status).monospace());
                ui.add_space(16.0);

                if let Some(result) = last_result {
                    ui.label(egui::RichText::new(result).size(24.0).strong());
                    ui.add_space(16.0);
                }

                if ui.button("Capture").clicked() {
                    let _ = self.trigger_sender.send(());
                }
            });
        });

        // results arrive from the pipeline thread
        ctx.request_repaint_after(Duration::from_millis(100));
    }
}

pub struct PresenterGui {
    screen: Arc<Mutex<Screen>>,
    trigger_sender: mpsc::Sender<()>,
    trigger_receiver: Mutex<Option<mpsc::Receiver<()>>>,
}

impl PresenterGui {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel();
        Self {
            screen: Arc::new(Mutex::new(Screen::default())),
            trigger_sender: tx,
            trigger_receiver: Mutex::new(Some(rx)),
        }
    }

    pub fn window(&self) -> CaptureWindow {
        CaptureWindow {
            screen: self.screen.clone(),
            trigger_sender: self.trigger_sender.clone(),
        }
    }
}

impl Presenter for PresenterGui {
    fn init(&mut self) -> Result<(), Box<dyn Error + Send + Sync>> {
        self.show_status("Starting...")
    }

    fn show_status(&mut self, status: &str) -> Result<(), Box<dyn Error + Send + Sync>> {
        self.screen
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .status = status.to_string();
        Ok(())
    }

    fn show_result(&mut self, result: &CaptureResult) -> Result<(), Box<dyn Error + Send + Sync>> {
        self.screen
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .last_result = Some(describe(result));
        Ok(())
    }

    fn triggers(&mut self) -> mpsc::Receiver<()> {
        match self
            .trigger_receiver
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take()
        {
            Some(receiver) => receiver,
            None => mpsc::channel().1,
        }
    }
}
