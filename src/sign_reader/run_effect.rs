use crate::capture_controller::CaptureController;
use crate::classifier::adapter::ClassifierAdapter;
use crate::config::Config;
use crate::error::PipelineError;
use crate::frame_source::interface::FrameSource;
use crate::library::logger::interface::Logger;
use crate::presenter::interface::Presenter;
use crate::sign_reader::core::{Effect, Event};
use std::sync::mpsc::Sender;
use std::sync::{Arc, Mutex, PoisonError};

#[derive(Clone)]
pub struct RunEffect {
    config: Config,
    logger: Arc<dyn Logger + Send + Sync>,
    frame_source: Arc<dyn FrameSource>,
    classifier: Arc<ClassifierAdapter>,
    controller: Arc<CaptureController>,
    presenter: Arc<Mutex<dyn Presenter + Send + Sync>>,
    event_sender: Sender<Event>,
}

impl RunEffect {
    pub fn new(
        config: Config,
        logger: Arc<dyn Logger + Send + Sync>,
        frame_source: Arc<dyn FrameSource>,
        classifier: Arc<ClassifierAdapter>,
        controller: Arc<CaptureController>,
        presenter: Arc<Mutex<dyn Presenter + Send + Sync>>,
        event_sender: Sender<Event>,
    ) -> Self {
        Self {
            config,
            logger,
            frame_source,
            classifier,
            controller,
            presenter,
            event_sender,
        }
    }

    pub fn run_effect(&self, effect: Effect) {
        let _ = self.logger.info(&format!("Running effect: {:?}", effect));

        match effect {
            Effect::SubscribeToCameraEvents => {
                for event in self.frame_source.events() {
                    if self.event_sender.send(Event::CameraEvent(event)).is_err() {
                        break;
                    }
                }
            }
            Effect::SubscribeToTriggers => {
                let triggers = self
                    .presenter
                    .lock()
                    .unwrap_or_else(PoisonError::into_inner)
                    .triggers();
                for () in triggers {
                    if self.event_sender.send(Event::CaptureRequested).is_err() {
                        return;
                    }
                }
                let _ = self.event_sender.send(Event::TriggersClosed);
            }
            Effect::StartCamera => {
                let started = self.frame_source.start();
                let _ = self.event_sender.send(Event::CameraStartDone(started));
            }
            Effect::LoadModel => {
                let loaded = match self.classifier.load(self.config.model_uri.clone()) {
                    Ok(done) => done.recv().unwrap_or_else(|_| {
                        Err(PipelineError::ModelLoad("loader thread exited".to_string()))
                    }),
                    Err(e) => Err(e),
                };
                let _ = self.event_sender.send(Event::ModelLoadDone(loaded));
            }
            Effect::RunCapture => {
                let captured = self.controller.trigger();
                let _ = self.event_sender.send(Event::CaptureDone(captured));
            }
            Effect::RejectCapture(reason) => {
                let rejected = self.controller.reject(reason);
                let _ = self.event_sender.send(Event::CaptureDone(rejected));
            }
        }
    }
}
