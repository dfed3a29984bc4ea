use crate::capture_controller::CaptureController;
use crate::classifier::adapter::ClassifierAdapter;
use crate::config::Config;
use crate::frame_normalizer::FrameNormalizer;
use crate::frame_source::interface::FrameSource;
use crate::library::logger::interface::Logger;
use crate::presenter::interface::Presenter;
use crate::sign_reader::core::{init, transition, Effect, Event, State};
use crate::sign_reader::render::Render;
use crate::sign_reader::run_effect::RunEffect;
use std::sync::mpsc::{channel, Receiver};
use std::sync::{Arc, Mutex, PoisonError};

/// Wires the devices together and drives the startup lifecycle and
/// capture requests through `core::transition`.
pub struct SignReader {
    logger: Arc<dyn Logger + Send + Sync>,
    frame_source: Arc<dyn FrameSource>,
    presenter: Arc<Mutex<dyn Presenter + Send + Sync>>,
    run_effect: RunEffect,
    render: Render,
    event_receiver: Receiver<Event>,
}

impl SignReader {
    pub fn new(
        config: Config,
        logger: Arc<dyn Logger + Send + Sync>,
        frame_source: Arc<dyn FrameSource>,
        classifier: Arc<ClassifierAdapter>,
        presenter: Arc<Mutex<dyn Presenter + Send + Sync>>,
    ) -> Self {
        let logger = logger.with_namespace("sign_reader");
        let (event_sender, event_receiver) = channel();

        let controller = Arc::new(CaptureController::new(
            frame_source.clone(),
            classifier.clone(),
            FrameNormalizer::new(config.canvas_side, config.canvas_background),
            presenter.clone(),
            logger.clone(),
        ));

        let run_effect = RunEffect::new(
            config,
            logger.clone(),
            frame_source.clone(),
            classifier,
            controller,
            presenter.clone(),
            event_sender,
        );

        Self {
            logger,
            frame_source,
            presenter: presenter.clone(),
            run_effect,
            render: Render::new(presenter),
            event_receiver,
        }
    }

    fn spawn_effects(&self, effects: Vec<Effect>) {
        for effect in effects {
            let run_effect = self.run_effect.clone();
            std::thread::spawn(move || run_effect.run_effect(effect));
        }
    }

    /// Runs until the presenter stops sending capture requests and every
    /// capture already requested has reported its outcome.
    pub fn run(&self) -> Result<State, Box<dyn std::error::Error + Send + Sync>> {
        self.presenter
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .init()?;

        let (mut current_state, effects) = init();
        self.render.render(&current_state)?;
        self.spawn_effects(effects);

        let mut captures_in_flight = 0usize;
        let mut closing = false;

        loop {
            if closing && captures_in_flight == 0 {
                let _ = self.logger.info("Every capture reported, shutting down");
                self.frame_source.stop()?;
                return Ok(current_state);
            }

            let event = self.event_receiver.recv()?;

            match event {
                Event::TriggersClosed => {
                    let _ = self.logger.info(&format!(
                        "Trigger source closed, waiting on {} capture(s)",
                        captures_in_flight
                    ));
                    closing = true;
                    continue;
                }
                Event::CaptureDone(_) => {
                    captures_in_flight = captures_in_flight.saturating_sub(1);
                }
                _ => (),
            }

            let _ = self.logger.info(&format!(
                "\nold state:\n\t{:?}\n\nevent:\n\t{:?}",
                current_state, event,
            ));

            let (new_state, effects) = transition(current_state.clone(), event);

            let _ = self.logger.info(&format!(
                "\nnew state:\n\t{:?}\n\neffects:\n\t{:?}",
                new_state, effects
            ));

            if new_state != current_state {
                self.render.render(&new_state)?;
            }
            current_state = new_state;

            captures_in_flight += effects.iter().filter(|e| is_capture(e)).count();
            self.spawn_effects(effects);
        }
    }
}

/// Effects that answer with exactly one `Event::CaptureDone`.
fn is_capture(effect: &Effect) -> bool {
    matches!(effect, Effect::RunCapture | Effect::RejectCapture(_))
}
