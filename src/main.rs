use classifier::adapter::ClassifierAdapter;
use classifier::impl_fake::{FakeScores, ModelLoaderFake};
use classifier::impl_tract_onnx::ModelLoaderTract;
use classifier::interface::{ModelLoader, ModelProfile};
use clap::Parser;
use config::{Args, Config, FrameSourceKind, ModelBackendKind, PresenterKind};
use frame_source::impl_fake::FrameSourceFake;
use frame_source::impl_image_file::FrameSourceImageFile;
use frame_source::interface::FrameSource;
use label_decoder::class_table::ClassTable;
use library::logger::{impl_console::LoggerConsole, interface::Logger};
use presenter::impl_console::PresenterConsole;
use presenter::impl_gui::PresenterGui;
use sign_reader::main::SignReader;
use std::error::Error;
use std::sync::{Arc, Mutex};

mod capture_controller;
mod classifier;
mod config;
mod error;
mod frame_normalizer;
mod frame_source;
mod label_decoder;
mod library;
mod presenter;
mod sign_reader;

fn frame_source(
    config: &Config,
    logger: Arc<dyn Logger + Send + Sync>,
) -> Result<Arc<dyn FrameSource>, Box<dyn Error + Send + Sync>> {
    match &config.frame_source {
        FrameSourceKind::Fake => Ok(Arc::new(FrameSourceFake::new(
            logger,
            config.camera_width,
            config.camera_height,
        ))),
        FrameSourceKind::ImageFile(path) => {
            Ok(Arc::new(FrameSourceImageFile::new(logger, path.clone())))
        }
        #[cfg(feature = "v4l2")]
        FrameSourceKind::V4l2 { device } => {
            use frame_source::impl_v4l2::{FrameSourceV4l2, V4l2Config};
            Ok(Arc::new(FrameSourceV4l2::new(
                logger,
                V4l2Config {
                    device: device.clone(),
                    width: config.camera_width,
                    height: config.camera_height,
                    buffer_count: config.camera_buffer_count,
                },
            )))
        }
        #[cfg(not(feature = "v4l2"))]
        FrameSourceKind::V4l2 { device } => Err(format!(
            "cannot open {}: built without the v4l2 feature",
            device
        )
        .into()),
    }
}

fn model_loader(config: &Config, logger: Arc<dyn Logger + Send + Sync>) -> Arc<dyn ModelLoader> {
    match config.model_backend {
        ModelBackendKind::Tract => Arc::new(ModelLoaderTract::new(
            logger,
            config.model_base_dir.clone(),
        )),
        ModelBackendKind::Fake => {
            let class_table = ClassTable::letters_with_controls();
            let classes = class_table.len();
            Arc::new(ModelLoaderFake::new(
                logger,
                ModelProfile {
                    name: "fake-asl".to_string(),
                    input_side: 100,
                    divisor: 255.0,
                    class_table,
                },
                FakeScores::Random { classes },
            ))
        }
    }
}

fn main() -> Result<(), Box<dyn Error + Send + Sync>> {
    let config = Config::from(Args::parse());

    let logger: Arc<dyn Logger + Send + Sync> =
        Arc::new(LoggerConsole::new(config.logger_timezone));

    let frame_source = frame_source(&config, logger.clone())?;

    let classifier = Arc::new(ClassifierAdapter::new(
        model_loader(&config, logger.clone()),
        logger.clone(),
    ));

    match config.presenter {
        PresenterKind::Console => {
            let presenter = Arc::new(Mutex::new(PresenterConsole::new()));
            let sign_reader = SignReader::new(config, logger, frame_source, classifier, presenter);
            sign_reader.run()?;
            Ok(())
        }
        PresenterKind::Gui => {
            let presenter = PresenterGui::new();
            let window = presenter.window();
            let sign_reader = SignReader::new(
                config,
                logger.clone(),
                frame_source,
                classifier,
                Arc::new(Mutex::new(presenter)),
            );
            std::thread::spawn(move || {
                if let Err(e) = sign_reader.run() {
                    let _ = logger.error(&format!("Sign reader stopped: {}", e));
                }
            });
            // eframe has to own the main thread
            window.run()
        }
    }
}
