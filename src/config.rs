use crate::classifier::model_uri::ModelUri;
use chrono::Offset;
use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq)]
pub enum FrameSourceKind {
    Fake,
    ImageFile(PathBuf),
    V4l2 { device: String },
}

#[derive(Debug, Clone, PartialEq)]
pub enum ModelBackendKind {
    Tract,
    Fake,
}

#[derive(Debug, Clone, PartialEq)]
pub enum PresenterKind {
    Console,
    Gui,
}

#[derive(Debug, Clone)]
pub struct Config {
    /// Side of the square staging canvas frames are letterboxed onto.
    pub canvas_side: u32,
    pub canvas_background: [u8; 3],
    pub model_uri: ModelUri,
    pub model_base_dir: PathBuf,
    pub model_backend: ModelBackendKind,
    pub camera_width: u32,
    pub camera_height: u32,
    pub camera_buffer_count: u32,
    pub frame_source: FrameSourceKind,
    pub presenter: PresenterKind,
    pub logger_timezone: chrono::FixedOffset,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            canvas_side: 400,
            canvas_background: [0, 0, 0],
            model_uri: ModelUri::new("asl_model/model.json"),
            model_base_dir: std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
            model_backend: ModelBackendKind::Tract,
            camera_width: 640,
            camera_height: 480,
            camera_buffer_count: 4,
            frame_source: FrameSourceKind::Fake,
            presenter: PresenterKind::Console,
            logger_timezone: chrono::Utc.fix(),
        }
    }
}

/// Command-line overrides on top of `Config::default()`.
#[derive(Parser, Debug)]
#[command(name = "sign-capture")]
#[command(about = "Capture a hand sign from the camera and read it as a letter", long_about = None)]
#[command(version)]
pub struct Args {
    /// Model manifest: a path (relative to the working directory) or a file:// URI
    #[arg(value_name = "MODEL_URI")]
    pub model_uri: Option<String>,

    /// Use an in-memory model with random scores instead of loading one
    #[arg(long)]
    pub fake_model: bool,

    /// Serve a still image as the camera
    #[arg(long, value_name = "PATH", conflicts_with = "v4l2")]
    pub image: Option<PathBuf>,

    /// Stream from a V4L2 webcam
    #[arg(long, value_name = "DEVICE")]
    pub v4l2: Option<String>,

    /// Show a window with a Capture button instead of reading stdin
    #[arg(long)]
    pub gui: bool,
}

impl From<Args> for Config {
    fn from(args: Args) -> Self {
        let mut config = Self::default();

        if let Some(uri) = args.model_uri {
            config.model_uri = ModelUri::new(uri);
        }
        if args.fake_model {
            config.model_backend = ModelBackendKind::Fake;
        }
        if let Some(path) = args.image {
            config.frame_source = FrameSourceKind::ImageFile(path);
        }
        if let Some(device) = args.v4l2 {
            config.frame_source = FrameSourceKind::V4l2 { device };
        }
        if args.gui {
            config.presenter = PresenterKind::Gui;
        }

        config
    }
}
