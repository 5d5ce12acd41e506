#![warn(clippy::all, rust_2018_idioms)]

pub mod app;
pub mod asset;
pub mod canvas;
pub mod command;
pub mod components;
pub mod config;
pub mod dressing;
pub mod error;
pub mod event;
pub mod file_handler;
pub mod geometry;
pub mod id_generator;
pub mod import;
pub mod input;
pub mod panels;
pub mod project;
pub mod renderer;
pub mod session;
pub mod state;
pub mod texture_manager;
pub mod util;
pub mod widgets;

pub use app::SiluetApp;
pub use asset::AssetHandle;
pub use canvas::{Composition, PlacedItem};
pub use command::Command;
pub use config::Config;
pub use dressing::{AssetStore, Dressing, DressingId, Removal};
pub use import::{ImportOptions, ImportOutcome, ImportPipeline, RawFile};
pub use input::{InputEvent, InputLocation};
pub use project::{Lookbooks, Project, ProjectStore, SaveRequest};
pub use session::Session;
pub use state::{EditorContext, InteractionState};
