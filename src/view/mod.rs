//! View State Controller
//!
//! Holds the current toggles and the last fetched payload, re-runs the
//! pipeline whenever either changes and republishes the result.

mod controller;
mod events;
mod settings;
mod source;

pub use controller::{Publication, ViewController};
pub use events::{ViewEvent, ViewMessage};
pub use settings::{ViewSettings, ViewSettingsPatch};
pub use source::{FileSource, GraphSource, StaticSource};
