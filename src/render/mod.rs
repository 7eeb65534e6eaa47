//! Listing view models and the surfaces that present them.

pub mod download;
pub mod terminal;
pub mod view;

pub use download::DownloadArtifact;
pub use view::{CardAction, CatalogView, ModelCard, Preview, ViewMode};
