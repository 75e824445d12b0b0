// Resume layout: structured templates, static font metrics, content compression
// and the one-page auto-fit loop.
// The fit loop is CPU-bound and must run inside tokio::task::spawn_blocking.

pub mod blocks;
pub mod compressor;
pub mod fitter;
pub mod font_metrics;
pub mod handlers;
pub mod pdf;
pub mod template;

pub use font_metrics::{default_page_config, PageConfig};
