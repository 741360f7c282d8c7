pub mod layout;
mod renderer;

pub use layout::default_filename;
pub use renderer::ReportRenderer;
