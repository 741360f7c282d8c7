mod font;
mod writer;

pub use font::{encode_win_ansi, escape_pdf_string, text_width};
pub use writer::{DocumentWriter, PageContent, LINE_FACTOR, PAGE_HEIGHT, PAGE_WIDTH};
