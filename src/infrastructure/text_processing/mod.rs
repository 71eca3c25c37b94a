mod composite_file_loader;
mod docx_adapter;
mod pdf_adapter;

pub use composite_file_loader::CompositeFileLoader;
pub use docx_adapter::DocxAdapter;
pub use pdf_adapter::{PdfAdapter, collect_page_text};
