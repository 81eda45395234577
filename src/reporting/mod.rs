pub mod summary;
pub mod writer;

pub use summary::render_summary;
pub use writer::write_json_report;
