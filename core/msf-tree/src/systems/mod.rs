pub mod integrity;
pub mod spanner;

pub use integrity::verify_integrity;
pub use spanner::{dependency_graph, span, verify_span, HeadChildren};
