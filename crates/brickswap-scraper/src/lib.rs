pub mod cache;
pub mod classify;
pub mod document;
pub mod error;
pub mod extract;
pub mod pass;
pub mod resolve;
pub mod rewrite;
mod selectors;

pub use cache::{CacheMetrics, FileStore, MemoryStore, NoopStore, RecordStore, StoreBackend};
pub use classify::{classify, PageKind, PageSnapshot};
pub use document::{Document, ElementHandle};
pub use error::CacheError;
pub use extract::{extract_from_href, extract_from_text};
pub use pass::{run_pass, PassReport};
pub use resolve::{Resolution, Resolver};
pub use rewrite::{ImageRule, RewriteOutcome, Rewriter};
