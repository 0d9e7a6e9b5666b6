//! One rewrite pass over a page.
//!
//! The page is classified once, the handler for that page kind collects
//! target elements and their product codes, all lookups run concurrently,
//! and the results are written back in document order. Per-element failures
//! are logged and skipped; a pass never fails as a whole.

use brickswap_core::ProductIdentifier;
use futures::future::join_all;

use crate::cache::RecordStore;
use crate::classify::{classify, PageKind, PageSnapshot};
use crate::document::{Document, ElementHandle};
use crate::extract::{extract_from_href, extract_from_text};
use crate::resolve::{Resolution, Resolver};
use crate::rewrite::{RewriteOutcome, Rewriter};
use crate::selectors::{LISTING_TITLE, PRODUCT_HEADING, WISHLIST_DESC};

/// Appended to enumerated elements whose product code could not be found.
pub const NO_ID_MARKER: &str = " (No ID found)";

/// Counters for one pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PassReport {
    pub kind: PageKind,
    pub targets: usize,
    pub missing_id: usize,
    pub cache_hits: usize,
    pub fetched: usize,
    pub no_data: usize,
    pub failed: usize,
    pub rejected: usize,
    pub titles_updated: usize,
    pub images_updated: usize,
}

impl PassReport {
    fn new(kind: PageKind) -> Self {
        Self {
            kind,
            targets: 0,
            missing_id: 0,
            cache_hits: 0,
            fetched: 0,
            no_data: 0,
            failed: 0,
            rejected: 0,
            titles_updated: 0,
            images_updated: 0,
        }
    }
}

impl std::fmt::Display for PassReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} page: {} targets, {} titles updated, {} images updated, {} without ID, \
             {} rejected, {} without data, {} failed ({} from cache, {} fetched)",
            self.kind,
            self.targets,
            self.titles_updated,
            self.images_updated,
            self.missing_id,
            self.rejected,
            self.no_data,
            self.failed,
            self.cache_hits,
            self.fetched,
        )
    }
}

#[derive(Debug)]
struct Target {
    element: ElementHandle,
    id: Option<ProductIdentifier>,
}

/// Classifies `doc`, resolves every target's product code and rewrites the
/// matching elements in place.
pub async fn run_pass<S: RecordStore>(
    doc: &mut Document,
    resolver: &Resolver<S>,
    rewriter: &Rewriter,
) -> PassReport {
    let snapshot = PageSnapshot::capture(doc);
    let kind = classify(&snapshot);
    tracing::info!(page_kind = %kind, "processing page");

    let targets = match kind {
        PageKind::SingleProduct => single_product_targets(doc, &snapshot),
        PageKind::Wishlist => wishlist_targets(doc),
        PageKind::Listing => listing_targets(doc),
    };

    let mut report = PassReport::new(kind);
    report.targets = targets.len();

    let resolutions = join_all(targets.iter().map(|target| async move {
        match &target.id {
            Some(id) => Some(resolver.resolve(id).await),
            None => None,
        }
    }))
    .await;

    for (index, (target, resolution)) in targets.iter().zip(resolutions).enumerate() {
        let Some(resolution) = resolution else {
            report.missing_id += 1;
            tracing::info!(page_kind = %kind, index, "no product ID found for element");
            if kind.marks_missing_codes() {
                let marked = format!("{}{NO_ID_MARKER}", doc.text(target.element));
                doc.set_text(target.element, marked);
            }
            continue;
        };

        match &resolution {
            Resolution::Cached(_) => report.cache_hits += 1,
            Resolution::Fetched(_) => report.fetched += 1,
            Resolution::NoData => report.no_data += 1,
            Resolution::Failed => report.failed += 1,
        }

        let Some(record) = resolution.record() else {
            continue;
        };

        match rewriter.apply(doc, target.element, record) {
            RewriteOutcome::Rejected => report.rejected += 1,
            RewriteOutcome::TitleOnly => report.titles_updated += 1,
            RewriteOutcome::TitleAndImage => {
                report.titles_updated += 1;
                report.images_updated += 1;
            }
        }
    }

    tracing::info!(report = %report, "page pass complete");
    report
}

/// The heading carries the product code; the brief must also be present for
/// the page to count as a complete product page.
fn single_product_targets(doc: &Document, snapshot: &PageSnapshot) -> Vec<Target> {
    let Some(heading) = doc.select_first(&PRODUCT_HEADING) else {
        return Vec::new();
    };
    if !snapshot.has_product_brief {
        tracing::info!("product brief element not found; skipping product page");
        return Vec::new();
    }

    let id = extract_from_text(doc.text(heading).trim());
    if let Some(id) = &id {
        tracing::debug!(product_id = %id, "product ID found");
    }
    vec![Target {
        element: heading,
        id,
    }]
}

fn wishlist_targets(doc: &Document) -> Vec<Target> {
    doc.select(&WISHLIST_DESC)
        .into_iter()
        .enumerate()
        .map(|(index, element)| {
            let id = extract_from_text(doc.text(element).trim());
            if let Some(id) = &id {
                tracing::debug!(index, product_id = %id, "wishlist product ID found");
            }
            Target { element, id }
        })
        .collect()
}

fn listing_targets(doc: &Document) -> Vec<Target> {
    doc.select(&LISTING_TITLE)
        .into_iter()
        .enumerate()
        .map(|(index, element)| {
            let href = doc.attr(element, "href").unwrap_or_default();
            tracing::debug!(index, href, "listing element");
            let id = extract_from_href(href);
            if let Some(id) = &id {
                tracing::debug!(index, product_id = %id, "listing product ID found");
            }
            Target { element, id }
        })
        .collect()
}
