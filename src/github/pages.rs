// src/github/pages.rs
// =============================================================================
// One pagination loop for every listing endpoint (repositories, branches).
//
// Rules:
// - Ask for page 1, 2, 3, ... until a page comes back shorter than per_page
// - Drop items whose key was already seen (GitHub can repeat items when the
//   listing changes mid-walk)
// - Stop if a full page adds nothing new, or after MAX_PAGES pages
// - Callers may stop early once they have what they need (`done`)
//
// Never trusts an up-front "total" count from the API.
// =============================================================================

use std::collections::HashSet;
use std::future::Future;
use std::hash::Hash;

use tracing::debug;

use super::MAX_PAGES;
use crate::error::Result;

// Pages through a listing and returns the deduplicated items in order
//
// Parameters:
//   per_page:   page size we asked for; a shorter page means "last page"
//   key:        identity used for deduplication (repo id, branch name)
//   fetch_page: called with 1, 2, 3, ... and returns that page
//   done:       checked after every page; true stops paging early
pub(crate) async fn collect_pages<T, K, KeyFn, F, Fut, Done>(
    per_page: usize,
    key: KeyFn,
    mut fetch_page: F,
    mut done: Done,
) -> Result<Vec<T>>
where
    K: Eq + Hash,
    KeyFn: Fn(&T) -> K,
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = Result<Vec<T>>>,
    Done: FnMut(&[T]) -> bool,
{
    let mut seen = HashSet::new();
    let mut items = Vec::new();

    for page in 1..=MAX_PAGES {
        let batch = fetch_page(page).await?;
        let fetched = batch.len();

        let before = items.len();
        for item in batch {
            if seen.insert(key(&item)) {
                items.push(item);
            }
        }
        let added = items.len() - before;

        debug!(page, fetched, added, "listing page");

        if fetched < per_page || added == 0 || done(&items) {
            break;
        }
    }

    Ok(items)
}
