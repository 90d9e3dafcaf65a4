//! Incremental list loading shared by the Browse, My Prompts, and Files
//! screens: cursor pagination, a debounced filter, and at-most-once page
//! fetching per filter value.
//!
//! `Feed` never performs I/O. Event methods return a [`PageRequest`] when a
//! fetch should happen; the embedding layer runs it and hands the outcome
//! back through [`Feed::apply`] together with the originating request. Time
//! is supplied by the caller, so debounce behavior is fully testable.

use std::collections::HashSet;
use std::time::{Duration, Instant};

/// Page size used by every list screen unless configured otherwise.
pub const DEFAULT_PAGE_SIZE: u32 = 9;

/// Quiet period before an edited filter commits.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(500);

/// One fetch the embedding layer should perform on behalf of a feed.
///
/// The request is echoed back to [`Feed::apply`] with the outcome; the feed
/// compares `filter` against its active filter to discard stale completions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    pub filter: String,
    pub page: u32,
    pub page_size: u32,
}

/// What [`Feed::apply`] did with a completion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Applied {
    /// Page 1 replaced the accumulated items.
    Replaced,
    /// A later page was appended.
    Appended,
    /// The fetch failed; the error text is retained for display.
    Failed,
    /// The completion belonged to a superseded filter and was discarded.
    Stale,
}

/// Paged, filterable list state for one screen.
///
/// Items accumulate in arrival order: page 1 first, then page 2, and so on.
/// A page is fetched at most once per filter value; a short page marks the
/// feed exhausted. Committing a different filter resets everything and
/// starts over from page 1.
#[derive(Debug)]
pub struct Feed<T> {
    /// Active (committed) filter. Responses for any other filter are stale.
    filter: String,
    /// Raw filter edit waiting out the debounce, with its arm time.
    pending: Option<(String, Instant)>,
    items: Vec<T>,
    next_page: u32,
    exhausted: bool,
    loading_first: bool,
    loading_more: bool,
    /// Pages requested for the active filter. Never rolled back on failure:
    /// a failed page is not retried until a filter commit or refresh resets
    /// the cycle.
    requested: HashSet<u32>,
    page_size: u32,
    debounce: Duration,
    last_error: Option<String>,
}

impl<T> Feed<T> {
    pub fn new(page_size: u32) -> Self {
        Self {
            filter: String::new(),
            pending: None,
            items: Vec::new(),
            next_page: 1,
            exhausted: false,
            loading_first: false,
            loading_more: false,
            requested: HashSet::new(),
            page_size: page_size.max(1),
            debounce: DEFAULT_DEBOUNCE,
            last_error: None,
        }
    }

    pub fn with_debounce(mut self, debounce: Duration) -> Self {
        self.debounce = debounce;
        self
    }

    // ── Events ──────────────────────────────────────────────────────────

    /// Record a filter edit. Arms (or re-arms) the debounce timer; nothing
    /// is fetched until the timer elapses in [`Feed::poll`]. Safe to call
    /// once per keystroke.
    pub fn set_filter(&mut self, text: impl Into<String>, now: Instant) {
        self.pending = Some((text.into(), now));
    }

    /// Advance the debounce timer. Call on every event-loop tick.
    ///
    /// When the quiet period has elapsed the pending text commits; if it
    /// differs from the active filter the feed resets and the first-page
    /// request is returned. An unchanged commit is a no-op.
    pub fn poll(&mut self, now: Instant) -> Option<PageRequest> {
        let due = matches!(
            &self.pending,
            Some((_, armed)) if now.duration_since(*armed) >= self.debounce
        );
        if !due {
            return None;
        }
        let (text, _) = self.pending.take()?;
        if text == self.filter {
            return None;
        }
        self.filter = text;
        self.reset_pages();
        self.request_page(1)
    }

    /// The list's tail became visible. Requests the next page unless a load
    /// is already in flight or the feed is exhausted.
    pub fn tail_visible(&mut self) -> Option<PageRequest> {
        if self.loading_first || self.loading_more || self.exhausted {
            return None;
        }
        self.request_page(self.next_page)
    }

    /// Full reset cycle for the current filter: drop accumulated items and
    /// re-fetch page 1. Used on screen entry and after mutations. Unlike a
    /// debounce commit, an unchanged filter does not suppress the refetch.
    pub fn refresh(&mut self) -> Option<PageRequest> {
        self.reset_pages();
        self.request_page(1)
    }

    /// Hand a fetch outcome back to the feed. `request` must be the value
    /// the feed originally returned for this fetch.
    ///
    /// A completion whose filter is no longer active is discarded before
    /// touching any state, so a slow response for an old filter can never
    /// overwrite a newer filter's items.
    pub fn apply(&mut self, request: &PageRequest, result: Result<Vec<T>, String>) -> Applied {
        if request.filter != self.filter {
            return Applied::Stale;
        }
        self.loading_first = false;
        self.loading_more = false;
        match result {
            Ok(batch) => {
                let got = batch.len() as u32;
                let applied = if request.page == 1 {
                    self.items = batch;
                    Applied::Replaced
                } else {
                    self.items.extend(batch);
                    Applied::Appended
                };
                self.exhausted = got < request.page_size;
                self.next_page = request.page + 1;
                self.last_error = None;
                applied
            }
            Err(message) => {
                self.last_error = Some(message);
                Applied::Failed
            }
        }
    }

    // ── Local mutations ─────────────────────────────────────────────────

    /// Insert a freshly created item at the top of the list.
    pub fn insert_top(&mut self, item: T) {
        self.items.insert(0, item);
    }

    /// Replace the first item matching `matches`. Returns false when no
    /// item matched.
    pub fn replace_where(&mut self, matches: impl Fn(&T) -> bool, item: T) -> bool {
        match self.items.iter().position(|it| matches(it)) {
            Some(idx) => {
                self.items[idx] = item;
                true
            }
            None => false,
        }
    }

    // ── Read accessors ──────────────────────────────────────────────────

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn filter(&self) -> &str {
        &self.filter
    }

    pub fn is_loading_first_page(&self) -> bool {
        self.loading_first
    }

    pub fn is_loading_more(&self) -> bool {
        self.loading_more
    }

    pub fn is_loading(&self) -> bool {
        self.loading_first || self.loading_more
    }

    pub fn exhausted(&self) -> bool {
        self.exhausted
    }

    pub fn next_page(&self) -> u32 {
        self.next_page
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    /// Most recent fetch error, kept until the next successful page or
    /// reset.
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn clear_error(&mut self) {
        self.last_error = None;
    }

    // ── Internals ───────────────────────────────────────────────────────

    fn reset_pages(&mut self) {
        self.items.clear();
        self.next_page = 1;
        self.exhausted = false;
        self.requested.clear();
        self.last_error = None;
    }

    /// At most one fetch per page per filter value, under arbitrarily
    /// repeated triggers.
    fn request_page(&mut self, page: u32) -> Option<PageRequest> {
        if self.requested.contains(&page) {
            return None;
        }
        self.requested.insert(page);
        if page == 1 {
            self.loading_first = true;
        } else {
            self.loading_more = true;
        }
        Some(PageRequest {
            filter: self.filter.clone(),
            page,
            page_size: self.page_size,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn feed() -> Feed<i32> {
        Feed::new(9)
    }

    fn batch(n: u32) -> Vec<i32> {
        (0..n as i32).collect()
    }

    /// Commit `text` immediately by arming and polling past the debounce.
    fn commit(feed: &mut Feed<i32>, text: &str, at: Instant) -> Option<PageRequest> {
        feed.set_filter(text, at);
        feed.poll(at + DEFAULT_DEBOUNCE)
    }

    #[test]
    fn refresh_requests_first_page() {
        let mut f = feed();
        let req = f.refresh().expect("first page requested");
        assert_eq!(req.page, 1);
        assert_eq!(req.page_size, 9);
        assert_eq!(req.filter, "");
        assert!(f.is_loading_first_page());
        assert!(!f.is_loading_more());
    }

    #[test]
    fn tail_trigger_is_idempotent_while_in_flight() {
        let mut f = feed();
        let p1 = f.refresh().unwrap();
        // Repeated triggers while page 1 is in flight issue nothing.
        assert!(f.tail_visible().is_none());
        assert!(f.tail_visible().is_none());
        f.apply(&p1, Ok(batch(9)));

        let p2 = f.tail_visible().expect("next page requested");
        assert_eq!(p2.page, 2);
        assert!(f.is_loading_more());
        assert!(f.tail_visible().is_none());
        assert!(f.tail_visible().is_none());
    }

    #[test]
    fn short_page_exhausts_and_stops_fetching() {
        let mut f = feed();
        let p1 = f.refresh().unwrap();
        assert_eq!(f.apply(&p1, Ok(batch(9))), Applied::Replaced);
        assert!(!f.exhausted());
        assert_eq!(f.next_page(), 2);

        let p2 = f.tail_visible().unwrap();
        assert_eq!(f.apply(&p2, Ok(batch(4))), Applied::Appended);
        assert!(f.exhausted());
        assert_eq!(f.items().len(), 13);
        assert!(f.tail_visible().is_none());
    }

    #[test]
    fn full_page_equal_to_page_size_is_not_exhausted() {
        let mut f = feed();
        let p1 = f.refresh().unwrap();
        f.apply(&p1, Ok(batch(9)));
        assert!(!f.exhausted());
        let p2 = f.tail_visible().unwrap();
        f.apply(&p2, Ok(batch(0)));
        assert!(f.exhausted());
        assert_eq!(f.items().len(), 9);
    }

    #[test]
    fn debounce_collapses_keystrokes_into_one_fetch() {
        let mut f = feed();
        let t = Instant::now();
        f.set_filter("c", t);
        f.set_filter("ca", t + Duration::from_millis(100));
        f.set_filter("cat", t + Duration::from_millis(200));

        assert!(f.poll(t + Duration::from_millis(300)).is_none());
        assert!(f.poll(t + Duration::from_millis(650)).is_none());

        let req = f.poll(t + Duration::from_millis(700)).expect("commit fires");
        assert_eq!(req.filter, "cat");
        assert_eq!(req.page, 1);
        // The commit is consumed; later polls stay quiet.
        assert!(f.poll(t + Duration::from_secs(5)).is_none());
    }

    #[test]
    fn recommitting_identical_filter_is_a_noop() {
        let mut f = feed();
        let t = Instant::now();
        let p1 = commit(&mut f, "cat", t).unwrap();
        f.apply(&p1, Ok(batch(3)));
        assert_eq!(f.items().len(), 3);

        assert!(commit(&mut f, "cat", t + Duration::from_secs(2)).is_none());
        assert_eq!(f.items().len(), 3);
        assert!(f.exhausted());
    }

    #[test]
    fn stale_filter_response_is_discarded() {
        let mut f = feed();
        let t = Instant::now();
        let req_a = commit(&mut f, "alpha", t).unwrap();
        let req_b = commit(&mut f, "beta", t + Duration::from_secs(1)).unwrap();

        // Old filter's page 1 resolves after the new commit: dropped whole.
        assert_eq!(f.apply(&req_a, Ok(batch(9))), Applied::Stale);
        assert!(f.items().is_empty());
        assert!(f.is_loading_first_page());

        assert_eq!(f.apply(&req_b, Ok(batch(2))), Applied::Replaced);
        assert_eq!(f.items().len(), 2);
        assert!(f.exhausted());
    }

    #[test]
    fn stale_failure_does_not_touch_error_state() {
        let mut f = feed();
        let t = Instant::now();
        let req_a = commit(&mut f, "alpha", t).unwrap();
        commit(&mut f, "beta", t + Duration::from_secs(1)).unwrap();

        assert_eq!(f.apply(&req_a, Err("boom".to_string())), Applied::Stale);
        assert!(f.last_error().is_none());
        assert!(f.is_loading_first_page());
    }

    #[test]
    fn failed_page_is_not_retried_until_reset() {
        let mut f = feed();
        let p1 = f.refresh().unwrap();
        assert_eq!(f.apply(&p1, Err("connection refused".to_string())), Applied::Failed);
        assert!(f.items().is_empty());
        assert!(!f.is_loading());
        assert_eq!(f.last_error(), Some("connection refused"));

        // Page 1 stays requested, so the tail trigger cannot re-issue it.
        assert!(f.tail_visible().is_none());

        // A fresh filter commit resets the cycle and retries.
        let t = Instant::now();
        let req = commit(&mut f, "new", t).expect("reset refetches");
        assert_eq!(req.page, 1);
        assert_eq!(req.filter, "new");
        assert!(f.last_error().is_none());
    }

    #[test]
    fn refresh_refetches_even_with_identical_filter() {
        let mut f = feed();
        let t = Instant::now();
        let p1 = commit(&mut f, "x", t).unwrap();
        f.apply(&p1, Ok(batch(4)));
        assert!(f.exhausted());

        let again = f.refresh().expect("refresh re-requests page 1");
        assert_eq!(again.page, 1);
        assert_eq!(again.filter, "x");
        assert!(f.items().is_empty());
        assert!(!f.exhausted());
    }

    #[test]
    fn filter_commit_resets_items_and_error() {
        let mut f = feed();
        let p1 = f.refresh().unwrap();
        f.apply(&p1, Ok(batch(9)));
        let p2 = f.tail_visible().unwrap();
        f.apply(&p2, Err("timeout".to_string()));
        assert!(f.last_error().is_some());
        assert_eq!(f.items().len(), 9);

        let t = Instant::now();
        let req = commit(&mut f, "fresh", t).unwrap();
        assert_eq!(req.page, 1);
        assert!(f.items().is_empty());
        assert!(f.last_error().is_none());
        assert!(!f.exhausted());
    }

    #[test]
    fn success_replaces_on_page_one_and_appends_after() {
        let mut f = feed();
        let p1 = f.refresh().unwrap();
        f.apply(&p1, Ok(vec![1, 2, 3, 4, 5, 6, 7, 8, 9]));
        let p2 = f.tail_visible().unwrap();
        f.apply(&p2, Ok(vec![10, 11]));
        assert_eq!(f.items(), &[1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11]);

        let again = f.refresh().unwrap();
        f.apply(&again, Ok(vec![42]));
        assert_eq!(f.items(), &[42]);
    }

    #[test]
    fn insert_top_and_replace_where_edit_in_place() {
        let mut f = feed();
        let p1 = f.refresh().unwrap();
        f.apply(&p1, Ok(vec![2, 3]));

        f.insert_top(1);
        assert_eq!(f.items(), &[1, 2, 3]);

        assert!(f.replace_where(|it| *it == 3, 30));
        assert_eq!(f.items(), &[1, 2, 30]);
        assert!(!f.replace_where(|it| *it == 99, 0));
    }

    #[test]
    fn escape_to_empty_filter_refetches_unfiltered() {
        let mut f = feed();
        let t = Instant::now();
        let p1 = commit(&mut f, "cat", t).unwrap();
        f.apply(&p1, Ok(batch(2)));

        let req = commit(&mut f, "", t + Duration::from_secs(1)).expect("empty commit refetches");
        assert_eq!(req.filter, "");
        assert_eq!(req.page, 1);
        assert!(f.items().is_empty());
    }
}
