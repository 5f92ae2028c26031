#[cfg(test)]
#[path = "pagination_test.rs"]
mod tests;

/// Number of messages the gateway returns for a full page. A shorter page means the
/// start of the conversation has been reached.
pub const PAGE_SIZE: usize = 20;
/// The furthest page that will ever be requested.
pub const MAX_PAGES: usize = 3;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum FetchState {
    Idle,
    Fetching,
}

/// Gates "load older messages" requests. At most one fetch is in flight, and once
/// `has_more` is cleared it stays cleared.
#[derive(Debug)]
pub struct Pagination {
    state: FetchState,
    has_more: bool,
    page: usize,
}

impl Default for Pagination {
    fn default() -> Pagination {
        return Pagination {
            state: FetchState::Idle,
            has_more: true,
            page: 1,
        };
    }
}

impl Pagination {
    pub fn has_more(&self) -> bool {
        return self.has_more;
    }

    pub fn is_fetching(&self) -> bool {
        return self.state == FetchState::Fetching;
    }

    /// The most recent page loaded so far.
    pub fn page(&self) -> usize {
        return self.page;
    }

    /// Called when the first page came back short, or the conversation fell back to
    /// the welcome message.
    pub fn exhaust(&mut self) {
        self.has_more = false;
    }

    /// Returns the page to fetch, or `None` when the request must be dropped.
    pub fn begin(&mut self) -> Option<usize> {
        if !self.has_more || self.is_fetching() {
            return None;
        }

        self.state = FetchState::Fetching;
        return Some(self.page + 1);
    }

    /// Finishes the in-flight fetch. `received` is the number of messages returned,
    /// or `None` if the fetch failed.
    pub fn complete(&mut self, received: Option<usize>) {
        if !self.is_fetching() {
            tracing::warn!("Pagination completed without a fetch in flight");
            return;
        }
        self.state = FetchState::Idle;

        if self.page >= MAX_PAGES {
            self.has_more = false;
        }

        if let Some(count) = received {
            if count < PAGE_SIZE {
                self.has_more = false;
            }
            self.page += 1;
        }
    }
}
