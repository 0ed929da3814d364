//! Pagination over the recommended playlist
//!
//! Fixed 10 songs per page. Both navigation control pairs (above and below
//! the song list) are rendered from the same [`PageControls`] value.

use crate::models::Song;
use std::sync::Arc;

/// Page size constant for all pagination
pub const PAGE_SIZE: usize = 10;

/// Pagination metadata calculated from total results
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    /// Current page number (1-indexed)
    pub page: usize,
    /// Total number of pages (at least 1, even for an empty list)
    pub total_pages: usize,
    /// Index of the first song on the page
    pub offset: usize,
}

/// Calculate pagination metadata from total results and requested page
///
/// Ensures page is within valid bounds [1, total_pages]
///
/// # Examples
/// ```
/// use moodtune_client::pagination::calculate_pagination;
///
/// // 25 songs = 3 pages (10 + 10 + 5)
/// let p = calculate_pagination(25, 2);
/// assert_eq!(p.page, 2);
/// assert_eq!(p.total_pages, 3);
/// assert_eq!(p.offset, 10);
///
/// // Requesting out-of-bounds page gets clamped
/// let p = calculate_pagination(25, 99);
/// assert_eq!(p.page, 3);
/// assert_eq!(p.offset, 20);
/// ```
pub fn calculate_pagination(total_results: usize, requested_page: usize) -> Pagination {
    let total_pages = total_results.div_ceil(PAGE_SIZE).max(1);
    let page = requested_page.clamp(1, total_pages);
    let offset = (page - 1) * PAGE_SIZE;

    Pagination {
        page,
        total_pages,
        offset,
    }
}

/// Navigation request from either control pair
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageDirection {
    Previous,
    Next,
}

/// State of one navigation control pair
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageControls {
    pub page: usize,
    pub total_pages: usize,
    pub prev_enabled: bool,
    pub next_enabled: bool,
}

impl PageControls {
    /// "Page X of Y"
    pub fn label(&self) -> String {
        format!("Page {} of {}", self.page, self.total_pages)
    }
}

/// Songs plus the current page
///
/// `current_page` is kept within `[1, total_pages]` by construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaylistState {
    songs: Arc<[Song]>,
    current_page: usize,
}

impl PlaylistState {
    /// New playlist positioned on page 1
    pub fn new(songs: Vec<Song>) -> Self {
        Self {
            songs: Arc::from(songs),
            current_page: 1,
        }
    }

    pub fn songs(&self) -> &[Song] {
        &self.songs
    }

    pub fn len(&self) -> usize {
        self.songs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.songs.is_empty()
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn pagination(&self) -> Pagination {
        calculate_pagination(self.songs.len(), self.current_page)
    }

    pub fn total_pages(&self) -> usize {
        self.pagination().total_pages
    }

    /// Move one page; requests past either end are no-ops
    pub fn page(&self, direction: PageDirection) -> PlaylistState {
        let total_pages = self.total_pages();
        let current_page = match direction {
            PageDirection::Previous if self.current_page > 1 => self.current_page - 1,
            PageDirection::Next if self.current_page < total_pages => self.current_page + 1,
            _ => self.current_page,
        };

        PlaylistState {
            songs: Arc::clone(&self.songs),
            current_page,
        }
    }

    /// Songs on the current page, clipped to the list length
    pub fn slice(&self) -> &[Song] {
        let offset = self.pagination().offset.min(self.songs.len());
        let end = (offset + PAGE_SIZE).min(self.songs.len());
        &self.songs[offset..end]
    }

    /// 1-based ordinal of the first song on the current page
    pub fn first_ordinal(&self) -> usize {
        self.pagination().offset + 1
    }

    pub fn controls(&self) -> PageControls {
        let p = self.pagination();
        PageControls {
            page: p.page,
            total_pages: p.total_pages,
            prev_enabled: p.page > 1,
            next_enabled: p.page < p.total_pages,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn songs(n: usize) -> Vec<Song> {
        (1..=n)
            .map(|i| Song {
                title: format!("Song {}", i),
                artist: format!("Artist {}", i),
                link: format!("http://open.spotify.com/track/{}", i),
            })
            .collect()
    }

    #[test]
    fn test_pagination_normal() {
        let p = calculate_pagination(25, 2);
        assert_eq!(p.page, 2);
        assert_eq!(p.total_pages, 3);
        assert_eq!(p.offset, 10);
    }

    #[test]
    fn test_pagination_out_of_bounds_low() {
        let p = calculate_pagination(15, 0);
        assert_eq!(p.page, 1); // Clamped to first page
        assert_eq!(p.total_pages, 2);
        assert_eq!(p.offset, 0);
    }

    #[test]
    fn test_pagination_empty() {
        let p = calculate_pagination(0, 1);
        assert_eq!(p.page, 1);
        assert_eq!(p.total_pages, 1);
        assert_eq!(p.offset, 0);
    }

    #[test]
    fn test_pagination_exact_page_boundary() {
        let p = calculate_pagination(20, 2);
        assert_eq!(p.page, 2);
        assert_eq!(p.total_pages, 2);
        assert_eq!(p.offset, 10);
    }

    #[test]
    fn test_total_pages_formula() {
        for n in 0..=55 {
            let expected = std::cmp::max(1, (n + PAGE_SIZE - 1) / PAGE_SIZE);
            assert_eq!(PlaylistState::new(songs(n)).total_pages(), expected, "n = {}", n);
        }
    }

    #[test]
    fn test_pages_concatenate_to_full_list() {
        for n in [0, 1, 9, 10, 11, 20, 37] {
            let mut state = PlaylistState::new(songs(n));
            let mut seen = Vec::new();
            loop {
                let page = state.slice();
                assert!(page.len() <= PAGE_SIZE);
                seen.extend_from_slice(page);
                let next = state.page(PageDirection::Next);
                if next.current_page() == state.current_page() {
                    break;
                }
                state = next;
            }
            assert_eq!(seen, songs(n), "n = {}", n);
        }
    }

    #[test]
    fn test_previous_on_first_page_is_noop() {
        let state = PlaylistState::new(songs(15));
        let after = state.page(PageDirection::Previous);
        assert_eq!(after.current_page(), 1);
        assert_eq!(after, state);
    }

    #[test]
    fn test_next_on_last_page_is_noop() {
        let state = PlaylistState::new(songs(15)).page(PageDirection::Next);
        assert_eq!(state.current_page(), 2);
        assert_eq!(state.page(PageDirection::Next).current_page(), 2);
    }

    #[test]
    fn test_controls_boundaries() {
        let first = PlaylistState::new(songs(15));
        let c = first.controls();
        assert_eq!(c.label(), "Page 1 of 2");
        assert!(!c.prev_enabled);
        assert!(c.next_enabled);

        let last = first.page(PageDirection::Next);
        let c = last.controls();
        assert_eq!(c.label(), "Page 2 of 2");
        assert!(c.prev_enabled);
        assert!(!c.next_enabled);
        assert_eq!(last.first_ordinal(), 11);
        assert_eq!(last.slice().len(), 5);
    }

    #[test]
    fn test_empty_playlist_controls() {
        let state = PlaylistState::new(Vec::new());
        let c = state.controls();
        assert_eq!(c.label(), "Page 1 of 1");
        assert!(!c.prev_enabled);
        assert!(!c.next_enabled);
        assert!(state.slice().is_empty());
        assert!(state.is_empty());
    }
}
