//! Paged appender for serialized field bytes.
//!
//! Field bytes arrive as many small writes (a tag here, a few header bytes
//! there). The appender copies them into fixed-capacity pages so that a write
//! never moves previously written bytes; a new page is started only when the
//! current one is full. Pages are joined once, at `into_bytes`.

use crate::error::NimbleError;

/// Default page size, matching `EncoderConfig::default().field_page_size`.
pub const DEFAULT_PAGE_SIZE: usize = 4096;

#[derive(Debug, Clone)]
pub struct FieldAppender {
    pages: Vec<Vec<u8>>,
    page_size: usize,
    len: usize,
}

impl Default for FieldAppender {
    fn default() -> Self {
        Self {
            pages: Vec::new(),
            page_size: DEFAULT_PAGE_SIZE,
            len: 0,
        }
    }
}

impl FieldAppender {
    /// Creates an appender with `page_size`-byte pages.
    ///
    /// # Errors
    /// Returns `NimbleError::InvalidConfig` if `page_size` is zero.
    pub fn with_page_size(page_size: usize) -> Result<Self, NimbleError> {
        if page_size == 0 {
            return Err(NimbleError::InvalidConfig(
                "field appender page size must be greater than zero".to_string(),
            ));
        }
        Ok(Self {
            pages: Vec::new(),
            page_size,
            len: 0,
        })
    }

    /// Appends `bytes`, spilling into as many new pages as needed.
    pub fn push(&mut self, mut bytes: &[u8]) {
        self.len += bytes.len();

        while !bytes.is_empty() {
            let room = match self.pages.last() {
                Some(page) => self.page_size - page.len(),
                None => 0,
            };
            if room == 0 {
                self.pages.push(Vec::with_capacity(self.page_size));
                continue;
            }

            let take = room.min(bytes.len());
            let (head, tail) = bytes.split_at(take);
            if let Some(page) = self.pages.last_mut() {
                page.extend_from_slice(head);
            }
            bytes = tail;
        }
    }

    /// Total bytes written so far.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Number of pages allocated so far.
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Consumes the appender and joins its pages into one buffer.
    pub fn into_bytes(self) -> Vec<u8> {
        let mut pages = self.pages;
        if pages.len() == 1 {
            return pages.pop().unwrap_or_default();
        }

        let mut joined = Vec::with_capacity(self.len);
        for page in &pages {
            joined.extend_from_slice(page);
        }
        joined
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_zero_page_size_is_rejected() {
        assert!(matches!(
            FieldAppender::with_page_size(0),
            Err(NimbleError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_untouched_appender_is_empty() {
        let appender = FieldAppender::default();
        assert!(appender.is_empty());
        assert_eq!(appender.page_count(), 0);
        assert!(appender.into_bytes().is_empty());
    }

    #[test]
    fn test_pages_fill_before_spilling() {
        let mut appender = FieldAppender::with_page_size(4).unwrap();
        appender.push(b"abc");
        assert_eq!(appender.page_count(), 1);
        appender.push(b"de");
        assert_eq!(appender.page_count(), 2);
        appender.push(b"fghijk");
        assert_eq!(appender.page_count(), 3);
        assert_eq!(appender.len(), 11);
        assert_eq!(appender.into_bytes(), b"abcdefghijk".to_vec());
    }

    #[test]
    fn test_many_small_writes_match_single_write() {
        let payload: Vec<u8> = (0..10_000u32).map(|i| (i % 251) as u8).collect();

        let mut incremental = FieldAppender::default();
        for piece in payload.chunks(3) {
            incremental.push(piece);
        }
        assert!(incremental.page_count() > 1);

        let mut single = FieldAppender::default();
        single.push(&payload);

        assert_eq!(incremental.into_bytes(), single.into_bytes());
    }

    proptest! {
        #[test]
        fn prop_paging_never_loses_bytes(
            pieces in proptest::collection::vec(proptest::collection::vec(any::<u8>(), 0..40), 0..64),
            page_size in 1usize..32,
        ) {
            let mut appender = FieldAppender::with_page_size(page_size).unwrap();
            let mut expected = Vec::new();
            for piece in &pieces {
                appender.push(piece);
                expected.extend_from_slice(piece);
            }
            prop_assert_eq!(appender.len(), expected.len());
            prop_assert_eq!(appender.into_bytes(), expected);
        }
    }
}
