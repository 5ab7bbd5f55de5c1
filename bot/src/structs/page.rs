//! Pagination state carried in the `callback_data` of the listing buttons,
//! on the wire as `links:<more|less|noop>:<offset>`.

pub const PAGE_SIZE: u32 = 10;

const CALLBACK_PREFIX: &str = "links";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub limit: u32,
    pub offset: u32,
}

impl Page {
    pub const fn new(limit: u32, offset: u32) -> Page {
        Page { limit, offset }
    }

    pub const fn first() -> Page {
        Page::new(PAGE_SIZE, 0)
    }

    /// Never goes below zero
    #[inline(always)]
    pub const fn previous_offset(&self) -> u32 {
        self.offset.saturating_sub(self.limit)
    }

    #[inline(always)]
    pub const fn next_offset(&self) -> u32 {
        self.offset.saturating_add(self.limit)
    }

    /// 1 based
    #[inline(always)]
    pub const fn number(&self) -> u32 {
        if self.limit == 0 {
            1
        } else {
            self.offset / self.limit + 1
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageAction {
    More,
    Less,
    Noop,
}

impl PageAction {
    const fn as_str(&self) -> &'static str {
        match self {
            PageAction::More => "more",
            PageAction::Less => "less",
            PageAction::Noop => "noop",
        }
    }

    pub fn callback_data(&self, offset: u32) -> String {
        format!("{CALLBACK_PREFIX}:{}:{offset}", self.as_str())
    }
}

/// What a pressed listing button asks for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageRequest {
    Noop,
    Offset(u32),
}

impl PageRequest {
    /// Returns None for anything that isn't well formed listing callback data
    pub fn parse(data: &str) -> Option<PageRequest> {
        if data.starts_with("links:noop") {
            return Some(PageRequest::Noop);
        }
        if !data.starts_with("links:more") && !data.starts_with("links:less") {
            return None;
        }

        let args: Vec<&str> = data.split(':').collect();
        if args.len() != 3 {
            return None;
        }
        // parse alone would accept a leading +
        if args[2].is_empty() || !args[2].bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        args[2].parse().ok().map(PageRequest::Offset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_previous_clamped() {
        assert_eq!(Page::new(10, 5).previous_offset(), 0);
        assert_eq!(Page::new(10, 0).previous_offset(), 0);
        assert_eq!(Page::new(10, 25).previous_offset(), 15);
    }

    #[test]
    fn test_next() {
        assert_eq!(Page::new(10, 20).next_offset(), 30);
        assert_eq!(Page::new(10, u32::MAX).next_offset(), u32::MAX);
    }

    #[test]
    fn test_page_number() {
        assert_eq!(Page::first().number(), 1);
        assert_eq!(Page::new(10, 9).number(), 1);
        assert_eq!(Page::new(10, 10).number(), 2);
        assert_eq!(Page::new(10, 25).number(), 3);
        assert_eq!(Page::new(0, 25).number(), 1);
    }

    #[test]
    fn test_callback_data() {
        assert_eq!(PageAction::More.callback_data(30), "links:more:30");
        assert_eq!(PageAction::Less.callback_data(0), "links:less:0");
        assert_eq!(PageAction::Noop.callback_data(10), "links:noop:10");
    }

    #[test]
    fn test_parse_pages() {
        assert_eq!(
            PageRequest::parse("links:more:20"),
            Some(PageRequest::Offset(20))
        );
        assert_eq!(
            PageRequest::parse("links:less:0"),
            Some(PageRequest::Offset(0))
        );
    }

    #[test]
    fn test_parse_pages_by_prefix() {
        assert_eq!(
            PageRequest::parse("links:moreover:10"),
            Some(PageRequest::Offset(10))
        );
        assert_eq!(
            PageRequest::parse("links:lesser:0"),
            Some(PageRequest::Offset(0))
        );
    }

    #[test]
    fn test_parse_noop() {
        assert_eq!(PageRequest::parse("links:noop"), Some(PageRequest::Noop));
        assert_eq!(PageRequest::parse("links:noop:10"), Some(PageRequest::Noop));
    }

    #[test]
    fn test_parse_malformed() {
        assert_eq!(PageRequest::parse("links:more"), None);
        assert_eq!(PageRequest::parse("links:more:"), None);
        assert_eq!(PageRequest::parse("links:more:abc"), None);
        assert_eq!(PageRequest::parse("links:more:-10"), None);
        assert_eq!(PageRequest::parse("links:more:+10"), None);
        assert_eq!(PageRequest::parse("links:more:10:20"), None);
        assert_eq!(PageRequest::parse("links:more:99999999999"), None);
        assert_eq!(PageRequest::parse("other:more:10"), None);
        assert_eq!(PageRequest::parse(""), None);
    }
}
