//! Windowed page links for list tables.

/// Pages shown on either side of the current page.
pub const WINDOW_RADIUS: u32 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageLinkLabel {
    Previous,
    Number,
    Next,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageLink {
    pub label: PageLinkLabel,
    pub page: u32,
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaginationView {
    pub current_page: u32,
    pub total_pages: u32,
    pub links: Vec<PageLink>,
}

impl PaginationView {
    /// Links for `current_page` out of `total_pages`, or `None` when there is
    /// at most one page.
    pub fn build(current_page: u32, total_pages: u32) -> Option<Self> {
        if total_pages <= 1 {
            return None;
        }
        let current = current_page.clamp(1, total_pages);
        let start = current.saturating_sub(WINDOW_RADIUS).max(1);
        let end = current.saturating_add(WINDOW_RADIUS).min(total_pages);

        let mut links = Vec::with_capacity((end - start + 3) as usize);
        if current > 1 {
            links.push(PageLink {
                label: PageLinkLabel::Previous,
                page: current - 1,
                active: false,
            });
        }
        links.extend((start..=end).map(|page| PageLink {
            label: PageLinkLabel::Number,
            page,
            active: page == current,
        }));
        if current < total_pages {
            links.push(PageLink {
                label: PageLinkLabel::Next,
                page: current + 1,
                active: false,
            });
        }

        Some(Self {
            current_page: current,
            total_pages,
            links,
        })
    }

    pub fn numbered(&self) -> impl Iterator<Item = &PageLink> {
        self.links
            .iter()
            .filter(|link| link.label == PageLinkLabel::Number)
    }

    pub fn previous(&self) -> Option<&PageLink> {
        self.links
            .iter()
            .find(|link| link.label == PageLinkLabel::Previous)
    }

    pub fn next(&self) -> Option<&PageLink> {
        self.links
            .iter()
            .find(|link| link.label == PageLinkLabel::Next)
    }
}
