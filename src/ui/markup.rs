//! Extracts the theme's reader-mode markup conventions from rendered HTML.

use scraper::{ElementRef, Html, Selector};

use crate::types::page::{NavDirection, NavLink};

const ARTICLE_SELECTOR: &str = "#body-inner";
const CHAPTER_SELECTOR: &str = "#chapter";
const TOGGLE_SELECTOR: &str = ".reader-mode-toggle";
const PREV_SELECTOR: &str = ".nav.nav-prev";
const NEXT_SELECTOR: &str = ".nav.nav-next";

/// What a rendered page offers to reader mode.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageMarkup {
    pub has_article: bool,
    pub is_chapter_index: bool,
    pub has_toggle: bool,
    pub prev_link: Option<NavLink>,
    pub next_link: Option<NavLink>,
    /// Text content of the article body, one text node per entry joined by spaces.
    pub article_text: String,
}

impl PageMarkup {
    pub fn parse(html: &str) -> Self {
        let document = Html::parse_document(html);

        let article = select_first(&document, ARTICLE_SELECTOR);
        Self {
            has_article: article.is_some(),
            is_chapter_index: select_first(&document, CHAPTER_SELECTOR).is_some(),
            has_toggle: select_first(&document, TOGGLE_SELECTOR).is_some(),
            prev_link: select_first(&document, PREV_SELECTOR).map(nav_link),
            next_link: select_first(&document, NEXT_SELECTOR).map(nav_link),
            article_text: article.map(text_of).unwrap_or_default(),
        }
    }

    pub fn link(&self, direction: NavDirection) -> Option<&NavLink> {
        match direction {
            NavDirection::Previous => self.prev_link.as_ref(),
            NavDirection::Next => self.next_link.as_ref(),
        }
    }
}

fn select_first<'a>(document: &'a Html, selector: &str) -> Option<ElementRef<'a>> {
    let selector = Selector::parse(selector).ok()?;
    document.select(&selector).next()
}

fn text_of(element: ElementRef<'_>) -> String {
    element.text().collect::<Vec<_>>().join(" ")
}

/// A missing `href` becomes an empty target.
fn nav_link(element: ElementRef<'_>) -> NavLink {
    let href = element.value().attr("href").unwrap_or_default().trim();
    let title = element
        .value()
        .attr("title")
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string);
    NavLink {
        href: href.to_string(),
        title,
    }
}
