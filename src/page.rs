use regex::Regex;
use scraper::{ElementRef, Html, Selector};

use crate::error::ScrapeError;

/// Listing fields a layout knows how to locate inside one result node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Link,
    BoatName,
    Length,
    Price,
}

/// What the pagination control of a results page says.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaginationMarker {
    /// A control is present; `next_disabled` means this is the final page.
    Control { next_disabled: bool },
    /// No pagination control anywhere on the page (single-page results).
    Absent,
    /// A control is present but not in a shape we recognize.
    Unrecognized,
}

/// Structural lookups on one markup shape of the search results page.
/// Classification and extraction go through this interface only, so a site
/// redesign means one new layout implementation, not new pipeline code.
pub trait PageLayout {
    /// The search container; `None` means this is not a results page at all.
    fn search_root<'a>(&self, doc: &'a Html) -> Option<ElementRef<'a>>;

    fn pagination_marker(&self, root: ElementRef<'_>) -> PaginationMarker;

    /// All listing nodes in document order.
    fn listing_nodes<'a>(&self, root: ElementRef<'a>) -> Vec<ElementRef<'a>>;

    fn field(&self, node: ElementRef<'_>, field: Field) -> Option<String>;
}

/// The layout of boataround.com search results as currently served.
pub struct BoataroundLayout {
    search: Selector,
    paginator: Selector,
    arrow: Selector,
    results: Selector,
    item: Selector,
    anchor: Selector,
    name: Selector,
    price: Selector,
    params_name: Selector,
    params_value: Selector,
    param_entry: Selector,
    price_amount: Regex,
}

impl Default for BoataroundLayout {
    fn default() -> Self {
        // Selectors are literals, parse failures would be compile-time bugs
        Self {
            search: Selector::parse("div#search").unwrap(),
            paginator: Selector::parse("div.paginator--desktop").unwrap(),
            arrow: Selector::parse("a.paginator__arrow").unwrap(),
            results: Selector::parse("section.search-results-list").unwrap(),
            item: Selector::parse("li.search-result-wrapper").unwrap(),
            anchor: Selector::parse("a").unwrap(),
            name: Selector::parse("span.mr-2").unwrap(),
            price: Selector::parse("span.price-box__price").unwrap(),
            params_name: Selector::parse("ul.search-result-middle__params-name").unwrap(),
            params_value: Selector::parse("ul.search-result-middle__params-value").unwrap(),
            param_entry: Selector::parse("li").unwrap(),
            price_amount: Regex::new(r"[\d][\d.,]*").unwrap(),
        }
    }
}

impl BoataroundLayout {
    fn element_text(element: ElementRef<'_>) -> String {
        element.text().collect::<Vec<_>>().join(" ").trim().to_string()
    }

    /// The "Length" entry sits at some index of a params-name list; the
    /// value lives at the same index of the adjacent params-value list.
    fn length_value(&self, node: ElementRef<'_>) -> Option<String> {
        let name_lists = node.select(&self.params_name);
        let mut value_lists = node.select(&self.params_value);
        for names in name_lists {
            let values = value_lists.next();
            let index = names
                .select(&self.param_entry)
                .position(|entry| Self::element_text(entry).contains("Length"));
            if let (Some(index), Some(values)) = (index, values) {
                if let Some(value) = values.select(&self.param_entry).nth(index) {
                    return Some(Self::element_text(value));
                }
            }
        }
        None
    }
}

impl PageLayout for BoataroundLayout {
    fn search_root<'a>(&self, doc: &'a Html) -> Option<ElementRef<'a>> {
        doc.select(&self.search).next()
    }

    fn pagination_marker(&self, root: ElementRef<'_>) -> PaginationMarker {
        let Some(paginator) = root.select(&self.paginator).next() else {
            return PaginationMarker::Absent;
        };
        let arrows: Vec<_> = paginator.select(&self.arrow).collect();
        // Arrow pair is previous/next; the next arrow is disabled on the
        // final page.
        match arrows.get(1) {
            Some(next_arrow) => PaginationMarker::Control {
                next_disabled: matches!(
                    next_arrow.value().attr("disabled"),
                    Some("disabled") | Some("")
                ),
            },
            None => PaginationMarker::Unrecognized,
        }
    }

    fn listing_nodes<'a>(&self, root: ElementRef<'a>) -> Vec<ElementRef<'a>> {
        match root.select(&self.results).next() {
            Some(list) => list.select(&self.item).collect(),
            // "No results found" pages keep the search container but drop
            // the results section entirely.
            None => Vec::new(),
        }
    }

    fn field(&self, node: ElementRef<'_>, field: Field) -> Option<String> {
        match field {
            Field::Link => node
                .select(&self.anchor)
                .next()
                .and_then(|a| a.value().attr("href"))
                .map(|href| href.to_string()),
            Field::BoatName => node.select(&self.name).next().map(Self::element_text),
            Field::Price => node.select(&self.price).next().map(|element| {
                let text = Self::element_text(element);
                // Keep the bare amount; currency markup varies across pages.
                self.price_amount
                    .find(&text)
                    .map(|amount| amount.as_str().to_string())
                    .unwrap_or(text)
            }),
            Field::Length => self.length_value(node),
        }
    }
}

/// Decides whether pagination stops after this page.
///
/// A page is last when its pagination control disables the next-page arrow,
/// when no pagination control is present, or when it holds zero listings.
/// A page without the expected search container is a `MalformedPage`, never
/// silently terminal.
pub fn is_last_page(
    layout: &impl PageLayout,
    doc: &Html,
    url: &str,
) -> Result<bool, ScrapeError> {
    let root = layout.search_root(doc).ok_or_else(|| ScrapeError::MalformedPage {
        url: url.to_string(),
        reason: "search container not found".to_string(),
    })?;

    if layout.listing_nodes(root).is_empty() {
        return Ok(true);
    }
    match layout.pagination_marker(root) {
        PaginationMarker::Control { next_disabled } => Ok(next_disabled),
        PaginationMarker::Absent => Ok(true),
        PaginationMarker::Unrecognized => Err(ScrapeError::MalformedPage {
            url: url.to_string(),
            reason: "pagination control present but unrecognized".to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(inner: &str) -> Html {
        Html::parse_document(&format!("<html><body>{}</body></html>", inner))
    }

    fn listing_item(href: &str) -> String {
        format!(
            r#"<li class="search-result-wrapper mt-4"><a href="{}"><span class="mr-2">Bavaria 46</span></a></li>"#,
            href
        )
    }

    fn paginator(next_disabled: bool) -> String {
        let disabled = if next_disabled { r#" disabled="disabled""# } else { "" };
        format!(
            r##"<div class="paginator--desktop">
                 <a class="paginator__arrow" href="#"></a>
                 <a class="paginator__arrow" href="#"{}></a>
               </div>"##,
            disabled
        )
    }

    fn search_page(items: &[String], paginator_html: &str) -> Html {
        page(&format!(
            r#"<div id="search"><section class="search-results-list"><ul>{}</ul></section>{}</div>"#,
            items.join(""),
            paginator_html
        ))
    }

    #[test]
    fn disabled_next_arrow_means_last_page() {
        let layout = BoataroundLayout::default();
        let doc = search_page(&[listing_item("/boat/1")], &paginator(true));
        assert!(is_last_page(&layout, &doc, "url").unwrap());
    }

    #[test]
    fn enabled_next_arrow_means_more_pages() {
        let layout = BoataroundLayout::default();
        let doc = search_page(&[listing_item("/boat/1")], &paginator(false));
        assert!(!is_last_page(&layout, &doc, "url").unwrap());
    }

    #[test]
    fn missing_paginator_means_single_page() {
        let layout = BoataroundLayout::default();
        let doc = search_page(&[listing_item("/boat/1")], "");
        assert!(is_last_page(&layout, &doc, "url").unwrap());
    }

    #[test]
    fn zero_listings_means_last_page() {
        let layout = BoataroundLayout::default();
        let doc = search_page(&[], &paginator(false));
        assert!(is_last_page(&layout, &doc, "url").unwrap());
    }

    #[test]
    fn missing_search_container_is_malformed() {
        let layout = BoataroundLayout::default();
        let doc = page("<div>nothing here</div>");
        let err = is_last_page(&layout, &doc, "url").unwrap_err();
        assert!(matches!(err, ScrapeError::MalformedPage { .. }));
    }

    #[test]
    fn paginator_without_arrows_is_malformed() {
        let layout = BoataroundLayout::default();
        let doc = search_page(
            &[listing_item("/boat/1")],
            r#"<div class="paginator--desktop"></div>"#,
        );
        let err = is_last_page(&layout, &doc, "url").unwrap_err();
        assert!(matches!(err, ScrapeError::MalformedPage { .. }));
    }

    #[test]
    fn bare_disabled_attribute_counts_as_disabled() {
        let layout = BoataroundLayout::default();
        let doc = search_page(
            &[listing_item("/boat/1")],
            r#"<div class="paginator--desktop">
                 <a class="paginator__arrow"></a>
                 <a class="paginator__arrow" disabled></a>
               </div>"#,
        );
        assert!(is_last_page(&layout, &doc, "url").unwrap());
    }
}
