//! Link behaviour: external links open in a new tab, in-page anchors and
//! the back-to-top button scroll smoothly.

use crate::contract::NAVBAR_ID;
use crate::dom::{Dom, Selector};
use log::debug;

/// Hostname of an absolute `http(s)` URL, lowercased, without userinfo or
/// port. Relative and non-http URLs have no host.
///
/// ```
/// # use folio_ui::links::link_host;
/// assert_eq!(link_host("https://GitHub.com/user").as_deref(), Some("github.com"));
/// assert_eq!(link_host("http://me:pw@example.org:8080/x").as_deref(), Some("example.org"));
/// assert_eq!(link_host("/about"), None);
/// ```
pub fn link_host(href: &str) -> Option<String> {
    let lower = href.trim().to_ascii_lowercase();
    let rest = lower
        .strip_prefix("https://")
        .or_else(|| lower.strip_prefix("http://"))?;
    let authority = rest.split(['/', '?', '#']).next().unwrap_or_default();
    let host_port = authority.rsplit('@').next().unwrap_or_default();
    let host = host_port.split(':').next().unwrap_or_default();
    (!host.is_empty()).then(|| host.to_string())
}

/// Give every off-site `a[href^="http"]` `target="_blank"` and
/// `rel="noopener noreferrer"`. Returns how many links were rewritten.
pub fn open_external_links_in_new_tab<D: Dom>(dom: &D) -> usize {
    let page_host = dom.page_host().to_ascii_lowercase();
    let mut rewritten = 0;
    for link in dom.query_all(None, &Selector::TagWithAttrPrefix("a", "href", "http")) {
        let Some(host) = dom.attr(&link, "href").as_deref().and_then(link_host) else {
            continue;
        };
        if host != page_host {
            dom.set_attr(&link, "target", "_blank");
            dom.set_attr(&link, "rel", "noopener noreferrer");
            rewritten += 1;
        }
    }
    debug!("{rewritten} external link(s) set to open in a new tab");
    rewritten
}

/// Scroll target for an in-page anchor: the element's top minus the
/// navbar height (or `fallback_nav_height` without a navbar).
pub fn anchor_scroll_target<D: Dom>(dom: &D, href: &str, fallback_nav_height: f64) -> Option<f64> {
    let id = href.strip_prefix('#').filter(|id| !id.is_empty())?;
    let target = dom.by_id(id)?;
    let nav_height = dom
        .by_id(NAVBAR_ID)
        .map(|nav| dom.geometry(&nav).offset_height)
        .unwrap_or(fallback_nav_height);
    Some(dom.geometry(&target).offset_top - nav_height)
}

/// Follow a clicked `a[href^="#"]` with a smooth scroll. Returns `true`
/// when a scroll happened and the native jump should be cancelled.
pub fn scroll_to_anchor<D: Dom>(dom: &D, anchor: &D::Node, fallback_nav_height: f64) -> bool {
    let Some(href) = dom.attr(anchor, "href") else {
        return false;
    };
    match anchor_scroll_target(dom, &href, fallback_nav_height) {
        Some(top) => {
            dom.scroll_to(top);
            true
        }
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::MemoryDom;

    #[test]
    fn host_parsing() {
        assert_eq!(link_host("https://example.com").as_deref(), Some("example.com"));
        assert_eq!(
            link_host("https://example.com?q=1").as_deref(),
            Some("example.com")
        );
        assert_eq!(link_host("mailto:me@example.com"), None);
        assert_eq!(link_host("https://"), None);
    }

    #[test]
    fn only_off_site_links_are_rewritten() {
        let dom = MemoryDom::new();
        dom.set_host("danieltso.com");
        let body = dom.body().unwrap();
        let external = dom.append(&body, "a", &[("href", "https://linkedin.com/in/x")]);
        let same_site = dom.append(&body, "a", &[("href", "https://danieltso.com/cv")]);
        let relative = dom.append(&body, "a", &[("href", "#about")]);

        assert_eq!(open_external_links_in_new_tab(&dom), 1);
        assert_eq!(dom.attr(&external, "target").as_deref(), Some("_blank"));
        assert_eq!(
            dom.attr(&external, "rel").as_deref(),
            Some("noopener noreferrer")
        );
        assert_eq!(dom.attr(&same_site, "target"), None);
        assert_eq!(dom.attr(&relative, "target"), None);
    }

    #[test]
    fn anchor_offsets_by_navbar_height() {
        let dom = MemoryDom::new();
        let body = dom.body().unwrap();
        let nav = dom.append(&body, "nav", &[("id", "navbar")]);
        dom.set_geometry(&nav, 0.0, 80.0);
        let section = dom.append(&body, "section", &[("id", "work")]);
        dom.set_geometry(&section, 1200.0, 400.0);
        let link = dom.append(&body, "a", &[("href", "#work")]);

        assert!(scroll_to_anchor(&dom, &link, 70.0));
        assert_eq!(dom.scroll_requests(), vec![1120.0]);
    }

    #[test]
    fn anchor_uses_fallback_without_navbar() {
        let dom = MemoryDom::new();
        let body = dom.body().unwrap();
        let section = dom.append(&body, "section", &[("id", "work")]);
        dom.set_geometry(&section, 1200.0, 400.0);
        assert_eq!(anchor_scroll_target(&dom, "#work", 70.0), Some(1130.0));
    }

    #[test]
    fn bare_hash_and_unknown_targets_do_not_scroll() {
        let dom = MemoryDom::new();
        let body = dom.body().unwrap();
        let bare = dom.append(&body, "a", &[("href", "#")]);
        let dangling = dom.append(&body, "a", &[("href", "#nowhere")]);
        assert!(!scroll_to_anchor(&dom, &bare, 70.0));
        assert!(!scroll_to_anchor(&dom, &dangling, 70.0));
        assert!(dom.scroll_requests().is_empty());
    }
}
