use std::fmt;

/// The closed set of element queries the behaviour layer issues.
///
/// Keeping selectors typed lets the memory backend match them directly while
/// the browser backend hands [`Selector::to_css`] to `querySelectorAll`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selector<'a> {
    /// `tag`
    Tag(&'a str),
    /// `.class`
    Class(&'a str),
    /// `[attr]`
    Attr(&'a str),
    /// `[attr="value"]`
    AttrEq(&'a str, &'a str),
    /// `tag[attr]`
    TagWithAttr(&'a str, &'a str),
    /// `tag[attr^="prefix"]`
    TagWithAttrPrefix(&'a str, &'a str, &'a str),
    /// `.class[attr="value"]`
    ClassWithAttrEq(&'a str, &'a str, &'a str),
    /// Keyboard-reachable descendants.
    Focusable,
}

const FOCUSABLE_CSS: &str =
    r#"a[href], button, textarea, input, select, [tabindex]:not([tabindex="-1"])"#;

impl Selector<'_> {
    pub fn to_css(&self) -> String {
        match self {
            Selector::Tag(tag) => (*tag).to_string(),
            Selector::Class(class) => format!(".{class}"),
            Selector::Attr(attr) => format!("[{attr}]"),
            Selector::AttrEq(attr, value) => format!(r#"[{attr}="{}"]"#, escape(value)),
            Selector::TagWithAttr(tag, attr) => format!("{tag}[{attr}]"),
            Selector::TagWithAttrPrefix(tag, attr, prefix) => {
                format!(r#"{tag}[{attr}^="{}"]"#, escape(prefix))
            }
            Selector::ClassWithAttrEq(class, attr, value) => {
                format!(r#".{class}[{attr}="{}"]"#, escape(value))
            }
            Selector::Focusable => FOCUSABLE_CSS.to_string(),
        }
    }

    /// Match against a single element described by its tag and attribute
    /// lookup. Class membership is read from the `class` attribute.
    pub(crate) fn matches<'v>(&self, tag: &str, attr: impl Fn(&str) -> Option<&'v str>) -> bool {
        let has_class = |class: &str| {
            attr("class")
                .map(|list| list.split_whitespace().any(|c| c == class))
                .unwrap_or(false)
        };
        match *self {
            Selector::Tag(t) => tag.eq_ignore_ascii_case(t),
            Selector::Class(class) => has_class(class),
            Selector::Attr(name) => attr(name).is_some(),
            Selector::AttrEq(name, value) => attr(name) == Some(value),
            Selector::TagWithAttr(t, name) => tag.eq_ignore_ascii_case(t) && attr(name).is_some(),
            Selector::TagWithAttrPrefix(t, name, prefix) => {
                tag.eq_ignore_ascii_case(t)
                    && attr(name).map(|v| v.starts_with(prefix)).unwrap_or(false)
            }
            Selector::ClassWithAttrEq(class, name, value) => {
                has_class(class) && attr(name) == Some(value)
            }
            Selector::Focusable => {
                let tag = tag.to_ascii_lowercase();
                (tag == "a" && attr("href").is_some())
                    || matches!(tag.as_str(), "button" | "textarea" | "input" | "select")
                    || attr("tabindex").map(|t| t.trim() != "-1").unwrap_or(false)
            }
        }
    }
}

impl fmt::Display for Selector<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_css())
    }
}

fn escape(value: &str) -> String {
    value.replace('\\', "\\\\").replace('"', "\\\"")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn attrs<'a>(pairs: &'a [(&'a str, &'a str)]) -> impl Fn(&str) -> Option<&'a str> {
        move |name: &str| pairs.iter().find(|(k, _)| *k == name).map(|(_, v)| *v)
    }

    #[test]
    fn css_rendering() {
        assert_eq!(Selector::Class("nav__link").to_css(), ".nav__link");
        assert_eq!(Selector::TagWithAttr("section", "id").to_css(), "section[id]");
        assert_eq!(
            Selector::ClassWithAttrEq("nav__link", "href", "#about").to_css(),
            r##".nav__link[href="#about"]"##
        );
        assert_eq!(
            Selector::TagWithAttrPrefix("a", "href", "http").to_css(),
            r#"a[href^="http"]"#
        );
    }

    #[test]
    fn attribute_values_are_escaped() {
        assert_eq!(
            Selector::AttrEq("data-case-study", r#"a"b"#).to_css(),
            r#"[data-case-study="a\"b"]"#
        );
    }

    #[test]
    fn class_matches_whole_tokens_only() {
        let a = [("class", "nav__link nav__link--active")];
        assert!(Selector::Class("nav__link").matches("a", attrs(&a)));
        assert!(!Selector::Class("nav").matches("a", attrs(&a)));
    }

    #[test]
    fn focusable_rules() {
        assert!(Selector::Focusable.matches("a", attrs(&[("href", "#x")])));
        assert!(!Selector::Focusable.matches("a", attrs(&[])));
        assert!(Selector::Focusable.matches("BUTTON", attrs(&[])));
        assert!(Selector::Focusable.matches("div", attrs(&[("tabindex", "0")])));
        assert!(!Selector::Focusable.matches("div", attrs(&[("tabindex", "-1")])));
        assert!(!Selector::Focusable.matches("span", attrs(&[])));
    }

    #[test]
    fn prefix_match() {
        let sel = Selector::TagWithAttrPrefix("a", "href", "#");
        assert!(sel.matches("a", attrs(&[("href", "#top")])));
        assert!(!sel.matches("a", attrs(&[("href", "/top")])));
        assert!(!sel.matches("div", attrs(&[("href", "#top")])));
    }
}
