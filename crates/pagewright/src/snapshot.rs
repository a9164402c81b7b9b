//! Static Document Query Helper.
//!
//! Pure read-only queries over an already-parsed HTML snapshot: no network,
//! no waiting, no mutation. Contract difference from the live
//! [`Actions`](crate::actions::Actions) layer, preserved deliberately: every
//! query here degrades to an absent value on zero matches (and on selector
//! strings that do not parse), never an error. Queries are idempotent across
//! repeated calls on the same snapshot.

use scraper::{ElementRef, Html, Selector};

/// One `<option>` of a dropdown, as rendered in the snapshot
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DropdownOption {
    /// Whitespace-trimmed rendered text
    pub text: String,
    /// Literal `value` attribute, absent when the option carries none
    pub value: Option<String>,
}

/// A parsed, immutable HTML document
#[derive(Debug)]
pub struct Snapshot {
    document: Html,
}

impl Snapshot {
    /// Parse an HTML document
    #[must_use]
    pub fn parse(html: &str) -> Self {
        Self {
            document: Html::parse_document(html),
        }
    }

    fn select_first(&self, selector: &str) -> Option<ElementRef<'_>> {
        let parsed = Selector::parse(selector).ok()?;
        self.document.select(&parsed).next()
    }

    fn rendered_text(element: ElementRef<'_>) -> String {
        element.text().collect::<String>().trim().to_string()
    }

    /// Document title, when a `<title>` element exists
    #[must_use]
    pub fn title(&self) -> Option<String> {
        self.select_first("title").map(Self::rendered_text)
    }

    /// Trimmed text of the first match
    #[must_use]
    pub fn text(&self, selector: &str) -> Option<String> {
        self.select_first(selector).map(Self::rendered_text)
    }

    /// Attribute value of the first match
    #[must_use]
    pub fn attribute(&self, selector: &str, attribute: &str) -> Option<String> {
        self.select_first(selector)
            .and_then(|el| el.value().attr(attribute))
            .map(str::to_string)
    }

    /// Number of matches (0 for unparseable selectors)
    #[must_use]
    pub fn count(&self, selector: &str) -> usize {
        Selector::parse(selector)
            .map(|parsed| self.document.select(&parsed).count())
            .unwrap_or(0)
    }

    /// Whether at least one element matches
    #[must_use]
    pub fn exists(&self, selector: &str) -> bool {
        self.select_first(selector).is_some()
    }

    /// Whether the first match exists and carries no `disabled` attribute
    #[must_use]
    pub fn is_enabled(&self, selector: &str) -> bool {
        self.select_first(selector)
            .is_some_and(|el| el.value().attr("disabled").is_none())
    }

    /// Whether the first match exists and carries a `disabled` attribute
    #[must_use]
    pub fn is_disabled(&self, selector: &str) -> bool {
        self.select_first(selector)
            .is_some_and(|el| el.value().attr("disabled").is_some())
    }

    /// All options of the dropdown matched by `selector`, in document order
    #[must_use]
    pub fn options(&self, selector: &str) -> Vec<DropdownOption> {
        let option_selector = format!("{selector} option");
        let Ok(parsed) = Selector::parse(&option_selector) else {
            return Vec::new();
        };
        self.document
            .select(&parsed)
            .map(|el| DropdownOption {
                text: Self::rendered_text(el),
                value: el.value().attr("value").map(str::to_string),
            })
            .collect()
    }

    /// Find the option whose rendered text matches exactly
    #[must_use]
    pub fn find_option_by_text(&self, selector: &str, text: &str) -> Option<DropdownOption> {
        self.options(selector).into_iter().find(|o| o.text == text)
    }

    /// Find the option whose `value` attribute matches exactly
    #[must_use]
    pub fn find_option_by_value(&self, selector: &str, value: &str) -> Option<DropdownOption> {
        self.options(selector)
            .into_iter()
            .find(|o| o.value.as_deref() == Some(value))
    }

    /// The option at a zero-based index; absent outside `[0, option_count)`
    #[must_use]
    pub fn option_at(&self, selector: &str, index: usize) -> Option<DropdownOption> {
        self.options(selector).into_iter().nth(index)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    const PAGE: &str = r#"
        <html>
          <head><title> Account Portal </title></head>
          <body>
            <h1 class="banner">Welcome back</h1>
            <a href="/logout" id="logout">Sign out</a>
            <button id="save" disabled>Save</button>
            <button id="cancel">Cancel</button>
            <ul><li>one</li><li>two</li><li>three</li></ul>
            <select id="lang">
              <option value="en">English</option>
              <option value="de"> Deutsch </option>
              <option>Plain</option>
            </select>
          </body>
        </html>"#;

    fn snapshot() -> Snapshot {
        Snapshot::parse(PAGE)
    }

    mod text_query_tests {
        use super::*;

        #[test]
        fn test_title_is_trimmed() {
            assert_eq!(snapshot().title().as_deref(), Some("Account Portal"));
        }

        #[test]
        fn test_text_of_first_match() {
            assert_eq!(snapshot().text("h1.banner").as_deref(), Some("Welcome back"));
            assert_eq!(snapshot().text("li").as_deref(), Some("one"));
        }

        #[test]
        fn test_text_absent_on_miss() {
            assert!(snapshot().text(".nope").is_none());
        }

        #[test]
        fn test_attribute_lookup() {
            let doc = snapshot();
            assert_eq!(doc.attribute("#logout", "href").as_deref(), Some("/logout"));
            assert!(doc.attribute("#logout", "target").is_none());
            assert!(doc.attribute(".nope", "href").is_none());
        }

        #[test]
        fn test_queries_are_idempotent() {
            let doc = snapshot();
            for _ in 0..3 {
                assert_eq!(doc.text("h1.banner").as_deref(), Some("Welcome back"));
                assert_eq!(doc.count("li"), 3);
            }
        }

        #[test]
        fn test_invalid_selector_degrades_to_absent() {
            let doc = snapshot();
            assert!(doc.text("???").is_none());
            assert_eq!(doc.count("???"), 0);
            assert!(!doc.exists("???"));
        }
    }

    mod existence_tests {
        use super::*;

        #[test]
        fn test_count_and_exists() {
            let doc = snapshot();
            assert_eq!(doc.count("li"), 3);
            assert_eq!(doc.count("table"), 0);
            assert!(doc.exists("#save"));
            assert!(!doc.exists("#missing"));
        }

        #[test]
        fn test_disabled_attribute_checks() {
            let doc = snapshot();
            assert!(doc.is_disabled("#save"));
            assert!(!doc.is_enabled("#save"));
            assert!(doc.is_enabled("#cancel"));
            assert!(!doc.is_disabled("#cancel"));
            // absent element is neither enabled nor disabled
            assert!(!doc.is_enabled("#missing"));
            assert!(!doc.is_disabled("#missing"));
        }
    }

    mod dropdown_tests {
        use super::*;

        #[test]
        fn test_find_by_text_returns_value() {
            let option = snapshot().find_option_by_text("#lang", "Deutsch").unwrap();
            assert_eq!(option.value.as_deref(), Some("de"));
        }

        #[test]
        fn test_find_by_value_returns_text() {
            let option = snapshot().find_option_by_value("#lang", "en").unwrap();
            assert_eq!(option.text, "English");
        }

        #[test]
        fn test_option_without_value_attribute() {
            let option = snapshot().find_option_by_text("#lang", "Plain").unwrap();
            assert!(option.value.is_none());
        }

        #[test]
        fn test_find_misses_return_absent() {
            let doc = snapshot();
            assert!(doc.find_option_by_text("#lang", "Français").is_none());
            assert!(doc.find_option_by_value("#lang", "fr").is_none());
            assert!(doc.find_option_by_text("#nope", "English").is_none());
        }

        #[test]
        fn test_option_at_valid_indices() {
            let doc = snapshot();
            let first = doc.option_at("#lang", 0).unwrap();
            assert_eq!(first.text, "English");
            assert_eq!(first.value.as_deref(), Some("en"));

            let second = doc.option_at("#lang", 1).unwrap();
            assert_eq!(second.text, "Deutsch");
            assert_eq!(second.value.as_deref(), Some("de"));
        }

        #[test]
        fn test_option_at_out_of_range() {
            let doc = snapshot();
            assert!(doc.option_at("#lang", 3).is_none());
            assert!(doc.option_at("#lang", 99).is_none());
        }

        #[test]
        fn test_options_preserve_document_order() {
            let texts: Vec<String> = snapshot()
                .options("#lang")
                .into_iter()
                .map(|o| o.text)
                .collect();
            assert_eq!(texts, vec!["English", "Deutsch", "Plain"]);
        }
    }
}
