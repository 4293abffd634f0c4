use maud::{html, Markup, PreEscaped};

use crate::models::{EmbedFrame, ResultItem, ResultSet};
use crate::panel::state::{PanelState, Region};

/// Result of projecting a [`PanelState`] onto the dialog body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PanelView {
    pub region: Option<Region>,
    pub html: String,
}

pub fn render(state: &PanelState) -> PanelView {
    PanelView {
        region: state.visible_region(),
        html: panel_body(state).into_string(),
    }
}

/// The whole dialog: query form around an already rendered body.
pub fn render_dialog(open: bool, input: &str, hint: Option<&str>, body: &str) -> Markup {
    html! {
        div id="searchModal" class=(if open { "modal show" } else { "modal" }) {
            form id="searchForm" class="position-relative" role="search" {
                input id="searchInput" class="form-control form-control-lg" type="search"
                    name="q" autocomplete="off" placeholder="Search articles..." value=(input);
                @if let Some(hint) = hint {
                    small class="text-muted position-absolute end-0 me-3 search-shortcut-hint" { (hint) }
                }
            }
            (PreEscaped(body))
        }
    }
}

fn panel_body(state: &PanelState) -> Markup {
    let visible = state.visible_region();
    let class_for = |region: Region| {
        if visible == Some(region) {
            "search-region"
        } else {
            "search-region d-none"
        }
    };

    html! {
        div id=(Region::EmptyPrompt.dom_id()) class=(class_for(Region::EmptyPrompt)) {
            p class="text-muted mb-0" { "Start typing to search the journal." }
        }
        div id=(Region::Loading.dom_id()) class=(class_for(Region::Loading)) {
            div class="spinner-border text-primary" role="status" {
                span class="visually-hidden" { "Searching..." }
            }
        }
        div id=(Region::ResultList.dom_id()) class=(class_for(Region::ResultList)) {
            @match state {
                PanelState::Results { results, .. } => { (result_list(results)) }
                PanelState::Embedded { frame, .. } => { (embed(frame)) }
                _ => { div id="searchResults" class="list-group list-group-flush" {} }
            }
        }
        div id=(Region::NoResults.dom_id()) class=(class_for(Region::NoResults)) {
            p class="mb-1" { "No results found." }
            small class="text-muted" { "Try different or more general keywords." }
        }
    }
}

fn result_list(results: &ResultSet) -> Markup {
    html! {
        small id="resultStats" class="text-muted d-block mb-2" { (results.summary) }
        div id="searchResults" class="list-group list-group-flush" {
            @for (index, item) in results.items.iter().enumerate() {
                (result_item(item, index + 1))
            }
        }
    }
}

/// One result row. Every field is escaped; links that are not http(s) are
/// neutralised.
pub fn result_item(item: &ResultItem, number: usize) -> Markup {
    html! {
        a class="list-group-item list-group-item-action search-result-item p-3 border-0 border-bottom"
            href=(safe_href(&item.link)) target="_blank" rel="noopener noreferrer" {
            div class="d-flex align-items-start" {
                span class="badge bg-primary bg-opacity-10 text-primary me-3 mt-1" { (number) }
                div class="flex-grow-1" {
                    h6 class="search-result-title mb-1" { (item.title) }
                    p class="search-result-snippet mb-2" { (item.snippet) }
                    small class="search-result-url text-muted" {
                        i class="bi bi-link-45deg" {}
                        " "
                        (item.display_url)
                    }
                }
                i class="bi bi-box-arrow-up-right text-muted ms-2" {}
            }
        }
    }
}

fn embed(frame: &EmbedFrame) -> Markup {
    html! {
        iframe src=(frame.url) frameborder="0" width="100%" height="600"
            style="border: none;" title="Journal Search Results" {}
    }
}

fn safe_href(link: &str) -> &str {
    let lower = link.trim_start().to_ascii_lowercase();
    if lower.starts_with("https://") || lower.starts_with("http://") {
        link
    } else {
        "#"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FailureKind;
    use crate::models::Query;

    fn query() -> Query {
        Query::parse("energy").unwrap()
    }

    fn unescape(text: &str) -> String {
        text.replace("&lt;", "<")
            .replace("&gt;", ">")
            .replace("&quot;", "\"")
            .replace("&amp;", "&")
    }

    fn between<'a>(html: &'a str, open: &str, close: &str) -> Vec<&'a str> {
        html.split(open)
            .skip(1)
            .filter_map(|rest| rest.split(close).next())
            .collect()
    }

    #[test]
    fn exactly_one_region_is_visible_while_open() {
        let states = [
            PanelState::OpenEmpty,
            PanelState::Loading { query: query() },
            PanelState::NoResults {
                query: query(),
                cause: Some(FailureKind::Transport),
            },
            PanelState::Results {
                query: query(),
                results: ResultSet::new(vec![ResultItem::new("t", "https://a", "s", "a")], "x"),
            },
        ];

        for state in states {
            let view = render(&state);
            let hidden = view.html.matches("search-region d-none").count();
            assert_eq!(hidden, Region::ALL.len() - 1, "state {}", state.label());
            assert!(view.region.is_some());
        }
    }

    #[test]
    fn closed_panel_shows_no_region() {
        let view = render(&PanelState::Closed);
        assert_eq!(view.region, None);
        assert_eq!(view.html.matches("search-region d-none").count(), Region::ALL.len());
    }

    #[test]
    fn items_render_with_sequence_numbers_in_order() {
        let results = ResultSet::new(
            vec![
                ResultItem::new("First", "https://solav.me/1", "one", "solav.me/1"),
                ResultItem::new("Second", "https://solav.me/2", "two", "solav.me/2"),
            ],
            "About 2 results",
        );
        let view = render(&PanelState::Results {
            query: query(),
            results,
        });

        let titles = between(&view.html, "<h6 class=\"search-result-title mb-1\">", "</h6>");
        assert_eq!(titles, vec!["First", "Second"]);
        assert!(view.html.contains(">1</span>"));
        assert!(view.html.contains(">2</span>"));
        assert!(view.html.contains("About 2 results"));
        assert!(view.html.contains("target=\"_blank\""));
    }

    #[test]
    fn markup_in_fields_cannot_break_the_list() {
        let title = r#"<script>alert("x")</script> & </a></div>"#;
        let item = ResultItem::new(title, "https://solav.me/x", "<b>bold</b>", "solav.me/\"x\"");
        let html = result_item(&item, 1).into_string();

        assert!(!html.contains("<script>"));
        assert_eq!(html.matches("</a>").count(), 1);
        assert_eq!(html.matches("</div>").count(), 2);

        let titles = between(&html, "<h6 class=\"search-result-title mb-1\">", "</h6>");
        assert_eq!(unescape(titles[0]), title);
        let snippets = between(&html, "<p class=\"search-result-snippet mb-2\">", "</p>");
        assert_eq!(unescape(snippets[0]), "<b>bold</b>");
    }

    #[test]
    fn script_links_are_neutralised() {
        let item = ResultItem::new("t", "javascript:alert(1)", "s", "u");
        let html = result_item(&item, 1).into_string();
        assert!(html.contains("href=\"#\""));
        assert!(!html.contains("javascript:"));
    }

    #[test]
    fn embedded_results_render_an_iframe() {
        let view = render(&PanelState::Embedded {
            query: query(),
            frame: EmbedFrame {
                url: "https://cse.google.com/cse?cx=abc&q=a%20b".to_string(),
            },
        });
        assert_eq!(view.region, Some(Region::ResultList));
        assert!(view
            .html
            .contains("src=\"https://cse.google.com/cse?cx=abc&amp;q=a%20b\""));
    }

    #[test]
    fn dialog_includes_input_and_hint() {
        let body = render(&PanelState::OpenEmpty).html;
        let html = render_dialog(true, "solar", Some("⌘K"), &body).into_string();
        assert!(html.contains("value=\"solar\""));
        assert!(html.contains("⌘K"));
        assert!(html.contains("modal show"));
        assert!(html.contains("id=\"searchPrompt\" class=\"search-region\""));

        let body = render(&PanelState::Closed).html;
        let html = render_dialog(false, "", None, &body).into_string();
        assert!(!html.contains("search-shortcut-hint"));
    }
}
