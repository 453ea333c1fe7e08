//! The render configurations used by the article pages.
//!
//! Two profiles exist: the top-level article profile, and the narrower
//! profile used for FAQ answers nested inside an article. The answer profile
//! handles tables only and has no inline records, so FAQ rendering cannot
//! recurse into another FAQ.

use std::sync::Arc;

use crate::config::RenderSettings;

use super::dispatch::{Dispatcher, FaqOptions, TableOptions, UnknownPolicy};
use super::rules::{heading_anchor_rule, paragraph_container_rule};
use super::tree::RenderRules;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProfileOptions {
    /// Show unhandled block payloads instead of dropping them.
    pub diagnostics: bool,
    pub checkmarks: bool,
    /// Self-linking anchors on headings and FAQ questions.
    pub anchors: bool,
}

impl Default for ProfileOptions {
    fn default() -> Self {
        Self {
            diagnostics: false,
            checkmarks: true,
            anchors: true,
        }
    }
}

impl From<&RenderSettings> for ProfileOptions {
    fn from(settings: &RenderSettings) -> Self {
        Self {
            diagnostics: settings.diagnostics,
            checkmarks: settings.checkmarks,
            anchors: settings.anchors,
        }
    }
}

impl ProfileOptions {
    fn unknown_blocks(self) -> UnknownPolicy {
        UnknownPolicy::from_diagnostics(self.diagnostics)
    }

    fn table(self) -> TableOptions {
        TableOptions {
            checkmarks: self.checkmarks,
        }
    }
}

/// Rules for an article's top-level content.
pub fn article_rules(options: ProfileOptions) -> RenderRules {
    let answer = Arc::new(faq_answer_rules(options));

    base_rules(options)
        .with_blocks(
            Dispatcher::new(options.unknown_blocks())
                .table(options.table())
                .button()
                .media(),
        )
        .with_inline_records(
            Dispatcher::new(UnknownPolicy::Omit)
                .faq(FaqOptions {
                    anchored: options.anchors,
                    answer,
                })
                .article_link(),
        )
        .with_record_links(Dispatcher::new(UnknownPolicy::Omit).article_link())
}

/// Rules for the answer of a FAQ record.
pub fn faq_answer_rules(options: ProfileOptions) -> RenderRules {
    base_rules(options).with_blocks(Dispatcher::new(options.unknown_blocks()).table(options.table()))
}

fn base_rules(options: ProfileOptions) -> RenderRules {
    let mut rules = RenderRules::standard();
    if options.anchors {
        rules = rules.with_override(heading_anchor_rule());
    }
    rules.with_override(paragraph_container_rule())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::render::tree::render;
    use crate::domain::dast::{Node, StructuredText};
    use serde_json::{Value, json};

    fn button_block(id: &str) -> Value {
        json!({
            "__typename": "ButtonRecord",
            "id": id,
            "label": "Book now",
            "primary": true,
            "url": "https://example.com/book"
        })
    }

    fn faq_link(answer_blocks: Vec<Value>, answer_children: Vec<Node>) -> Value {
        let answer = StructuredText::new(Node::Root {
            children: answer_children,
        })
        .with_blocks(answer_blocks);
        json!({
            "__typename": "FaqModelRecord",
            "id": "faq-1",
            "faq": {
                "__typename": "FaqRecord",
                "id": "q-1",
                "question": "Can I cancel?",
                "answer": answer
            }
        })
    }

    fn rendered(text: &StructuredText, rules: &RenderRules) -> String {
        render(text, rules)
            .expect("render")
            .map(|markup| markup.to_html())
            .unwrap_or_default()
    }

    fn article_with_faq(answer: Value) -> StructuredText {
        StructuredText::new(Node::Root {
            children: vec![
                Node::Heading {
                    level: 2,
                    style: None,
                    children: vec![Node::span("Getting Started!")],
                },
                Node::Block {
                    item: "btn-1".into(),
                },
                Node::Paragraph {
                    style: None,
                    children: vec![Node::InlineItem {
                        item: "faq-1".into(),
                    }],
                },
            ],
        })
        .with_blocks(vec![button_block("btn-1")])
        .with_links(vec![answer])
    }

    #[test]
    fn article_profile_renders_blocks_and_faqs() {
        let text = article_with_faq(faq_link(
            Vec::new(),
            vec![Node::Paragraph {
                style: None,
                children: vec![Node::span("Any time.")],
            }],
        ));

        assert_eq!(
            rendered(&text, &article_rules(ProfileOptions::default())),
            "<a href=\"#getting-started\"><h2 id=\"getting-started\">Getting Started!</h2></a>\
             <a class=\"button button-primary\" href=\"https://example.com/book\">Book now</a>\
             <div class=\"fake-paragraph\">\
             <a href=\"#can-i-cancel\"><h2 id=\"can-i-cancel\">Can I cancel?</h2></a>\
             <div class=\"fake-paragraph\">Any time.</div>\
             </div>"
        );
    }

    #[test]
    fn button_inside_faq_answer_is_unhandled() {
        let answer = faq_link(
            vec![button_block("inner-btn")],
            vec![Node::Block {
                item: "inner-btn".into(),
            }],
        );
        let text = article_with_faq(answer);

        let quiet = rendered(&text, &article_rules(ProfileOptions::default()));
        assert_eq!(quiet.matches("button-primary").count(), 1);
        assert!(!quiet.contains("Warning"));

        let loud = rendered(
            &text,
            &article_rules(ProfileOptions {
                diagnostics: true,
                ..ProfileOptions::default()
            }),
        );
        assert!(loud.contains("Warning: Unhandled block of type 'ButtonRecord'"));
        assert_eq!(loud.matches("button-primary").count(), 1);
    }

    #[test]
    fn anchors_can_be_disabled() {
        let text = article_with_faq(faq_link(Vec::new(), Vec::new()));
        let html = rendered(
            &text,
            &article_rules(ProfileOptions {
                anchors: false,
                ..ProfileOptions::default()
            }),
        );

        assert!(html.starts_with("<h2>Getting Started!</h2>"));
        assert!(html.contains("<h2>Can I cancel?</h2>"));
        assert!(!html.contains("href=\"#"));
    }

    #[test]
    fn inline_article_reference_links_to_article_page() {
        let text = StructuredText::new(Node::Root {
            children: vec![Node::Paragraph {
                style: None,
                children: vec![
                    Node::span("Read "),
                    Node::InlineItem { item: "a2".into() },
                ],
            }],
        })
        .with_links(vec![json!({
            "__typename": "ArticleRecord", "id": "a2", "slug": "refunds", "title": "Refunds"
        })]);

        assert_eq!(
            rendered(&text, &article_rules(ProfileOptions::default())),
            "<div class=\"fake-paragraph\">Read <a href=\"/articles/refunds\">Refunds</a></div>"
        );
    }

    #[test]
    fn unknown_inline_record_is_omitted_even_with_diagnostics() {
        let text = StructuredText::new(Node::Root {
            children: vec![Node::Paragraph {
                style: None,
                children: vec![Node::InlineItem { item: "x".into() }],
            }],
        })
        .with_links(vec![json!({ "__typename": "AuthorRecord", "id": "x" })]);

        let options = ProfileOptions {
            diagnostics: true,
            ..ProfileOptions::default()
        };
        assert_eq!(
            rendered(&text, &article_rules(options)),
            "<div class=\"fake-paragraph\"></div>"
        );
    }
}
