//! Structured-text rendering.
//!
//! Rendering is pure and synchronous: a [`StructuredText`] value and a set of
//! [`RenderRules`] go in, a [`MarkupNode`] tree (or nothing) comes out. Rules
//! are built per call site; see [`profiles`] for the ones the pages use.
//!
//! [`StructuredText`]: crate::domain::dast::StructuredText

mod dispatch;
mod markup;
pub mod profiles;
mod rules;
mod tree;
mod types;

pub use dispatch::{
    ARTICLE_PATH_PREFIX, Dispatcher, FaqOptions, TableOptions, UnknownPolicy, prettify_checkmarks,
};
pub use markup::{Element, MarkupNode};
pub use profiles::{ProfileOptions, article_rules, faq_answer_rules};
pub use rules::{FAKE_PARAGRAPH_CLASS, heading_anchor_rule, paragraph_container_rule};
pub use tree::{NodeContext, NodeRule, Predicate, ROOT_KEY, RenderFn, RenderRules, render};
pub use types::{ReferenceTable, RenderError};
