//! Owned document model and HTML parsing helpers.
//!
//! This module provides:
//! - An owned node tree ([`Node`], [`Element`], [`Fragment`]) with markup
//!   serialization
//! - Conversion from `scraper` parses into that tree
//! - Whitespace word counting

mod node;
mod parse;
mod words;

pub use node::{Element, Fragment, Node, VOID_ELEMENTS};
pub use parse::{
    enclosing_href, parse_fragment, parse_selector, select_first, to_element, trimmed_text,
};
pub use words::{count_words, last_words};
