//! Selector-driven text extraction.
//!
//! Every text node of the document belongs to at most one [`TextUnit`]: the
//! one opened by its innermost whitelisted ancestor. Text under a blacklisted
//! element, or under script, style and code elements, belongs to none.

use crate::error::ConfigurationError;
use ego_tree::iter::Edge;
use scraper::node::Node;
use scraper::{ElementRef, Html, Selector};

/// Elements whose content is never prose
const SKIPPED_TAGS: &[&str] = &[
    "script", "style", "noscript", "template", "code", "pre", "kbd", "samp", "var", "svg", "math",
];

/// Elements that break words apart when their text is concatenated
const BREAKING_TAGS: &[&str] = &[
    "address", "article", "aside", "blockquote", "br", "dd", "div", "dl", "dt", "figcaption",
    "figure", "footer", "h1", "h2", "h3", "h4", "h5", "h6", "header", "hr", "li", "main", "nav",
    "ol", "p", "section", "table", "tbody", "td", "tfoot", "th", "thead", "tr", "ul",
];

/// Decides whether an element belongs to a region
pub trait ElementMatcher: Send + Sync {
    fn matches(&self, element: &ElementRef<'_>) -> bool;
}

impl<F> ElementMatcher for F
where
    F: Fn(&ElementRef<'_>) -> bool + Send + Sync,
{
    fn matches(&self, element: &ElementRef<'_>) -> bool {
        self(element)
    }
}

/// A group of compiled CSS selectors; an element matches if any does
#[derive(Debug, Clone, Default)]
pub struct SelectorSet {
    sources: Vec<String>,
    selectors: Vec<Selector>,
}

impl SelectorSet {
    pub fn parse<S: AsRef<str>>(sources: &[S]) -> Result<Self, ConfigurationError> {
        let mut set = Self::default();
        for source in sources {
            let source = source.as_ref().trim();
            if source.is_empty() {
                continue;
            }
            let selector = Selector::parse(source).map_err(|e| ConfigurationError::InvalidSelector {
                selector: source.to_string(),
                message: e.to_string(),
            })?;
            set.sources.push(source.to_string());
            set.selectors.push(selector);
        }
        Ok(set)
    }

    pub fn is_empty(&self) -> bool {
        self.selectors.is_empty()
    }

    pub fn sources(&self) -> &[String] {
        &self.sources
    }
}

impl ElementMatcher for SelectorSet {
    fn matches(&self, element: &ElementRef<'_>) -> bool {
        self.selectors.iter().any(|selector| selector.matches(element))
    }
}

/// Regions to scan and regions to exclude; exclusion always wins
#[derive(Debug, Clone)]
pub struct SelectorConfig {
    pub whitelist: SelectorSet,
    pub blacklist: SelectorSet,
}

impl SelectorConfig {
    pub fn new<S: AsRef<str>>(whitelist: &[S], blacklist: &[S]) -> Result<Self, ConfigurationError> {
        let whitelist = SelectorSet::parse(whitelist)?;
        if whitelist.is_empty() {
            return Err(ConfigurationError::MissingWhitelist);
        }
        Ok(Self {
            whitelist,
            blacklist: SelectorSet::parse(blacklist)?,
        })
    }
}

/// One contiguous block of prose, in document order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextUnit {
    pub index: usize,
    pub text: String,
    /// Tag name of the whitelisted element the text came from
    pub element: String,
}

#[derive(Debug, Clone, Copy)]
struct Frame {
    owner: Option<usize>,
    skipped: bool,
    separates: bool,
}

const ROOT: Frame = Frame {
    owner: None,
    skipped: false,
    separates: false,
};

fn separate(units: &mut [(String, String)], frame: &Frame) {
    if frame.skipped {
        return;
    }
    if let Some(i) = frame.owner {
        units[i].1.push(' ');
    }
}

pub fn extract(html: &str, selectors: &SelectorConfig) -> Vec<TextUnit> {
    extract_matching(html, &selectors.whitelist, &selectors.blacklist)
}

/// Walk the parsed document once, routing each text node to its unit
pub fn extract_matching(html: &str, whitelist: &impl ElementMatcher, blacklist: &impl ElementMatcher) -> Vec<TextUnit> {
    let document = Html::parse_document(html);
    let mut units: Vec<(String, String)> = Vec::new();
    let mut frames: Vec<Frame> = Vec::new();

    for edge in document.tree.root().traverse() {
        match edge {
            Edge::Open(node) => match node.value() {
                Node::Text(text) => {
                    let frame = frames.last().copied().unwrap_or(ROOT);
                    if let (false, Some(i)) = (frame.skipped, frame.owner) {
                        units[i].1.push_str(text);
                    }
                }
                Node::Element(element) => {
                    let parent = frames.last().copied().unwrap_or(ROOT);
                    let frame = match ElementRef::wrap(node) {
                        _ if parent.skipped => Frame { separates: false, ..parent },
                        Some(element_ref) => {
                            let tag = element.name();
                            let breaking = BREAKING_TAGS.contains(&tag);
                            if SKIPPED_TAGS.contains(&tag) || blacklist.matches(&element_ref) {
                                Frame {
                                    owner: parent.owner,
                                    skipped: true,
                                    separates: true,
                                }
                            } else if whitelist.matches(&element_ref) {
                                units.push((tag.to_string(), String::new()));
                                Frame {
                                    owner: Some(units.len() - 1),
                                    skipped: false,
                                    separates: true,
                                }
                            } else {
                                Frame {
                                    separates: breaking,
                                    ..parent
                                }
                            }
                        }
                        None => parent,
                    };
                    if frame.separates {
                        separate(&mut units, &parent);
                    }
                    frames.push(frame);
                }
                _ => {}
            },
            Edge::Close(node) => {
                if !node.value().is_element() {
                    continue;
                }
                if let Some(frame) = frames.pop() {
                    if frame.separates {
                        separate(&mut units, &frames.last().copied().unwrap_or(ROOT));
                    }
                }
            }
        }
    }

    let units: Vec<TextUnit> = units
        .into_iter()
        .filter_map(|(element, raw)| {
            let text = raw.split_whitespace().collect::<Vec<_>>().join(" ");
            (!text.is_empty()).then_some((element, text))
        })
        .enumerate()
        .map(|(index, (element, text))| TextUnit { index, text, element })
        .collect();

    log::debug!("extracted {} text units", units.len());
    units
}
