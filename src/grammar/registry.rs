//! Grammar selectors and the registry of known filename families

use crate::grammar::definition::{DatasetLayout, Grammar};
use crate::grammar::filter::FileFilter;
use crate::grammar::segment::SegmentRole;
use crate::io::configuration::{
    AXIS_TYPES_CT, AXIS_TYPES_KEY, DEFAULT_TAG, DERIVED_CHANNEL_PREFIX, FILTERED_SUBDIR,
    IMAGE_EXTENSION, RATIO_SUBDIR, RESULTS_SUBDIR, SAMPLE_SUBDIR,
};
use crate::io::error::{Result, ScreenError};
use std::collections::BTreeMap;
use std::fmt;

/// Picks a grammar: input datasets by nesting level, output products by tag
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum GrammarSelector {
    /// Input dataset depth (0 = raw, 1 = filtered, 2 = RGB movie)
    Level(u32),
    /// Output product kind, e.g. `Overlay`
    Tag(String),
}

impl fmt::Display for GrammarSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Level(level) => write!(f, "level {level}"),
            Self::Tag(tag) => write!(f, "tag '{tag}'"),
        }
    }
}

/// Output tags whose files carry one channel per time point
const SINGLE_CHANNEL_TAGS: [&str; 3] = ["DynOverlay", "patch_label", "roi_label"];
/// Output tags whose files carry channels 1 to 3 per time point
const MULTI_CHANNEL_TAGS: [&str; 3] = [DEFAULT_TAG, "Overlay", "mosaic"];

/// Maps selectors to grammars
#[derive(Debug, Clone, Default)]
pub struct GrammarRegistry {
    grammars: BTreeMap<GrammarSelector, Grammar>,
}

impl GrammarRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding every grammar produced by the imaging pipeline
    ///
    /// # Errors
    ///
    /// Returns an error if a built-in grammar fails to compile
    pub fn builtin() -> Result<Self> {
        let mut registry = Self::new();

        registry.register(GrammarSelector::Level(0), raw_multichannel()?);
        registry.register(GrammarSelector::Level(1), filtered_multichannel()?);
        registry.register(GrammarSelector::Level(2), rgb_movie()?);

        for tag in MULTI_CHANNEL_TAGS {
            registry.register(GrammarSelector::Tag(tag.to_string()), output_product(tag, true)?);
        }
        for tag in SINGLE_CHANNEL_TAGS {
            registry.register(GrammarSelector::Tag(tag.to_string()), output_product(tag, false)?);
        }

        Ok(registry)
    }

    /// Add or replace the grammar for `selector`, returning the one it replaced
    pub fn register(&mut self, selector: GrammarSelector, grammar: Grammar) -> Option<Grammar> {
        self.grammars.insert(selector, grammar)
    }

    /// Look up the grammar for `selector`
    ///
    /// # Errors
    ///
    /// Returns [`ScreenError::UnsupportedGrammar`] if nothing is registered for it
    pub fn lookup(&self, selector: &GrammarSelector) -> Result<&Grammar> {
        self.grammars
            .get(selector)
            .ok_or_else(|| ScreenError::UnsupportedGrammar {
                selector: selector.clone(),
            })
    }

    /// Registered output tags in sorted order
    pub fn tags(&self) -> Vec<&str> {
        self.grammars
            .keys()
            .filter_map(|selector| match selector {
                GrammarSelector::Tag(tag) => Some(tag.as_str()),
                GrammarSelector::Level(_) => None,
            })
            .collect()
    }

    /// Registered input levels in ascending order
    pub fn levels(&self) -> Vec<u32> {
        self.grammars
            .keys()
            .filter_map(|selector| match selector {
                GrammarSelector::Level(level) => Some(*level),
                GrammarSelector::Tag(_) => None,
            })
            .collect()
    }
}

fn channel_digits() -> SegmentRole {
    SegmentRole::enumerated("c", &["1", "2", "3"])
}

fn time_index() -> [SegmentRole; 2] {
    [SegmentRole::literal("t"), SegmentRole::variable("t")]
}

// <prefix>t<time><middle>c<1|2|3>.tif
fn raw_multichannel() -> Result<Grammar> {
    let [t_literal, t_value] = time_index();
    Grammar::new(
        "raw multi-channel",
        vec![
            SegmentRole::Fixed,
            t_literal,
            t_value,
            SegmentRole::Fixed,
            SegmentRole::literal("c"),
            channel_digits(),
            SegmentRole::literal(IMAGE_EXTENSION),
        ],
        FileFilter::All,
        DatasetLayout::default(),
    )
}

// <prefix><C|Y|P><middle>t<time><suffix>
fn filtered_multichannel() -> Result<Grammar> {
    let [t_literal, t_value] = time_index();
    Grammar::new(
        "filtered multi-channel",
        vec![
            SegmentRole::Fixed,
            SegmentRole::enumerated("c", &["C", "Y", "P"]),
            SegmentRole::Fixed,
            t_literal,
            t_value,
            SegmentRole::Fixed,
        ],
        FileFilter::ExcludePrefix(DERIVED_CHANNEL_PREFIX.to_string()),
        DatasetLayout::nested(&[FILTERED_SUBDIR]).annotated(AXIS_TYPES_KEY, AXIS_TYPES_CT),
    )
}

// <prefix>t<time><suffix>
fn rgb_movie() -> Result<Grammar> {
    let [t_literal, t_value] = time_index();
    Grammar::new(
        "RGB movie",
        vec![SegmentRole::Fixed, t_literal, t_value, SegmentRole::Fixed],
        FileFilter::All,
        DatasetLayout::nested(&[FILTERED_SUBDIR, RATIO_SUBDIR]),
    )
}

fn output_product(tag: &str, multichannel: bool) -> Result<Grammar> {
    let [t_literal, t_value] = time_index();
    let roles = if multichannel {
        vec![
            SegmentRole::Fixed,
            channel_digits(),
            SegmentRole::Fixed,
            t_literal,
            t_value,
            SegmentRole::Fixed,
        ]
    } else {
        vec![SegmentRole::Fixed, t_literal, t_value, SegmentRole::Fixed]
    };

    // The default product has its own directory; the rest share one and are told apart by suffix
    let (filter, product_dir) = if tag == DEFAULT_TAG {
        (FileFilter::All, DEFAULT_TAG)
    } else {
        (FileFilter::StemSuffix(format!("_{tag}")), RESULTS_SUBDIR)
    };

    let kind = if multichannel { "multi-channel" } else { "single-channel" };
    Grammar::new(
        &format!("{tag} output ({kind})"),
        roles,
        filter,
        DatasetLayout::nested(&[SAMPLE_SUBDIR, product_dir]).annotated(AXIS_TYPES_KEY, AXIS_TYPES_CT),
    )
}
