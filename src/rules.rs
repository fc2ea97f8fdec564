/*!
The splitting hierarchy: which boundaries to try, from coarse to fine.
*/

use std::ops::Index;

use itertools::Itertools;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::error::{ConfigError, ConfigErrorRepr};

/// Which side of a split a delimiter's text ends up on.
#[derive(
    Clone, Copy, Debug, Default, Display, EnumString, Eq, Hash, PartialEq, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum IncludeDelim {
    /// Delimiter stays at the end of the fragment before the boundary.
    #[default]
    Prev,
    /// Delimiter starts the fragment after the boundary.
    Next,
    /// Delimiter text is dropped. Chunks can no longer be joined back into
    /// the original text.
    None,
}

/// What a single level splits on.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub enum LevelRule {
    /// Split at every occurrence of any of these literal strings.
    Delimiters(Vec<String>),
    /// Split on the space character.
    Whitespace,
    /// No structural rule. Text is cut into windows of at most `chunk_size`
    /// tokens, which always fit.
    Terminal,
}

/// One rule in the splitting hierarchy.
#[derive(Clone, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "LevelConfig", into = "LevelConfig")]
pub struct RecursiveLevel {
    rule: LevelRule,
    include_delim: IncludeDelim,
}

impl RecursiveLevel {
    /// A level splitting on literal delimiters. Delimiters are attached to
    /// the previous fragment unless changed with [`Self::with_include_delim`].
    ///
    /// ```
    /// use recursive_chunker::{IncludeDelim, RecursiveLevel};
    ///
    /// let level = RecursiveLevel::delimiters([". ", "! ", "? "])
    ///     .unwrap()
    ///     .with_include_delim(IncludeDelim::Next);
    /// ```
    ///
    /// # Errors
    ///
    /// Returns an error if no delimiters are given, or if any of them is
    /// empty or a single space.
    pub fn delimiters<I, S>(delimiters: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let delimiters = delimiters
            .into_iter()
            .map(Into::into)
            .unique()
            .collect::<Vec<String>>();

        if delimiters.is_empty() {
            return Err(ConfigErrorRepr::NoDelimiters.into());
        }
        if delimiters.iter().any(String::is_empty) {
            return Err(ConfigErrorRepr::EmptyDelimiter.into());
        }
        if delimiters.iter().any(|d| d == " ") {
            return Err(ConfigErrorRepr::SpaceDelimiter.into());
        }

        Ok(Self {
            rule: LevelRule::Delimiters(delimiters),
            include_delim: IncludeDelim::default(),
        })
    }

    /// A level splitting on single spaces.
    #[must_use]
    pub fn whitespace() -> Self {
        Self {
            rule: LevelRule::Whitespace,
            include_delim: IncludeDelim::default(),
        }
    }

    /// The fallback level, cutting text into fixed token windows.
    #[must_use]
    pub fn terminal() -> Self {
        Self {
            rule: LevelRule::Terminal,
            include_delim: IncludeDelim::default(),
        }
    }

    /// Set where delimiter text is attached. Only affects delimiter levels.
    #[must_use]
    pub fn with_include_delim(mut self, include_delim: IncludeDelim) -> Self {
        self.include_delim = include_delim;
        self
    }

    /// The splitting rule for this level.
    #[must_use]
    pub fn rule(&self) -> &LevelRule {
        &self.rule
    }

    /// Where delimiter text is attached.
    #[must_use]
    pub fn include_delim(&self) -> IncludeDelim {
        self.include_delim
    }
}

/// Delimiters in a recipe can be a single string or a list of them.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DelimiterConfig {
    /// A single delimiter
    One(String),
    /// Several delimiters, tried in order
    Many(Vec<String>),
}

/// Plain, serializable description of a level, as found in a recipe.
///
/// Setting neither `delimiters` nor `whitespace` describes a terminal level.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LevelConfig {
    /// Literal delimiters to split on
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delimiters: Option<DelimiterConfig>,
    /// Split on single spaces
    pub whitespace: bool,
    /// Where delimiter text is attached
    #[serde(alias = "includeDelim")]
    pub include_delim: IncludeDelim,
}

impl TryFrom<LevelConfig> for RecursiveLevel {
    type Error = ConfigError;

    fn try_from(config: LevelConfig) -> Result<Self, Self::Error> {
        let level = match (config.delimiters, config.whitespace) {
            (Some(_), true) => return Err(ConfigErrorRepr::DelimitersWithWhitespace.into()),
            (Some(DelimiterConfig::One(delimiter)), false) => Self::delimiters([delimiter])?,
            (Some(DelimiterConfig::Many(delimiters)), false) => Self::delimiters(delimiters)?,
            (None, true) => Self::whitespace(),
            (None, false) => Self::terminal(),
        };
        Ok(level.with_include_delim(config.include_delim))
    }
}

impl From<RecursiveLevel> for LevelConfig {
    fn from(level: RecursiveLevel) -> Self {
        let (delimiters, whitespace) = match level.rule {
            LevelRule::Delimiters(delimiters) => (Some(DelimiterConfig::Many(delimiters)), false),
            LevelRule::Whitespace => (None, true),
            LevelRule::Terminal => (None, false),
        };
        Self {
            delimiters,
            whitespace,
            include_delim: level.include_delim,
        }
    }
}

/// Plain, serializable description of a whole rule set.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RulesConfig {
    /// Levels from coarsest to finest
    pub levels: Vec<LevelConfig>,
}

impl TryFrom<RulesConfig> for RecursiveRules {
    type Error = ConfigError;

    fn try_from(config: RulesConfig) -> Result<Self, Self::Error> {
        let levels = config
            .levels
            .into_iter()
            .map(RecursiveLevel::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(levels)
    }
}

impl From<RecursiveRules> for RulesConfig {
    fn from(rules: RecursiveRules) -> Self {
        Self {
            levels: rules.levels.into_iter().map(LevelConfig::from).collect(),
        }
    }
}

/// Ordered list of levels. Earlier levels split on coarser boundaries.
/// The last level is normally [`RecursiveLevel::terminal`], which guarantees
/// every chunk fits.
///
/// ```
/// use recursive_chunker::{RecursiveLevel, RecursiveRules};
///
/// let rules = RecursiveRules::new(vec![
///     RecursiveLevel::delimiters(["\n\n"]).unwrap(),
///     RecursiveLevel::whitespace(),
///     RecursiveLevel::terminal(),
/// ])
/// .unwrap();
/// assert_eq!(rules.len(), 3);
/// ```
#[derive(Clone, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RulesConfig", into = "RulesConfig")]
pub struct RecursiveRules {
    levels: Vec<RecursiveLevel>,
}

impl RecursiveRules {
    /// Create a rule set from levels ordered coarse to fine.
    ///
    /// # Errors
    ///
    /// Returns an error if no levels are given.
    pub fn new(levels: Vec<RecursiveLevel>) -> Result<Self, ConfigError> {
        if levels.is_empty() {
            Err(ConfigErrorRepr::NoLevels.into())
        } else {
            Ok(Self { levels })
        }
    }

    /// Number of levels.
    #[must_use]
    pub fn len(&self) -> usize {
        self.levels.len()
    }

    /// Always `false` for a constructed rule set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    /// Level at the given index, if there is one.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&RecursiveLevel> {
        self.levels.get(index)
    }

    /// Iterate over levels from coarsest to finest.
    pub fn iter(&self) -> impl Iterator<Item = &RecursiveLevel> + '_ {
        self.levels.iter()
    }
}

impl Index<usize> for RecursiveRules {
    type Output = RecursiveLevel;

    fn index(&self, index: usize) -> &Self::Output {
        &self.levels[index]
    }
}

const PARAGRAPHS: [&str; 4] = ["\n\n", "\r\n", "\n", "\r"];
const SENTENCES: [&str; 3] = [". ", "! ", "? "];
const PAUSES: [&str; 19] = [
    "{", "}", "\"", "[", "]", "<", ">", "(", ")", ":", ";", ",", "—", "|", "~", "-", "...", "`",
    "'",
];

// Lazy so the default hierarchy is only built once
static DEFAULT_RULES: Lazy<RecursiveRules> = Lazy::new(|| {
    let delimiters = |delimiters: &[&str]| RecursiveLevel {
        rule: LevelRule::Delimiters(delimiters.iter().map(ToString::to_string).collect()),
        include_delim: IncludeDelim::Prev,
    };

    RecursiveRules {
        levels: vec![
            delimiters(&PARAGRAPHS),
            delimiters(&SENTENCES),
            delimiters(&PAUSES),
            RecursiveLevel::whitespace(),
            RecursiveLevel::terminal(),
        ],
    }
});

impl Default for RecursiveRules {
    /// Paragraphs, sentences, pauses, whitespace, then token windows.
    fn default() -> Self {
        DEFAULT_RULES.clone()
    }
}
