//! Prompt options
//!
//! `PromptOptions` is what callers hand in: every field optional so a set of
//! options can be layered on top of another (config file, then CLI flags, then
//! a `Prompter`'s remembered settings). `ResolvedOptions` is what a single
//! line-editing session actually consumes.

use serde::{Deserialize, Serialize};

/// How typed characters are echoed back
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "MaskRepr", into = "MaskRepr")]
pub enum Mask {
    /// Echo the characters as typed
    None,
    /// Echo one substitute character per typed character
    Char(char),
    /// Echo nothing at all
    Hidden,
}

impl Default for Mask {
    fn default() -> Self {
        Mask::Char('*')
    }
}

impl Mask {
    /// Masked echo for a newly appended chunk of input
    pub fn render(&self, chunk: &str) -> String {
        match self {
            Mask::None => chunk.to_string(),
            Mask::Char(c) => c.to_string().repeat(chunk.chars().count()),
            Mask::Hidden => String::new(),
        }
    }

    /// Parse the textual form used by the config file and CLI
    ///
    /// - `""` -> Hidden
    /// - `"none"` / `"false"` -> None
    /// - `"true"` -> `*`
    /// - any single character -> that character
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "" => Some(Mask::Hidden),
            "none" | "false" => Some(Mask::None),
            "true" => Some(Mask::default()),
            _ => {
                let mut chars = s.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Some(Mask::Char(c)),
                    _ => None,
                }
            }
        }
    }
}

#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum MaskRepr {
    Flag(bool),
    Text(String),
}

impl TryFrom<MaskRepr> for Mask {
    type Error = String;

    fn try_from(repr: MaskRepr) -> Result<Self, Self::Error> {
        match repr {
            MaskRepr::Flag(true) => Ok(Mask::default()),
            MaskRepr::Flag(false) => Ok(Mask::None),
            MaskRepr::Text(s) => {
                Mask::parse(&s).ok_or_else(|| format!("mask must be a single character, got {:?}", s))
            }
        }
    }
}

impl From<Mask> for MaskRepr {
    fn from(mask: Mask) -> Self {
        match mask {
            Mask::None => MaskRepr::Flag(false),
            Mask::Char(c) => MaskRepr::Text(c.to_string()),
            Mask::Hidden => MaskRepr::Text(String::new()),
        }
    }
}

/// Where the prompt and echo are written
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputTarget {
    #[default]
    Stdout,
    Stderr,
}

impl OutputTarget {
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "stdout" => Some(OutputTarget::Stdout),
            "stderr" => Some(OutputTarget::Stderr),
            _ => None,
        }
    }
}

/// Where keystrokes are read from
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InputTarget {
    #[default]
    Stdin,
}

/// Caller-facing options, every field optional
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PromptOptions {
    /// Value used when the submitted line is empty
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mask: Option<Mask>,

    /// Refuse empty submissions. Defaults to true when no default is given.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output: Option<OutputTarget>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub input: Option<InputTarget>,
}

impl PromptOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_default(mut self, value: impl Into<String>) -> Self {
        self.default = Some(value.into());
        self
    }

    pub fn with_mask(mut self, mask: Mask) -> Self {
        self.mask = Some(mask);
        self
    }

    pub fn with_required(mut self, required: bool) -> Self {
        self.required = Some(required);
        self
    }

    pub fn with_output(mut self, output: OutputTarget) -> Self {
        self.output = Some(output);
        self
    }

    /// Layer `other` on top of `self`: fields set in `other` win
    pub fn merge(&mut self, other: &PromptOptions) {
        if other.default.is_some() {
            self.default = other.default.clone();
        }
        if other.mask.is_some() {
            self.mask = other.mask;
        }
        if other.required.is_some() {
            self.required = other.required;
        }
        if other.output.is_some() {
            self.output = other.output;
        }
        if other.input.is_some() {
            self.input = other.input;
        }
    }

    /// Whether the coordinator should prompt again after an empty result
    pub fn reprompt_on_empty(&self) -> bool {
        self.required == Some(true) || self.default.is_none()
    }

    /// Options for a single line-editing session
    pub fn resolve(&self) -> ResolvedOptions {
        ResolvedOptions {
            default: self.default.clone(),
            mask: self.mask.unwrap_or_default(),
            required: self.required.unwrap_or(self.default.is_none()),
        }
    }
}

/// Options consumed by one line-editing session
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResolvedOptions {
    pub default: Option<String>,
    pub mask: Mask,
    /// Ignore submissions while the buffer is empty
    pub required: bool,
}

impl Default for ResolvedOptions {
    fn default() -> Self {
        PromptOptions::default().resolve()
    }
}
