use super::errors::RuleError;
use crate::dns_message::Section;
use crate::dns_record::{DnsClass, RecordType};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How a rule compares its `from` string against a name or data value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MatchType {
    Exact,
    Prefix,
    Suffix,
    Substring,
    Regex,
    FullRegex,
    NoOp,
}

impl MatchType {
    pub fn as_str(&self) -> &'static str {
        match self {
            MatchType::Exact => "exact",
            MatchType::Prefix => "prefix",
            MatchType::Suffix => "suffix",
            MatchType::Substring => "substring",
            MatchType::Regex => "regex",
            MatchType::FullRegex => "fullregex",
            MatchType::NoOp => "noop",
        }
    }

    /// Exact and suffix operands are compared as fully qualified names.
    pub fn wants_fqdn_operands(&self) -> bool {
        matches!(self, MatchType::Exact | MatchType::Suffix)
    }
}

impl fmt::Display for MatchType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MatchType {
    type Err = RuleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "exact" => Ok(MatchType::Exact),
            "prefix" => Ok(MatchType::Prefix),
            "suffix" => Ok(MatchType::Suffix),
            "substring" => Ok(MatchType::Substring),
            "regex" => Ok(MatchType::Regex),
            "fullregex" => Ok(MatchType::FullRegex),
            "noop" => Ok(MatchType::NoOp),
            other => Err(RuleError::UnsupportedMatchType(other.to_string())),
        }
    }
}

/// Which part of a resource record a rule may rewrite.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FieldPart {
    #[default]
    Name,
    Data,
    Both,
}

impl FieldPart {
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldPart::Name => "name",
            FieldPart::Data => "data",
            FieldPart::Both => "both",
        }
    }

    /// Whether a rule declared for `self` may act on a field of kind `field`.
    pub fn covers(&self, field: FieldPart) -> bool {
        *self == FieldPart::Both || *self == field
    }
}

impl fmt::Display for FieldPart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FieldPart {
    type Err = RuleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "name" => Ok(FieldPart::Name),
            "data" => Ok(FieldPart::Data),
            "both" => Ok(FieldPart::Both),
            other => Err(RuleError::UnsupportedPart(other.to_string())),
        }
    }
}

/// A sub-rule as written in the configuration: either one line
/// `"[part] match_type from to"` or the same arguments as an array, which
/// allows operands containing whitespace.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum SubRuleSpec {
    Line(String),
    Args(Vec<String>),
}

impl SubRuleSpec {
    pub fn args(&self) -> Vec<&str> {
        match self {
            SubRuleSpec::Line(line) => line.split_whitespace().collect(),
            SubRuleSpec::Args(args) => args.iter().map(String::as_str).collect(),
        }
    }

    /// Parse the leading tokens. Three arguments mean the part was omitted
    /// and defaults to `name`.
    pub fn part_and_match_type(&self) -> Result<(FieldPart, MatchType), RuleError> {
        let args = self.args();
        match args.len() {
            n if n < 3 => Err(RuleError::MissingArguments(n)),
            3 => Ok((FieldPart::Name, args[0].parse()?)),
            _ => Ok((args[0].parse()?, args[1].parse()?)),
        }
    }
}

impl From<&str> for SubRuleSpec {
    fn from(line: &str) -> Self {
        SubRuleSpec::Line(line.to_string())
    }
}

/// One top-level rewrite rule as written in the configuration.
///
/// Sub-rules are compiled by the application layer.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct RewriteRuleConfig {
    #[serde(default = "default_any")]
    pub class: String,

    #[serde(rename = "type", default = "default_any")]
    pub record_type: String,

    pub match_type: String,

    pub from: String,

    pub to: String,

    #[serde(default)]
    pub answer: Vec<SubRuleSpec>,

    #[serde(default)]
    pub authority: Vec<SubRuleSpec>,

    #[serde(default)]
    pub additional: Vec<SubRuleSpec>,
}

impl RewriteRuleConfig {
    pub fn query_class(&self) -> Result<DnsClass, RuleError> {
        self.class
            .parse()
            .map_err(|_| RuleError::InvalidClass(self.class.clone()))
    }

    pub fn query_type(&self) -> Result<RecordType, RuleError> {
        self.record_type
            .parse()
            .map_err(|_| RuleError::InvalidType(self.record_type.clone()))
    }

    pub fn sub_rules(&self, section: Section) -> &[SubRuleSpec] {
        match section {
            Section::Answer => &self.answer,
            Section::Authority => &self.authority,
            Section::Additional => &self.additional,
        }
    }

    pub fn sub_rules_mut(&mut self, section: Section) -> &mut Vec<SubRuleSpec> {
        match section {
            Section::Answer => &mut self.answer,
            Section::Authority => &mut self.authority,
            Section::Additional => &mut self.additional,
        }
    }

    /// Checks that do not need a regex engine: class and type tokens, the
    /// match type of the primary rule, sub-rule arity, and the mandatory
    /// answer section.
    pub fn validate(&self) -> Result<(), RuleError> {
        self.query_class()?;
        self.query_type()?;
        self.match_type.parse::<MatchType>()?;

        if self.answer.is_empty() {
            return Err(RuleError::MissingAnswer);
        }

        for section in Section::ALL {
            for sub_rule in self.sub_rules(section) {
                sub_rule.part_and_match_type()?;
            }
        }
        Ok(())
    }
}

/// Configuration block holding every rewrite rule, in evaluation order.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct RewriteConfig {
    /// Optional file in directive syntax, appended after the inline rules.
    #[serde(default)]
    pub rules_file: Option<String>,

    #[serde(default)]
    pub rules: Vec<RewriteRuleConfig>,
}

fn default_any() -> String {
    "ANY".to_string()
}
