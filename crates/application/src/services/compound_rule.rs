use rewriteng_domain::{
    ConfigError, DnsClass, DnsMessage, FieldPart, RecordType, RewriteRuleConfig, RuleError,
    Section,
};

use super::rule::{RewriteResult, Rule};
use super::rule_builder::RuleBuilder;

/// A question rule guarded by class and type filters, plus the per-section
/// rules used to rewrite the matching response.
#[derive(Debug, Clone)]
pub struct CompoundRule {
    query_class: DnsClass,
    query_type: RecordType,
    rule: Rule,
    answer: Vec<Rule>,
    authority: Vec<Rule>,
    additional: Vec<Rule>,
}

impl CompoundRule {
    pub fn new(query_class: DnsClass, query_type: RecordType, rule: Rule) -> Self {
        Self {
            query_class,
            query_type,
            rule,
            answer: Vec::new(),
            authority: Vec::new(),
            additional: Vec::new(),
        }
    }

    pub fn with_sub_rule(mut self, section: Section, rule: Rule) -> Self {
        self.sub_rules_mut(section).push(rule);
        self
    }

    pub fn from_config(config: &RewriteRuleConfig) -> Result<Self, RuleError> {
        config.validate()?;

        let match_type = config.match_type.parse()?;
        let rule = RuleBuilder::build_parts(FieldPart::Name, match_type, &config.from, &config.to)?;
        let mut compound = Self::new(config.query_class()?, config.query_type()?, rule);

        for section in Section::ALL {
            for sub_rule_spec in config.sub_rules(section) {
                let sub_rule = RuleBuilder::build(&sub_rule_spec.args())?;
                compound.sub_rules_mut(section).push(sub_rule);
            }
        }

        Ok(compound)
    }

    /// Compile every configured rule, keeping configuration order.
    pub fn build_rules(configs: &[RewriteRuleConfig]) -> Result<Vec<Self>, ConfigError> {
        configs
            .iter()
            .enumerate()
            .map(|(index, config)| {
                Self::from_config(config).map_err(|source| ConfigError::Rule { index, source })
            })
            .collect()
    }

    pub fn query_class(&self) -> DnsClass {
        self.query_class
    }

    pub fn query_type(&self) -> RecordType {
        self.query_type
    }

    pub fn rule(&self) -> &Rule {
        &self.rule
    }

    pub fn sub_rules(&self, section: Section) -> &[Rule] {
        match section {
            Section::Answer => &self.answer,
            Section::Authority => &self.authority,
            Section::Additional => &self.additional,
        }
    }

    fn sub_rules_mut(&mut self, section: Section) -> &mut Vec<Rule> {
        match section {
            Section::Answer => &mut self.answer,
            Section::Authority => &mut self.authority,
            Section::Additional => &mut self.additional,
        }
    }

    pub fn rewrite_question(&self, request: &mut DnsMessage) -> RewriteResult {
        let Some(question) = request.question() else {
            return RewriteResult::Ignored;
        };
        if !self.query_class.is_any() && question.query_class != self.query_class {
            return RewriteResult::Ignored;
        }
        if !self.query_type.is_any() && question.query_type != self.query_type {
            return RewriteResult::Ignored;
        }
        self.rule.rewrite_question(request)
    }

    /// First non-empty substitution from the section's rules that may act on
    /// `field`.
    pub fn substitute(&self, value: &str, section: Section, field: FieldPart) -> Option<String> {
        self.sub_rules(section)
            .iter()
            .filter(|rule| rule.part().covers(field))
            .filter_map(|rule| rule.substitute(value))
            .find(|s| !s.is_empty())
    }
}
