use fancy_regex::Regex;
use rewriteng_domain::validators::{fqdn, normalize_name};
use rewriteng_domain::{FieldPart, MatchType, RuleError};

use super::rule::Rule;

/// Highest `{N}` placeholder looked for in a regex replacement template.
const MAX_PLACEHOLDER: usize = 100;

pub struct RuleBuilder;

impl RuleBuilder {
    /// Build a rule from `[part] match_type from to`.
    ///
    /// With exactly three arguments the part defaults to `name`; arguments
    /// after the fourth are ignored.
    pub fn build(args: &[&str]) -> Result<Rule, RuleError> {
        let (part, match_type, from, to) = match args {
            [match_type, from, to] => (FieldPart::Name.as_str(), *match_type, *from, *to),
            [part, match_type, from, to, ..] => (*part, *match_type, *from, *to),
            _ => return Err(RuleError::MissingArguments(args.len())),
        };

        let part: FieldPart = part.parse()?;
        let match_type: MatchType = match_type.parse()?;
        Self::build_parts(part, match_type, from, to)
    }

    pub fn build_parts(
        part: FieldPart,
        match_type: MatchType,
        from: &str,
        to: &str,
    ) -> Result<Rule, RuleError> {
        let (from, to) = if match_type.wants_fqdn_operands() {
            (fqdn(from), fqdn(to))
        } else {
            (from.to_string(), to.to_string())
        };

        let rule = match match_type {
            MatchType::Exact => Rule::Exact { part, from, to },
            MatchType::Prefix => Rule::Prefix {
                part,
                prefix: from,
                replacement: to,
            },
            MatchType::Suffix => Rule::Suffix {
                part,
                suffix: from,
                replacement: to,
            },
            MatchType::Substring => Rule::Substring {
                part,
                substring: from,
                replacement: to,
            },
            MatchType::Regex => {
                let pattern = compile(&from)?;
                // group 0 is the whole match and always exists
                let last_group = pattern.captures_len().saturating_sub(1);
                if highest_placeholder(&to).is_some_and(|index| index > last_group) {
                    return Err(RuleError::TooManySubexpressions {
                        template: to,
                        pattern: from,
                    });
                }
                Rule::Regex {
                    part,
                    pattern,
                    replacement: normalize_name(&to),
                }
            }
            MatchType::FullRegex => Rule::FullRegex {
                part,
                pattern: compile(&from)?,
                replacement: to,
            },
            MatchType::NoOp => Rule::NoOp { part, suffix: from },
        };
        Ok(rule)
    }
}

fn compile(pattern: &str) -> Result<Regex, RuleError> {
    Regex::new(pattern).map_err(|e| RuleError::InvalidPattern {
        pattern: pattern.to_string(),
        reason: e.to_string(),
    })
}

/// Largest `{0}`..`{100}` group index referenced by `template`.
fn highest_placeholder(template: &str) -> Option<usize> {
    (0..=MAX_PLACEHOLDER)
        .rev()
        .find(|i| template.contains(&format!("{{{}}}", i)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_highest_placeholder_finds_largest_index() {
        assert_eq!(highest_placeholder("example.org"), None);
        assert_eq!(highest_placeholder("{0}.example.org"), Some(0));
        assert_eq!(highest_placeholder("{1}.{1}.example.org"), Some(1));
        assert_eq!(highest_placeholder("{0}.{2}.{100}"), Some(100));
        assert_eq!(highest_placeholder("{5}.{1}"), Some(5));
        assert_eq!(highest_placeholder("{101}"), None);
    }
}
