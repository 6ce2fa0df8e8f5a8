use fancy_regex::{Captures, Regex};
use rewriteng_domain::validators::normalize_name;
use rewriteng_domain::{DnsMessage, FieldPart, MatchType};
use tracing::trace;

/// Outcome of applying a rule to a request's question.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RewriteResult {
    Ignored,
    Done,
}

/// A single compiled match-and-replace rule.
///
/// Exact and suffix operands are stored fully qualified. The regex
/// replacement template is stored normalized.
#[derive(Debug, Clone)]
pub enum Rule {
    Exact {
        part: FieldPart,
        from: String,
        to: String,
    },
    Prefix {
        part: FieldPart,
        prefix: String,
        replacement: String,
    },
    Suffix {
        part: FieldPart,
        suffix: String,
        replacement: String,
    },
    Substring {
        part: FieldPart,
        substring: String,
        replacement: String,
    },
    Regex {
        part: FieldPart,
        pattern: Regex,
        replacement: String,
    },
    FullRegex {
        part: FieldPart,
        pattern: Regex,
        replacement: String,
    },
    NoOp {
        part: FieldPart,
        suffix: String,
    },
}

impl Rule {
    pub fn part(&self) -> FieldPart {
        match self {
            Rule::Exact { part, .. }
            | Rule::Prefix { part, .. }
            | Rule::Suffix { part, .. }
            | Rule::Substring { part, .. }
            | Rule::Regex { part, .. }
            | Rule::FullRegex { part, .. }
            | Rule::NoOp { part, .. } => *part,
        }
    }

    pub fn match_type(&self) -> MatchType {
        match self {
            Rule::Exact { .. } => MatchType::Exact,
            Rule::Prefix { .. } => MatchType::Prefix,
            Rule::Suffix { .. } => MatchType::Suffix,
            Rule::Substring { .. } => MatchType::Substring,
            Rule::Regex { .. } => MatchType::Regex,
            Rule::FullRegex { .. } => MatchType::FullRegex,
            Rule::NoOp { .. } => MatchType::NoOp,
        }
    }

    /// Rewrite a single value. `None` means the rule did not match.
    ///
    /// The regex variant only substitutes the lowest-numbered placeholder
    /// present in its template and yields `None` for a template without
    /// placeholders.
    pub fn substitute(&self, input: &str) -> Option<String> {
        match self {
            Rule::Exact { from, to, .. } => (input == from).then(|| to.clone()),
            Rule::Prefix {
                prefix,
                replacement,
                ..
            } => input
                .strip_prefix(prefix.as_str())
                .map(|rest| format!("{}{}", replacement, rest)),
            Rule::Suffix {
                suffix,
                replacement,
                ..
            } => input
                .strip_suffix(suffix.as_str())
                .map(|rest| format!("{}{}", rest, replacement)),
            Rule::Substring {
                substring,
                replacement,
                ..
            } => input
                .contains(substring.as_str())
                .then(|| input.replace(substring.as_str(), replacement)),
            Rule::Regex {
                pattern,
                replacement,
                ..
            } => {
                let captures = captures(pattern, input)?;
                (0..captures.len()).find_map(|index| {
                    let placeholder = placeholder(index);
                    replacement
                        .contains(&placeholder)
                        .then(|| replacement.replace(&placeholder, group(&captures, index)))
                })
            }
            Rule::FullRegex {
                pattern,
                replacement,
                ..
            } => is_match(pattern, input).then(|| replacement.clone()),
            Rule::NoOp { suffix, .. } => input.ends_with(suffix.as_str()).then(|| suffix.clone()),
        }
    }

    /// Apply the rule to the first question of `request`.
    ///
    /// On a match the question name is replaced and recursion desired is set.
    /// Matching runs against the lower-cased question name.
    pub fn rewrite_question(&self, request: &mut DnsMessage) -> RewriteResult {
        let Some(question) = request.question() else {
            return RewriteResult::Ignored;
        };
        let name = question.name.to_lowercase();

        let rewritten = match self {
            Rule::Exact { .. }
            | Rule::Prefix { .. }
            | Rule::Suffix { .. }
            | Rule::Substring { .. } => self.substitute(&name),
            Rule::Regex {
                pattern,
                replacement,
                ..
            } => captures(pattern, &name).map(|captures| {
                let mut name = replacement.clone();
                for index in 0..captures.len() {
                    let placeholder = placeholder(index);
                    if name.contains(&placeholder) {
                        name = name.replace(&placeholder, group(&captures, index));
                    }
                }
                name
            }),
            Rule::FullRegex {
                pattern,
                replacement,
                ..
            } => is_match(pattern, &name).then(|| normalize_name(replacement)),
            Rule::NoOp { suffix, .. } => {
                if !name.ends_with(suffix.as_str()) {
                    return RewriteResult::Ignored;
                }
                request.recursion_desired = true;
                return RewriteResult::Done;
            }
        };

        match rewritten {
            Some(rewritten) => {
                if let Some(question) = request.question_mut() {
                    question.name = rewritten;
                }
                request.recursion_desired = true;
                RewriteResult::Done
            }
            None => RewriteResult::Ignored,
        }
    }
}

fn placeholder(index: usize) -> String {
    format!("{{{}}}", index)
}

fn captures<'t>(pattern: &Regex, input: &'t str) -> Option<Captures<'t>> {
    match pattern.captures(input) {
        Ok(captures) => captures,
        Err(e) => {
            trace!(pattern = %pattern.as_str(), error = %e, "Regex evaluation failed");
            None
        }
    }
}

fn is_match(pattern: &Regex, input: &str) -> bool {
    pattern.is_match(input).unwrap_or(false)
}

/// Groups that did not take part in the match substitute as "".
fn group<'t>(captures: &Captures<'t>, index: usize) -> &'t str {
    captures.get(index).map_or("", |m| m.as_str())
}
