//! Parser for the block-style rule syntax:
//!
//! ```text
//! rewriteng ANY ANY regex example\.org example.com {
//!     answer regex example\.com example.org
//!     additional data suffix example.com example.org
//! }
//! ```
//!
//! Arguments are whitespace separated; double quotes group an argument that
//! contains spaces. Backslashes outside quotes are kept verbatim so regex
//! escapes survive. `#` starts a comment.

use super::errors::{ConfigError, RuleError};
use super::rewrite::{RewriteRuleConfig, SubRuleSpec};
use crate::dns_message::Section;

pub const DIRECTIVE_NAME: &str = "rewriteng";

#[derive(Debug, Clone, PartialEq, Eq)]
struct Token {
    text: String,
    line: usize,
    quoted: bool,
}

impl Token {
    fn is_open(&self) -> bool {
        !self.quoted && self.text == "{"
    }

    fn is_close(&self) -> bool {
        !self.quoted && self.text == "}"
    }
}

fn tokenize(input: &str) -> Result<Vec<Token>, ConfigError> {
    let mut tokens = Vec::new();

    for (index, raw_line) in input.lines().enumerate() {
        let line = index + 1;
        let mut chars = raw_line.chars().peekable();

        while let Some(&c) = chars.peek() {
            if c.is_whitespace() {
                chars.next();
                continue;
            }
            if c == '#' {
                break;
            }

            let mut text = String::new();
            if c == '"' {
                chars.next();
                let mut closed = false;
                while let Some(c) = chars.next() {
                    match c {
                        '\\' if chars.peek() == Some(&'"') => {
                            text.push('"');
                            chars.next();
                        }
                        '"' => {
                            closed = true;
                            break;
                        }
                        other => text.push(other),
                    }
                }
                if !closed {
                    return Err(ConfigError::DirectiveSyntax {
                        line,
                        message: "unterminated quoted argument".to_string(),
                    });
                }
                tokens.push(Token {
                    text,
                    line,
                    quoted: true,
                });
            } else {
                while let Some(&c) = chars.peek() {
                    if c.is_whitespace() {
                        break;
                    }
                    text.push(c);
                    chars.next();
                }
                tokens.push(Token {
                    text,
                    line,
                    quoted: false,
                });
            }
        }
    }

    Ok(tokens)
}

fn syntax(line: usize, message: impl Into<String>) -> ConfigError {
    ConfigError::DirectiveSyntax {
        line,
        message: message.into(),
    }
}

fn rule_error(line: usize, error: RuleError) -> ConfigError {
    syntax(line, error.to_string())
}

/// Parse every `rewriteng` directive in `input`, in order of appearance.
pub fn parse_directives(input: &str) -> Result<Vec<RewriteRuleConfig>, ConfigError> {
    let tokens = tokenize(input)?;
    let mut rules = Vec::new();
    let mut pos = 0;

    while pos < tokens.len() {
        let head = &tokens[pos];
        if head.text != DIRECTIVE_NAME || head.quoted {
            return Err(syntax(
                head.line,
                format!("unknown directive '{}'", head.text),
            ));
        }
        let line = head.line;
        pos += 1;

        let mut args: Vec<&Token> = Vec::new();
        while pos < tokens.len() && tokens[pos].line == line && !tokens[pos].is_open() {
            args.push(&tokens[pos]);
            pos += 1;
        }

        let class = args
            .first()
            .ok_or_else(|| syntax(line, "missing query class"))?;
        class
            .text
            .parse::<crate::DnsClass>()
            .map_err(|_| rule_error(line, RuleError::InvalidClass(class.text.clone())))?;

        let record_type = args.get(1).ok_or_else(|| syntax(line, "missing RR type"))?;
        record_type
            .text
            .parse::<crate::RecordType>()
            .map_err(|_| rule_error(line, RuleError::InvalidType(record_type.text.clone())))?;

        let match_type = args
            .get(2)
            .ok_or_else(|| syntax(line, "missing rule type"))?;
        match_type
            .text
            .parse::<super::rewrite::MatchType>()
            .map_err(|e| rule_error(line, e))?;

        let from = args
            .get(3)
            .ok_or_else(|| syntax(line, "missing match string"))?;
        let to = args
            .get(4)
            .ok_or_else(|| syntax(line, "missing replacement string"))?;
        if let Some(extra) = args.get(5) {
            return Err(syntax(
                line,
                format!("unexpected argument '{}'", extra.text),
            ));
        }

        let mut rule = RewriteRuleConfig {
            class: class.text.clone(),
            record_type: record_type.text.clone(),
            match_type: match_type.text.clone(),
            from: from.text.clone(),
            to: to.text.clone(),
            answer: Vec::new(),
            authority: Vec::new(),
            additional: Vec::new(),
        };

        if pos < tokens.len() && tokens[pos].line == line && tokens[pos].is_open() {
            pos += 1;
            pos = parse_block(&tokens, pos, line, &mut rule)?;
        }

        rule.validate().map_err(|e| rule_error(line, e))?;
        rules.push(rule);
    }

    Ok(rules)
}

/// Consume sub-rule lines up to and including the closing brace.
fn parse_block(
    tokens: &[Token],
    mut pos: usize,
    open_line: usize,
    rule: &mut RewriteRuleConfig,
) -> Result<usize, ConfigError> {
    loop {
        let Some(first) = tokens.get(pos) else {
            return Err(syntax(open_line, "unclosed block"));
        };
        if first.is_close() {
            return Ok(pos + 1);
        }
        if first.is_open() {
            return Err(syntax(first.line, "nested blocks are not supported"));
        }

        let section: Section = first.text.parse().map_err(|_| {
            rule_error(
                first.line,
                RuleError::UnsupportedSection(first.text.clone()),
            )
        })?;

        let line = first.line;
        pos += 1;

        let mut args = Vec::new();
        while pos < tokens.len() && tokens[pos].line == line && !tokens[pos].is_close() {
            if tokens[pos].is_open() {
                return Err(syntax(line, "nested blocks are not supported"));
            }
            args.push(tokens[pos].text.clone());
            pos += 1;
        }

        if args.len() < 3 {
            return Err(rule_error(line, RuleError::MissingArguments(args.len())));
        }

        rule.sub_rules_mut(section).push(SubRuleSpec::Args(args));
    }
}
