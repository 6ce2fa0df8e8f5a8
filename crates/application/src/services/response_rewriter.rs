use async_trait::async_trait;
use rewriteng_domain::validators::{is_valid_name, normalize_name};
use rewriteng_domain::{
    DnsMessage, DomainError, FieldPart, Question, RecordData, ResourceRecord, Section,
};
use std::net::{Ipv4Addr, Ipv6Addr};
use tracing::debug;

use super::compound_rule::CompoundRule;
use crate::ports::ResponseWriter;

/// Writer wrapper that undoes a question rewrite on the way back.
///
/// It restores the client's question and recursion-desired bit, then runs
/// the section rules of every fired rule over the response records before
/// handing the response to the wrapped writer.
pub struct ResponseRewriter<'a> {
    writer: &'a mut dyn ResponseWriter,
    original_question: Question,
    recursion_desired: bool,
    rules: Vec<&'a CompoundRule>,
}

impl<'a> ResponseRewriter<'a> {
    pub fn new(
        writer: &'a mut dyn ResponseWriter,
        original_question: Question,
        recursion_desired: bool,
    ) -> Self {
        Self {
            writer,
            original_question,
            recursion_desired,
            rules: Vec::new(),
        }
    }

    pub fn with_rule(mut self, rule: &'a CompoundRule) -> Self {
        self.rules.push(rule);
        self
    }

    pub fn rules(&self) -> &[&'a CompoundRule] {
        &self.rules
    }

    pub fn original_question(&self) -> &Question {
        &self.original_question
    }

    /// Apply the restore and the section rewrites in place.
    pub fn rewrite(&self, response: &mut DnsMessage) {
        match response.question_mut() {
            Some(question) => *question = self.original_question.clone(),
            None => response.queries.push(self.original_question.clone()),
        }
        response.recursion_desired = self.recursion_desired;

        for section in Section::ALL {
            for record in response.section_mut(section).iter_mut() {
                self.rewrite_record(record, section);
            }
        }
    }

    fn rewrite_record(&self, record: &mut ResourceRecord, section: Section) {
        let owner = record.name.clone();
        let mut renamed = false;

        for rule in &self.rules {
            if !renamed {
                match rule.substitute(&owner, section, FieldPart::Name) {
                    Some(name) if is_valid_name(&name) => {
                        debug!(
                            section = %section,
                            from = %owner,
                            to = %name,
                            "Owner name rewritten"
                        );
                        record.name = name;
                        renamed = true;
                    }
                    Some(name) => debug!(value = %name, "Discarding invalid owner name rewrite"),
                    None => {}
                }
            }
            rewrite_data(&mut record.data, rule, section);
        }
    }
}

fn rewrite_data(data: &mut RecordData, rule: &CompoundRule, section: Section) {
    let substitute = |value: &str| rule.substitute(value, section, FieldPart::Data);

    match data {
        RecordData::CNAME(target) | RecordData::NS(target) | RecordData::PTR(target) => {
            rewrite_name(target, substitute);
        }
        RecordData::SRV(srv) => rewrite_name(&mut srv.target, substitute),
        RecordData::SOA(soa) => {
            rewrite_name(&mut soa.mname, substitute);
            rewrite_name(&mut soa.rname, substitute);
            if let Some(s) = substitute(&soa.minimum.to_string()) {
                match s.parse::<u32>() {
                    Ok(minimum) => soa.minimum = minimum,
                    Err(_) => debug!(value = %s, "Discarding non-numeric SOA minimum"),
                }
            }
        }
        RecordData::TXT(segments) => {
            for segment in segments.iter_mut() {
                if let Some(s) = substitute(segment.as_str()) {
                    *segment = s;
                }
            }
        }
        RecordData::A(addr) => {
            if let Some(s) = substitute(&addr.to_string()) {
                match s.parse::<Ipv4Addr>() {
                    Ok(ip) if s.contains('.') => *addr = ip,
                    _ => debug!(value = %s, "Discarding invalid A rewrite"),
                }
            }
        }
        RecordData::AAAA(addr) => {
            if let Some(s) = substitute(&addr.to_string()) {
                match s.parse::<Ipv6Addr>() {
                    Ok(ip) if s.contains(':') => *addr = ip,
                    _ => debug!(value = %s, "Discarding invalid AAAA rewrite"),
                }
            }
        }
        RecordData::Unhandled(_) => {}
    }
}

/// Replace `name` with its normalized substitution when that is a valid name.
fn rewrite_name(name: &mut String, substitute: impl Fn(&str) -> Option<String>) {
    let Some(s) = substitute(name.as_str()) else {
        return;
    };
    let normalized = normalize_name(&s);
    if is_valid_name(&normalized) {
        *name = normalized;
    } else {
        debug!(value = %s, "Discarding invalid name rewrite");
    }
}

#[async_trait]
impl<'a> ResponseWriter for ResponseRewriter<'a> {
    async fn write_msg(&mut self, mut response: DnsMessage) -> Result<(), DomainError> {
        self.rewrite(&mut response);
        self.writer.write_msg(response).await
    }
}
