use rewriteng_application::services::{Rule, RuleBuilder};
use rewriteng_domain::{
    DnsClass, DnsMessage, Question, RecordData, RecordType, ResourceRecord, RewriteRuleConfig,
    Soa, Srv, SubRuleSpec,
};

pub fn query(name: &str, query_type: RecordType) -> DnsMessage {
    DnsMessage::query(0x1234, Question::new(name, DnsClass::IN, query_type))
}

pub fn query_with_class(name: &str, query_class: DnsClass, query_type: RecordType) -> DnsMessage {
    DnsMessage::query(0x1234, Question::new(name, query_class, query_type))
}

pub fn a(name: &str, ip: &str) -> ResourceRecord {
    ResourceRecord::new(name, 300, RecordData::A(ip.parse().unwrap()))
}

pub fn aaaa(name: &str, ip: &str) -> ResourceRecord {
    ResourceRecord::new(name, 300, RecordData::AAAA(ip.parse().unwrap()))
}

pub fn cname(name: &str, target: &str) -> ResourceRecord {
    ResourceRecord::new(name, 300, RecordData::CNAME(target.to_string()))
}

pub fn ns(name: &str, target: &str) -> ResourceRecord {
    ResourceRecord::new(name, 300, RecordData::NS(target.to_string()))
}

pub fn ptr(name: &str, target: &str) -> ResourceRecord {
    ResourceRecord::new(name, 300, RecordData::PTR(target.to_string()))
}

pub fn txt(name: &str, segments: &[&str]) -> ResourceRecord {
    ResourceRecord::new(
        name,
        300,
        RecordData::TXT(segments.iter().map(|s| s.to_string()).collect()),
    )
}

pub fn srv(name: &str, target: &str) -> ResourceRecord {
    ResourceRecord::new(
        name,
        300,
        RecordData::SRV(Srv {
            priority: 10,
            weight: 5,
            port: 5060,
            target: target.to_string(),
        }),
    )
}

pub fn soa(name: &str, mname: &str, rname: &str, minimum: u32) -> ResourceRecord {
    ResourceRecord::new(
        name,
        300,
        RecordData::SOA(Soa {
            mname: mname.to_string(),
            rname: rname.to_string(),
            serial: 2024010101,
            refresh: 7200,
            retry: 3600,
            expire: 1209600,
            minimum,
        }),
    )
}

/// Response to `request` carrying the given answer records.
pub fn response_with_answers(request: &DnsMessage, answers: Vec<ResourceRecord>) -> DnsMessage {
    let mut response = DnsMessage::response_to(request, Default::default());
    response.answers = answers;
    response
}

pub fn rule_config(match_type: &str, from: &str, to: &str, answer: &[&str]) -> RewriteRuleConfig {
    RewriteRuleConfig {
        class: "ANY".to_string(),
        record_type: "ANY".to_string(),
        match_type: match_type.to_string(),
        from: from.to_string(),
        to: to.to_string(),
        answer: answer.iter().map(|line| SubRuleSpec::from(*line)).collect(),
        authority: Vec::new(),
        additional: Vec::new(),
    }
}

pub fn build_rule(args: &[&str]) -> Rule {
    RuleBuilder::build(args).unwrap()
}
