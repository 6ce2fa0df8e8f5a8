use super::type_map::{ClassMapper, RecordTypeMapper};
use hickory_proto::rr::rdata::{A, AAAA, CNAME, NS, PTR, SOA, SRV, TXT};
use hickory_proto::rr::{Name, RData, Record};
use rewriteng_domain::{DomainError, OpaquePayload, RecordData, ResourceRecord, Soa, Srv};

pub(super) fn parse_name(name: &str) -> Result<Name, DomainError> {
    Name::from_ascii(name)
        .map_err(|e| DomainError::InvalidDomainName(format!("Invalid domain '{}': {}", name, e)))
}

pub(super) fn record_from_hickory(record: &Record) -> ResourceRecord {
    let data = match record.data() {
        RData::A(a) => RecordData::A(a.0),
        RData::AAAA(aaaa) => RecordData::AAAA(aaaa.0),
        RData::CNAME(cname) => RecordData::CNAME(cname.0.to_ascii()),
        RData::NS(ns) => RecordData::NS(ns.0.to_ascii()),
        RData::PTR(ptr) => RecordData::PTR(ptr.0.to_ascii()),
        RData::SOA(soa) => RecordData::SOA(Soa {
            mname: soa.mname().to_ascii(),
            rname: soa.rname().to_ascii(),
            serial: soa.serial(),
            refresh: soa.refresh(),
            retry: soa.retry(),
            expire: soa.expire(),
            minimum: soa.minimum(),
        }),
        RData::SRV(srv) => RecordData::SRV(Srv {
            priority: srv.priority(),
            weight: srv.weight(),
            port: srv.port(),
            target: srv.target().to_ascii(),
        }),
        RData::TXT(txt) => match txt_segments(txt) {
            Some(segments) => RecordData::TXT(segments),
            None => opaque(record),
        },
        _ => opaque(record),
    };

    ResourceRecord {
        name: record.name().to_ascii(),
        dns_class: ClassMapper::from_hickory(record.dns_class()),
        ttl: record.ttl(),
        data,
    }
}

pub(super) fn record_to_hickory(record: &ResourceRecord) -> Result<Record, DomainError> {
    let rdata = match &record.data {
        RecordData::A(addr) => RData::A(A(*addr)),
        RecordData::AAAA(addr) => RData::AAAA(AAAA(*addr)),
        RecordData::CNAME(target) => RData::CNAME(CNAME(parse_name(target)?)),
        RecordData::NS(target) => RData::NS(NS(parse_name(target)?)),
        RecordData::PTR(target) => RData::PTR(PTR(parse_name(target)?)),
        RecordData::TXT(segments) => RData::TXT(TXT::new(segments.clone())),
        RecordData::SOA(soa) => RData::SOA(SOA::new(
            parse_name(&soa.mname)?,
            parse_name(&soa.rname)?,
            soa.serial,
            soa.refresh,
            soa.retry,
            soa.expire,
            soa.minimum,
        )),
        RecordData::SRV(srv) => RData::SRV(SRV::new(
            srv.priority,
            srv.weight,
            srv.port,
            parse_name(&srv.target)?,
        )),
        RecordData::Unhandled(payload) => {
            payload.downcast_ref::<RData>().cloned().ok_or_else(|| {
                DomainError::InvalidDnsMessage(format!(
                    "{} record data of {} was not produced by the codec",
                    payload.record_type(),
                    record.name
                ))
            })?
        }
    };

    let mut out = Record::from_rdata(parse_name(&record.name)?, record.ttl, rdata);
    out.set_dns_class(ClassMapper::to_hickory(record.dns_class));
    Ok(out)
}

/// TXT segments as text, or `None` when any segment is not UTF-8.
fn txt_segments(txt: &TXT) -> Option<Vec<String>> {
    txt.iter()
        .map(|segment| String::from_utf8(segment.to_vec()).ok())
        .collect()
}

fn opaque(record: &Record) -> RecordData {
    RecordData::Unhandled(OpaquePayload::new(
        RecordTypeMapper::from_hickory(record.record_type()),
        record.data().clone(),
    ))
}
