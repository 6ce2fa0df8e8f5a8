use std::fmt;
use std::str::FromStr;

/// Resource record / query type.
///
/// `ANY` doubles as the wildcard type filter of a compound rewrite rule.
/// Codes without a named variant are carried as `Unknown` so they survive a
/// decode/encode cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordType {
    A,
    AAAA,
    CNAME,
    MX,
    TXT,
    PTR,

    SRV,
    SOA,
    NS,
    NAPTR,
    DS,
    DNSKEY,
    SVCB,
    HTTPS,

    CAA,
    TLSA,
    SSHFP,
    DNAME,

    RRSIG,
    NSEC,
    NSEC3,
    NSEC3PARAM,

    CDS,
    CDNSKEY,

    OPT,

    NULL,
    HINFO,
    WKS,

    IPSECKEY,
    OPENPGPKEY,

    ZONEMD,

    IXFR,
    AXFR,
    ANY,

    Unknown(u16),
}

impl RecordType {
    pub fn as_str(&self) -> &'static str {
        match self {
            RecordType::A => "A",
            RecordType::AAAA => "AAAA",
            RecordType::CNAME => "CNAME",
            RecordType::MX => "MX",
            RecordType::TXT => "TXT",
            RecordType::PTR => "PTR",
            RecordType::SRV => "SRV",
            RecordType::SOA => "SOA",
            RecordType::NS => "NS",
            RecordType::NAPTR => "NAPTR",
            RecordType::DS => "DS",
            RecordType::DNSKEY => "DNSKEY",
            RecordType::SVCB => "SVCB",
            RecordType::HTTPS => "HTTPS",
            RecordType::CAA => "CAA",
            RecordType::TLSA => "TLSA",
            RecordType::SSHFP => "SSHFP",
            RecordType::DNAME => "DNAME",
            RecordType::RRSIG => "RRSIG",
            RecordType::NSEC => "NSEC",
            RecordType::NSEC3 => "NSEC3",
            RecordType::NSEC3PARAM => "NSEC3PARAM",
            RecordType::CDS => "CDS",
            RecordType::CDNSKEY => "CDNSKEY",
            RecordType::OPT => "OPT",
            RecordType::NULL => "NULL",
            RecordType::HINFO => "HINFO",
            RecordType::WKS => "WKS",
            RecordType::IPSECKEY => "IPSECKEY",
            RecordType::OPENPGPKEY => "OPENPGPKEY",
            RecordType::ZONEMD => "ZONEMD",
            RecordType::IXFR => "IXFR",
            RecordType::AXFR => "AXFR",
            RecordType::ANY => "ANY",
            RecordType::Unknown(_) => "UNKNOWN",
        }
    }

    pub fn to_u16(&self) -> u16 {
        match self {
            RecordType::A => 1,
            RecordType::NS => 2,
            RecordType::CNAME => 5,
            RecordType::SOA => 6,
            RecordType::NULL => 10,
            RecordType::WKS => 11,
            RecordType::PTR => 12,
            RecordType::HINFO => 13,
            RecordType::MX => 15,
            RecordType::TXT => 16,
            RecordType::AAAA => 28,
            RecordType::SRV => 33,
            RecordType::NAPTR => 35,
            RecordType::DNAME => 39,
            RecordType::OPT => 41,
            RecordType::DS => 43,
            RecordType::SSHFP => 44,
            RecordType::IPSECKEY => 45,
            RecordType::RRSIG => 46,
            RecordType::NSEC => 47,
            RecordType::DNSKEY => 48,
            RecordType::NSEC3 => 50,
            RecordType::NSEC3PARAM => 51,
            RecordType::TLSA => 52,
            RecordType::CDS => 59,
            RecordType::CDNSKEY => 60,
            RecordType::OPENPGPKEY => 61,
            RecordType::ZONEMD => 63,
            RecordType::SVCB => 64,
            RecordType::HTTPS => 65,
            RecordType::IXFR => 251,
            RecordType::AXFR => 252,
            RecordType::ANY => 255,
            RecordType::CAA => 257,
            RecordType::Unknown(code) => *code,
        }
    }

    pub fn from_u16(code: u16) -> Self {
        match code {
            1 => RecordType::A,
            2 => RecordType::NS,
            5 => RecordType::CNAME,
            6 => RecordType::SOA,
            10 => RecordType::NULL,
            11 => RecordType::WKS,
            12 => RecordType::PTR,
            13 => RecordType::HINFO,
            15 => RecordType::MX,
            16 => RecordType::TXT,
            28 => RecordType::AAAA,
            33 => RecordType::SRV,
            35 => RecordType::NAPTR,
            39 => RecordType::DNAME,
            41 => RecordType::OPT,
            43 => RecordType::DS,
            44 => RecordType::SSHFP,
            45 => RecordType::IPSECKEY,
            46 => RecordType::RRSIG,
            47 => RecordType::NSEC,
            48 => RecordType::DNSKEY,
            50 => RecordType::NSEC3,
            51 => RecordType::NSEC3PARAM,
            52 => RecordType::TLSA,
            59 => RecordType::CDS,
            60 => RecordType::CDNSKEY,
            61 => RecordType::OPENPGPKEY,
            63 => RecordType::ZONEMD,
            64 => RecordType::SVCB,
            65 => RecordType::HTTPS,
            251 => RecordType::IXFR,
            252 => RecordType::AXFR,
            255 => RecordType::ANY,
            257 => RecordType::CAA,
            other => RecordType::Unknown(other),
        }
    }

    pub fn is_any(&self) -> bool {
        matches!(self, RecordType::ANY)
    }
}

impl fmt::Display for RecordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordType::Unknown(code) => write!(f, "TYPE{}", code),
            other => write!(f, "{}", other.as_str()),
        }
    }
}

impl FromStr for RecordType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.to_uppercase();
        let parsed = match upper.as_str() {
            "A" => RecordType::A,
            "AAAA" => RecordType::AAAA,
            "CNAME" => RecordType::CNAME,
            "MX" => RecordType::MX,
            "TXT" => RecordType::TXT,
            "PTR" => RecordType::PTR,
            "SRV" => RecordType::SRV,
            "SOA" => RecordType::SOA,
            "NS" => RecordType::NS,
            "NAPTR" => RecordType::NAPTR,
            "DS" => RecordType::DS,
            "DNSKEY" => RecordType::DNSKEY,
            "SVCB" => RecordType::SVCB,
            "HTTPS" => RecordType::HTTPS,
            "CAA" => RecordType::CAA,
            "TLSA" => RecordType::TLSA,
            "SSHFP" => RecordType::SSHFP,
            "DNAME" => RecordType::DNAME,
            "RRSIG" => RecordType::RRSIG,
            "NSEC" => RecordType::NSEC,
            "NSEC3" => RecordType::NSEC3,
            "NSEC3PARAM" => RecordType::NSEC3PARAM,
            "CDS" => RecordType::CDS,
            "CDNSKEY" => RecordType::CDNSKEY,
            "OPT" => RecordType::OPT,
            "NULL" => RecordType::NULL,
            "HINFO" => RecordType::HINFO,
            "WKS" => RecordType::WKS,
            "IPSECKEY" => RecordType::IPSECKEY,
            "OPENPGPKEY" => RecordType::OPENPGPKEY,
            "ZONEMD" => RecordType::ZONEMD,
            "IXFR" => RecordType::IXFR,
            "AXFR" => RecordType::AXFR,
            "ANY" => RecordType::ANY,
            generic => {
                // RFC 3597 generic form, e.g. TYPE65280
                let code = generic
                    .strip_prefix("TYPE")
                    .and_then(|digits| digits.parse::<u16>().ok())
                    .ok_or_else(|| format!("Unknown record type: {}", s))?;
                RecordType::from_u16(code)
            }
        };
        Ok(parsed)
    }
}
