use std::fmt;
use std::str::FromStr;

/// DNS class of a question or record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DnsClass {
    #[default]
    IN,
    CS,
    CH,
    HS,
    NONE,
    ANY,
    Unknown(u16),
}

impl DnsClass {
    pub fn as_str(&self) -> &'static str {
        match self {
            DnsClass::IN => "IN",
            DnsClass::CS => "CS",
            DnsClass::CH => "CH",
            DnsClass::HS => "HS",
            DnsClass::NONE => "NONE",
            DnsClass::ANY => "ANY",
            DnsClass::Unknown(_) => "UNKNOWN",
        }
    }

    pub fn to_u16(&self) -> u16 {
        match self {
            DnsClass::IN => 1,
            DnsClass::CS => 2,
            DnsClass::CH => 3,
            DnsClass::HS => 4,
            DnsClass::NONE => 254,
            DnsClass::ANY => 255,
            DnsClass::Unknown(code) => *code,
        }
    }

    pub fn from_u16(code: u16) -> Self {
        match code {
            1 => DnsClass::IN,
            2 => DnsClass::CS,
            3 => DnsClass::CH,
            4 => DnsClass::HS,
            254 => DnsClass::NONE,
            255 => DnsClass::ANY,
            other => DnsClass::Unknown(other),
        }
    }

    pub fn is_any(&self) -> bool {
        matches!(self, DnsClass::ANY)
    }
}

impl fmt::Display for DnsClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DnsClass::Unknown(code) => write!(f, "CLASS{}", code),
            other => write!(f, "{}", other.as_str()),
        }
    }
}

impl FromStr for DnsClass {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "IN" => Ok(DnsClass::IN),
            "CS" => Ok(DnsClass::CS),
            "CH" => Ok(DnsClass::CH),
            "HS" => Ok(DnsClass::HS),
            "NONE" => Ok(DnsClass::NONE),
            "ANY" => Ok(DnsClass::ANY),
            _ => Err(format!("Unknown query class: {}", s)),
        }
    }
}
