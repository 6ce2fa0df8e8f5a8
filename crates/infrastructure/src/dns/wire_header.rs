//! Raw access to the 12-octet DNS header, for packets the full codec cannot
//! or should not parse.

use rewriteng_domain::ResponseCode;

pub const HEADER_LEN: usize = 12;

/// Largest UDP reply sent to a client that did not negotiate EDNS.
pub const MAX_UDP_PAYLOAD: usize = 512;

const QR_BIT: u16 = 0x8000;
const OPCODE_MASK: u16 = 0x7800;
const RD_BIT: u16 = 0x0100;
const RA_BIT: u16 = 0x0080;
const RCODE_MASK: u16 = 0x000F;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawHeader {
    pub id: u16,
    pub flags: u16,
}

impl RawHeader {
    pub fn parse(buf: &[u8]) -> Option<Self> {
        if buf.len() < HEADER_LEN {
            return None;
        }

        Some(Self {
            id: u16::from_be_bytes([buf[0], buf[1]]),
            flags: u16::from_be_bytes([buf[2], buf[3]]),
        })
    }

    pub fn is_response(&self) -> bool {
        self.flags & QR_BIT != 0
    }

    pub fn op_code(&self) -> u8 {
        ((self.flags & OPCODE_MASK) >> 11) as u8
    }

    pub fn recursion_desired(&self) -> bool {
        self.flags & RD_BIT != 0
    }
}

/// Header-only reply: QR and RA set, id, opcode and RD echoed, all counts zero.
pub fn build_error_response(request: &RawHeader, rcode: ResponseCode) -> Vec<u8> {
    let flags = QR_BIT
        | (request.flags & OPCODE_MASK)
        | (request.flags & RD_BIT)
        | RA_BIT
        | (rcode.to_u16() & RCODE_MASK);

    let mut buf = vec![0u8; HEADER_LEN];
    buf[0..2].copy_from_slice(&request.id.to_be_bytes());
    buf[2..4].copy_from_slice(&flags.to_be_bytes());
    buf
}
