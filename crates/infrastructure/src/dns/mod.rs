pub mod codec;
pub mod forwarding;
pub mod server;
pub mod transport;
pub mod wire_header;

pub use codec::MessageCodec;
pub use forwarding::UpstreamForwarder;
pub use server::{DnsServerHandler, Protocol};
