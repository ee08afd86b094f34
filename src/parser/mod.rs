pub mod protocols;

pub use protocols::{parse_option, ProtocolError, ProtocolOption};
