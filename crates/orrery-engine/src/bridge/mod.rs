pub mod protocol;

pub use protocol::{FrameStats, ProtocolLayout, HEADER_FLOATS, PROTOCOL_VERSION};
