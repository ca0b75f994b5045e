//! Process-level services shared by the resource system
//!
//! Time source, message bus and stream/file access.

pub mod clock;
pub mod message_bus;
pub mod input_stream;

pub use clock::{Clock, SystemClock, ManualClock};
pub use message_bus::{MessageBus, Message, Envelope, ListenerId};
pub use input_stream::{InputStream, StreamType, FileSystem};
