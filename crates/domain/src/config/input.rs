use serde::{Deserialize, Serialize};

/// Where dnstap frames come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum InputKind {
    /// Bidirectional Frame Streams over a unix-domain socket.
    Socket,
    /// Unidirectional Frame Streams file (e.g. written by `dnstap -w`).
    File,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct InputConfig {
    #[serde(default = "default_input_path")]
    pub path: String,

    #[serde(default = "default_input_kind")]
    pub kind: InputKind,

    /// Capacity of the frame channel between the reader and the decoder.
    #[serde(default = "default_buffer_size")]
    pub buffer_size: usize,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            path: default_input_path(),
            kind: default_input_kind(),
            buffer_size: default_buffer_size(),
        }
    }
}

fn default_input_path() -> String {
    "/var/run/unbound/dnstap.sock".to_string()
}

fn default_input_kind() -> InputKind {
    InputKind::Socket
}

fn default_buffer_size() -> usize {
    1000
}
