mod http_port;

pub use http_port::{FetchRequest, FetchResponse, HttpError, HttpPort};

#[cfg(test)]
pub mod mocks {
    pub use super::http_port::MockHttpPort;
}
