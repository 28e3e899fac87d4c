use super::LinkResult;
use async_trait::async_trait;
use std::time::Duration;

/// Byte-level link to the mount. Implementations own framing, checksums and the serial
/// line or socket; requests arrive here as `[destination, message id, data...]`.
#[async_trait]
pub trait Transport: Send {
    /// Returns whether the mount acknowledged the command
    async fn send_command(&mut self, request: &[u8]) -> bool;

    async fn request_and_read(
        &mut self,
        request: &[u8],
        expected_len: usize,
        timeout: Duration,
    ) -> LinkResult<Vec<u8>>;
}
