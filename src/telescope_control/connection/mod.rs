use std::time::Duration;

pub use consts::{Destination, MessageId};
pub use result::*;
pub use transport::Transport;

use crate::telescope_control::encoder::EncoderCounts;
use crate::util::*;
use consts::*;

pub mod consts;
mod result;
mod transport;

/// Formats motor controller requests and interprets their replies.
/// Each call is a single exchange; nothing is retried.
pub struct Connection<T: Transport> {
    transport: T,
    timeout: Duration,
}

impl<T: Transport> Connection<T> {
    pub fn new(transport: T, timeout: Duration) -> Self {
        Connection { transport, timeout }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn transport_mut(&mut self) -> &mut T {
        &mut self.transport
    }

    fn request(axis: Axis, message: MessageId, data: &[u8]) -> Vec<u8> {
        let mut request = Vec::with_capacity(2 + data.len());
        request.push(Destination::from(axis).into());
        request.push(message.into());
        request.extend_from_slice(data);
        request
    }

    async fn command(&mut self, axis: Axis, message: MessageId, data: &[u8]) -> LinkResult<()> {
        let request = Self::request(axis, message, data);
        if self.transport.send_command(&request).await {
            Ok(())
        } else {
            tracing::warn!("{:?} {:?} was not acknowledged", axis, message);
            Err(LinkError::NotAcknowledged)
        }
    }

    async fn query(
        &mut self,
        axis: Axis,
        message: MessageId,
        expected_len: usize,
    ) -> LinkResult<Vec<u8>> {
        let request = Self::request(axis, message, &[]);
        let response = self
            .transport
            .request_and_read(&request, expected_len, self.timeout)
            .await
            .map_err(|e| {
                tracing::warn!("{:?} {:?} failed: {}", axis, message, e);
                e
            })?;

        if response.len() != expected_len {
            return Err(LinkError::MalformedResponse {
                expected: expected_len,
                actual: response.len(),
            });
        }
        Ok(response)
    }

    /* Encoders */

    pub async fn read_encoder(&mut self, axis: Axis) -> LinkResult<u32> {
        let response = self
            .query(axis, MessageId::GetPosition, POSITION_RESPONSE_LEN)
            .await?;
        Ok(u32::from_be_bytes([0, response[0], response[1], response[2]]))
    }

    pub async fn read_encoders(&mut self) -> LinkResult<EncoderCounts> {
        let primary = self.read_encoder(Axis::Primary).await?;
        let secondary = self.read_encoder(Axis::Secondary).await?;
        Ok(EncoderCounts { primary, secondary })
    }

    pub async fn goto_axis(&mut self, axis: Axis, register: u32, fast: bool) -> LinkResult<()> {
        let message = if fast {
            MessageId::GotoFast
        } else {
            MessageId::GotoSlow
        };
        self.command(axis, message, &position_bytes(register)).await
    }

    pub async fn set_encoders(&mut self, counts: EncoderCounts) -> LinkResult<()> {
        for axis in Axis::BOTH {
            self.command(axis, MessageId::SetPosition, &position_bytes(counts.get(axis)))
                .await?;
        }
        Ok(())
    }

    /* Motion */

    pub async fn is_axis_slewing(&mut self, axis: Axis) -> LinkResult<bool> {
        let response = self
            .query(axis, MessageId::SlewDone, SLEW_DONE_RESPONSE_LEN)
            .await?;
        Ok(response[0] == SLEW_MOVING)
    }

    /// True while either axis is moving. The primary axis is asked first.
    pub async fn is_slewing(&mut self) -> LinkResult<bool> {
        for axis in Axis::BOTH {
            if self.is_axis_slewing(axis).await? {
                return Ok(true);
            }
        }
        Ok(false)
    }

    pub async fn stop_axis(&mut self, axis: Axis) -> LinkResult<()> {
        self.command(axis, MessageId::MovePositive, &[STOP_MOVE])
            .await
    }

    /// Stops both axes, then tracking
    pub async fn full_stop(&mut self) -> LinkResult<()> {
        for axis in Axis::BOTH {
            self.stop_axis(axis).await?;
        }
        self.stop_tracking().await
    }

    /* Tracking */

    /// Drives the primary axis at the sidereal rate; southern sites run it backwards
    pub async fn start_tracking(&mut self, southern: bool) -> LinkResult<()> {
        let message = if southern {
            MessageId::NegativeGuideRate
        } else {
            MessageId::PositiveGuideRate
        };
        self.command(Axis::Primary, message, &SIDEREAL_RATE).await
    }

    pub async fn stop_tracking(&mut self) -> LinkResult<()> {
        self.command(Axis::Primary, MessageId::PositiveGuideRate, &ZERO_RATE)
            .await
    }
}

/// 24-bit big-endian register value
pub fn position_bytes(register: u32) -> [u8; 3] {
    let [_, b0, b1, b2] = register.to_be_bytes();
    [b0, b1, b2]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::telescope_control::test_util::SimulatedMount;

    fn connection(mount: SimulatedMount) -> Connection<SimulatedMount> {
        Connection::new(mount, Duration::from_millis(100))
    }

    #[test]
    fn test_position_bytes() {
        assert_eq!(position_bytes(0x12_34_56), [0x12, 0x34, 0x56]);
        assert_eq!(position_bytes(16_777_215), [0xff, 0xff, 0xff]);
    }

    #[tokio::test]
    async fn test_goto_requests() {
        let mut con = connection(SimulatedMount::new(EncoderCounts::new(0, 0)));
        con.goto_axis(Axis::Primary, 0x01_02_03, false).await.unwrap();
        con.goto_axis(Axis::Secondary, 0x0a_0b_0c, true).await.unwrap();

        let sent = &con.transport().sent;
        assert_eq!(sent[0], vec![0x10, 0x17, 0x01, 0x02, 0x03]);
        assert_eq!(sent[1], vec![0x11, 0x02, 0x0a, 0x0b, 0x0c]);
    }

    #[tokio::test]
    async fn test_read_encoders() {
        let mut con = connection(SimulatedMount::new(EncoderCounts::new(0xab_cd_ef, 7)));
        assert_eq!(
            con.read_encoders().await.unwrap(),
            EncoderCounts::new(0xab_cd_ef, 7)
        );
    }

    #[tokio::test]
    async fn test_failures_are_not_retried() {
        let mut mount = SimulatedMount::new(EncoderCounts::default());
        mount.timeout_reads = true;
        let mut con = connection(mount);
        assert_eq!(con.read_encoders().await, Err(LinkError::Timeout));
        assert_eq!(con.transport().sent.len(), 1);

        let mut mount = SimulatedMount::new(EncoderCounts::default());
        mount.acknowledge = false;
        let mut con = connection(mount);
        assert_eq!(
            con.goto_axis(Axis::Primary, 1, true).await,
            Err(LinkError::NotAcknowledged)
        );
        assert_eq!(con.transport().sent.len(), 1);
    }

    #[tokio::test]
    async fn test_short_response_is_malformed() {
        let mut mount = SimulatedMount::new(EncoderCounts::default());
        mount.truncate_responses = true;
        let mut con = connection(mount);
        assert_eq!(
            con.read_encoder(Axis::Primary).await,
            Err(LinkError::MalformedResponse {
                expected: 3,
                actual: 2
            })
        );
    }

    #[tokio::test]
    async fn test_full_stop_and_tracking() {
        let mut con = connection(SimulatedMount::new(EncoderCounts::default()));
        con.start_tracking(true).await.unwrap();
        assert!(con.transport().tracking);
        con.full_stop().await.unwrap();
        assert!(!con.transport().tracking);

        let sent = &con.transport().sent;
        assert_eq!(sent[0], vec![0x10, 0x07, 0xff, 0xff]);
        assert_eq!(sent[1], vec![0x10, 0x24, 0x00]);
        assert_eq!(sent[2], vec![0x11, 0x24, 0x00]);
        assert_eq!(sent[3], vec![0x10, 0x06, 0x00, 0x00]);
    }
}
