use std::time::Duration;

use async_trait::async_trait;
use chrono::{TimeZone, Utc};

use super::connection::{Destination, LinkError, LinkResult, MessageId, Transport};
use super::encoder::{register_from_signed, signed_from_register, EncoderCounts};
use super::Mount;
use crate::clock::FixedClock;
use crate::config::Config;
use crate::util::*;

/// Motor controller stand-in that decodes requests and keeps encoder registers.
/// A goto lands on its target after `goto_polls` slew-done queries report moving.
#[derive(Debug, Clone)]
pub struct SimulatedMount {
    pub registers: EncoderCounts,
    targets: [Option<u32>; 2],
    polls_left: [u32; 2],
    pub goto_polls: u32,
    /// Signed counts added to each axis when a goto lands
    pub arrival_error: (i64, i64),
    pub sent: Vec<Vec<u8>>,
    pub acknowledge: bool,
    /// Destination and message that are never acknowledged
    pub refused: Option<(Destination, MessageId)>,
    pub timeout_reads: bool,
    pub truncate_responses: bool,
    pub tracking: bool,
}

impl SimulatedMount {
    pub fn new(registers: EncoderCounts) -> Self {
        Self {
            registers,
            targets: [None; 2],
            polls_left: [0; 2],
            goto_polls: 2,
            arrival_error: (0, 0),
            sent: vec![],
            acknowledge: true,
            refused: None,
            timeout_reads: false,
            truncate_responses: false,
            tracking: false,
        }
    }

    pub fn gotos(&self) -> Vec<&Vec<u8>> {
        self.sent
            .iter()
            .filter(|r| r[1] == u8::from(MessageId::GotoSlow) || r[1] == u8::from(MessageId::GotoFast))
            .collect()
    }

    pub fn clear_sent(&mut self) {
        self.sent.clear();
    }

    fn index(request: &[u8]) -> usize {
        match Destination::try_from(request[0]).map(Axis::from) {
            Ok(Axis::Secondary) => 1,
            _ => 0,
        }
    }

    fn register(&self, index: usize) -> u32 {
        match index {
            0 => self.registers.primary,
            _ => self.registers.secondary,
        }
    }

    fn set_register(&mut self, index: usize, value: u32) {
        match index {
            0 => self.registers.primary = value,
            _ => self.registers.secondary = value,
        }
    }

    fn land(&mut self, index: usize, target: u32) {
        let error = if index == 0 {
            self.arrival_error.0
        } else {
            self.arrival_error.1
        };
        self.set_register(index, register_from_signed(signed_from_register(target) + error));
    }
}

fn data_register(data: &[u8]) -> u32 {
    u32::from_be_bytes([0, data[0], data[1], data[2]])
}

#[async_trait]
impl Transport for SimulatedMount {
    async fn send_command(&mut self, request: &[u8]) -> bool {
        self.sent.push(request.to_vec());
        let message = MessageId::try_from(request[1]);
        let refused = match (Destination::try_from(request[0]), &message) {
            (Ok(destination), Ok(message)) => self.refused == Some((destination, *message)),
            _ => false,
        };
        if !self.acknowledge || refused {
            return false;
        }

        let index = Self::index(request);
        let data = &request[2..];
        match message {
            Ok(MessageId::GotoFast | MessageId::GotoSlow) => {
                self.targets[index] = Some(data_register(data));
                self.polls_left[index] = self.goto_polls;
            }
            Ok(MessageId::SetPosition) => self.set_register(index, data_register(data)),
            Ok(MessageId::MovePositive) => self.targets[index] = None,
            Ok(MessageId::PositiveGuideRate | MessageId::NegativeGuideRate) => {
                self.tracking = data.iter().any(|b| *b != 0)
            }
            _ => return false,
        }
        true
    }

    async fn request_and_read(
        &mut self,
        request: &[u8],
        expected_len: usize,
        _timeout: Duration,
    ) -> LinkResult<Vec<u8>> {
        self.sent.push(request.to_vec());
        if self.timeout_reads {
            return Err(LinkError::Timeout);
        }

        let index = Self::index(request);
        let mut response = match MessageId::try_from(request[1]) {
            Ok(MessageId::GetPosition) => {
                let [_, b0, b1, b2] = self.register(index).to_be_bytes();
                vec![b0, b1, b2]
            }
            Ok(MessageId::SlewDone) => match self.targets[index] {
                Some(_) if self.polls_left[index] > 0 => {
                    self.polls_left[index] -= 1;
                    vec![0x00]
                }
                Some(target) => {
                    self.land(index, target);
                    self.targets[index] = None;
                    vec![0xff]
                }
                None => vec![0xff],
            },
            _ => return Err(LinkError::Timeout),
        };

        if self.truncate_responses {
            response.truncate(expected_len.saturating_sub(1));
        }
        Ok(response)
    }
}

pub const TEST_LATITUDE: Degrees = 38.33;

pub fn test_config(kind: MountKind) -> Config {
    let mut config = Config::default();
    config.mount_details.kind = Some(kind);
    config.observation_location.latitude = TEST_LATITUDE;
    config.observation_location.longitude = -121.;
    config
}

/// Sidereal time pinned at 6h so RA = 6h - HA
pub fn test_clock() -> FixedClock {
    FixedClock::with_lst(Utc.with_ymd_and_hms(2023, 5, 1, 6, 0, 0).unwrap(), 6.)
}

pub fn create_mount(
    config: &Config,
    registers: EncoderCounts,
) -> Mount<SimulatedMount, FixedClock> {
    Mount::new(config, SimulatedMount::new(registers), test_clock()).unwrap()
}
