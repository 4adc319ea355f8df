//! HID class control requests.
//!
//! The device answers three synchronous class requests on the control
//! endpoint: GET_REPORT (the current 2-byte report), GET_IDLE and SET_IDLE
//! (one idle-rate byte). There is only one report type, so the request's
//! wValue report selector is ignored. No output/LED report exists.

use crate::types::Report;

pub const HID_REQ_GET_REPORT: u8 = 0x01;
pub const HID_REQ_GET_IDLE: u8 = 0x02;
pub const HID_REQ_SET_IDLE: u8 = 0x0a;

const REQUEST_TYPE_MASK: u8 = 0x60;
const REQUEST_TYPE_CLASS: u8 = 0x20;

/// Standard 8-byte SETUP packet, as delivered by the USB driver
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct SetupPacket {
    pub request_type: u8,
    pub request: u8,
    pub value: u16,
    pub index: u16,
    pub length: u16,
}

impl SetupPacket {
    /// Decode the raw control packet
    pub fn parse(bytes: &[u8; 8]) -> Self {
        Self {
            request_type: bytes[0],
            request: bytes[1],
            value: u16::from_le_bytes([bytes[2], bytes[3]]),
            index: u16::from_le_bytes([bytes[4], bytes[5]]),
            length: u16::from_le_bytes([bytes[6], bytes[7]]),
        }
    }

    /// True for class-type requests; everything else is left to the driver
    pub fn is_class(&self) -> bool {
        self.request_type & REQUEST_TYPE_MASK == REQUEST_TYPE_CLASS
    }
}

/// Data owed back to the host for a handled request
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum ControlReply {
    /// GET_REPORT payload
    Report(Report),
    /// GET_IDLE payload
    IdleRate(u8),
    /// Request consumed (or ignored) with no data stage
    None,
}

/// HID class state: just the idle rate, in 4 ms units
pub struct HidControl {
    idle_rate: u8,
}

impl HidControl {
    pub const fn new() -> Self {
        Self { idle_rate: 0 }
    }

    pub fn idle_rate(&self) -> u8 {
        self.idle_rate
    }

    /// Handle one SETUP packet against the current report state
    pub fn handle(&mut self, setup: &SetupPacket, current: Report) -> ControlReply {
        if !setup.is_class() {
            // No vendor-specific requests implemented
            return ControlReply::None;
        }
        match setup.request {
            HID_REQ_GET_REPORT => ControlReply::Report(current),
            HID_REQ_GET_IDLE => ControlReply::IdleRate(self.idle_rate),
            HID_REQ_SET_IDLE => {
                // Idle rate travels in the high byte of wValue
                self.idle_rate = (setup.value >> 8) as u8;
                ControlReply::None
            }
            _ => ControlReply::None,
        }
    }
}

impl Default for HidControl {
    fn default() -> Self {
        Self::new()
    }
}
