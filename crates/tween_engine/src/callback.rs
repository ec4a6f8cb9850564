//! Callback events fired at unit boundaries

use bitflags::bitflags;

bitflags! {
    /// Boundary events. Combine them to build a trigger mask.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct TweenEvent: u8 {
        /// Delay elapsed, first iteration about to start
        const BEGIN = 0x01;
        /// An iteration starts, moving forward
        const START = 0x02;
        /// An iteration ends, moving forward
        const END = 0x04;
        /// Last iteration ended, moving forward
        const COMPLETE = 0x08;
        /// Playing backward from the end
        const BACK_BEGIN = 0x10;
        /// An iteration starts, moving backward
        const BACK_START = 0x20;
        /// An iteration ends, moving backward
        const BACK_END = 0x40;
        /// First iteration ended, moving backward
        const BACK_COMPLETE = 0x80;

        const ANY_FORWARD = 0x0F;
        const ANY_BACKWARD = 0xF0;
        const ANY = 0xFF;
    }
}

impl Default for TweenEvent {
    fn default() -> Self {
        TweenEvent::COMPLETE
    }
}

/// Handler invoked synchronously from `update` for every triggered event
pub type TweenCallback = Box<dyn FnMut(TweenEvent)>;
