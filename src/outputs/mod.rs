//! Message formatting and Slack delivery.
//!
//! This module contains submodules responsible for turning typed summaries
//! into Slack messages and handing them to the platform:
//!
//! # Submodules
//!
//! - [`blocks`]: Pure Block Kit formatting; no I/O, never fails on missing
//!   optional fields
//! - [`webhook`]: Single-message delivery to an incoming webhook
//! - [`bot`]: `chat.postMessage` delivery with thread anchoring for the
//!   deep-dive replies
//!
//! # Delivery modes
//!
//! | Mode | Transport | Messages |
//! |--------|-------------------|---------------------------------|
//! | digest | incoming webhook | one |
//! | brief | incoming webhook | one |
//! | thread | bot token API | parent + one reply per top-3 |

pub mod blocks;
pub mod bot;
pub mod webhook;
