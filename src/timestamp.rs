//! Timestamp rendering for banners and line prefixes.
//!
//! Both formats use chrono's fixed English names, so output does not depend
//! on the host locale.

use crate::clock::Timestamp;

const BANNER_TIME_FORMAT: &str = "%a, %b %d, %Y at %I:%M%p";
const PREFIX_TIME_FORMAT: &str = "%m/%d %H:%M:%S";

/// Separator appended after every line prefix.
pub const PREFIX_SEPARATOR: &str = "~   ";

/// Prefix used when the clock cannot be read.
pub const UNAVAILABLE_PREFIX: &str = "--/-- --:--:--~   ";

/// Rule line written between a banner and the session body.
const RULE: &str = "----";

/// Which end of the session a banner marks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BannerEvent {
    Opened,
    Closing,
}

impl BannerEvent {
    pub fn as_str(self) -> &'static str {
        match self {
            BannerEvent::Opened => "Opened",
            BannerEvent::Closing => "Closing",
        }
    }
}

/// `"<Product> Log - <Event> Sat, Mar 14, 2026 at 03:09PM"`
pub fn banner_header(product: &str, event: BannerEvent, now: Option<&Timestamp>) -> String {
    match now {
        Some(at) => format!(
            "{} Log - {} {}",
            product,
            event.as_str(),
            at.format(BANNER_TIME_FORMAT)
        ),
        None => format!("{} Log - {} (time unavailable)", product, event.as_str()),
    }
}

/// Full banner text including the rule block.
///
/// The opening banner is followed by the rules; the closing banner is
/// preceded by them. The sink appends the final terminator.
pub fn banner(product: &str, event: BannerEvent, now: Option<&Timestamp>) -> String {
    let header = banner_header(product, event, now);
    match event {
        BannerEvent::Opened => format!("{header}\n{RULE}\n{RULE}\n{RULE}\n"),
        BannerEvent::Closing => format!("\n\n{RULE}\n{RULE}\n{RULE}\n{header}"),
    }
}

/// `"03/14 15:09:26~   "`
pub fn line_prefix(now: Option<&Timestamp>) -> String {
    match now {
        Some(at) => format!("{}{}", at.format(PREFIX_TIME_FORMAT), PREFIX_SEPARATOR),
        None => UNAVAILABLE_PREFIX.to_string(),
    }
}
