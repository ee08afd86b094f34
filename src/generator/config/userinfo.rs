//! Human readable traffic and expiry summaries.

use chrono::{DateTime, FixedOffset};

use crate::constants::{PERMANENT_EXPIRY_CUTOFF, PERMANENT_EXPIRY_TEXT, UNLIMITED_TRAFFIC_TEXT};
use crate::models::SubscribeUser;
use crate::settings::Settings;
use crate::utils::format_traffic;

/// Expiry as `YYYY-MM-DD HH:MM:SS` at `offset_hours` from UTC.
pub fn format_expiry(expire_time: i64, offset_hours: i32) -> String {
    if expire_time < PERMANENT_EXPIRY_CUTOFF {
        return PERMANENT_EXPIRY_TEXT.to_string();
    }
    let offset = FixedOffset::east_opt(offset_hours.clamp(-23, 23) * 3600);
    match (DateTime::from_timestamp(expire_time, 0), offset) {
        (Some(utc), Some(offset)) => utc
            .with_timezone(&offset)
            .format("%Y-%m-%d %H:%M:%S")
            .to_string(),
        (Some(utc), None) => utc.format("%Y-%m-%d %H:%M:%S").to_string(),
        (None, _) => PERMANENT_EXPIRY_TEXT.to_string(),
    }
}

fn remaining_text(user: &SubscribeUser) -> String {
    match user.remaining() {
        Some(bytes) => format_traffic(bytes),
        None => UNLIMITED_TRAFFIC_TEXT.to_string(),
    }
}

fn total_text(user: &SubscribeUser) -> String {
    if user.traffic <= 0 {
        UNLIMITED_TRAFFIC_TEXT.to_string()
    } else {
        format_traffic(user.traffic)
    }
}

/// Full traffic and expiry line embedded in plaintext profiles.
pub fn subscription_info(user: &SubscribeUser, settings: &Settings) -> String {
    format!(
        "已用流量：{} 剩余流量：{} 总流量：{} 到期时间：{}",
        format_traffic(user.used()),
        remaining_text(user),
        total_text(user),
        format_expiry(user.expire_time, settings.expire_utc_offset_hours)
    )
}

/// Short remaining-traffic and expiry line.
pub fn remaining_summary(user: &SubscribeUser, settings: &Settings) -> String {
    format!(
        "剩余流量：{} 到期时间：{}",
        remaining_text(user),
        format_expiry(user.expire_time, settings.expire_utc_offset_hours)
    )
}

/// Value of the `Subscription-Userinfo` response header.
pub fn subscription_userinfo(user: &SubscribeUser) -> String {
    format!(
        "upload={}; download={}; total={}; expire={}",
        user.upload.max(0),
        user.download.max(0),
        user.traffic.max(0),
        user.expire_time.max(0)
    )
}
