//! Reserved group names and sentinels shared by the composer, the sorter and
//! every renderer. Client apps parse these tokens, so they must not change.

/// Latency-tested group holding every proxy.
pub const AUTO_SELECT: &str = "Auto Select";
/// Manual selection group, always emitted last.
pub const SELECTION: &str = "Selection";
/// Reserved manual-selection group that may reference pruned groups.
pub const MANUAL_SELECTION: &str = "手动选择";

pub const DIRECT: &str = "DIRECT";
pub const REJECT: &str = "REJECT";

pub const DEFAULT_TEST_URL: &str = "http://www.gstatic.com/generate_204";
pub const DEFAULT_TEST_INTERVAL: u32 = 300;

/// Expiry timestamps before 2000-01-01T00:00:00Z mean "never expires".
pub const PERMANENT_EXPIRY_CUTOFF: i64 = 946_684_800;
pub const PERMANENT_EXPIRY_TEXT: &str = "长期有效";
pub const UNLIMITED_TRAFFIC_TEXT: &str = "无限制";

/// Returns true for the routing sentinels that are not proxies or groups.
pub fn is_sentinel(name: &str) -> bool {
    name == DIRECT || name == REJECT
}
