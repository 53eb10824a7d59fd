/// Badge colours of active filters
pub const BADGE_PALETTE: [&str; 18] = [
    "red", "orange", "amber", "yellow", "lime", "green", "emerald", "teal", "cyan", "sky", "blue",
    "indigo", "violet", "purple", "fuchsia", "pink", "rose", "zinc",
];

/// Stable palette colour of a filter column (FNV-1a over the name)
pub fn badge_color(column: &str) -> &'static str {
    let hash = column.bytes().fold(0xcbf2_9ce4_8422_2325_u64, |hash, byte| {
        (hash ^ u64::from(byte)).wrapping_mul(0x0100_0000_01b3)
    });
    BADGE_PALETTE[(hash % BADGE_PALETTE.len() as u64) as usize]
}

/// CSS class of a filter badge
pub fn badge_class(column: &str) -> String {
    format!("filter-badge filter-badge--{}", badge_color(column))
}
