use crate::canonicalize::SynonymRule;

/// Simplified fuel categories for Form 860 energy source codes. Rules are
/// applied in this order.
pub const FUEL_TYPE_EIA860_SIMPLE: &[SynonymRule<'static>] = &[
    SynonymRule::new("coal", &["ANT", "BIT", "LIG", "PC", "SUB", "WC", "SC", "RC"]),
    SynonymRule::new("oil", &["DFO", "JF", "KER", "RFO", "WO"]),
    SynonymRule::new("gas", &["BFG", "NG", "OG", "PG", "SG", "SGC", "SGP", "OOG"]),
    SynonymRule::new("nuclear", &["NUC"]),
    SynonymRule::new("hydro", &["WAT"]),
    SynonymRule::new("solar", &["SUN"]),
    SynonymRule::new("wind", &["WND"]),
    SynonymRule::new(
        "waste",
        &[
            "AB", "BLQ", "MSW", "MSB", "MSN", "OBL", "OBS", "OBG", "SLW", "TDF", "WDL", "WDS",
            "LFG",
        ],
    ),
    SynonymRule::new("other", &["GEO", "MWH", "OTH", "PUR", "WH"]),
];

/// Known bad state codes on the utility schedule.
pub const UTILITY_STATE_FIXES: &[(&str, &str)] = &[
    // Quebec
    ("QB", "QC"),
    ("Y", "NY"),
];

/// Plant id EIA uses for state-level aggregate rows.
pub const AGGREGATE_PLANT_ID: i64 = 99999;

/// Earliest ownership year the transformer accepts. It is also the only year
/// that reports `fraction_owned` as a percentage.
pub const OWNERSHIP_PERCENT_YEAR: i32 = 2011;
