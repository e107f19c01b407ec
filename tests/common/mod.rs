//! Shared fixture: an in-memory SQLite star schema with a handful of events.
//!
//! | eventid      | year | country | region | attack | target | group | ext | suicide | success | nkill |
//! |--------------|------|---------|--------|--------|--------|-------|-----|---------|---------|-------|
//! | 200101010001 | 2001 | 4       | 6      | 3      | 4      | 1     | 0   | 0       | 1       | 3     |
//! | 200105050001 | 2001 | 4       | 6      | 3      | 14     | 1     | 1   | 1       | 1       | NULL  |
//! | 200112310001 | 2001 | 4       | 6      | 2      | 4      | 2     | 0   | 0       | 0       | 0     |
//! | 200003030001 | 2000 | 4       | 6      | 3      | 4      | 1     | 0   | 0       | 1       | 1     |
//! | 200007070001 | 2000 | 4       | 6      | 2      | 14     | 2     | 0   | 1       | 1       | 2     |
//! | 200109110001 | 2001 | 217     | 1      | 2      | 14     | 2     | 0   | 1       | 1       | 2996.0|
//! | 197001010001 | 1970 | 217     | 1      | 2      | 4      | 2     | 0   | 0       | 1       | NULL  |
//! | 201712310001 | 2017 | 95      | 10     | 3      | 4      | 2     | 1   | 0       | 1       | 5     |
//! | 201801010001 | 2018 | 95      | 10     | 3      | 4      | 2     | 0   | 0       | 1       | 1     |
//! | 200106060001 | 2001 | 999     | 6      | 3      | 4      | 1     | 0   | 0       | 1       | 1     |
//!
//! Country 999 has no lookup row, so its event never survives the joins.
//! 2018 lies outside the default year bounds.

#![allow(dead_code)]

use facets::datasource::SqliteSource;
use facets::model::Event;
use facets::schema::{create_script, StarSchema};
use facets::sql::Dialect;

const DIMENSIONS: &str = r#"
INSERT INTO "countries" ("countrycode", "countryname") VALUES
    (4, 'Afghanistan'), (95, 'Iraq'), (217, 'United States');
INSERT INTO "regions" ("regioncode", "regionname") VALUES
    (1, 'North America'), (6, 'South Asia'), (10, 'Middle East & North Africa');
INSERT INTO "attack_types" ("attacktype", "attacktypedescription") VALUES
    (2, 'Armed Assault'), (3, 'Bombing/Explosion');
INSERT INTO "groups" ("id", "group_name") VALUES
    (1, 'Taliban'), (2, 'Unknown');
INSERT INTO "target_types" ("id", "target_type") VALUES
    (4, 'Military'), (14, 'Private Citizens & Property');
"#;

const EVENTS: &str = r#"
INSERT INTO "global" (
    "eventid", "iyear", "imonth", "iday", "latitude", "longitude", "summary",
    "targtype1", "nkill", "extended", "suicide", "success",
    "country", "region", "attacktype1", "groupid"
) VALUES
    ('200101010001', 2001, 1, 1, 34.5, 69.1, 'Roadside bomb', 4, 3, 0, 0, 1, 4, 6, 3, 1),
    ('200105050001', 2001, 5, 5, NULL, NULL, NULL, 14, NULL, 1, 1, 1, 4, 6, 3, 1),
    ('200112310001', 2001, 12, 31, 31.6, 65.7, 'Failed assault', 4, 0, 0, 0, 0, 4, 6, 2, 2),
    ('200003030001', 2000, 3, 3, 34.5, 69.1, NULL, 4, 1, 0, 0, 1, 4, 6, 3, 1),
    ('200007070001', 2000, 7, 7, 36.7, 67.1, NULL, 14, 2, 0, 1, 1, 4, 6, 2, 2),
    ('200109110001', 2001, 9, 11, 40.7, -74.0, NULL, 14, 2996.0, 0, 1, 1, 217, 1, 2, 2),
    ('197001010001', 1970, 1, 1, NULL, NULL, NULL, 4, NULL, 0, 0, 1, 217, 1, 2, 2),
    ('201712310001', 2017, 12, 31, 33.3, 44.4, NULL, 4, 5, 1, 0, 1, 95, 10, 3, 2),
    ('201801010001', 2018, 1, 1, 33.3, 44.4, NULL, 4, 1, 0, 0, 1, 95, 10, 3, 2),
    ('200106060001', 2001, 6, 6, NULL, NULL, NULL, 4, 1, 0, 0, 1, 999, 6, 3, 1);
"#;

/// Empty star schema (tables only).
pub fn empty_source() -> SqliteSource {
    let source = SqliteSource::open_in_memory().expect("open in-memory database");
    source
        .execute_batch(&create_script(&StarSchema::default(), Dialect::Sqlite))
        .expect("create star schema");
    source
}

/// Star schema seeded with the events in the table above.
pub fn seeded_source() -> SqliteSource {
    let source = empty_source();
    source.execute_batch(DIMENSIONS).expect("seed dimensions");
    source.execute_batch(EVENTS).expect("seed events");
    source
}

/// Sorted event ids, for order-independent comparison.
pub fn ids(events: &[Event]) -> Vec<String> {
    let mut ids: Vec<String> = events.iter().map(|e| e.event_id.clone()).collect();
    ids.sort();
    ids
}

pub fn strs(ids: &[&str]) -> Vec<String> {
    let mut ids: Vec<String> = ids.iter().map(|s| s.to_string()).collect();
    ids.sort();
    ids
}
