//! End-to-end filter lookups against the seeded SQLite star schema.

#[path = "../common/mod.rs"]
mod common;

use common::{ids, seeded_source, strs};
use facets::datasource::SqliteSource;
use facets::prelude::*;
use facets::schema::create_script;
use std::collections::BTreeSet;

fn repository() -> FacetRepository<SqliteSource> {
    FacetRepository::with_defaults(seeded_source())
}

fn find(repo: &FacetRepository<SqliteSource>, filter: &Filter) -> Vec<String> {
    ids(&repo.find_by(filter).unwrap())
}

#[test]
fn test_scenario_single_year_single_country() {
    let repo = repository();
    let filter = Filter::new().with_years(2001, 2001).with_countries([4]);

    let events = repo.find_by(&filter).unwrap();

    assert_eq!(
        ids(&events),
        strs(&["200101010001", "200105050001", "200112310001"])
    );
    for event in &events {
        assert_eq!(event.year, 2001);
        assert_eq!(event.country, "Afghanistan");
        assert_eq!(event.region, "South Asia");
    }
}

#[test]
fn test_empty_filter_uses_default_bounds() {
    let repo = repository();
    let all = find(&repo, &Filter::new());

    assert_eq!(all.len(), 8);
    assert!(all.contains(&"197001010001".to_string()));
    assert!(all.contains(&"201712310001".to_string()));
    assert!(!all.contains(&"201801010001".to_string()));
}

#[test]
fn test_configured_bounds() {
    let repo = FacetRepository::new(
        seeded_source(),
        QueryBuilder::new(YearBounds::new(2001, 2018)),
    );
    let found = find(&repo, &Filter::new());
    assert!(found.contains(&"201801010001".to_string()));
    assert!(!found.contains(&"197001010001".to_string()));
    assert_eq!(found.len(), 6);
}

#[test]
fn test_year_bounds_inclusive() {
    let repo = repository();
    assert_eq!(
        find(&repo, &Filter::new().with_years(1970, 1970)),
        strs(&["197001010001"])
    );
    assert_eq!(
        find(&repo, &Filter::new().with_years(2017, 2017)),
        strs(&["201712310001"])
    );
    assert_eq!(
        find(&repo, &Filter::new().with_min_year(2017).with_max_year(2018)),
        strs(&["201712310001", "201801010001"])
    );
}

#[test]
fn test_inverted_range_matches_nothing() {
    let repo = repository();
    assert!(find(&repo, &Filter::new().with_years(2010, 2000)).is_empty());
}

#[test]
fn test_empty_set_equivalent_to_absent() {
    let repo = repository();
    assert_eq!(
        find(&repo, &Filter::new().with_countries(Vec::new())),
        find(&repo, &Filter::new())
    );
    assert_eq!(
        find(&repo, &Filter::new().with_years(2001, 2001).with_groups(Vec::new())),
        find(&repo, &Filter::new().with_years(2001, 2001))
    );
}

#[test]
fn test_facets_intersect() {
    let repo = repository();
    let facets = vec![
        Filter::new().with_years(2001, 2001),
        Filter::new().with_countries([4]),
        Filter::new().success(true),
        Filter::new().suicide(true),
        Filter::new().extended(false),
        Filter::new().with_attack_types([3]),
        Filter::new().with_target_types([14]),
        Filter::new().with_groups([2]),
        Filter::new().with_regions([6, 1]),
    ];

    for (i, a) in facets.iter().enumerate() {
        for b in facets.iter().skip(i + 1) {
            let combined = merge(a, b);
            let left: BTreeSet<String> = find(&repo, a).into_iter().collect();
            let right: BTreeSet<String> = find(&repo, b).into_iter().collect();
            let expected: Vec<String> = left.intersection(&right).cloned().collect();
            assert_eq!(find(&repo, &combined), expected, "{:?} and {:?}", a, b);
        }
    }
}

/// Combine two filters that constrain different facets.
fn merge(a: &Filter, b: &Filter) -> Filter {
    Filter {
        min_year: a.min_year.or(b.min_year),
        max_year: a.max_year.or(b.max_year),
        is_extended: a.is_extended.or(b.is_extended),
        is_success: a.is_success.or(b.is_success),
        is_suicide: a.is_suicide.or(b.is_suicide),
        countries: a.countries.clone().or_else(|| b.countries.clone()),
        regions: a.regions.clone().or_else(|| b.regions.clone()),
        attack_types: a.attack_types.clone().or_else(|| b.attack_types.clone()),
        target_types: a.target_types.clone().or_else(|| b.target_types.clone()),
        groups_id: a.groups_id.clone().or_else(|| b.groups_id.clone()),
    }
}

#[test]
fn test_flag_facets() {
    let repo = repository();
    assert_eq!(
        find(&repo, &Filter::new().success(false)),
        strs(&["200112310001"])
    );
    assert_eq!(
        find(&repo, &Filter::new().suicide(true)),
        strs(&["200105050001", "200007070001", "200109110001"])
    );
    assert_eq!(
        find(&repo, &Filter::new().extended(true)),
        strs(&["200105050001", "201712310001"])
    );
}

#[test]
fn test_id_set_facets() {
    let repo = repository();
    assert_eq!(
        find(&repo, &Filter::new().with_groups([1])),
        strs(&["200101010001", "200105050001", "200003030001"])
    );
    assert_eq!(
        find(&repo, &Filter::new().with_target_types([14])),
        strs(&["200105050001", "200007070001", "200109110001"])
    );
    assert_eq!(
        find(&repo, &Filter::new().with_regions([1])),
        strs(&["200109110001", "197001010001"])
    );
    assert_eq!(
        find(&repo, &Filter::new().with_countries([95, 217])),
        strs(&["200109110001", "197001010001", "201712310001"])
    );
}

#[test]
fn test_unknown_ids_match_nothing() {
    let repo = repository();
    assert!(find(&repo, &Filter::new().with_countries([12345])).is_empty());
    assert!(find(&repo, &Filter::new().with_groups([-1])).is_empty());
}

#[test]
fn test_every_event_has_resolved_names() {
    let repo = repository();
    let events = repo.find_by(&Filter::new().with_years(1970, 2018)).unwrap();

    assert_eq!(events.len(), 9);
    assert!(!ids(&events).contains(&"200106060001".to_string()));
    for event in &events {
        assert!(!event.country.is_empty());
        assert!(!event.region.is_empty());
        assert!(!event.attack_type.is_empty());
        assert!(!event.target_type.is_empty());
        assert!(!event.group.is_empty());
    }
}

#[test]
fn test_event_fields_decoded() {
    let repo = repository();
    let events = repo
        .find_by(&Filter::new().with_years(2001, 2001).with_groups([1]))
        .unwrap();
    let first = events
        .iter()
        .find(|e| e.event_id == "200101010001")
        .unwrap();

    assert_eq!(
        first,
        &Event {
            event_id: "200101010001".into(),
            year: 2001,
            month: 1,
            day: 1,
            extended: 0,
            country: "Afghanistan".into(),
            region: "South Asia".into(),
            latitude: Some(34.5),
            longitude: Some(69.1),
            summary: Some("Roadside bomb".into()),
            is_success: true,
            is_suicide: false,
            attack_type: "Bombing/Explosion".into(),
            target_type: "Military".into(),
            kills_count: Some(3),
            group: "Taliban".into(),
        }
    );

    let sparse = events
        .iter()
        .find(|e| e.event_id == "200105050001")
        .unwrap();
    assert_eq!(sparse.latitude, None);
    assert_eq!(sparse.summary, None);
    assert_eq!(sparse.kills_count, None);
    assert_eq!(sparse.extended, 1);
    assert!(sparse.is_suicide);
    assert_eq!(sparse.target_type, "Private Citizens & Property");
}

#[test]
fn test_integral_real_kill_count() {
    let repo = repository();
    let events = repo
        .find_by(&Filter::new().with_countries([217]).with_years(2001, 2001))
        .unwrap();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].kills_count, Some(2996));
    assert_eq!(events[0].group, "Unknown");
}

#[test]
fn test_free_function_matches_repository() {
    let source = seeded_source();
    let builder = QueryBuilder::default();
    let filter = Filter::new().with_attack_types([2]);

    let events = find_events_matching(&source, &builder, &filter).unwrap();
    assert_eq!(
        ids(&events),
        strs(&["200112310001", "200007070001", "200109110001", "197001010001"])
    );
}

#[test]
fn test_concurrent_lookups() {
    let repo = repository();
    let filters = [
        Filter::new().with_years(2001, 2001).with_countries([4]),
        Filter::new().suicide(true),
        Filter::new().with_groups([1]),
        Filter::new(),
    ];

    let expected: Vec<Vec<String>> = filters.iter().map(|f| find(&repo, f)).collect();

    let repo = &repo;
    std::thread::scope(|scope| {
        let handles: Vec<_> = filters
            .iter()
            .map(|filter| scope.spawn(move || find(repo, filter)))
            .collect();
        for (handle, expected) in handles.into_iter().zip(&expected) {
            assert_eq!(&handle.join().unwrap(), expected);
        }
    });
}

#[test]
fn test_shared_display_column_names_resolve_per_dimension() {
    let schema = StarSchema::default()
        .with_dimension(
            Dimension::Country,
            DimensionTable::new("c2", "code", "name", "country"),
        )
        .with_dimension(
            Dimension::Region,
            DimensionTable::new("r2", "code", "name", "region"),
        )
        .with_dimension(
            Dimension::Group,
            DimensionTable::new("g2", "code", "summary", "groupid"),
        );
    let source = SqliteSource::open_in_memory().unwrap();
    source
        .execute_batch(&create_script(&schema, Dialect::Sqlite))
        .unwrap();
    source
        .execute_batch(
            r#"
            INSERT INTO "c2" ("code", "name") VALUES (4, 'Afghanistan');
            INSERT INTO "r2" ("code", "name") VALUES (6, 'South Asia');
            INSERT INTO "g2" ("code", "summary") VALUES (1, 'Taliban');
            INSERT INTO "attack_types" ("attacktype", "attacktypedescription")
                VALUES (3, 'Bombing/Explosion');
            INSERT INTO "target_types" ("id", "target_type") VALUES (4, 'Military');
            INSERT INTO "global" (
                "eventid", "iyear", "imonth", "iday", "latitude", "longitude", "summary",
                "targtype1", "nkill", "extended", "suicide", "success",
                "country", "region", "attacktype1", "groupid"
            ) VALUES
                ('200101010001', 2001, 1, 1, NULL, NULL, 'Roadside bomb', 4, 3, 0, 0, 1, 4, 6, 3, 1);
            "#,
        )
        .unwrap();

    let repo = FacetRepository::new(source, QueryBuilder::default().with_schema(schema));
    let events = repo.find_by(&Filter::new()).unwrap();

    assert_eq!(events.len(), 1);
    assert_eq!(events[0].country, "Afghanistan");
    assert_eq!(events[0].region, "South Asia");
    assert_eq!(events[0].group, "Taliban");
    assert_eq!(events[0].summary.as_deref(), Some("Roadside bomb"));
}

#[test]
fn test_missing_tables_is_execution_error() {
    let source = SqliteSource::open_in_memory().unwrap();
    let err = FacetRepository::with_defaults(source)
        .find_by(&Filter::new())
        .unwrap_err();
    assert!(matches!(err, QueryError::Execution(_)));
}
