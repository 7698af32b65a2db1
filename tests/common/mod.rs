//! Shared fixtures for integration tests

use threatgraph::schema::{ColumnType, COLUMN_COUNT, EVENT_COLUMNS};

/// Build a full-width raw event row with the pipeline-relevant cells set
/// and every other cell holding a type-correct placeholder.
pub fn make_row(
    global_event_id: i64,
    root_code: &str,
    actor1_geo_full_name: Option<&str>,
    actor1_geo_country_code: Option<&str>,
    actor2_geo_country_code: Option<&str>,
    goldstein_scale: Option<f64>,
) -> String {
    let mut cells: Vec<String> = EVENT_COLUMNS
        .iter()
        .map(|(_, ty)| match ty {
            ColumnType::Int => "0".to_string(),
            ColumnType::Double | ColumnType::Float => "0.0".to_string(),
            ColumnType::String => String::new(),
        })
        .collect();
    assert_eq!(cells.len(), COLUMN_COUNT);

    let mut set = |name: &str, value: String| {
        let idx = EVENT_COLUMNS
            .iter()
            .position(|(col, _)| *col == name)
            .unwrap();
        cells[idx] = value;
    };

    set("GLOBALEVENTID", global_event_id.to_string());
    set("EventRootCode", root_code.to_string());
    set(
        "GoldsteinScale",
        goldstein_scale.map(|g| g.to_string()).unwrap_or_default(),
    );
    set(
        "Actor1Geo_FullName",
        actor1_geo_full_name.unwrap_or_default().to_string(),
    );
    set(
        "Actor1Geo_CountryCode",
        actor1_geo_country_code.unwrap_or_default().to_string(),
    );
    set(
        "Actor2Geo_CountryCode",
        actor2_geo_country_code.unwrap_or_default().to_string(),
    );

    cells.join("\t")
}
