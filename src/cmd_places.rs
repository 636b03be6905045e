//! Place resolution and area filter commands.

use tracing::info;

use foodroute_config::Config;
use foodroute_places::{
    filter_places_in_area, format_places, resolve_places, AreaFilter, GooglePlacesResolver,
    SearchSettings,
};
use foodroute_protocols::{load_typed, save_typed, FixedPause, KeyValueStore, PlaceError, PlaceMap};
use foodroute_store::{KEY_AREA_PLACES, KEY_PLACES, KEY_RESTAURANT_NAMES};

/// Resolve stored names and store the keyed places under `places`.
pub(crate) async fn resolve(
    config: &Config,
    store: &dyn KeyValueStore,
) -> Result<PlaceMap, Box<dyn std::error::Error>> {
    let Some(names) = load_typed::<Vec<String>>(store, KEY_RESTAURANT_NAMES).await? else {
        return Err(format!("No {} in store; run `scrape` first", KEY_RESTAURANT_NAMES).into());
    };

    let api_key = config.places.resolved_api_key().ok_or(PlaceError::MissingApiKey)?;
    let resolver = GooglePlacesResolver::with_base_url(
        api_key,
        config.places.base_url.clone(),
        SearchSettings::from(&config.places),
    )?;

    let records = resolve_places(&resolver, &names, &FixedPause::from_millis(config.places.pause_ms)).await?;

    let places = format_places(&records);
    save_typed(store, KEY_PLACES, &places).await?;
    info!("Stored {} places under {}", places.len(), KEY_PLACES);
    Ok(places)
}

/// Filter stored places to the configured area and store them under
/// `area_places`.
pub(crate) async fn filter(
    config: &Config,
    store: &dyn KeyValueStore,
) -> Result<PlaceMap, Box<dyn std::error::Error>> {
    let Some(places) = load_typed::<PlaceMap>(store, KEY_PLACES).await? else {
        return Err(format!("No {} in store; run `resolve` first", KEY_PLACES).into());
    };

    let area = filter_places_in_area(&places, &AreaFilter::from(&config.area));
    info!(
        "{} of {} places within {} km or matching {:?}",
        area.len(),
        places.len(),
        config.area.max_distance_km,
        config.area.address_keyword
    );

    save_typed(store, KEY_AREA_PLACES, &area).await?;
    Ok(area)
}
