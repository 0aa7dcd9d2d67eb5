use gatetime_core::catalog::arrival_city;
use gatetime_core::{format_clock, Catalog, Config};

pub fn flights(query: Option<&str>, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let catalog = Catalog::builtin();
    let hits = catalog.search_flights(query.unwrap_or(""));

    if json {
        println!("{}", serde_json::to_string_pretty(&hits)?);
        return Ok(());
    }

    if hits.is_empty() {
        println!("No matching flights.");
        return Ok(());
    }

    let config = Config::load_or_default();
    let offset = crate::render::display_offset(&config);
    for flight in hits {
        let city = arrival_city(&flight.arrival_airport)
            .map(|c| format!(" ({c})"))
            .unwrap_or_default();
        println!(
            "{:<12} {:<7} {} → {}{}  departs {}  {}",
            flight.id,
            flight.flight_number,
            flight.departure_airport,
            flight.arrival_airport,
            city,
            format_clock(flight.departure_time, offset, config.display.time_format_24h),
            if flight.is_international { "international" } else { "domestic" },
        );
    }
    Ok(())
}

pub fn origins(query: Option<&str>, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let catalog = Catalog::builtin();
    let hits = catalog.search_origins(query.unwrap_or(""));

    if json {
        println!("{}", serde_json::to_string_pretty(&hits)?);
        return Ok(());
    }

    if hits.is_empty() {
        println!("No matching origins. Any label works with --origin.");
        return Ok(());
    }

    for origin in hits {
        println!("{:<28} {}  ({})", origin.id, origin.label, origin.address);
    }
    Ok(())
}
