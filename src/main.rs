use digipin_rs::{DigipinError, PinCell, api};

fn main() -> Result<(), DigipinError> {
    env_logger::init();

    let lat = 28.622788;
    let lon = 77.213033;

    let cell = PinCell::from_lat_lon(lat, lon)?;

    println!("DIGIPIN: {}", cell.formatted());
    println!("Center: ({}, {})", cell.latitude(), cell.longitude());
    println!("Bounds: {}", cell.bounds());
    println!("Grid size: {:.2} m", cell.grid_size_meters());
    println!("{}", cell.precision_description());

    let nearby = api::find_codes_in_radius(&(lon, lat), 10.0)?;
    for warning in &nearby.warnings {
        println!("Warning: {}", warning);
    }
    println!("Cells within 10 m: {}", nearby.value.len());

    Ok(())
}
