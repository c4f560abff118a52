fn main() {
    let base_url = "https://climate.weather.gc.ca/climate_data/bulk_data_e.html";

    let station_id = std::env::args().nth(1).expect("Missing station id");

    for year in 2006..=2024 {
        // https://climate.weather.gc.ca/climate_data/bulk_data_e.html?format=csv&stationID=4055&Year=2017&Month=1&Day=1&timeframe=2
        let url = format!(
            "{base_url}?format=csv&stationID={station_id}&Year={year}&Month=1&Day=1&timeframe=2"
        );
        let response = match ureq::get(&url).call() {
            Ok(response) => response,
            Err(e) => {
                eprintln!("Could not fetch daily data for {year} with url: `{url}`. {e}");
                continue;
            }
        };

        let data = response.into_string().unwrap();
        std::fs::write(format!("{station_id}_{year}.csv"), &data).unwrap();

        println!("Wrote daily data of {year}");
    }
}
