use climat::load_data;

fn main() {
    let file = std::env::args().nth(1).expect("Missing filename");
    println!("opening {file}");

    let station = load_data(&file).unwrap().expect("no usable rows in file");

    println!(
        "{} ({}, {}): {} days of data",
        station.name,
        station.coordinates.0,
        station.coordinates.1,
        station.len()
    );
    match station.percentage_snowfall() {
        Ok(share) => println!("Snow share of precipitation: {:.2}", share),
        Err(e) => println!("Snow share of precipitation: {e}"),
    }
}
