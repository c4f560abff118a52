use climat::load_country;
use time::Month;

fn main() {
    let mut args = std::env::args().skip(1);
    let folder = args.next().expect("Missing data folder");
    let name = args.next().unwrap_or_else(|| String::from("Canada"));

    let country = load_country(&folder, name).unwrap();

    let headers = [
        "Location",
        "record high <br/> for Dec 25",
        "december <br/> average",
        "contiguous <br/> precipitation",
        "percentage <br/> snowfall",
    ];

    let mut report = String::new();
    report.push_str(&headers.join(" | "));
    report.push('\n');
    let rule: Vec<String> = headers.iter().map(|h| "-".repeat(h.len())).collect();
    report.push_str(&rule.join(":|-"));
    report.push_str(":\n");

    for location in country.locations() {
        let record_high = location.record_high(Month::December, 25).unwrap();
        let december = match location.monthly_average()["Dec"] {
            Some(average) => format!("{average:.1}"),
            None => String::from("no data"),
        };
        let (_, streak) = location.contiguous_precipitation().unwrap();
        let snow_share = location.percentage_snowfall().unwrap();
        report.push_str(&format!(
            "{:<20} | {:<10.4} | {} | {:<24} | {:<18.2}\n",
            location.name, record_high, december, streak, snow_share
        ));
    }

    std::fs::write("report.md", report).unwrap();
    println!("wrote report.md");
}
