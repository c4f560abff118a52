use climat::load_data;
use plotters::prelude::*;

fn to_chrono(date: time::Date) -> chrono::NaiveDate {
    chrono::NaiveDate::from_ymd_opt(date.year(), date.month() as u32, date.day() as u32)
        .unwrap_or_else(|| panic!("chrono rejected {:?}", date))
}

fn main() {
    let input = std::env::args().nth(1).expect("Missing filename");
    println!("opening {input}");
    let output = format!("{input}.png");

    let station = load_data(&input).unwrap().expect("no usable rows in file");

    let first = station.days().next().unwrap().0;
    let last = station.days().last().unwrap().0;

    let temperatures = station
        .days()
        .map(|(_, day)| day.low_temp)
        .fold(f32::INFINITY, f32::min)
        ..station
            .days()
            .map(|(_, day)| day.high_temp)
            .fold(f32::NEG_INFINITY, f32::max);

    let root = BitMapBackend::new(&output, (1920, 1080)).into_drawing_area();
    root.fill(&WHITE).unwrap();
    let mut chart = ChartBuilder::on(&root)
        .caption(
            format!("Temperatures at {}", station.name),
            ("sans-serif", 100).into_font(),
        )
        .margin(5)
        .x_label_area_size(80)
        .y_label_area_size(80)
        .build_cartesian_2d(to_chrono(first)..to_chrono(last), temperatures)
        .unwrap();

    chart.configure_mesh().draw().unwrap();

    chart
        .draw_series(LineSeries::new(
            station
                .days()
                .map(|(date, day)| (to_chrono(date), day.avg_temp)),
            GREEN,
        ))
        .unwrap()
        .label("Mean temperature")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], GREEN));
    chart
        .draw_series(LineSeries::new(
            station
                .days()
                .map(|(date, day)| (to_chrono(date), day.high_temp)),
            RED,
        ))
        .unwrap()
        .label("High temperature")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], RED));
    chart
        .draw_series(LineSeries::new(
            station
                .days()
                .map(|(date, day)| (to_chrono(date), day.low_temp)),
            BLUE,
        ))
        .unwrap()
        .label("Low temperature")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], BLUE));

    chart
        .configure_series_labels()
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()
        .unwrap();

    root.present().unwrap();
}
