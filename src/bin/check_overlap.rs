// check_overlap.rs - Standalone utility comparing two barcode lists

use clap::{Arg, Command};
use std::path::Path;

use barcode_designer::core::check_lists;
use barcode_designer::data::loaders::read_two_column_lists;
use barcode_designer::logging::init_logging;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let matches = Command::new("Barcode Overlap Checker")
        .version(barcode_designer::VERSION)
        .about("Reports repeated barcodes within and shared barcodes between two lists")
        .arg(Arg::new("csv")
            .long("csv")
            .value_name("FILE")
            .help("Headerless CSV with one barcode list per column")
            .required(true))
        .arg(Arg::new("klength")
            .short('K')
            .long("klength")
            .value_name("LENGTH")
            .help("Barcode length (default: 8)")
            .value_parser(clap::value_parser!(usize))
            .default_value("8"))
        .get_matches();

    init_logging(false);

    let csv_path = matches
        .get_one::<String>("csv")
        .ok_or("--csv is required")?;
    let klength = matches
        .get_one::<usize>("klength")
        .copied()
        .ok_or("--klength is required")?;

    let lists = read_two_column_lists(Path::new(csv_path))?;
    let report = check_lists(&lists, klength)?;

    for barcode in &report.first_repeated {
        println!("🔁 list 1: {}", barcode);
    }
    for barcode in &report.second_repeated {
        println!("🔁 list 2: {}", barcode);
    }
    for barcode in &report.shared {
        println!("🔗 shared: {}", barcode);
    }
    println!("{}", report.summary());

    Ok(())
}
