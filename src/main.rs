// main.rs - CLI entry point

use barcode_designer::cli::Config;
use barcode_designer::logging::init_logging;
use barcode_designer::output::{
    write_bad_pairs, write_distance_report, write_frequency_table, write_new_barcodes, write_summary,
    RunSummary,
};
use barcode_designer::prelude::*;
use std::time::Instant;

fn main() {
    if let Err(e) = run_main() {
        eprintln!("❌ ERROR: {}", e);
        std::process::exit(1);
    }
}

fn run_main() -> Result<()> {
    let mut args: Args = argh::from_env();

    // Handle generate config first
    if args.generate_config {
        let sample_config = Config::generate_sample();
        println!("{}", sample_config);
        println!("\n💡 Save this content to a .toml file and use --config /path/to/config.toml");
        return Ok(());
    }

    // Load configuration file if specified
    if let Some(config_path) = args.config.clone() {
        args = args
            .with_config_file(&config_path)
            .map_err(BarcodeError::Config)?;
    }

    init_logging(args.verbose);
    let settings = validate_args(&args).map_err(BarcodeError::Config)?;

    println!("🚀 bcdesign v{}", barcode_designer::VERSION);

    // Configure thread pool
    if let Some(n) = args.threads {
        rayon::ThreadPoolBuilder::new()
            .num_threads(n)
            .build_global()
            .map_err(|e| BarcodeError::Config(format!("Failed to configure thread pool: {}", e)))?;
        println!("🧵 Threads: {}", n);
    } else {
        let num_threads = rayon::current_num_threads();
        println!("🧵 Threads: {} (auto-detected)", num_threads);
    }

    let start = Instant::now();
    let entries = read_barcode_list(&settings.barcodes_path)?;
    let (population, duplicates) = BarcodePopulation::from_entries(&entries, settings.klength)?;

    if !duplicates.is_empty() {
        println!("🔁 {} barcodes appear more than once in the list:", duplicates.len());
        for barcode in &duplicates.duplicates {
            println!("   {}", barcode);
        }
    }
    println!(
        "📊 {} unique barcodes of length {}",
        population.len(),
        population.k()
    );

    if args.dry_run {
        println!("✅ Dry run completed: inputs are valid");
        return Ok(());
    }

    let designer = BarcodeSetDesigner::new(settings.generator).with_progress(!args.quiet);
    let evaluation = designer.evaluate(&population)?;

    write_frequency_table(&settings.output.distributions, &evaluation.table)?;
    write_distance_report(&settings.output.distances, &evaluation.report)?;
    write_bad_pairs(&settings.output.bad_pairs, &evaluation.report.bad_pairs)?;

    println!(
        "📏 The average median hamming distance of barcodes in the set is {}",
        evaluation.report.mean_median
    );
    println!(
        "📏 The smallest hamming distance between any two barcodes in the set is {}",
        evaluation.report.global_min
    );
    if !evaluation.report.bad_pairs.is_empty() {
        println!(
            "⚠️  {} barcode pairs are closer than {}",
            evaluation.report.bad_pairs.len(),
            settings.generator.min_hamming
        );
    }

    let mut summary = RunSummary::new(
        &settings.barcodes_path,
        settings.klength,
        &duplicates,
        &evaluation,
        settings.seed,
    );

    if settings.new_count > 0 {
        println!("🧬 Designing {} new barcodes...", settings.new_count);
        let mut rng = create_rng(settings.seed);
        let result = designer.design(population, &evaluation, settings.new_count, &mut rng)?;

        write_new_barcodes(&settings.output.new_barcodes, result.new_barcodes())?;
        if result.failed() > 0 {
            println!(
                "⚠️  Failed to create {} of {} barcodes; relax --min-hamming or --min-target",
                result.failed(),
                settings.new_count
            );
        }
        summary = summary.with_design(&result);
    }

    if let Some(path) = &settings.summary_path {
        write_summary(path, &summary)?;
    }

    println!("✅ Completed in {:.2}s", start.elapsed().as_secs_f64());
    Ok(())
}
