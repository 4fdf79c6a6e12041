use anyhow::{Context, Result};
use css_dataset::{dataset::load::load_csv, Dataset, Record, Segment};
use std::{env, path::Path, process::exit};

fn main() {
    // Expect exactly one CLI argument: path to a dataset CSV.
    let args: Vec<String> = env::args().collect();
    if args.len() != 2 {
        eprintln!("Usage: {} <DATASET_CSV>", args[0]);
        exit(1);
    }
    if let Err(e) = print_stats(Path::new(&args[1])) {
        eprintln!("Error: {:#}", e);
        exit(1);
    }
}

fn print_stats(path: &Path) -> Result<()> {
    let dataset =
        load_csv(path).with_context(|| format!("loading dataset {}", path.display()))?;

    println!("=== Dataset: {} ===", path.display());
    println!("Records:              {}", dataset.len());
    println!();

    for (label, segment) in [("Low tech", Segment::Low), ("High tech", Segment::High)] {
        print_segment(label, segment, &dataset);
    }
    Ok(())
}

fn print_segment(label: &str, segment: Segment, dataset: &Dataset) {
    let records: Vec<&Record> = dataset
        .iter()
        .filter(|r| r.raw.segment == segment)
        .collect();

    println!("--- {} (segment {}) ---", label, segment.code());
    println!("  Records:            {}", records.len());
    if records.is_empty() {
        println!();
        return;
    }

    let n = records.len() as f64;
    let stocked_out = records.iter().filter(|r| r.raw.stock_out).count();
    let mean_css = records.iter().map(|r| r.raw.css).sum::<f64>() / n;
    let share = |pred: fn(&Record) -> bool| {
        records.iter().filter(|r| pred(r)).count() as f64 / n * 100.0
    };

    println!("  Stocked out:        {}", stocked_out);
    println!("  Mean CSS:           {:.2}", mean_css);
    println!(
        "  Position off:       {:.1}%",
        share(|r| r.derived.position.out_of_range)
    );
    println!(
        "  Price off:          {:.1}%",
        share(|r| r.derived.price.out_of_range)
    );
    println!(
        "  MTBF off:           {:.1}%",
        share(|r| r.derived.reliability.out_of_range)
    );
    println!(
        "  Age off:            {:.1}%",
        share(|r| r.derived.age.out_of_range)
    );
    println!();
}
