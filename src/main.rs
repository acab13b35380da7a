// Entry point and high-level flow.
//
// The pipeline is a straight line: load the config, build the base
// project/rate table, fold each configured drop-stat table into it,
// aggregate by canonical code, restore the weighted means, and write the
// final CSV. Any failure aborts the run before the output file is
// touched.
mod config;
mod error;
mod loader;
mod merge;
mod output;
mod types;
mod util;

use error::Result;

const CONFIG_PATH: &str = "raw/merge.yml";
const BASE_TABLE_PATH: &str = "raw/research4_projects.json";
const OUTPUT_PATH: &str = "data.csv";

fn run() -> Result<()> {
    let conf = config::Config::load(CONFIG_PATH)?;

    let mut table = loader::load_base_table(BASE_TABLE_PATH, &conf.project_map)?;
    println!(
        "Loaded {} project rate rows from {}",
        util::format_int(table.len() as i64),
        BASE_TABLE_PATH
    );

    for spec in &conf.merge {
        let drops = loader::load_drop_table(format!("raw/{}.json", spec.name))?;
        println!(
            "Merging {}: {} drop rows, {} mapped statistics",
            spec.name,
            util::format_int(drops.len() as i64),
            util::format_int(spec.item_map.len() as i64)
        );
        table = merge::merge_drop_stats(table, spec, &drops);
    }

    let durations = conf.duration_table();
    let rows = merge::restore_means(merge::aggregate(&table, &durations, &conf.cost_map)?);
    println!(
        "Aggregated {} projects into {} codes\n",
        util::format_int(table.len() as i64),
        util::format_int(rows.len() as i64)
    );

    let cells = output::select_columns(&rows, &conf.result_columns)?;
    output::write_csv(OUTPUT_PATH, &conf.result_columns, &cells)?;
    output::preview_table(&conf.result_columns, &cells, 5);
    println!("(Full table exported to {})", OUTPUT_PATH);
    Ok(())
}

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
