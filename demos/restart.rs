use clap::Parser;
use log::info;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use genbdd::config::BddConfig;
use genbdd::error::{BddResult, CapacityExceeded};
use genbdd::manager::BddManager;
use genbdd::reference::Ref;

#[derive(Debug, Parser)]
#[command(author, version)]
struct Cli {
    /// Number of variables.
    #[arg(long, value_name = "INT", default_value = "16")]
    vars: usize,

    /// Table size (in bits, so the actual size is `2^bits` slots).
    #[arg(long, value_name = "INT", default_value = "12")]
    bits: u32,

    /// Maximum number of live nodes (defaults to the table size minus one).
    #[arg(long, value_name = "INT")]
    limit: Option<usize>,

    /// Number of random functions to build.
    #[arg(long, value_name = "INT", default_value = "1000")]
    count: usize,

    /// Number of clauses per function.
    #[arg(long, value_name = "INT", default_value = "8")]
    clauses: usize,

    /// Random seed.
    #[arg(long, value_name = "INT", default_value = "42")]
    seed: u64,
}

/// A random CNF of `clauses` clauses with three literals each.
fn random_cnf(mgr: &BddManager, rng: &mut impl Rng, clauses: usize) -> BddResult<Ref> {
    let mut res = mgr.one();
    for _ in 0..clauses {
        let mut clause = mgr.zero();
        for _ in 0..3 {
            let v = mgr.var(rng.gen_range(0..mgr.num_vars()));
            clause = mgr.apply_or(clause, if rng.gen_bool(0.5) { -v } else { v })?;
        }
        res = mgr.apply_and(res, clause)?;
    }
    Ok(res)
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    simplelog::TermLogger::init(
        simplelog::LevelFilter::Info,
        simplelog::Config::default(),
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    )?;

    let time_total = std::time::Instant::now();

    let args = Cli::parse();
    println!("args = {:?}", args);

    let mut config = BddConfig::new(args.vars, args.bits);
    if let Some(limit) = args.limit {
        config = config.with_node_limit(limit);
    }
    let mgr = BddManager::with_config(config);
    println!("mgr = {:?}", mgr);

    let mut rng = SmallRng::seed_from_u64(args.seed);
    let mut built = 0;
    let mut largest = 0;
    for i in 0..args.count {
        // Keep the generator state so a retry builds the same function.
        let snapshot = rng.clone();
        let f = match random_cnf(&mgr, &mut rng, args.clauses) {
            Ok(f) => f,
            Err(CapacityExceeded) => {
                info!("Function #{} exhausted the table ({} live), restarting", i, mgr.num_nodes());
                mgr.restart();
                rng = snapshot;
                random_cnf(&mgr, &mut rng, args.clauses)?
            }
        };
        built += 1;
        largest = largest.max(mgr.dag_size(f));
    }

    println!("Built {} functions, largest has {} nodes", built, largest);
    println!("Restarts: {}", mgr.num_restarts());
    mgr.print_info(&mut std::io::stdout())?;

    mgr.shutdown();
    println!("\nAll done in {:.3} s", time_total.elapsed().as_secs_f64());
    Ok(())
}
