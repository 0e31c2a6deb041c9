use genbdd::manager::BddManager;

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    simplelog::TermLogger::init(
        simplelog::LevelFilter::Debug,
        simplelog::Config::default(),
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    )?;

    let mgr = BddManager::new(3, 10);
    println!("mgr = {:?}", mgr);

    println!("zero = {}", mgr.zero());
    println!("one = {}", mgr.one());

    let a = mgr.var(0);
    println!("a = {}", a);
    let b = mgr.var(1);
    println!("b = {}", b);
    let c = mgr.var(2);
    println!("c = {}", c);

    let f = mgr.apply_or(mgr.apply_and(a, b)?, mgr.apply_and(-a, c)?)?;
    println!("f = {}", mgr.cover_string(f));
    println!("support(f) = {:?}", mgr.support(f));
    println!("dag_size(f) = {}", mgr.dag_size(f));
    println!("sat_count(f) = {}", mgr.sat_count(f));

    let cube = mgr.one_cube(f)?;
    println!("one_cube(f) = {}", mgr.cover_string(cube));

    let g = mgr.exists(f, a)?;
    println!("exists a. f = {}", mgr.cover_string(g));

    println!("{}", mgr.to_dot(&[f, g])?);

    let mut out = std::io::stdout();
    mgr.print_info(&mut out)?;
    mgr.print_table(&mut out)?;

    mgr.shutdown();
    Ok(())
}
