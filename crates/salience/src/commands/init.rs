use super::store;

pub fn run() -> anyhow::Result<()> {
    let paths = store::ledger_paths()?;
    std::fs::create_dir_all(paths.sessions_dir())?;

    let scorer = store::load_scorer(&paths)?;
    store::save_scorer(&paths, &scorer)?;

    let ledger = store::open_ledger(&paths)?;

    println!("Initialized store at {}", paths.root().display());
    println!("Active session: {}", ledger.active_session().unwrap_or("-"));
    Ok(())
}
