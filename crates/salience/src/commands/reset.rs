use super::store;
use salience_core::Scorer;

pub fn run(full: bool) -> anyhow::Result<()> {
    let paths = store::ledger_paths()?;

    let mut config = store::load_config(paths.root());
    if full {
        config.reset_clears_registry = true;
    }

    let mut scorer = Scorer::with_registry(config, store::load_registry(&paths)?);
    scorer.reset_state();
    store::save_scorer(&paths, &scorer)?;

    println!(
        "Scores reset{}",
        if full { " and registrations dropped" } else { "" }
    );
    Ok(())
}
