use super::store;

pub fn run_track(
    path: &str,
    keywords: &[String],
    coactivate: &[String],
    pinned: bool,
) -> anyhow::Result<()> {
    let paths = store::ledger_paths()?;
    let mut scorer = store::load_scorer(&paths)?;

    let keywords: Vec<&str> = keywords.iter().map(String::as_str).collect();
    let partners: Vec<&str> = coactivate.iter().map(String::as_str).collect();
    scorer.register_file(path, &keywords, &partners, pinned);
    store::save_scorer(&paths, &scorer)?;

    println!(
        "Tracking {} ({} keywords{})",
        path,
        keywords.len(),
        if pinned { ", pinned" } else { "" }
    );
    Ok(())
}

pub fn run_untrack(path: &str) -> anyhow::Result<()> {
    let paths = store::ledger_paths()?;
    let mut scorer = store::load_scorer(&paths)?;

    if scorer.unregister_file(path) {
        store::save_scorer(&paths, &scorer)?;
        println!("Untracked {}", path);
    } else {
        println!("{} was not tracked", path);
    }
    Ok(())
}
