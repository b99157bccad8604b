use super::store;

pub fn run() -> anyhow::Result<()> {
    let paths = store::ledger_paths()?;
    let scorer = store::load_scorer(&paths)?;

    let status = scorer.get_status();
    println!("{}", serde_json::to_string_pretty(&status)?);
    Ok(())
}
