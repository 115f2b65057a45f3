use std::env;
use std::path::PathBuf;

const DATA_DIR_ENV: &str = "COPIER_BILLING_DATA_DIR";
const DATA_DIR_NAME: &str = ".copier-billing";

pub fn resolve_data_dir() -> Result<PathBuf, String> {
    if let Ok(dir) = env::var(DATA_DIR_ENV) {
        if !dir.trim().is_empty() {
            return Ok(PathBuf::from(dir));
        }
    }
    let home = env::var("HOME").map_err(|err| format!("resolve HOME: {}", err))?;
    Ok(PathBuf::from(home).join(DATA_DIR_NAME))
}
