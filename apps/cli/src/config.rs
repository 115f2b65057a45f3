use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use billing_core::DEFAULT_TAX_RATE;

const CONFIG_FILE_NAME: &str = "config.toml";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CliConfig {
    pub tax_rate: f64,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            tax_rate: DEFAULT_TAX_RATE,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ConfigLoad {
    pub config: CliConfig,
    pub file: PathBuf,
    pub created: bool,
}

pub fn load_or_create(data_dir: &Path) -> Result<ConfigLoad, String> {
    fs::create_dir_all(data_dir)
        .map_err(|err| format!("create data dir {}: {}", data_dir.display(), err))?;
    let file = data_dir.join(CONFIG_FILE_NAME);

    if file.exists() {
        let contents = fs::read_to_string(&file)
            .map_err(|err| format!("read config {}: {}", file.display(), err))?;
        let config: CliConfig = toml::from_str(&contents)
            .map_err(|err| format!("parse config {}: {}", file.display(), err))?;
        return Ok(ConfigLoad {
            config,
            file,
            created: false,
        });
    }

    let config = CliConfig::default();
    let contents =
        toml::to_string_pretty(&config).map_err(|err| format!("serialize config: {}", err))?;
    fs::write(&file, contents)
        .map_err(|err| format!("write config {}: {}", file.display(), err))?;

    Ok(ConfigLoad {
        config,
        file,
        created: true,
    })
}
