use anyhow::Result;
use eventsheet_core::config::SheetConfig;

pub fn run() -> Result<()> {
    let config_path = SheetConfig::config_path()?;
    if !config_path.exists() {
        SheetConfig::create_default_config(&config_path)?;
    }
    println!("{}", config_path.display());
    Ok(())
}
