use anyhow::Result;
use eventsheet_core::config::SheetConfig;
use eventsheet_core::csv::HeaderMode;
use owo_colors::OwoColorize;

pub fn run(config: &SheetConfig) -> Result<()> {
    for name in config.sources.keys() {
        let source = config.source(name)?;

        let header = match &source.schema.header {
            HeaderMode::FirstLine => "header on line 1".to_string(),
            HeaderMode::ScanForSignature(signature) => format!("header matching '{}'", signature),
        };

        println!("{} {}", name.bold(), format!("[{}]", source.schema.name).dimmed());
        println!("   {}", source.location);
        println!("   {}", header.dimmed());
    }

    Ok(())
}
