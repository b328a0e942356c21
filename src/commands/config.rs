use anyhow::Result;
use package_cloud::config::load_config;

pub fn handle_config(show: bool, validate: bool, quiet: bool) -> Result<()> {
    if !show && !validate {
        if !quiet {
            eprintln!("Use --show or --validate");
        }
        std::process::exit(1);
    }

    match load_config() {
        Ok(config) => {
            if show && !quiet {
                println!("{}", serde_json::to_string_pretty(&config)?);
            }
            if validate && !quiet {
                println!("✅ Configuration is valid");
            }
        }
        Err(e) => {
            if !quiet {
                eprintln!("❌ Configuration validation failed: {:#}", e);
            }
            std::process::exit(1);
        }
    }

    Ok(())
}
