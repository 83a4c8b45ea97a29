use quickparse_config::Config;
use tracing::info;

/// Strategy for displaying configuration information.
///
/// This strategy outputs where the configuration lives and the values a
/// run will use, defaults included.
#[derive(Debug, Clone, Copy)]
pub struct InfoStrategy;

impl super::CommandStrategy for InfoStrategy {
    type Input = ();

    async fn execute(&self, _input: Self::Input) -> anyhow::Result<()> {
        let config_path = Config::config_path()?;
        let config = Config::load()?;

        println!("=== quickparse Configuration ===\n");

        println!("Config File:");
        println!("  Path: {}", config_path.display());
        if config_path.exists() {
            println!("  Status: Found");
        } else {
            info!("No config file, showing defaults");
            println!("  Status: Not found (run 'quickparse init' to create it)");
        }
        println!();

        println!("Run Options:");
        println!("  Keyword Label: {}", config.run.keyword_label);
        println!("  Extensions: {}", config.run.extensions.join(", "));
        println!("  Worker Multiplier: {}", config.run.worker_multiplier);
        println!("  Worker Threads: {}", config.run.workers());
        println!();

        println!("Output:");
        println!("  Report Format: {}", config.report_format);
        println!("  Log Level: {}", config.log_level);

        Ok(())
    }
}
