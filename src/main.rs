use std::sync::Arc;

use tokio::io::BufReader;

use docs_skill::core::SkillConfig;
use docs_skill::driver;
use docs_skill::health;
use docs_skill::logging;
use docs_skill::skill::Services;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Keep the guard until exit so buffered log lines are flushed
    let _guard = logging::init_logging()?;

    tracing::info!("=== Docs Skill Starting ===");

    let config = SkillConfig::from_env()?;
    let services = Services::from_config(&config);
    let skill = Arc::new(health::build_skill(config, services));

    // One event per stdin line, one reply per stdout line, in order
    driver::serve_lines(
        skill,
        BufReader::new(tokio::io::stdin()),
        tokio::io::stdout(),
    )
    .await?;

    tracing::info!("=== Docs Skill Shutting Down ===");

    Ok(())
}
