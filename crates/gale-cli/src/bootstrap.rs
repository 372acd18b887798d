use gale_config::GaleConfig;

use crate::cli::GlobalFlags;

/// Load `.env`, the layered config files and environment, then apply the
/// global command-line overrides on top.
pub fn load_config(flags: &GlobalFlags) -> anyhow::Result<GaleConfig> {
    let mut config = GaleConfig::load_with_dotenv()?;
    apply_global_flags(&mut config, flags);
    Ok(config)
}

fn apply_global_flags(config: &mut GaleConfig, flags: &GlobalFlags) {
    if let Some(api_base) = &flags.api_base {
        config.service.api_base.clone_from(api_base);
    }
    if let Some(token) = &flags.admin_token {
        config.service.admin_token.clone_from(token);
    }
    if let Some(repo_root) = &flags.repo_root {
        config.simulation.repo_root.clone_from(repo_root);
    }
}
