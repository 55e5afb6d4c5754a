use std::{env, time::Duration};

use eyecons_common::{models::VariantConfig, tilesets::TileSet};
use rand::Rng;
use tracing::warn;

#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub variant: VariantConfig,
    pub tick: Duration,
    pub seed: Option<u64>,
}

impl Settings {
    pub fn from_env() -> Self {
        Self::from_vars(|key| env::var(key).ok(), &mut rand::rng())
    }

    pub fn from_vars<F, R>(var: F, rng: &mut R) -> Self
    where
        F: Fn(&str) -> Option<String>,
        R: Rng + ?Sized,
    {
        let variant_name = var("EYECONS_VARIANT").unwrap_or_else(|| "quickie".to_string());
        let mut variant = parse_variant(&variant_name, rng).unwrap_or_else(|| {
            warn!("Unknown variant {:?}, using quickie", variant_name);
            VariantConfig::quickie()
        });

        let default_seconds = variant.round_duration_seconds;
        variant.round_duration_seconds = var("EYECONS_ROUND_SECONDS")
            .unwrap_or_else(|| default_seconds.to_string())
            .parse()
            .unwrap_or(default_seconds);

        let tick_millis: u64 = var("EYECONS_TICK_MILLIS")
            .unwrap_or_else(|| "1000".to_string())
            .parse()
            .unwrap_or(1000);

        let seed = var("EYECONS_SEED").and_then(|seed| seed.parse().ok());

        Self {
            variant,
            tick: Duration::from_millis(tick_millis.max(1)),
            seed,
        }
    }
}

/// `quickie`, `classic`, `random` (a random tile set) or `set:<id>`.
pub fn parse_variant<R: Rng + ?Sized>(name: &str, rng: &mut R) -> Option<VariantConfig> {
    match name.trim() {
        "quickie" => Some(VariantConfig::quickie()),
        "classic" => Some(VariantConfig::classic()),
        "random" => Some(TileSet::random(rng).variant()),
        other => {
            let id = other.strip_prefix("set:")?.parse().ok()?;
            TileSet::find(id).map(TileSet::variant)
        }
    }
}
