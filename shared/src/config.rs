use log::warn;

pub const DEFAULT_DIVISIONS: usize = 50;
pub const DEFAULT_TICKS_PER_SECOND: u32 = 10;
pub const DEFAULT_WINDOW_WIDTH: u32 = 500;
pub const DEFAULT_WINDOW_HEIGHT: u32 = 500;
pub const DEFAULT_TITLE: &str = "Game of Life";
/// Largest accepted grid side; the grid holds `divisions * divisions` cells.
pub const MAX_DIVISIONS: usize = 1024;

/// Startup settings. Every field is fixed for the life of the process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub divisions: usize,
    pub ticks_per_second: u32,
    pub window_width: u32,
    pub window_height: u32,
    pub title: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            divisions: DEFAULT_DIVISIONS,
            ticks_per_second: DEFAULT_TICKS_PER_SECOND,
            window_width: DEFAULT_WINDOW_WIDTH,
            window_height: DEFAULT_WINDOW_HEIGHT,
            title: DEFAULT_TITLE.to_string(),
        }
    }
}

impl Config {
    /// Read `LIFE_DIVISIONS`, `LIFE_TPS`, `LIFE_WIDTH`, `LIFE_HEIGHT` and
    /// `LIFE_TITLE` from the environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from any key lookup. Missing, unparsable,
    /// non-positive or oversized numbers fall back to their defaults.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Config::default();
        let title = lookup("LIFE_TITLE")
            .filter(|title| !title.trim().is_empty())
            .unwrap_or(defaults.title);

        Self {
            divisions: positive_or(
                &lookup,
                "LIFE_DIVISIONS",
                defaults.divisions as u32,
                MAX_DIVISIONS as u32,
            ) as usize,
            ticks_per_second: positive_or(&lookup, "LIFE_TPS", defaults.ticks_per_second, u32::MAX),
            window_width: positive_or(&lookup, "LIFE_WIDTH", defaults.window_width, u32::MAX),
            window_height: positive_or(&lookup, "LIFE_HEIGHT", defaults.window_height, u32::MAX),
            title,
        }
    }
}

fn positive_or<F>(lookup: &F, key: &str, default: u32, max: u32) -> u32
where
    F: Fn(&str) -> Option<String>,
{
    let Some(raw) = lookup(key) else {
        return default;
    };

    match raw.trim().parse::<i64>() {
        Ok(value) if value > 0 && value <= i64::from(max) => value as u32,
        Ok(value) => {
            warn!("{key}={value} is out of range, using {default}");
            default
        }
        Err(err) => {
            warn!("{key}={raw:?} is not a number ({err}), using {default}");
            default
        }
    }
}
