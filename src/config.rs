use std::fmt;

/// Names of the positional entry parameters, in order
pub const POSITIONAL_NAMES: [&str; 5] = [
    "window_width",
    "window_height",
    "cell_size",
    "initial_speed",
    "randomize_on_start",
];

/// Largest accepted window width or height, in pixels
pub const MAX_WINDOW_DIMENSION: u32 = 16_384;

/// Startup parameters for a game
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub window_width: u32,
    pub window_height: u32,
    pub cell_size: u32,
    pub speed: u32,
    pub randomize: bool,
    pub seed: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            window_width: 640,
            window_height: 480,
            cell_size: 10,
            speed: 1,
            randomize: false,
            seed: None,
        }
    }
}

impl Settings {
    /// Parses up to five positional integers, falling back to defaults for
    /// any that are missing, and validates the result
    pub fn from_positional<T: AsRef<str>>(args: &[T]) -> Result<Self, ConfigError> {
        if args.len() > POSITIONAL_NAMES.len() {
            return Err(ConfigError::TooManyArguments(args.len()));
        }

        let mut values = [640, 480, 10, 1, 0];
        for (i, arg) in args.iter().enumerate() {
            let arg = arg.as_ref();
            values[i] = arg.trim().parse::<i64>().map_err(|_| ConfigError::NotAnInteger {
                name: POSITIONAL_NAMES[i],
                value: arg.to_owned(),
            })?;
        }

        let [width, height, cell_size, speed, randomize] = values;
        let settings = Self {
            window_width: positive("window_width", width)?,
            window_height: positive("window_height", height)?,
            cell_size: positive("cell_size", cell_size)?,
            speed: positive("initial_speed", speed)?,
            randomize: randomize != 0,
            seed: None,
        };
        settings.validate()?;
        Ok(settings)
    }

    pub fn with_seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }

    /// Rejects settings that would produce a degenerate grid or a stalled game
    pub fn validate(&self) -> Result<(), ConfigError> {
        positive("window_width", self.window_width.into())?;
        positive("window_height", self.window_height.into())?;
        positive("cell_size", self.cell_size.into())?;
        positive("initial_speed", self.speed.into())?;
        at_most("window_width", self.window_width, MAX_WINDOW_DIMENSION)?;
        at_most("window_height", self.window_height, MAX_WINDOW_DIMENSION)?;

        if self.cell_size > self.window_width || self.cell_size > self.window_height {
            return Err(ConfigError::CellLargerThanWindow {
                cell_size: self.cell_size,
                width: self.window_width,
                height: self.window_height,
            });
        }
        Ok(())
    }

    /// Grid dimensions in cells as `(width, height)`
    #[inline]
    pub fn grid_size(&self) -> (usize, usize) {
        (
            (self.window_width / self.cell_size) as usize,
            (self.window_height / self.cell_size) as usize,
        )
    }
}

fn positive(name: &'static str, value: i64) -> Result<u32, ConfigError> {
    match u32::try_from(value) {
        Ok(v) if v > 0 => Ok(v),
        _ => Err(ConfigError::NotPositive { name, value }),
    }
}

fn at_most(name: &'static str, value: u32, max: u32) -> Result<(), ConfigError> {
    if value > max {
        return Err(ConfigError::TooLarge { name, value, max });
    }
    Ok(())
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    TooManyArguments(usize),
    NotAnInteger {
        name: &'static str,
        value: String,
    },
    NotPositive {
        name: &'static str,
        value: i64,
    },
    TooLarge {
        name: &'static str,
        value: u32,
        max: u32,
    },
    CellLargerThanWindow {
        cell_size: u32,
        width: u32,
        height: u32,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TooManyArguments(n) => write!(
                f,
                "expected at most {} positional arguments, got {}",
                POSITIONAL_NAMES.len(),
                n
            ),
            Self::NotAnInteger { name, value } => {
                write!(f, "{name} must be an integer, got {value:?}")
            }
            Self::NotPositive { name, value } => {
                write!(f, "{name} must be a positive integer, got {value}")
            }
            Self::TooLarge { name, value, max } => {
                write!(f, "{name} must be at most {max}, got {value}")
            }
            Self::CellLargerThanWindow {
                cell_size,
                width,
                height,
            } => write!(
                f,
                "cell_size {cell_size} does not fit in a {width}x{height} window"
            ),
        }
    }
}

impl std::error::Error for ConfigError {}
